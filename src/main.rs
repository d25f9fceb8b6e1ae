//! # tb - Terminal Task Board
//!
//! A small project and task board with an interactive terminal user
//! interface (TUI) and a scriptable CLI over the same data.
//!
//! ## Key Features
//!
//! - **Projects**: An ordered list of named projects, each owning its own tasks
//! - **Tasks**: Title, description, due date, priority and status
//! - **One Form, Two Fronts**: The TUI form and CLI flags drive the same create/edit lifecycle
//! - **Local File Storage**: Two JSON documents in a data directory, rewritten on every change
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the board
//! tb
//!
//! # Add a project and a task from the shell
//! tb add-project "Launch Plan"
//! tb add --project "Launch Plan" --title "Draft" --desc "First pass" \
//!     --due 2026-11-02 --priority high
//!
//! # List tasks
//! tb tasks --project p2
//! ```
//!
//! Data is stored in `~/.taskboard/` unless `--data-dir` or `TASKBOARD_DIR`
//! says otherwise. Diagnostics go to `taskboard.log` in the same directory,
//! filtered by `TASKBOARD_LOG` (default `info`).

use std::fs::File;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod board;
pub mod bridge;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod date;
pub mod error;
pub mod fields;
pub mod lifecycle;
pub mod project;
pub mod selector;
pub mod session;
pub mod storage;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
    pub mod view;
}

use board::Board;
use cli::Cli;
use cmd::*;
use config::{Config, LOG_FILTER_ENV};
use error::BoardError;
use session::Session;
use storage::FileStore;

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);
    match File::options().create(true).append(true).open(config.log_path()) {
        Ok(file) => builder.with_writer(Mutex::new(file)).init(),
        Err(_) => builder.with_writer(std::io::sink).init(),
    }
}

fn run(cli: Cli, config: Config) -> Result<bool, BoardError> {
    let mut store = FileStore::open(config.data_dir.clone())?;
    tracing::debug!(dir = %store.dir().display(), "store opened");
    let board = Board::load(&store, &config.list_attributes)?;
    let mut session = Session::new(board, config.list_attributes)?;

    match cli.command.unwrap_or(Commands::Ui) {
        Commands::Ui => {
            tui::run::run_tui(session, store)?;
            Ok(true)
        }
        Commands::Projects => {
            cmd_projects(&session);
            Ok(true)
        }
        Commands::AddProject { name } => {
            cmd_add_project(&mut session, &mut store, &name)?;
            Ok(true)
        }
        Commands::Tasks { project } => {
            cmd_tasks(&mut session, project)?;
            Ok(true)
        }
        Commands::Add { project, title, description, due, priority, status } =>
            cmd_add(&mut session, &mut store, project, title, description, due, priority, status),
        Commands::Edit { id, project, title, description, due, priority, status } =>
            cmd_edit(&mut session, &mut store, id, project, title, description, due, priority, status),
        Commands::Delete { id, project } => cmd_delete(&mut session, &mut store, id, project),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(true)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Completions need neither the data directory nor the log.
    if let Some(Commands::Completions { shell }) = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let config = Config::resolve(cli.data_dir.clone());
    if let Err(e) = std::fs::create_dir_all(&config.data_dir) {
        eprintln!("Failed to create data directory {}: {}", config.data_dir.display(), e);
        std::process::exit(1);
    }
    init_logging(&config);

    match run(cli, config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
