use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::config::DATA_DIR_ENV;

/// Terminal task board.
/// Board data lives in `$HOME/.taskboard` unless `--data-dir` or
/// `TASKBOARD_DIR` points elsewhere.
#[derive(Parser)]
#[command(name = "tb", version, about = "Terminal task board")]
pub struct Cli {
    /// Directory holding the board's JSON files and log.
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Defaults to `ui`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["tb", "--data-dir", "/tmp/b"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/b")));
    }
}
