//! Rendering of board data into frame areas.
//!
//! Each function draws one piece of the screen from plain data and holds no
//! state of its own; selection state is passed in by the caller.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::{
    board::Board,
    bridge::FormField,
    fields::{status_label, PRIORITY_OPTIONS, STATUS_OPTIONS},
    project::{Project, TitleMeta},
    tui::{
        colors::{priority_color, BAR, FOCUS},
        input::InputField,
        task_form::{TaskForm, DESCRIPTION_FIELD, DUE_FIELD, PRIORITY_FIELD, STATUS_FIELD, TITLE_FIELD},
    },
};

/// Key hints standing in for the board's buttons.
pub const BUTTONS: [(&str, &str); 3] = [
    ("p", "+ New Project"),
    ("n", "+ New Task"),
    ("Enter", "Save Task"),
];

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(FOCUS)
    } else {
        Style::default()
    }
}

/// Application title, today's date and the button hints.
pub fn render_header(f: &mut Frame, area: Rect, today: &str) {
    let mut spans = vec![
        Span::styled("TASK BOARD", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(today.to_string(), Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC)),
        Span::raw("   "),
    ];
    for (key, label) in BUTTONS {
        spans.push(Span::styled(format!("[{key}]"), Style::default().add_modifier(Modifier::BOLD)));
        spans.push(Span::raw(format!(" {label}  ")));
    }
    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// The project list, in insertion order, with the active project marked.
pub fn render_project_list(f: &mut Frame, area: Rect, board: &Board, active_list_key: Option<&str>, state: &mut ListState, focused: bool) {
    let items: Vec<ListItem> = board
        .projects_list
        .iter()
        .map(|(key, name)| {
            let marker = if Some(key.as_str()) == active_list_key { "● " } else { "  " };
            ListItem::new(format!("{marker}{name}"))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Projects ({})", board.projects_list.len()))
                .border_style(border_style(focused)),
        )
        .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, area, state);
}

/// A text input, showing its placeholder greyed out while empty.
pub fn render_input(f: &mut Frame, area: Rect, title: &str, input: &InputField, focused: bool, invalid: bool) {
    let text = if input.value.is_empty() && !input.placeholder.is_empty() {
        Line::from(Span::styled(input.placeholder.clone(), Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(input.value.clone())
    };
    let style = if invalid {
        Style::default().fg(Color::Red)
    } else {
        border_style(focused)
    };
    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()).border_style(style))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);

    if focused {
        let x = area.x + 1 + input.cursor.min(area.width.saturating_sub(3) as usize) as u16;
        f.set_cursor_position((x, area.y + 1));
    }
}

/// The title row above a project's task list.
pub fn render_project_title(f: &mut Frame, area: Rect, meta: &TitleMeta) {
    let title = Paragraph::new(Line::from(Span::styled(
        meta.text.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

/// The project's tasks. The due date is coloured by priority.
pub fn render_task_table(f: &mut Frame, area: Rect, project: &Project, state: &mut TableState, focused: bool) {
    let header = Row::new(
        ["", "ID", "Title", "Description", "Status", "Due"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().bg(BAR).fg(Color::White))
    .height(1);

    let rows: Vec<Row> = project
        .tasks
        .iter()
        .map(|(id, task)| {
            Row::new(vec![
                Cell::from(task.edit_label.clone()).style(Style::default().fg(Color::Cyan)),
                Cell::from(id.to_string()),
                Cell::from(task.title.clone()),
                Cell::from(task.description.clone()),
                Cell::from(status_label(&task.status).to_string()),
                Cell::from(task.due_date.to_string()).style(Style::default().fg(priority_color(task.priority))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),  // Edit
        Constraint::Length(4),  // ID
        Constraint::Min(16),    // Title
        Constraint::Min(20),    // Description
        Constraint::Length(12), // Status
        Constraint::Length(11), // Due
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Tasks ({})", project.tasks.len()))
                .border_style(border_style(focused)),
        )
        .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, area, state);
}

fn option_line<'a>(labels: impl Iterator<Item = &'a str>, selected: Option<usize>, radio: bool) -> Line<'a> {
    let spans = labels
        .enumerate()
        .flat_map(|(i, label)| {
            let checked = selected == Some(i);
            let mark = match (radio, checked) {
                (true, true) => "(•) ",
                (true, false) => "( ) ",
                (false, true) => "< ",
                (false, false) => "  ",
            };
            let style = if checked {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let close = if !radio && checked { " >  " } else { "  " };
            vec![Span::styled(format!("{mark}{label}{close}"), style)]
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

/// The task details form.
pub fn render_task_form(f: &mut Frame, area: Rect, form: &TaskForm, title: &str) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(5), // Description
            Constraint::Length(3), // Due date
            Constraint::Length(3), // Priority
            Constraint::Length(3), // Status
            Constraint::Min(0),    // Instructions
        ])
        .split(inner);

    let current = form.current_field;
    render_input(f, chunks[0], "Task *", &form.title, current == TITLE_FIELD, form.is_invalid(FormField::Title));
    render_input(
        f,
        chunks[1],
        "Description *",
        &form.description,
        current == DESCRIPTION_FIELD,
        form.is_invalid(FormField::Description),
    );
    render_input(f, chunks[2], "Due Date *", &form.due, current == DUE_FIELD, form.is_invalid(FormField::DueDate));

    let selector_style = |field: usize, kind: FormField| {
        if form.is_invalid(kind) {
            Style::default().fg(Color::Red)
        } else {
            border_style(current == field)
        }
    };

    let priority = Paragraph::new(option_line(PRIORITY_OPTIONS.iter().map(|o| o.label), form.priority, true)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Priority *")
            .border_style(selector_style(PRIORITY_FIELD, FormField::Priority)),
    );
    f.render_widget(priority, chunks[3]);

    let status = Paragraph::new(option_line(STATUS_OPTIONS.iter().map(|o| o.label), form.status, false)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Status *")
            .border_style(selector_style(STATUS_FIELD, FormField::Status)),
    );
    f.render_widget(status, chunks[4]);

    let help = Paragraph::new(vec![
        Line::from("Tab/↑/↓ move  ←/→ choose  Space check"),
        Line::from("Enter or Ctrl+S save  Esc cancel"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .wrap(Wrap { trim: true });
    f.render_widget(help, chunks[5]);
}
