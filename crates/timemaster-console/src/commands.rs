//! Console input lines.
//!
//! Each line typed on stdin is parsed as one command. The commands stand in
//! for the widgets of a desktop window: buttons, sliders, the task table and
//! the tray icon.

use clap::{Parser, Subcommand, ValueEnum};
use timemaster_core::{Intent, SortKey, SortOrder, TaskField, TrayActivation, TrayMenuAction};

#[derive(Parser)]
#[command(name = "timemaster", no_binary_name = true, disable_version_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start or pause the reminder
    Start,
    /// Stop the reminder and rewind to the start of a work phase
    Stop,
    /// Move the work slider (minutes)
    Work { minutes: u32 },
    /// Move the break slider (seconds)
    Break { seconds: u32 },
    /// Task list and countdown
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Close the window (the process keeps running)
    Close,
    /// Activate the tray icon
    Tray {
        #[arg(value_enum)]
        activation: TrayClick,
    },
    /// Tray menu: show the window
    Options,
    /// Tray menu: quit
    Quit,
    /// Redraw the window
    Show,
    /// Print the core state as JSON
    Status,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Start, pause or resume the countdown
    Start,
    /// Quit the current task
    Stop,
    /// Append a task with default fields
    Add,
    /// Delete the selected task (asks for confirmation)
    Delete,
    /// Highlight a row (1-based, as listed)
    Select { row: usize },
    /// Clear the highlight
    Deselect,
    /// Change a task's description
    Rename {
        id: i64,
        #[arg(trailing_var_arg = true, num_args = 1.., required = true)]
        description: Vec<String>,
    },
    /// Change a task's time limit (minutes)
    Limit { id: i64, minutes: u32 },
    /// Sort the table view
    Sort {
        #[arg(value_enum)]
        column: SortColumn,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortColumn {
    Id,
    Task,
    Time,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TrayClick {
    Click,
    DoubleClick,
    MiddleClick,
    Context,
}

/// What the event loop should do with a parsed line.
pub enum Action {
    Dispatch(Intent),
    /// Ask before dispatching [`Intent::DeleteTask`].
    ConfirmDelete,
    Show,
    Status,
}

impl Command {
    pub fn into_action(self) -> Action {
        let intent = match self {
            Command::Start => Intent::ToggleReminder,
            Command::Stop => Intent::StopReminder,
            Command::Work { minutes } => Intent::SetWorkLength(minutes),
            Command::Break { seconds } => Intent::SetBreakLength(seconds),
            Command::Task { action } => return action.into_action(),
            Command::Close => Intent::CloseWindow,
            Command::Tray { activation } => Intent::TrayActivated(activation.into()),
            Command::Options => Intent::TrayMenu(TrayMenuAction::Options),
            Command::Quit => Intent::TrayMenu(TrayMenuAction::Quit),
            Command::Show => return Action::Show,
            Command::Status => return Action::Status,
        };
        Action::Dispatch(intent)
    }
}

impl TaskAction {
    fn into_action(self) -> Action {
        let intent = match self {
            TaskAction::Start => Intent::ToggleTask,
            TaskAction::Stop => Intent::StopTask,
            TaskAction::Add => Intent::AddTask,
            TaskAction::Delete => return Action::ConfirmDelete,
            TaskAction::Select { row } => Intent::Select(row.checked_sub(1)),
            TaskAction::Deselect => Intent::Select(None),
            TaskAction::Rename { id, description } => Intent::Edit {
                id,
                field: TaskField::Description(description.join(" ")),
            },
            TaskAction::Limit { id, minutes } => Intent::Edit {
                id,
                field: TaskField::TimeLimit(minutes),
            },
            TaskAction::Sort { column, desc } => Intent::Sort {
                key: column.into(),
                order: if desc {
                    SortOrder::Descending
                } else {
                    SortOrder::Ascending
                },
            },
        };
        Action::Dispatch(intent)
    }
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Id => SortKey::Id,
            SortColumn::Task => SortKey::Description,
            SortColumn::Time => SortKey::TimeLimit,
        }
    }
}

impl From<TrayClick> for TrayActivation {
    fn from(click: TrayClick) -> Self {
        match click {
            TrayClick::Click => TrayActivation::Trigger,
            TrayClick::DoubleClick => TrayActivation::DoubleClick,
            TrayClick::MiddleClick => TrayActivation::MiddleClick,
            TrayClick::Context => TrayActivation::Context,
        }
    }
}

/// Parse one input line. Help and usage errors come back as printable text.
pub fn parse(line: &str) -> Result<Action, String> {
    Line::try_parse_from(line.split_whitespace())
        .map(|parsed| parsed.command.into_action())
        .map_err(|e| e.render().to_string())
}
