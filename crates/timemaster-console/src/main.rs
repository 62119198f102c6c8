//! Time Master console front end.
//!
//! Runs the whole application on one current-thread runtime: clock ticks,
//! typed commands and Ctrl-C are multiplexed onto a single event loop, so the
//! presenter never sees two events at once.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use timemaster_core::presenter::{DELETE_QUESTION, DELETE_TITLE};
use timemaster_core::{Clock, Control, CoreError, Intent, Presenter, Settings, TaskStore};

mod commands;
mod console;

use commands::Action;
use console::{ConsoleNotifier, ConsoleView};

type AppPresenter = Presenter<ConsoleView, ConsoleNotifier>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(std::io::stderr)
        .init();

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CoreError::from)
        .and_then(|runtime| runtime.block_on(run()));

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> timemaster_core::error::Result<()> {
    let mut presenter = Presenter::new(
        ConsoleView::new(),
        ConsoleNotifier,
        TaskStore::open_default(),
        Settings::default(),
    );
    println!("{}", presenter.view().render());
    println!("Type `help` for commands.");

    let mut clock = Clock::new();
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut pending = Vec::new();
    let mut stdin_open = true;
    let mut confirming_delete = false;

    loop {
        tokio::select! {
            tick = clock.next() => presenter.tick(tick),
            line = next_line(&mut stdin, &mut pending), if stdin_open => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        tracing::info!("stdin closed; still running until Ctrl-C");
                        stdin_open = false;
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!("stdin unreadable, ignoring further input: {e}");
                        stdin_open = false;
                        continue;
                    }
                };
                if confirming_delete {
                    confirming_delete = false;
                    let yes = matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes");
                    presenter.view_mut().answer_next(yes);
                    presenter.handle(Intent::DeleteTask);
                    continue;
                }
                match handle_line(&mut presenter, &line) {
                    Step::Continue => {}
                    Step::AwaitConfirmation => confirming_delete = true,
                    Step::Quit => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        }
    }
    Ok(())
}

/// Read one line, replacing invalid UTF-8 instead of failing on it.
///
/// Bytes of an interrupted read stay in `pending` and are completed by the
/// next call. Returns `None` at end of input.
async fn next_line<R>(reader: &mut R, pending: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    if reader.read_until(b'\n', pending).await? == 0 && pending.is_empty() {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(pending)
        .trim_end_matches(['\r', '\n'])
        .to_string();
    pending.clear();
    Ok(Some(line))
}

enum Step {
    Continue,
    AwaitConfirmation,
    Quit,
}

fn handle_line(presenter: &mut AppPresenter, line: &str) -> Step {
    if line.trim().is_empty() {
        return Step::Continue;
    }
    let action = match commands::parse(line) {
        Ok(action) => action,
        Err(usage) => {
            println!("{usage}");
            return Step::Continue;
        }
    };
    match action {
        Action::Dispatch(intent) => {
            if presenter.handle(intent) == Control::Quit {
                return Step::Quit;
            }
        }
        Action::ConfirmDelete => {
            if presenter.selected().is_none() {
                println!("Select a task first.");
                return Step::Continue;
            }
            println!("{DELETE_TITLE}: {DELETE_QUESTION} [y/N]");
            return Step::AwaitConfirmation;
        }
        Action::Show => {
            if presenter.view().is_visible() {
                println!("{}", presenter.view().render());
            }
        }
        Action::Status => match serde_json::to_string_pretty(&presenter.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!("failed to encode snapshot: {e}"),
        },
    }
    Step::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_utf8_does_not_end_input() {
        let mut input: &[u8] = b"status\n\xff\xfe\nstart\r\nwork 5";
        let mut pending = Vec::new();
        let mut lines = Vec::new();
        while let Some(line) = next_line(&mut input, &mut pending).await.unwrap() {
            lines.push(line);
        }
        assert_eq!(lines, ["status", "\u{fffd}\u{fffd}", "start", "work 5"]);
    }

    #[tokio::test]
    async fn garbled_line_is_reported_not_fatal() {
        let mut input: &[u8] = b"\xff\n";
        let mut pending = Vec::new();
        let line = next_line(&mut input, &mut pending).await.unwrap().unwrap();
        assert!(commands::parse(&line).is_err());
    }
}
