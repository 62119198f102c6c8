//! End-to-end scenarios: intents and ticks in, view and notifications out.

mod common;

use common::{add_task, presenter};
use timemaster_core::{Intent, Phase, RunStatus, Tick, TaskStore};

fn ticks(presenter: &mut common::TestPresenter, tick: Tick, count: usize) {
    for _ in 0..count {
        presenter.tick(tick);
    }
}

#[test]
fn work_turns_into_break() {
    let mut p = presenter();
    p.handle(Intent::SetWorkLength(2));
    p.handle(Intent::ToggleReminder);
    assert_eq!(p.view().last_status(), Some("Working time."));
    assert_eq!(p.view().reminder_button, "Pause");

    p.tick(Tick::Minute);
    assert_eq!(p.view().progress, 50);
    p.tick(Tick::Minute);

    assert_eq!(p.reminder().phase(), Phase::Break);
    assert_eq!(p.reminder().elapsed(), 0);
    assert_eq!(p.notifier().last_body(), Some("Time to take a break."));
    assert_eq!(p.notifier().notifications[0].0, "Time Master");
    assert_eq!(p.view().last_status(), Some("Breaking time."));
}

#[test]
fn break_turns_back_into_work() {
    let mut p = presenter();
    p.handle(Intent::SetWorkLength(2));
    p.handle(Intent::SetBreakLength(3));
    p.handle(Intent::ToggleReminder);
    ticks(&mut p, Tick::Minute, 2);

    p.tick(Tick::Second);
    assert_eq!(p.view().progress, 34);
    p.tick(Tick::Second);
    assert_eq!(p.view().progress, 67);
    p.tick(Tick::Second);

    assert_eq!(p.reminder().phase(), Phase::Work);
    assert_eq!(p.reminder().elapsed(), 0);
    assert_eq!(p.notifier().last_body(), Some("Time to move on."));
    assert_eq!(p.view().progress, 0);
    assert_eq!(p.view().last_status(), Some("Working time."));
}

#[test]
fn task_expires_after_its_time_limit() {
    let mut p = presenter();
    add_task(&mut p, "Read", 1);
    p.handle(Intent::Select(Some(0)));
    p.handle(Intent::ToggleTask);
    assert_eq!(p.view().countdown, (1, 0));
    assert_eq!(p.view().last_status(), Some("Current task: Read"));

    ticks(&mut p, Tick::Second, 59);
    assert_eq!(p.runner().status(), RunStatus::Running);
    assert_eq!(p.view().countdown, (0, 1));

    p.tick(Tick::Second);
    assert_eq!(p.runner().status(), RunStatus::Expired);
    assert_eq!(
        p.notifier().last_body(),
        Some("Task Read has run out of time.")
    );
    assert_eq!(p.view().countdown, (0, 0));
}

#[test]
fn pausing_a_task_preserves_remaining_time() {
    let mut p = presenter();
    add_task(&mut p, "Read", 1);
    p.handle(Intent::Select(Some(0)));
    p.handle(Intent::ToggleTask);

    ticks(&mut p, Tick::Second, 10);
    p.handle(Intent::ToggleTask);
    assert_eq!(p.runner().status(), RunStatus::Paused);
    assert_eq!(p.view().task_button, "Resume");
    assert_eq!(p.view().last_status(), Some("Task paused"));

    ticks(&mut p, Tick::Second, 100);
    assert_eq!(p.runner().remaining_secs(), 50);

    p.handle(Intent::ToggleTask);
    assert_eq!(p.view().task_button, "Pause");
    ticks(&mut p, Tick::Second, 49);
    assert_eq!(p.runner().remaining_secs(), 1);
    p.tick(Tick::Second);
    assert_eq!(p.runner().remaining_secs(), 0);
    assert_eq!(p.runner().status(), RunStatus::Expired);
}

#[test]
fn store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.db");

    let mut store = TaskStore::open(&path).unwrap();
    let appended: Vec<_> = (0..3).map(|_| store.append().unwrap()).collect();
    drop(store);

    let store = TaskStore::open(&path).unwrap();
    let listed = store.list();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed, appended.as_slice());
    assert!(listed.windows(2).all(|w| w[0].id < w[1].id));
    for task in listed {
        assert_eq!(task.description, "Study");
        assert_eq!(task.time_limit, 60);
    }
}

#[test]
fn starting_with_no_tasks_does_nothing() {
    let mut p = presenter();
    p.handle(Intent::ToggleTask);
    assert_eq!(p.runner().status(), RunStatus::Idle);
    assert_eq!(p.view().task_button, "Start");
    assert!(p.view().statuses.is_empty());
}
