use std::fs;

use snaptask_core::row::build_rows;
use snaptask_core::snapshot::load_tasks;
use snaptask_core::sort::{SortKey, SortOrder, SortState, sort_rows};
use snaptask_core::task::{Priority, Status};
use tempfile::tempdir;

const SNAPSHOT: &str = r#"[
  {
    "id": "f3k2",
    "description": "Team standup",
    "priority": "medium",
    "status": "pending",
    "start_time": "2026-03-02T09:00:00Z",
    "end_time": "2026-03-02T09:15:00Z"
  },
  {
    "id": "a9x1",
    "description": "write weekly report",
    "priority": "urgent",
    "status": "pending",
    "start_time": null,
    "end_time": null
  },
  {
    "id": "p0q7",
    "description": "Lunch with Sam",
    "priority": "low",
    "status": "pending",
    "start_time": "2026-03-02T13:00:00Z",
    "end_time": "2026-03-02T14:00:00Z"
  },
  {
    "id": "z4m8",
    "description": "Book flights",
    "priority": "high",
    "status": "completed",
    "start_time": "2026-03-02T20:30:00Z",
    "end_time": null
  }
]"#;

#[test]
fn snapshot_to_sorted_table_flow() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("tasks.json");
    fs::write(&path, SNAPSHOT).expect("write snapshot");

    let tasks = load_tasks(&path).expect("load snapshot");
    assert_eq!(tasks.len(), 4);

    // Unrecognized priority tokens still deserialize; they just rank 0.
    let report = tasks
        .iter()
        .find(|t| t.id == "a9x1")
        .expect("report task present");
    assert_eq!(report.priority, Priority::Unknown);
    assert_eq!(report.start_time, None);

    let completed = tasks
        .iter()
        .find(|t| t.id == "z4m8")
        .expect("completed task present");
    assert_eq!(completed.status, Status::Completed);

    // The listing hides completed tasks by default.
    let visible: Vec<_> = tasks.into_iter().filter(|t| !t.is_completed()).collect();
    let mut rows = build_rows(&visible);
    assert_eq!(rows.len(), 3);

    // Timestamps render as 12-hour cells in the project timezone (UTC in
    // this test environment); missing ones render as N/A.
    assert_eq!(rows[0].start_time, "9:00 AM");
    assert_eq!(rows[1].start_time, "N/A");
    assert_eq!(rows[2].start_time, "1:00 PM");

    let mut state = SortState::new();

    // First activation sorts ascending; N/A lands at the end.
    let order = state.activate(SortKey::StartTime);
    assert_eq!(order, SortOrder::Ascending);
    sort_rows(&mut rows, SortKey::StartTime, order);
    let starts: Vec<&str> = rows.iter().map(|r| r.start_time.as_str()).collect();
    assert_eq!(starts, vec!["9:00 AM", "1:00 PM", "N/A"]);

    // Re-activating the same column toggles; N/A still lands at the end.
    let order = state.activate(SortKey::StartTime);
    assert_eq!(order, SortOrder::Descending);
    sort_rows(&mut rows, SortKey::StartTime, order);
    let starts: Vec<&str> = rows.iter().map(|r| r.start_time.as_str()).collect();
    assert_eq!(starts, vec!["1:00 PM", "9:00 AM", "N/A"]);
    assert_eq!(
        state.indicator(SortKey::StartTime),
        Some(SortOrder::Descending)
    );

    // Switching columns clears the previous column's indicator and starts
    // the new one from its default.
    let order = state.activate(SortKey::Description);
    assert_eq!(order, SortOrder::Ascending);
    sort_rows(&mut rows, SortKey::Description, order);
    assert_eq!(state.indicator(SortKey::StartTime), None);

    // Case-insensitive description order, and no row lost or duplicated.
    let descriptions: Vec<&str> = rows.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec!["Lunch with Sam", "Team standup", "write weekly report"]
    );
    let mut ids: Vec<&str> = rows.iter().map(|r| r.task_id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["a9x1", "f3k2", "p0q7"]);
}
