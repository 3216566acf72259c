use crate::clock::format_clock;
use crate::task::Task;

/// One rendered table row. Pure presentation: every cell is the final
/// display string, and the whole set is rebuilt from scratch on each
/// snapshot load. Sorting reorders rows, it never edits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub task_id: String,
    pub status: String,
    pub description: String,
    pub priority: String,
    pub start_time: String,
    pub end_time: String,
    pub completed: bool,
}

impl Row {
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            status: task.status.as_str().to_string(),
            description: task.description.clone(),
            priority: task.priority.as_str().to_string(),
            start_time: format_clock(task.start_time),
            end_time: format_clock(task.end_time),
            completed: task.is_completed(),
        }
    }
}

pub fn build_rows(tasks: &[Task]) -> Vec<Row> {
    tasks.iter().map(Row::from_task).collect()
}
