use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::task::Task;

/// Reads a task-list snapshot: the JSON array the backend's task listing
/// returns, saved to a file (or piped in with `-`). The rows on screen are
/// always a reordering of exactly this set.
#[tracing::instrument]
pub fn load_tasks(path: &Path) -> anyhow::Result<Vec<Task>> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read task snapshot from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read task snapshot {}", path.display()))?
    };

    let tasks: Vec<Task> = serde_json::from_str(&raw)
        .with_context(|| format!("task snapshot {} is not a JSON task array", path.display()))?;

    info!(count = tasks.len(), "loaded task snapshot");
    Ok(tasks)
}
