use std::io::{self, Write};
use std::path::Path;

use anyhow::anyhow;
use tracing::{debug, info, instrument};

use crate::cli::{Command, GlobalCli};
use crate::config::Config;
use crate::render::Renderer;
use crate::row::build_rows;
use crate::snapshot;
use crate::sort::{SortKey, SortState, sort_rows};
use crate::task::Task;

pub fn dispatch(cli: &GlobalCli, cfg: &Config) -> anyhow::Result<()> {
    match &cli.command {
        Command::View { file, by, all } => run_view(cfg, file, by, *all),
        Command::Keys => run_keys(),
    }
}

#[instrument(skip(cfg, by))]
fn run_view(cfg: &Config, file: &Path, by: &[String], all: bool) -> anyhow::Result<()> {
    let tasks = snapshot::load_tasks(file)?;

    // The dashboard's task listing never shows completed tasks unless asked.
    let visible: Vec<Task> = if all {
        tasks
    } else {
        tasks.into_iter().filter(|task| !task.is_completed()).collect()
    };

    let mut rows = build_rows(&visible);
    info!(rows = rows.len(), all, "projected snapshot into rows");

    let activations: Vec<String> = if by.is_empty() {
        cfg.default_sort.iter().cloned().collect()
    } else {
        by.to_vec()
    };

    let mut state = SortState::new();
    for token in &activations {
        let key = SortKey::parse(token).ok_or_else(|| {
            anyhow!(
                "unknown sort key: {token} (expected one of: {})",
                SortKey::all()
                    .iter()
                    .map(|k| k.token())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;
        let order = state.activate(key);
        debug!(key = key.token(), order = ?order, "applying sort activation");
        sort_rows(&mut rows, key, order);
    }
    debug!(active = ?state.active(), "sort state after activations");

    let mut renderer = Renderer::new(cfg)?;
    renderer.print_row_table(&rows, &state)?;

    Ok(())
}

fn run_keys() -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    for key in SortKey::all() {
        writeln!(out, "{:<12} {}", key.token(), key.label())?;
    }
    Ok(())
}
