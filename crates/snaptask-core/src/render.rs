use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::row::Row;
use crate::sort::{SortKey, SortOrder, SortState};

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color = match cfg.color.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    /// Prints the dashboard table: one header per sortable column, glyph on
    /// the active one only, badge colors on status and priority cells.
    #[tracing::instrument(skip(self, rows, state))]
    pub fn print_row_table(&mut self, rows: &[Row], state: &SortState) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let headers: Vec<String> = SortKey::all()
            .iter()
            .map(|key| format!("{} {}", key.label(), indicator_glyph(state.indicator(*key))))
            .collect();

        let mut cells = Vec::with_capacity(rows.len());
        for row in rows {
            let status = self.paint(&row.status, status_color(&row.status));
            let priority = self.paint(&row.priority, priority_color(&row.priority));

            cells.push(vec![
                status,
                row.description.clone(),
                priority,
                row.start_time.clone(),
                row.end_time.clone(),
            ]);
        }

        write_table(&mut out, headers, cells)?;
        Ok(())
    }

    fn paint(&self, text: &str, code: Option<&str>) -> String {
        let Some(code) = code else {
            return text.to_string();
        };
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn indicator_glyph(indicator: Option<SortOrder>) -> &'static str {
    match indicator {
        Some(SortOrder::Ascending) => "▲",
        Some(SortOrder::Descending) => "▼",
        None => "⇵",
    }
}

fn status_color(status: &str) -> Option<&'static str> {
    match status {
        "completed" => Some("32"),
        "pending" => Some("33"),
        _ => None,
    }
}

fn priority_color(priority: &str) -> Option<&'static str> {
    match priority {
        "high" => Some("31"),
        "medium" => Some("33"),
        "low" => Some("32"),
        _ => None,
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        let header = &headers[idx];
        let padding = widths[idx].saturating_sub(UnicodeWidthStr::width(header.as_str()));
        write!(writer, "{}{} ", header, " ".repeat(padding))?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
