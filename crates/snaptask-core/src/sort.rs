use std::cmp::Ordering;

use tracing::debug;

use crate::clock::parse_clock_minutes;
use crate::row::Row;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq
)]
pub enum SortKey {
  Status,
  Description,
  Priority,
  StartTime,
  EndTime
}

impl SortKey {
  pub fn parse(
    token: &str
  ) -> Option<Self> {
    match token
      .to_ascii_lowercase()
      .as_str()
    {
      | "status" => Some(Self::Status),
      | "description" | "desc" => {
        Some(Self::Description)
      }
      | "priority" | "pri" => {
        Some(Self::Priority)
      }
      | "start_time" | "start" => {
        Some(Self::StartTime)
      }
      | "end_time" | "end" => {
        Some(Self::EndTime)
      }
      | _ => None
    }
  }

  pub fn token(&self) -> &'static str {
    match self {
      | Self::Status => "status",
      | Self::Description => {
        "description"
      }
      | Self::Priority => "priority",
      | Self::StartTime => {
        "start_time"
      }
      | Self::EndTime => "end_time"
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      | Self::Status => "Status",
      | Self::Description => {
        "Description"
      }
      | Self::Priority => "Priority",
      | Self::StartTime => {
        "Start Time"
      }
      | Self::EndTime => "End Time"
    }
  }

  pub fn all() -> [Self; 5] {
    [
      Self::Status,
      Self::Description,
      Self::Priority,
      Self::StartTime,
      Self::EndTime
    ]
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq
)]
pub enum SortOrder {
  Ascending,
  Descending
}

impl SortOrder {
  #[must_use]
  pub fn toggled(&self) -> Self {
    match self {
      | Self::Ascending => {
        Self::Descending
      }
      | Self::Descending => {
        Self::Ascending
      }
    }
  }
}

/// Order memory for the table header.
/// Only the active column keeps one;
/// activating another column starts it
/// from the stored default again, which
/// is descending, so the first visible
/// sort on any column is ascending.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortState {
  active:
    Option<(SortKey, SortOrder)>
}

impl SortState {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn activate(
    &mut self,
    key: SortKey
  ) -> SortOrder {
    let previous = match self.active {
      | Some((active, order))
        if active == key =>
      {
        order
      }
      | _ => SortOrder::Descending
    };
    let next = previous.toggled();
    self.active = Some((key, next));
    debug!(
      key = key.token(),
      order = ?next,
      "activated sort column"
    );
    next
  }

  #[must_use]
  pub fn active(
    &self
  ) -> Option<(SortKey, SortOrder)> {
    self.active
  }

  /// Glyph state for one header: the
  /// active column shows its order,
  /// every other column is neutral.
  #[must_use]
  pub fn indicator(
    &self,
    key: SortKey
  ) -> Option<SortOrder> {
    match self.active {
      | Some((active, order))
        if active == key =>
      {
        Some(order)
      }
      | _ => None
    }
  }
}

/// Reorders rows in place. Stable, so
/// ties keep their previous relative
/// order; nothing is dropped, added or
/// rewritten.
pub fn sort_rows(
  rows: &mut [Row],
  key: SortKey,
  order: SortOrder
) {
  rows.sort_by(|a, b| {
    compare_rows(a, b, key, order)
  });
}

fn compare_rows(
  a: &Row,
  b: &Row,
  key: SortKey,
  order: SortOrder
) -> Ordering {
  match key {
    | SortKey::Status => directed(
      a.status.cmp(&b.status),
      order
    ),
    | SortKey::Description => directed(
      a.description
        .to_lowercase()
        .cmp(
          &b.description
            .to_lowercase()
        ),
      order
    ),
    | SortKey::Priority => directed(
      priority_rank(&a.priority).cmp(
        &priority_rank(&b.priority)
      ),
      order
    ),
    | SortKey::StartTime => {
      compare_time_cells(
        &a.start_time,
        &b.start_time,
        order
      )
    }
    | SortKey::EndTime => {
      compare_time_cells(
        &a.end_time,
        &b.end_time,
        order
      )
    }
  }
}

fn directed(
  ordering: Ordering,
  order: SortOrder
) -> Ordering {
  match order {
    | SortOrder::Ascending => ordering,
    | SortOrder::Descending => {
      ordering.reverse()
    }
  }
}

/// Rank used only for ordering, never
/// displayed. Unrecognized values rank
/// below low.
pub fn priority_rank(
  cell: &str
) -> u8 {
  match cell.trim() {
    | "high" => 3,
    | "medium" => 2,
    | "low" => 1,
    | _ => 0
  }
}

// "N/A" and unparseable cells take the
// extreme key for the direction being
// applied, which lands them at the end
// whether the sort is ascending or
// descending.
fn compare_time_cells(
  a: &str,
  b: &str,
  order: SortOrder
) -> Ordering {
  let ka = time_sort_key(a, order);
  let kb = time_sort_key(b, order);
  match order {
    | SortOrder::Ascending => {
      ka.cmp(&kb)
    }
    | SortOrder::Descending => {
      kb.cmp(&ka)
    }
  }
}

fn time_sort_key(
  cell: &str,
  order: SortOrder
) -> i64 {
  match parse_clock_minutes(cell) {
    | Some(minutes) => {
      i64::from(minutes)
    }
    | None => match order {
      | SortOrder::Ascending => {
        i64::MAX
      }
      | SortOrder::Descending => {
        i64::MIN
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    SortKey,
    SortOrder,
    SortState,
    priority_rank,
    sort_rows
  };
  use crate::row::Row;

  fn row(
    id: &str,
    description: &str,
    priority: &str,
    status: &str,
    start: &str
  ) -> Row {
    Row {
      task_id: id.to_string(),
      status: status.to_string(),
      description: description
        .to_string(),
      priority: priority.to_string(),
      start_time: start.to_string(),
      end_time: "N/A".to_string(),
      completed: status == "completed"
    }
  }

  fn descriptions(
    rows: &[Row]
  ) -> Vec<&str> {
    rows
      .iter()
      .map(|r| r.description.as_str())
      .collect()
  }

  #[test]
  fn first_activation_is_ascending() {
    let mut state = SortState::new();
    assert_eq!(
      state
        .activate(SortKey::Priority),
      SortOrder::Ascending
    );
    assert_eq!(
      state
        .activate(SortKey::Priority),
      SortOrder::Descending
    );
    assert_eq!(
      state.active(),
      Some((
        SortKey::Priority,
        SortOrder::Descending
      ))
    );
  }

  #[test]
  fn switching_key_resets_memory() {
    let mut state = SortState::new();
    state.activate(SortKey::Priority);
    state.activate(SortKey::Priority);
    assert_eq!(
      state.indicator(
        SortKey::Priority
      ),
      Some(SortOrder::Descending)
    );

    state.activate(SortKey::Status);
    assert_eq!(
      state.indicator(
        SortKey::Priority
      ),
      None
    );
    assert_eq!(
      state
        .indicator(SortKey::Status),
      Some(SortOrder::Ascending)
    );
  }

  #[test]
  fn priority_follows_rank_table() {
    let mut rows = vec![
      row("a", "walk", "low", "pending", "N/A"),
      row("b", "call", "high", "pending", "N/A"),
      row("c", "mail", "medium", "pending", "N/A"),
    ];

    sort_rows(
      &mut rows,
      SortKey::Priority,
      SortOrder::Ascending
    );
    assert_eq!(
      rows
        .iter()
        .map(|r| r.priority.as_str())
        .collect::<Vec<_>>(),
      vec!["low", "medium", "high"]
    );

    sort_rows(
      &mut rows,
      SortKey::Priority,
      SortOrder::Descending
    );
    assert_eq!(
      rows
        .iter()
        .map(|r| r.priority.as_str())
        .collect::<Vec<_>>(),
      vec!["high", "medium", "low"]
    );
  }

  #[test]
  fn unrecognized_priority_ranks_zero()
  {
    assert_eq!(
      priority_rank("urgent"),
      0
    );
    assert_eq!(priority_rank(""), 0);
    assert_eq!(
      priority_rank("high"),
      3
    );
  }

  #[test]
  fn missing_times_sort_last_both_ways()
  {
    let mut rows = vec![
      row("a", "gym", "low", "pending", "9:00 AM"),
      row("b", "idle", "low", "pending", "N/A"),
      row("c", "lunch", "low", "pending", "1:00 PM"),
    ];

    sort_rows(
      &mut rows,
      SortKey::StartTime,
      SortOrder::Ascending
    );
    assert_eq!(
      rows
        .iter()
        .map(|r| {
          r.start_time.as_str()
        })
        .collect::<Vec<_>>(),
      vec![
        "9:00 AM", "1:00 PM", "N/A"
      ]
    );

    sort_rows(
      &mut rows,
      SortKey::StartTime,
      SortOrder::Descending
    );
    assert_eq!(
      rows
        .iter()
        .map(|r| {
          r.start_time.as_str()
        })
        .collect::<Vec<_>>(),
      vec![
        "1:00 PM", "9:00 AM", "N/A"
      ]
    );
  }

  #[test]
  fn description_compare_ignores_case()
  {
    let mut rows = vec![
      row("a", "banana", "low", "pending", "N/A"),
      row("b", "Apple", "low", "pending", "N/A"),
    ];

    sort_rows(
      &mut rows,
      SortKey::Description,
      SortOrder::Ascending
    );
    assert_eq!(
      descriptions(&rows),
      vec!["Apple", "banana"]
    );
  }

  #[test]
  fn resort_reverses_parseable_rows() {
    let mut rows = vec![
      row("a", "gym", "low", "pending", "9:00 AM"),
      row("b", "lunch", "low", "pending", "1:00 PM"),
      row("c", "standup", "low", "pending", "10:15 AM"),
    ];

    let mut state = SortState::new();
    let order = state
      .activate(SortKey::StartTime);
    sort_rows(
      &mut rows,
      SortKey::StartTime,
      order
    );
    let first =
      descriptions(&rows)
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let order = state
      .activate(SortKey::StartTime);
    sort_rows(
      &mut rows,
      SortKey::StartTime,
      order
    );
    let second =
      descriptions(&rows);

    let reversed: Vec<&str> = first
      .iter()
      .rev()
      .map(String::as_str)
      .collect();
    assert_eq!(second, reversed);
  }

  #[test]
  fn sorting_preserves_row_multiset() {
    let mut rows = vec![
      row("a", "one", "low", "pending", "N/A"),
      row("b", "two", "high", "completed", "3:00 PM"),
      row("c", "three", "medium", "pending", "8:00 AM"),
      row("d", "two", "high", "pending", "3:00 PM"),
    ];

    sort_rows(
      &mut rows,
      SortKey::Description,
      SortOrder::Descending
    );

    assert_eq!(rows.len(), 4);
    let mut ids: Vec<&str> = rows
      .iter()
      .map(|r| r.task_id.as_str())
      .collect();
    ids.sort_unstable();
    assert_eq!(
      ids,
      vec!["a", "b", "c", "d"]
    );
  }

  #[test]
  fn status_compares_raw_text() {
    let mut rows = vec![
      row("a", "one", "low", "pending", "N/A"),
      row("b", "two", "low", "completed", "N/A"),
    ];

    sort_rows(
      &mut rows,
      SortKey::Status,
      SortOrder::Ascending
    );
    assert_eq!(
      rows[0].status,
      "completed"
    );
    assert_eq!(
      rows[1].status,
      "pending"
    );
  }
}
