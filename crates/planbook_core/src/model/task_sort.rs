//! Column sorting for the task table.
//!
//! Header clicks cycle a column through ascending, descending and unsorted.
//! Sorting is stable, so tasks with equal rank keep their arrival order.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};

/// Sortable task table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Priority,
    Effort,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Active sort of the task table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl TaskSort {
    pub fn asc(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    /// Default ordering applied after loading: priority, shortest horizon first.
    pub fn default_order() -> Self {
        Self::asc(SortColumn::Priority)
    }
}

/// Next sort state after a click on `column`.
///
/// - Different (or no) column: sort `column` ascending.
/// - Same column ascending: switch to descending.
/// - Same column descending: clear sorting.
pub fn toggle_sort(current: Option<TaskSort>, column: SortColumn) -> Option<TaskSort> {
    match current {
        Some(sort) if sort.column == column => match sort.direction {
            SortDirection::Asc => Some(TaskSort {
                column,
                direction: SortDirection::Desc,
            }),
            SortDirection::Desc => None,
        },
        _ => Some(TaskSort::asc(column)),
    }
}

/// Returns `tasks` ordered by `sort`, or unchanged when `sort` is `None`.
pub fn sort_tasks(tasks: &[Task], sort: Option<TaskSort>) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    let Some(sort) = sort else {
        return sorted;
    };

    sorted.sort_by(|a, b| {
        let ordering = column_rank(a, sort.column).cmp(&column_rank(b, sort.column));
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn column_rank(task: &Task, column: SortColumn) -> u8 {
    match column {
        SortColumn::Priority => task.priority.rank(),
        SortColumn::Effort => task.effort.rank(),
        SortColumn::Status => task.status.rank(),
    }
}
