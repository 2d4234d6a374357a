//! Task model.
//!
//! # Responsibility
//! - Define the task row shown in the task table.
//! - Provide rank values used by column sorting.
//!
//! # Invariants
//! - `item` is never blank once validated.
//! - `block_reason` is only kept while `status == TaskStatus::Block`.

use crate::model::validation::{non_blank, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque task identifier.
pub type TaskId = String;

/// Horizon a task should be done within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Days,
    Weeks,
    Months,
}

/// Expected effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effort {
    High,
    Medium,
    Low,
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Block,
    Completed,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Days, Self::Weeks, Self::Months];

    pub fn label(self) -> &'static str {
        match self {
            Self::Days => "Days",
            Self::Weeks => "Weeks",
            Self::Months => "Months",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == value)
    }

    /// Sort rank; shorter horizons first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Days => 1,
            Self::Weeks => 2,
            Self::Months => 3,
        }
    }
}

impl Effort {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.label() == value)
    }

    /// Sort rank; highest effort first.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl TaskStatus {
    pub const ALL: [Self; 4] = [Self::ToDo, Self::InProgress, Self::Block, Self::Completed];

    pub fn label(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Block => "Block",
            Self::Completed => "Completed",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == value)
    }

    /// Sort rank; blocked work surfaces first, finished work last.
    pub fn rank(self) -> u8 {
        match self {
            Self::Block => 1,
            Self::InProgress => 2,
            Self::ToDo => 3,
            Self::Completed => 4,
        }
    }
}

/// Task row owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub item: String,
    pub priority: Priority,
    pub effort: Effort,
    pub status: TaskStatus,
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl Task {
    /// Creates a task with a generated id.
    pub fn new(
        item: impl Into<String>,
        priority: Priority,
        effort: Effort,
        status: TaskStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            item: item.into(),
            priority,
            effort,
            status,
            block_reason: None,
        }
    }

    /// Returns a copy with trimmed text and `block_reason` cleared unless blocked.
    pub fn normalized(&self) -> Self {
        let block_reason = match self.status {
            TaskStatus::Block => self.block_reason.as_deref().and_then(non_blank),
            _ => None,
        };
        Self {
            id: self.id.clone(),
            item: self.item.trim().to_string(),
            priority: self.priority,
            effort: self.effort,
            status: self.status,
            block_reason,
        }
    }

    /// Validates invariants required before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyField("id"));
        }
        if self.item.trim().is_empty() {
            return Err(ValidationError::EmptyField("item"));
        }
        if self.block_reason.is_some() && self.status != TaskStatus::Block {
            return Err(ValidationError::BlockReasonWithoutBlock);
        }
        Ok(())
    }
}

/// Raw add-task form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub item: String,
    pub priority: Priority,
    pub effort: Effort,
    pub status: TaskStatus,
    pub block_reason: String,
}

impl NewTask {
    /// Produces a normalized, validated task.
    pub fn into_task(self) -> Result<Task, ValidationError> {
        let mut task = Task::new(self.item, self.priority, self.effort, self.status);
        task.block_reason = non_blank(&self.block_reason);
        let task = task.normalized();
        task.validate()?;
        Ok(task)
    }
}
