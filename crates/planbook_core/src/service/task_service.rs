//! Task use-case service.
//!
//! # Responsibility
//! - Load tasks with the default priority ordering.
//! - Create, update and delete tasks through validated inputs.
//!
//! # Invariants
//! - Stored tasks are always normalized (`block_reason` only when blocked).
//! - Deletes require explicit confirmation.

use crate::model::task::{NewTask, Task};
use crate::model::task_sort::{sort_tasks, TaskSort};
use crate::model::validation::ValidationError;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    Validation(ValidationError),
    TaskNotFound(String),
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::TaskNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for TaskServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Tasks as shown in the table, with the sort that produced the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResult {
    pub items: Vec<Task>,
    pub sort: Option<TaskSort>,
}

/// Task facade over a repository implementation.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads the user's tasks newest first, unsorted.
    pub fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>, TaskServiceError> {
        Ok(self.repo.list_tasks(user_id)?)
    }

    /// Loads the user's tasks ordered by priority, shortest horizon first.
    pub fn load_tasks(&self, user_id: &str) -> Result<TaskListResult, TaskServiceError> {
        let tasks = self.repo.list_tasks(user_id)?;
        let sort = Some(TaskSort::default_order());
        debug!(
            "event=task_load module=tasks status=ok count={}",
            tasks.len()
        );
        Ok(TaskListResult {
            items: sort_tasks(&tasks, sort),
            sort,
        })
    }

    pub fn find_task(&self, user_id: &str, task_id: &str) -> Result<Option<Task>, TaskServiceError> {
        Ok(self.repo.get_task(user_id, task_id)?)
    }

    /// Validates form input and stores a new task.
    pub fn add_task(&self, user_id: &str, form: NewTask) -> Result<Task, TaskServiceError> {
        let task = form.into_task()?;
        self.repo.insert_task(user_id, &task)?;
        info!(
            "event=task_write module=tasks action=insert status=ok task_id={}",
            task.id
        );
        Ok(task)
    }

    /// Replaces all editable fields of an existing task.
    pub fn update_task(&self, user_id: &str, task: &Task) -> Result<Task, TaskServiceError> {
        let task = task.normalized();
        task.validate()?;
        self.repo.update_task(user_id, &task)?;
        info!(
            "event=task_write module=tasks action=update status=ok task_id={}",
            task.id
        );
        Ok(task)
    }

    /// Deletes a task when `confirmed`; returns whether a delete happened.
    pub fn delete_task(
        &self,
        user_id: &str,
        task_id: &str,
        confirmed: bool,
    ) -> Result<bool, TaskServiceError> {
        if !confirmed {
            return Ok(false);
        }
        self.repo.delete_task(user_id, task_id)?;
        info!(
            "event=task_write module=tasks action=delete status=ok task_id={}",
            task_id
        );
        Ok(true)
    }
}
