use crate::error::{OpsAgentError, Result};
use serde::{Deserialize, Serialize};

/// Step status following a state machine: Pending → InProgress → Completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

/// One planned step and how far execution has got with it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: usize,
    pub description: String,
    pub status: TaskStatus,
}

/// Ordered list of planned steps
///
/// Built once from a plan; execution walks it front to back.
#[derive(Debug, Clone)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: usize,
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskList {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    pub fn from_steps<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for step in steps {
            list.append_task(step);
        }
        list
    }

    /// Appends a new task to the end of the list in Pending status
    pub fn append_task(&mut self, description: impl Into<String>) -> Task {
        let task = Task {
            id: self.next_id,
            description: description.into(),
            status: TaskStatus::Pending,
        };
        self.next_id += 1;
        self.tasks.push(task.clone());
        task
    }

    fn find_mut(&mut self, task_id: usize) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| OpsAgentError::ToolError(format!("No task with ID '{}' exists", task_id)))
    }

    /// Pending → InProgress
    pub fn start_task(&mut self, task_id: usize) -> Result<Task> {
        let task = self.find_mut(task_id)?;

        if task.status != TaskStatus::Pending {
            return Err(OpsAgentError::ToolError(format!(
                "Task '{}' cannot be started because it is not in PENDING status",
                task_id
            )));
        }

        task.status = TaskStatus::InProgress;
        Ok(task.clone())
    }

    /// InProgress → Completed
    pub fn complete_task(&mut self, task_id: usize) -> Result<Task> {
        let task = self.find_mut(task_id)?;

        if task.status != TaskStatus::InProgress {
            return Err(OpsAgentError::ToolError(format!(
                "Task '{}' cannot be completed because it is not in IN_PROGRESS status",
                task_id
            )));
        }

        task.status = TaskStatus::Completed;
        Ok(task.clone())
    }

    /// First task still waiting to run
    pub fn next_pending(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.status == TaskStatus::Pending)
    }

    pub fn list_tasks(&self) -> &[Task] {
        &self.tasks
    }
}
