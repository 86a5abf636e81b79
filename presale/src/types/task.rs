use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// An airdrop task offered by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-readable description; also the key sent on completion.
    pub task: String,
    pub reward: f64,
}

/// Fetched tasks plus the ids completed during this session.
///
/// The completed set lives only in memory; it is not persisted and is not
/// reconciled with the server.
#[derive(Debug, Clone, Default)]
pub struct TaskTracker {
    tasks: Vec<Task>,
    completed: HashSet<String>,
}

impl TaskTracker {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            completed: HashSet::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn is_completed(&self, task_id: &str) -> bool {
        self.completed.contains(task_id)
    }

    /// Mark a known task as completed. Returns `false` for unknown ids or
    /// tasks already marked.
    pub fn mark_completed(&mut self, task_id: &str) -> bool {
        if self.find(task_id).is_none() {
            return false;
        }
        self.completed.insert(task_id.to_string())
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Sum of rewards for completed tasks.
    pub fn total_earned(&self) -> f64 {
        self.tasks
            .iter()
            .filter(|t| self.completed.contains(&t.id))
            .map(|t| t.reward)
            .sum()
    }

    /// Sum of rewards across all tasks.
    pub fn total_available(&self) -> f64 {
        self.tasks.iter().map(|t| t.reward).sum()
    }

    /// Rewards still up for grabs.
    pub fn remaining(&self) -> f64 {
        self.total_available() - self.total_earned()
    }
}
