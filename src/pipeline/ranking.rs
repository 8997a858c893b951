use std::cmp::Reverse;

use itertools::Itertools;

use crate::models::TaskRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
    Unranked,
}

impl Priority {
    /// Labels are matched exactly; `"urgent"`, `"High"` and friends are unranked.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("high") => Priority::High,
            Some("medium") => Priority::Medium,
            Some("low") => Priority::Low,
            _ => Priority::Unranked,
        }
    }

    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
            Priority::Unranked => 0,
        }
    }
}

pub fn priority_weight(task: &TaskRecord) -> u8 {
    Priority::from_label(task.priority.as_deref()).weight()
}

/// Orders tasks by descending priority weight. Equal weights keep their input order.
pub fn rank(tasks: Vec<TaskRecord>) -> Vec<TaskRecord> {
    tasks
        .into_iter()
        .sorted_by_key(|task| Reverse(priority_weight(task)))
        .collect()
}
