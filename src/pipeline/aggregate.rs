use crate::models::TaskRecord;
use crate::pipeline::severity::{classify, Severity};

/// Worst severity across a client's tasks. An empty list is `Green`.
pub fn worst_severity(tasks: &[TaskRecord]) -> Severity {
    tasks
        .iter()
        .map(|task| classify(task.state.as_deref()))
        .max()
        .unwrap_or(Severity::Green)
}
