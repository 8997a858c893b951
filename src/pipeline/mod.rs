//! Turns the raw task listing into the ranked, client-grouped view shown on
//! the dashboard. Every stage is a pure function of its input.

pub mod aggregate;
pub mod grouping;
pub mod ranking;
pub mod severity;

use serde::Serialize;

use crate::models::{RawBatch, TaskRecord};

pub use aggregate::worst_severity;
pub use grouping::{group, ClientGroup};
pub use ranking::rank;
pub use severity::{classify, Severity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub task: TaskRecord,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientView {
    pub client: String,
    pub severity: Severity,
    pub tasks: Vec<TaskView>,
}

pub fn build_view(batches: &[RawBatch]) -> Vec<ClientView> {
    group(batches)
        .into_iter()
        .map(|ClientGroup { client, tasks }| {
            let tasks = rank(tasks);
            let severity = worst_severity(&tasks);
            let tasks = tasks
                .into_iter()
                .map(|task| TaskView {
                    severity: classify(task.state.as_deref()),
                    task,
                })
                .collect();
            ClientView {
                client,
                severity,
                tasks,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(item: &str, priority: &str, state: &str) -> TaskRecord {
        TaskRecord {
            item: Some(item.into()),
            priority: Some(priority.into()),
            state: Some(state.into()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<RawBatch> {
        vec![
            RawBatch {
                client: "Acme".into(),
                tasks: vec![
                    task("payslips", "low", "ok"),
                    task("loa", "high", "escalated"),
                ],
            },
            RawBatch {
                client: "Globex".into(),
                tasks: vec![task("aml", "medium", "REQUESTED -> REMINDER_SENT")],
            },
            RawBatch {
                client: "Acme".into(),
                tasks: vec![task("id", "high", "NOT_STARTED -> NOT_STARTED")],
            },
        ]
    }

    #[test]
    fn single_client_end_to_end() {
        let view = build_view(&[RawBatch {
            client: "Acme".into(),
            tasks: vec![task("a", "low", "ok"), task("b", "high", "escalated")],
        }]);

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].client, "Acme");
        assert_eq!(view[0].severity, Severity::Red);
        let order: Vec<_> = view[0]
            .tasks
            .iter()
            .map(|t| (t.task.priority(), t.task.state(), t.severity))
            .collect();
        assert_eq!(
            order,
            vec![
                ("high", "escalated", Severity::Red),
                ("low", "ok", Severity::Green),
            ]
        );
    }

    #[test]
    fn merged_groups_are_ranked_after_concatenation() {
        let view = build_view(&sample());

        assert_eq!(view.len(), 2);
        let acme: Vec<_> = view[0].tasks.iter().map(|t| t.task.item()).collect();
        assert_eq!(acme, vec!["loa", "id", "payslips"]);
        assert_eq!(view[1].client, "Globex");
        assert_eq!(view[1].severity, Severity::Amber);
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let raw = sample();
        let first = build_view(&raw);
        let second = build_view(&raw);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn malformed_fields_rank_lowest_and_classify_green() {
        let raw: Vec<RawBatch> = serde_json::from_str(
            r#"[{"client": "Acme", "tasks": [
                {"item": "odd", "priority": 3, "state": ["escalated"]},
                {"item": "low", "priority": "low", "state": "ok"}
            ]}]"#,
        )
        .unwrap();

        let view = build_view(&raw);
        let order: Vec<_> = view[0].tasks.iter().map(|t| t.task.item()).collect();
        assert_eq!(order, vec!["low", "odd"]);
        assert_eq!(view[0].tasks[1].severity, Severity::Green);
        assert_eq!(view[0].severity, Severity::Green);
    }

    #[test]
    fn empty_listing_is_empty_view() {
        assert!(build_view(&[]).is_empty());
    }
}
