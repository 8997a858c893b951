use std::collections::HashMap;

use serde::Serialize;

use crate::models::{RawBatch, TaskRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientGroup {
    pub client: String,
    pub tasks: Vec<TaskRecord>,
}

/// Merges batches sharing a client into one group.
///
/// Groups come out in order of each client's first appearance. Tasks keep
/// batch-arrival order, then within-batch order.
pub fn group(batches: &[RawBatch]) -> Vec<ClientGroup> {
    let mut groups: Vec<ClientGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for batch in batches {
        let slot = *index.entry(batch.client.as_str()).or_insert_with(|| {
            groups.push(ClientGroup {
                client: batch.client.clone(),
                tasks: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].tasks.extend(batch.tasks.iter().cloned());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(item: &str) -> TaskRecord {
        TaskRecord {
            item: Some(item.into()),
            ..Default::default()
        }
    }

    fn batch(client: &str, items: &[&str]) -> RawBatch {
        RawBatch {
            client: client.into(),
            tasks: items.iter().map(|i| task(i)).collect(),
        }
    }

    fn items(group: &ClientGroup) -> Vec<&str> {
        group.tasks.iter().map(TaskRecord::item).collect()
    }

    #[test]
    fn repeated_client_batches_are_concatenated() {
        let groups = group(&[
            batch("Acme", &["A"]),
            batch("Acme", &["B"]),
            batch("Globex", &["C"]),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].client, "Acme");
        assert_eq!(items(&groups[0]), vec!["A", "B"]);
        assert_eq!(groups[1].client, "Globex");
        assert_eq!(items(&groups[1]), vec!["C"]);
    }

    #[test]
    fn first_appearance_fixes_position() {
        let groups = group(&[
            batch("Globex", &["G1", "G2"]),
            batch("Acme", &["A1"]),
            batch("Globex", &["G3"]),
        ]);

        let clients: Vec<_> = groups.iter().map(|g| g.client.as_str()).collect();
        assert_eq!(clients, vec!["Globex", "Acme"]);
        assert_eq!(items(&groups[0]), vec!["G1", "G2", "G3"]);
    }

    #[test]
    fn empty_batch_still_creates_group() {
        let groups = group(&[batch("Initech", &[])]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].tasks.is_empty());
    }

    #[test]
    fn no_batches_no_groups() {
        assert!(group(&[]).is_empty());
    }
}
