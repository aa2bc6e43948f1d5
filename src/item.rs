use serde::{Deserialize, Serialize};

use crate::timeline::Timestamp;

/// Type alias for item IDs (identifiers from task files)
pub type ItemId = u64;

/// A task shown on the timeline.
///
/// `start` and `end` are optional: a task that has not started yet has
/// neither, a running task has only `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub start: Option<Timestamp>,
    #[serde(default)]
    pub end: Option<Timestamp>,
    #[serde(default)]
    pub dependencies: Vec<ItemId>,
}

impl Item {
    /// Creates an item with the given id, label and time range.
    pub fn new(id: ItemId, content: impl Into<String>, start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        Self {
            id,
            content: content.into(),
            group: None,
            start,
            end,
            dependencies: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<ItemId>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Returns the (start, end) span, using `start` for both ends of point items.
    pub fn span(&self) -> Option<(Timestamp, Timestamp)> {
        let start = self.start?;
        Some((start, self.end.unwrap_or(start)))
    }
}

/// Returns the item with the smallest start time.
///
/// Items without a start are skipped. On ties the first item wins.
pub fn earliest_item(items: &[Item]) -> Option<&Item> {
    items.iter().fold(None, |best: Option<&Item>, item| match (best, item.start) {
        (_, None) => best,
        (None, Some(_)) => Some(item),
        (Some(b), Some(start)) => {
            if b.start.is_some_and(|b_start| start < b_start) {
                Some(item)
            } else {
                Some(b)
            }
        }
    })
}

/// Returns the item with the largest start time.
///
/// Items without a start are skipped. On ties the first item wins.
pub fn latest_item(items: &[Item]) -> Option<&Item> {
    items.iter().fold(None, |best: Option<&Item>, item| match (best, item.start) {
        (_, None) => best,
        (None, Some(_)) => Some(item),
        (Some(b), Some(start)) => {
            if b.start.is_some_and(|b_start| start > b_start) {
                Some(item)
            } else {
                Some(b)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Item> {
        vec![
            Item::new(1, "build", Some(2000.0), Some(3000.0)),
            Item::new(2, "fetch", Some(1000.0), Some(1500.0)),
            Item::new(3, "pending", None, None),
            Item::new(4, "deploy", Some(5000.0), None),
        ]
    }

    #[test]
    fn test_earliest_item() {
        let items = sample();
        assert_eq!(earliest_item(&items).map(|i| i.id), Some(2));
    }

    #[test]
    fn test_latest_item() {
        let items = sample();
        assert_eq!(latest_item(&items).map(|i| i.id), Some(4));
    }

    #[test]
    fn test_empty_and_unstarted() {
        assert!(earliest_item(&[]).is_none());
        let items = vec![Item::new(1, "a", None, None)];
        assert!(latest_item(&items).is_none());
    }

    #[test]
    fn test_ties_keep_first() {
        let items = vec![
            Item::new(1, "a", Some(10.0), Some(20.0)),
            Item::new(2, "b", Some(10.0), Some(30.0)),
        ];
        assert_eq!(earliest_item(&items).map(|i| i.id), Some(1));
        assert_eq!(latest_item(&items).map(|i| i.id), Some(1));
    }

    #[test]
    fn test_deserialize_partial_item() {
        let item: Item = serde_json::from_str(r#"{"id": 7, "content": "x", "start": 12.5}"#).unwrap();
        assert_eq!(item.start, Some(12.5));
        assert_eq!(item.end, None);
        assert!(item.dependencies.is_empty());
        assert_eq!(item.span(), Some((12.5, 12.5)));
    }
}
