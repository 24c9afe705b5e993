pub mod access;

use serde::{Deserialize, Serialize};

/// A named event/competition with an organizer and participant ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: u64,
    pub title: String,
    pub organizer: String,
    #[serde(default)]
    pub participants: Vec<u64>,
}

impl Series {
    fn new(id: u64, title: &str, organizer: &str, participants: &[u64]) -> Self {
        Self {
            id,
            title: title.to_string(),
            organizer: organizer.to_string(),
            participants: participants.to_vec(),
        }
    }
}

/// The records shown at mount. There is no backend; this is the whole data set.
pub fn sample_series() -> Vec<Series> {
    vec![
        Series::new(1, "2021-kraken", "yoni", &[1, 2]),
        Series::new(2, "2021-kraken", "yoni", &[1, 2]),
        Series::new(3, "2021-kraken", "yoni", &[1, 2]),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Populated,
}

/// Locally owned list of series, populated once at mount
#[derive(Debug, Clone)]
pub struct SeriesList {
    state: Lifecycle,
    items: Vec<Series>,
}

impl Default for SeriesList {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesList {
    pub fn new() -> Self {
        Self {
            state: Lifecycle::Uninitialized,
            items: Vec::new(),
        }
    }

    /// Populate the list. Only the first call has any effect.
    pub fn mount(&mut self) {
        if self.state == Lifecycle::Populated {
            tracing::debug!("Series list already mounted, ignoring");
            return;
        }

        self.items = sample_series();
        self.state = Lifecycle::Populated;
        tracing::info!("Mounted series list with {} records", self.items.len());
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn items(&self) -> &[Series] {
        &self.items
    }

    pub fn find(&self, id: u64) -> Option<&Series> {
        self.items.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_list_is_uninitialized_and_empty() {
        let list = SeriesList::new();
        assert_eq!(list.state(), Lifecycle::Uninitialized);
        assert!(list.items().is_empty());
    }

    #[test]
    fn test_mount_populates_sample_in_order() {
        let mut list = SeriesList::new();
        list.mount();

        assert_eq!(list.state(), Lifecycle::Populated);
        let ids: Vec<u64> = list.items().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        for series in list.items() {
            assert_eq!(series.title, "2021-kraken");
            assert_eq!(series.organizer, "yoni");
            assert_eq!(series.participants, vec![1, 2]);
        }
    }

    #[test]
    fn test_mount_happens_once() {
        let mut list = SeriesList::new();
        list.mount();
        list.mount();
        assert_eq!(list.items().len(), 3);
    }

    #[test]
    fn test_series_json_shape() {
        let json = serde_json::to_value(&sample_series()[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "2021-kraken",
                "organizer": "yoni",
                "participants": [1, 2]
            })
        );

        let parsed: Series =
            serde_json::from_str(r#"{"id": 9, "title": "t", "organizer": "o"}"#).unwrap();
        assert!(parsed.participants.is_empty());
    }
}
