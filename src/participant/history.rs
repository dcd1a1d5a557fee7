use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::Participant;

/// Number of past winners kept by default
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerRecord {
    pub participant: Participant,
    pub won_at: DateTime<Utc>,
}

/// Bounded list of recent winners, newest first
#[derive(Debug, Clone)]
pub struct WinnerHistory {
    records: Arc<RwLock<VecDeque<WinnerRecord>>>,
    capacity: usize,
}

impl Default for WinnerHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl WinnerHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub async fn record(&self, participant: Participant) -> WinnerRecord {
        let record = WinnerRecord {
            participant,
            won_at: Utc::now(),
        };

        let mut records = self.records.write().await;
        records.push_front(record.clone());
        records.truncate(self.capacity);

        debug!(
            participant_id = %record.participant.id,
            history_len = records.len(),
            "Winner recorded"
        );
        record
    }

    pub async fn recent(&self) -> Vec<WinnerRecord> {
        self.records.read().await.iter().cloned().collect()
    }

    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(name: &str) -> Participant {
        Participant::with_id(name, name, 1.0)
    }

    #[tokio::test]
    async fn test_newest_first() {
        let history = WinnerHistory::default();
        history.record(participant("a")).await;
        history.record(participant("b")).await;

        let names: Vec<String> = history
            .recent()
            .await
            .into_iter()
            .map(|r| r.participant.display_name)
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_keeps_only_capacity() {
        let history = WinnerHistory::default();
        for i in 0..15 {
            history.record(participant(&format!("p{}", i))).await;
        }

        let recent = history.recent().await;
        assert_eq!(recent.len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(recent[0].participant.display_name, "p14");
        assert_eq!(recent[9].participant.display_name, "p5");
    }

    #[tokio::test]
    async fn test_clear() {
        let history = WinnerHistory::default();
        history.record(participant("a")).await;

        history.clear().await;

        assert!(history.recent().await.is_empty());
    }
}
