use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::models::{palette_color, Participant, ParticipantId};
use crate::shared::PickerError;

/// Host-owned participant storage.
///
/// The picker core only ever reads snapshots of this list; adding, removing
/// and re-weighting entries is the host's business.
#[async_trait]
pub trait ParticipantRegistry: Send + Sync {
    async fn add(&self, participant: Participant) -> Result<(), PickerError>;
    async fn get(&self, id: &ParticipantId) -> Option<Participant>;

    /// All participants in insertion order
    async fn list(&self) -> Vec<Participant>;

    async fn remove(&self, id: &ParticipantId) -> Result<Participant, PickerError>;
    async fn update_weight(&self, id: &ParticipantId, weight: f64) -> Result<(), PickerError>;
    async fn clear(&self);
}

/// In-memory implementation of ParticipantRegistry for hosts and tests
pub struct InMemoryParticipantRegistry {
    participants: RwLock<Vec<Participant>>,
}

impl Default for InMemoryParticipantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryParticipantRegistry {
    pub fn new() -> Self {
        Self {
            participants: RwLock::new(Vec::new()),
        }
    }

    /// Adds a participant by name, colouring it by its position in the list
    pub async fn add_named(&self, display_name: &str) -> Result<Participant, PickerError> {
        let position = self.participants.read().await.len();
        let participant = Participant::new(display_name, palette_color(position));
        self.add(participant.clone()).await?;
        Ok(participant)
    }

    pub async fn len(&self) -> usize {
        self.participants.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.participants.read().await.is_empty()
    }
}

#[async_trait]
impl ParticipantRegistry for InMemoryParticipantRegistry {
    #[instrument(skip(self, participant), fields(participant_id = %participant.id))]
    async fn add(&self, participant: Participant) -> Result<(), PickerError> {
        let mut participants = self.participants.write().await;
        if participants.iter().any(|p| p.id == participant.id) {
            warn!("Participant already registered");
            return Err(PickerError::DuplicateParticipant(participant.id));
        }

        debug!(display_name = %participant.display_name, "Participant added");
        participants.push(participant);
        Ok(())
    }

    async fn get(&self, id: &ParticipantId) -> Option<Participant> {
        let participants = self.participants.read().await;
        participants.iter().find(|p| &p.id == id).cloned()
    }

    async fn list(&self) -> Vec<Participant> {
        self.participants.read().await.clone()
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &ParticipantId) -> Result<Participant, PickerError> {
        let mut participants = self.participants.write().await;
        let position = participants
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| PickerError::ParticipantNotFound(id.clone()))?;

        let removed = participants.remove(position);
        info!(
            participant_id = %id,
            remaining = participants.len(),
            "Participant removed"
        );
        Ok(removed)
    }

    async fn update_weight(&self, id: &ParticipantId, weight: f64) -> Result<(), PickerError> {
        let mut participants = self.participants.write().await;
        let participant = participants
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| PickerError::ParticipantNotFound(id.clone()))?;

        debug!(participant_id = %id, weight, "Updating participant weight");
        participant.weight = weight;
        Ok(())
    }

    async fn clear(&self) {
        let mut participants = self.participants.write().await;
        info!(count = participants.len(), "Clearing participants");
        participants.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_preserves_insertion_order() {
        let registry = InMemoryParticipantRegistry::new();
        let alice = registry.add_named("Alice").await.unwrap();
        let bob = registry.add_named("Bob").await.unwrap();
        let carol = registry.add_named("Carol").await.unwrap();

        let ids: Vec<ParticipantId> = registry.list().await.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![alice.id, bob.id, carol.id]);
    }

    #[tokio::test]
    async fn test_add_named_cycles_palette() {
        let registry = InMemoryParticipantRegistry::new();
        let first = registry.add_named("Alice").await.unwrap();
        let second = registry.add_named("Bob").await.unwrap();

        assert_eq!(first.color, palette_color(0));
        assert_eq!(second.color, palette_color(1));
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_id() {
        let registry = InMemoryParticipantRegistry::new();
        registry
            .add(Participant::with_id("same", "Alice", 1.0))
            .await
            .unwrap();

        let result = registry.add(Participant::with_id("same", "Bob", 1.0)).await;

        assert_eq!(
            result,
            Err(PickerError::DuplicateParticipant(ParticipantId::from("same")))
        );
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_returns_participant() {
        let registry = InMemoryParticipantRegistry::new();
        let alice = registry.add_named("Alice").await.unwrap();
        registry.add_named("Bob").await.unwrap();

        let removed = registry.remove(&alice.id).await.unwrap();

        assert_eq!(removed.display_name, "Alice");
        assert!(registry.get(&alice.id).await.is_none());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_nonexistent_participant() {
        let registry = InMemoryParticipantRegistry::new();

        let result = registry.remove(&ParticipantId::from("ghost")).await;

        assert!(matches!(result, Err(PickerError::ParticipantNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_weight() {
        let registry = InMemoryParticipantRegistry::new();
        let alice = registry.add_named("Alice").await.unwrap();

        registry.update_weight(&alice.id, 4.0).await.unwrap();

        assert_eq!(registry.get(&alice.id).await.unwrap().weight, 4.0);
    }

    #[tokio::test]
    async fn test_clear() {
        let registry = InMemoryParticipantRegistry::new();
        registry.add_named("Alice").await.unwrap();
        registry.add_named("Bob").await.unwrap();

        registry.clear().await;

        assert!(registry.is_empty().await);
    }
}
