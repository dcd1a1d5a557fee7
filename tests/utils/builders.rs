use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use luckypicker::{
    EventBus, Participant, PickerConfig, PresentationMode, SpinCompletionHandler, SpinSession,
};

use super::mocks::RecordingCompletionHandler;

// ============================================================================
// Participant Lists
// ============================================================================

pub struct ParticipantListBuilder {
    participants: Vec<Participant>,
}

#[allow(dead_code)]
impl ParticipantListBuilder {
    pub fn new() -> Self {
        Self {
            participants: vec![],
        }
    }

    /// `count` equal-weight participants with ids "p-0".."p-N"
    pub fn with_equal(mut self, count: usize) -> Self {
        for _ in 0..count {
            self = self.with_weight(1.0);
        }
        self
    }

    pub fn with_weights(mut self, weights: &[f64]) -> Self {
        for weight in weights {
            self = self.with_weight(*weight);
        }
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        let position = self.participants.len();
        self.participants.push(Participant::with_id(
            format!("p-{}", position),
            format!("Player {}", position),
            weight,
        ));
        self
    }

    pub fn build(self) -> Vec<Participant> {
        self.participants
    }
}

// ============================================================================
// Picker Setup
// ============================================================================

pub struct TestPicker {
    pub session: SpinSession,
    pub event_bus: EventBus,
    pub completions: RecordingCompletionHandler,
}

pub struct TestPickerBuilder {
    config: PickerConfig,
    seed: u64,
    picker_id: String,
    completion: Option<Arc<dyn SpinCompletionHandler>>,
}

#[allow(dead_code)]
impl TestPickerBuilder {
    pub fn new() -> Self {
        Self {
            config: PickerConfig::default(),
            seed: 42,
            picker_id: "picker-123".to_string(),
            completion: None,
        }
    }

    pub fn wheel(mut self) -> Self {
        self.config.mode = PresentationMode::Wheel;
        self
    }

    pub fn reel(mut self) -> Self {
        self.config.mode = PresentationMode::Reel;
        self
    }

    pub fn with_config(mut self, config: PickerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_picker_id(mut self, picker_id: &str) -> Self {
        self.picker_id = picker_id.to_string();
        self
    }

    /// Replaces the recording handler as the session's completion handler
    pub fn with_completion(mut self, completion: Arc<dyn SpinCompletionHandler>) -> Self {
        self.completion = Some(completion);
        self
    }

    pub fn build(self) -> TestPicker {
        let event_bus = EventBus::new();
        let completions = RecordingCompletionHandler::new();
        let completion: Arc<dyn SpinCompletionHandler> = match self.completion {
            Some(completion) => completion,
            None => Arc::new(completions.clone()),
        };

        let session = SpinSession::with_rng(
            self.picker_id,
            &self.config,
            completion,
            event_bus.clone(),
            Box::new(StdRng::seed_from_u64(self.seed)),
        )
        .expect("test config should be valid");

        TestPicker {
            session,
            event_bus,
            completions,
        }
    }
}
