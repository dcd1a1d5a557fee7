use luckypicker::event::LoggingSpinHandler;
use luckypicker::{
    EventBus, InMemoryParticipantRegistry, ParticipantRegistry, PickerConfig, PickerError,
    PickerSubscription, RegistryCompletionHandler, SpinRequest, SpinSession, WinnerHistory,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_PARTICIPANTS: usize = 8;
const DEMO_DRAWS: usize = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luckypicker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "Picker demo failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), PickerError> {
    let config = PickerConfig::from_env()?;
    let picker_id = petname::Petnames::default().generate_one(2, "-");
    info!(picker_id = %picker_id, mode = %config.mode, "Starting lucky picker demo");

    let registry = Arc::new(InMemoryParticipantRegistry::new());
    for _ in 0..DEMO_PARTICIPANTS {
        let name = petname::Petnames::default().generate_one(2, " ");
        registry.add_named(&name).await?;
    }

    let event_bus = EventBus::new();
    let subscription = PickerSubscription::new(
        picker_id.clone(),
        Arc::new(LoggingSpinHandler::new()),
        event_bus.clone(),
    )
    .start()
    .await;

    let history = WinnerHistory::default();
    let completion = Arc::new(RegistryCompletionHandler::new(
        registry.clone(),
        history.clone(),
    ));
    let session = SpinSession::new(picker_id.as_str(), &config, completion, event_bus)?;

    for draw in 1..=DEMO_DRAWS {
        let participants = registry.list().await;
        let ticket = match session.request_spin(&participants)? {
            SpinRequest::Started(ticket) => ticket,
            SpinRequest::Ignored(reason) => {
                warn!(draw, reason = ?reason, "Spin request ignored - stopping");
                break;
            }
        };

        let outcome = ticket.outcome().await?;
        if let Some(winner) = outcome.winner() {
            info!(draw, winner = %winner.display_name, "Draw complete");
        }
    }

    for (place, record) in history.recent().await.iter().rev().enumerate() {
        info!(
            place = place + 1,
            name = %record.participant.display_name,
            won_at = %record.won_at,
            "Winner"
        );
    }

    subscription.abort();
    Ok(())
}
