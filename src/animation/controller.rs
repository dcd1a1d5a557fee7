use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, instrument, trace};

use super::easing::Easing;
use crate::config::AnimationConfig;

/// One eased transition between two visual values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

/// Periodic notification emitted while an animation runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub index: u64,
    /// Linear progress in `[0, 1)`
    pub progress: f64,
    pub value: f64,
}

/// Clears the running flag however the animation future ends
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives timer-based interpolation of a single visual value.
///
/// Frames are published on a watch channel for renderers; they are best
/// effort and may be skipped. The value returned by [`animate`] is the only
/// guaranteed result and is always exactly the requested end value.
///
/// [`animate`]: AnimationController::animate
#[derive(Debug)]
pub struct AnimationController {
    frame_interval: Duration,
    tick_interval: Duration,
    position: watch::Sender<f64>,
    running: Arc<AtomicBool>,
}

impl AnimationController {
    pub fn new(config: &AnimationConfig) -> Self {
        let (position, _) = watch::channel(0.0);
        Self {
            frame_interval: config.frame_interval(),
            tick_interval: config.tick_interval(),
            position,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Latest published visual value
    pub fn position(&self) -> f64 {
        *self.position.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.position.subscribe()
    }

    pub fn is_animating(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Runs the transition to completion and returns the resting value.
    ///
    /// `on_tick` is called every tick interval while the animation runs.
    /// Dropping the returned future stops the animation where it is; nothing
    /// further is published.
    #[instrument(skip(self, on_tick))]
    pub async fn animate<F>(&self, spec: AnimationSpec, mut on_tick: F) -> f64
    where
        F: FnMut(Tick) + Send,
    {
        self.running.store(true, Ordering::Release);
        let _guard = RunningGuard(self.running.clone());

        debug!(duration_ms = spec.duration.as_millis() as u64, "Animation started");
        self.position.send_replace(spec.from);

        let started = Instant::now();
        let mut frames = interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut tick_index = 0u64;
        let mut next_tick = self.tick_interval;

        while !spec.duration.is_zero() {
            frames.tick().await;
            let elapsed = started.elapsed();
            if elapsed >= spec.duration {
                break;
            }

            let progress = elapsed.as_secs_f64() / spec.duration.as_secs_f64();
            let value = spec.from + (spec.to - spec.from) * spec.easing.apply(progress);
            self.position.send_replace(value);
            trace!(progress, value, "Animation frame");

            if elapsed >= next_tick {
                on_tick(Tick {
                    index: tick_index,
                    progress,
                    value,
                });
                tick_index += 1;
                next_tick += self.tick_interval;
            }
        }

        self.position.send_replace(spec.to);
        debug!(ticks = tick_index, "Animation settled");
        spec.to
    }

    /// Places the visual value without animating
    pub fn jump_to(&self, value: f64) {
        self.position.send_replace(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn controller() -> AnimationController {
        AnimationController::new(&AnimationConfig::default())
    }

    fn spec(from: f64, to: f64, millis: u64) -> AnimationSpec {
        AnimationSpec {
            from,
            to,
            duration: Duration::from_millis(millis),
            easing: Easing::WHEEL,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolves_exactly_at_target() {
        let controller = controller();
        let started = Instant::now();

        let value = controller.animate(spec(10.0, 1910.25, 4000), |_| {}).await;

        assert_eq!(value, 1910.25);
        assert_eq!(controller.position(), 1910.25);
        assert!(started.elapsed() >= Duration::from_millis(4000));
        assert!(!controller.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_never_reverse_or_overshoot() {
        let controller = controller();
        let mut frames = controller.subscribe();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let recorder = {
            let seen = seen.clone();
            tokio::spawn(async move {
                while frames.changed().await.is_ok() {
                    let value = *frames.borrow_and_update();
                    seen.lock().unwrap().push(value);
                    if value == 720.0 {
                        break;
                    }
                }
            })
        };

        controller.animate(spec(0.0, 720.0, 2000), |_| {}).await;
        recorder.await.unwrap();

        let seen = seen.lock().unwrap();
        assert!(seen.len() > 10, "expected many frames, got {}", seen.len());
        for pair in seen.windows(2) {
            assert!(pair[1] >= pair[0], "reversed: {:?}", pair);
            assert!(pair[1] <= 720.0, "overshot: {}", pair[1]);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_direction_is_monotonic() {
        let controller = controller();
        let mut ticks = Vec::new();

        let value = controller
            .animate(spec(0.0, -5000.0, 4000), |tick| ticks.push(tick))
            .await;

        assert_eq!(value, -5000.0);
        for pair in ticks.windows(2) {
            assert!(pair[1].value <= pair[0].value);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_interval() {
        let controller = controller();
        let mut ticks = Vec::new();

        controller
            .animate(spec(0.0, 100.0, 1500), |tick| ticks.push(tick))
            .await;

        // Ticks at 150ms, 300ms, ... 1350ms while the animation is running.
        assert!(
            (8..=10).contains(&ticks.len()),
            "unexpected tick count {}",
            ticks.len()
        );
        for (i, tick) in ticks.iter().enumerate() {
            assert_eq!(tick.index, i as u64);
            assert!(tick.progress < 1.0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_jumps_to_target() {
        let controller = controller();
        let mut ticks = 0;

        let value = controller.animate(spec(5.0, 50.0, 0), |_| ticks += 1).await;

        assert_eq!(value, 50.0);
        assert_eq!(ticks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_animation_stops_quietly() {
        let controller = controller();

        let result = tokio::time::timeout(
            Duration::from_millis(1000),
            controller.animate(spec(0.0, 360.0, 4000), |_| {}),
        )
        .await;

        assert!(result.is_err());
        assert!(!controller.is_animating());
        let stopped_at = controller.position();
        assert!(stopped_at > 0.0 && stopped_at < 360.0);
    }

    #[test]
    fn test_jump_to() {
        let controller = controller();
        controller.jump_to(42.0);
        assert_eq!(controller.position(), 42.0);
    }
}
