//! Countdown background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Length of one countdown step
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that drives the sequencer once per second while it runs.
///
/// The tick source is rebuilt from scratch on every input change, so a tick
/// never fires against state it was not created for.
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut changes = state.subscribe_input_changes();

    loop {
        changes.borrow_and_update();

        let running = match state.is_running() {
            Ok(running) => running,
            Err(e) => {
                error!("Failed to read timer state: {}", e);
                sleep(TICK_PERIOD).await;
                continue;
            }
        };

        if !running {
            debug!("Timer idle, waiting for input change");
            if changes.changed().await.is_err() {
                break;
            }
            continue;
        }

        // First tick lands one full period after (re)start
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(true) => {}
                        Ok(false) => {
                            debug!("Sequencer stopped running");
                            break;
                        }
                        Err(e) => {
                            error!("Failed to advance countdown: {}", e);
                            break;
                        }
                    }
                }

                changed = changes.changed() => {
                    if changed.is_err() {
                        info!("Countdown task shutting down");
                        return;
                    }
                    debug!("Inputs changed, rebuilding tick source");
                    break;
                }
            }
        }
    }

    info!("Countdown task shutting down");
}
