//! Periodic update loops that move an encoder on their own, standing in for a
//! device that streams its state back.

use crate::encoder::Encoder;
use crate::error::EncoderError;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

const TOP: i32 = 100;

/// Which setter a driver uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    #[default]
    Percent,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrivePlan {
    pub start: i32,
    pub step: i32,
    pub delay: Duration,
    pub mode: PlayMode,
}

impl Default for DrivePlan {
    fn default() -> Self {
        DrivePlan {
            start: 25,
            step: 1,
            delay: Duration::from_millis(60),
            mode: PlayMode::Percent,
        }
    }
}

/// Advances `progress` by `step` in the direction of `mult`, bouncing between
/// 0 and 100. Values past an end, or within one step of it, snap to that end.
pub fn next_progress(progress: i32, step: i32, mult: i32) -> (i32, i32) {
    let mut progress = progress.saturating_add(step.saturating_mul(mult));
    if progress > TOP || TOP.saturating_sub(progress) < step {
        progress = TOP;
    } else if progress < 0 || progress < step {
        progress = 0;
    }

    let mult = match progress {
        TOP => -1,
        0 => 1,
        _ => mult,
    };
    (progress, mult)
}

/// Updates `encoder` once per `plan.delay` until `cancel` turns true or its
/// sender goes away.
///
/// Each tick validates and applies one value, so cancelling between ticks
/// never leaves a partial update behind.
pub async fn drive(
    encoder: Arc<Encoder>,
    plan: DrivePlan,
    mut cancel: watch::Receiver<bool>,
) -> Result<(), EncoderError> {
    let mut progress = plan.start;
    let mut mult = 1;

    let mut ticker = time::interval(plan.delay);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if *cancel.borrow() {
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {
                match plan.mode {
                    PlayMode::Percent => encoder.set_percent(progress)?,
                    PlayMode::Absolute => encoder.set_absolute(progress, TOP)?,
                }
                trace!(progress, "driver tick");
                (progress, mult) = next_progress(progress, plan.step, mult);
            }
            changed = cancel.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
    debug!("driver stopped");
    Ok(())
}
