use std::collections::HashMap;

use chrono::{DateTime, Utc};

use common::Direction;

/// Duplicate-suppression state: remembers, per instrument, the last
/// computed direction and the last alert actually emitted.
///
/// Policy: an alert goes out only when the computed direction differs from
/// the previous cycle's direction for that instrument. HOLD counts as a
/// direction, so a BUY after an intervening HOLD or SELL emits again. One
/// extra clause: a same-direction repeat for the same decision-bar
/// timestamp never emits, even across a HOLD blip, since the underlying
/// bar hasn't changed. No time or bar-count cooldown beyond that.
///
/// Owned by the `Scanner`; process-lifetime, never persisted, reset on
/// restart. Only the single scan task touches it.
#[derive(Debug, Default)]
pub struct AlertGuard {
    pairs: HashMap<String, PairState>,
}

#[derive(Debug)]
struct PairState {
    last_direction: Direction,
    last_emitted: Option<(Direction, DateTime<Utc>)>,
}

impl AlertGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the newly computed direction for `symbol`'s decision bar.
    /// Returns `true` when an alert should be delivered.
    pub fn should_emit(&mut self, symbol: &str, direction: Direction, bar: DateTime<Utc>) -> bool {
        let state = self.pairs.entry(symbol.to_string()).or_insert(PairState {
            last_direction: Direction::Hold,
            last_emitted: None,
        });

        if state.last_direction == direction {
            return false;
        }
        state.last_direction = direction;

        if direction == Direction::Hold {
            return false;
        }
        if let Some((dir, emitted_bar)) = state.last_emitted {
            if dir == direction && emitted_bar == bar {
                return false;
            }
        }
        state.last_emitted = Some((direction, bar));
        true
    }
}
