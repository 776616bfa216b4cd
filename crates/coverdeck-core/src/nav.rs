//! Navigation controller: the only writer of the centered position.

use tracing::debug;

use crate::config::CarouselConfig;

/// Rendering window around the centered card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPolicy {
    /// Beyond this distance cards are drawn de-emphasized
    pub max_visible_side: u32,
    /// Beyond this distance cards are not drawn at all
    pub hide_beyond: u32,
}

impl WindowPolicy {
    pub fn new(max_visible_side: u32, hide_beyond: u32) -> Self {
        Self {
            max_visible_side,
            hide_beyond,
        }
    }

    pub fn from_config(config: &CarouselConfig) -> Self {
        Self::new(config.max_visible_side, config.hide_beyond)
    }
}

/// Where one slot sits relative to the centered card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPlacement {
    /// `slot - centered`; negative is left of center
    pub offset: i64,
    pub is_center: bool,
    pub outside_window: bool,
    pub hidden: bool,
}

impl SlotPlacement {
    pub fn distance(&self) -> u64 {
        self.offset.unsigned_abs()
    }
}

/// Holds the centered position for an order of `len` slots.
///
/// The position is clamped on every write, so it is always within
/// `[0, len - 1]`, or 0 for an empty order.
#[derive(Debug, Clone)]
pub struct Navigator {
    len: usize,
    centered: usize,
    window: WindowPolicy,
}

impl Navigator {
    pub fn new(len: usize, window: WindowPolicy) -> Self {
        Self {
            len,
            centered: 0,
            window,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn centered(&self) -> usize {
        self.centered
    }

    pub fn window(&self) -> WindowPolicy {
        self.window
    }

    /// Clamp `target` into range and make it the centered position.
    ///
    /// Returns `false` when nothing changed; callers must not re-render then.
    pub fn center_on(&mut self, target: i64) -> bool {
        if self.len == 0 {
            return false;
        }
        let max = (self.len - 1) as i64;
        let clamped = target.clamp(0, max) as usize;
        if clamped == self.centered {
            return false;
        }
        debug!("Centered {} -> {} (requested {})", self.centered, clamped, target);
        self.centered = clamped;
        true
    }

    /// Move the centered position by `delta` slots
    pub fn step(&mut self, delta: i64) -> bool {
        self.center_on(self.centered as i64 + delta)
    }

    /// Reset for a new order of `len` slots, centered on the first
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.centered = 0;
    }

    /// Placement of `slot` under the current centered position
    pub fn placement(&self, slot: usize) -> SlotPlacement {
        let offset = slot as i64 - self.centered as i64;
        let distance = offset.unsigned_abs();
        SlotPlacement {
            offset,
            is_center: offset == 0,
            outside_window: distance > self.window.max_visible_side as u64,
            hidden: distance > self.window.hide_beyond as u64,
        }
    }

    /// Placements for every slot, in slot order
    pub fn placements(&self) -> impl Iterator<Item = SlotPlacement> + '_ {
        (0..self.len).map(|slot| self.placement(slot))
    }
}
