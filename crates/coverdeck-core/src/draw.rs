//! No-replacement bookkeeping: which items have been drawn since the last
//! reshuffle, and the `drawn/total` progress counter.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::deck::ItemId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawMode {
    /// Cards can be revealed any number of times; nothing is tracked
    #[default]
    Replace,
    /// First reveals are recorded and sent to the tray
    NoReplace,
}

impl DrawMode {
    pub fn toggled(self) -> Self {
        match self {
            DrawMode::Replace => DrawMode::NoReplace,
            DrawMode::NoReplace => DrawMode::Replace,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DrawMode::Replace => "replace",
            DrawMode::NoReplace => "no-replace",
        }
    }
}

/// Progress counter value, displayed as `drawn/total`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawProgress {
    pub drawn: usize,
    pub total: usize,
}

impl fmt::Display for DrawProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.drawn, self.total)
    }
}

#[derive(Debug, Clone)]
pub struct DrawTracker {
    mode: DrawMode,
    drawn: HashSet<ItemId>,
    deck_size: usize,
}

impl DrawTracker {
    pub fn new(mode: DrawMode, deck_size: usize) -> Self {
        Self {
            mode,
            drawn: HashSet::new(),
            deck_size,
        }
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Switch modes. The drawn set survives; only reshuffle clears it.
    pub fn set_mode(&mut self, mode: DrawMode) {
        if self.mode != mode {
            debug!("Draw mode {} -> {}", self.mode.label(), mode.label());
        }
        self.mode = mode;
    }

    pub fn is_active(&self) -> bool {
        self.mode == DrawMode::NoReplace
    }

    pub fn is_drawn(&self, id: &ItemId) -> bool {
        self.drawn.contains(id)
    }

    /// Record a transition into revealed. Returns `true` only for a first
    /// draw in no-replace mode; repeats and replace mode are no-ops.
    pub fn record_reveal(&mut self, id: &ItemId) -> bool {
        if !self.is_active() || self.drawn.contains(id) {
            return false;
        }
        self.drawn.insert(id.clone());
        debug!("Drew {} ({})", id, self.progress());
        true
    }

    pub fn progress(&self) -> DrawProgress {
        DrawProgress {
            drawn: self.drawn.len(),
            total: self.deck_size,
        }
    }

    /// Forget every draw. Called exactly on reshuffle.
    pub fn reset(&mut self) {
        self.drawn.clear();
    }
}
