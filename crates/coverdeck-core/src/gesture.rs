//! Gesture recognizer: turns raw pointer, wheel and key input into
//! navigation and reveal intents.
//!
//! A pointer sequence is either a drag, which recenters live while it moves,
//! or a tap, which is classified on release by what was pressed. Only one
//! pointer sequence is tracked at a time; input from any other pointer is
//! ignored until the active one is released.

use tracing::{debug, trace};

use crate::config::CarouselConfig;
use crate::nav::Navigator;

pub type PointerId = u64;

/// Part of a card that received a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRegion {
    /// Anywhere on the card not covered by a more specific region
    Body,
    /// The media face shown once the card is revealed
    Front,
    /// The item's link; taps here are never handled by the carousel
    Link,
}

/// What lies under the pointer, as resolved by the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Card { slot: usize, region: CardRegion },
    /// Empty space on the track
    Track,
}

/// Discrete key input, already translated from physical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Left,
    Right,
    /// Flip the centered card
    Activate,
    Reshuffle,
}

/// Discrete command derived from wheel or key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureCommand {
    Step(i64),
    FlipCentered,
    Reshuffle,
}

/// How a released tap should be handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapIntent {
    /// Side card: bring it to the center
    Select { slot: usize },
    /// Centered card: toggle its reveal state
    Flip { slot: usize },
    /// Front face of the centered card: overlay toggle when revealed
    FrontFace { slot: usize },
    /// Link region: leave it to the host
    PassThrough { slot: usize },
    /// Empty track
    Nothing,
}

/// Result of releasing a pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// No active sequence for this pointer
    Ignored,
    /// The sequence moved past the jitter threshold
    Dragged,
    Tap(TapIntent),
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    pointer: PointerId,
    start_x: f64,
    start_centered: usize,
    max_movement: f64,
    target: HitTarget,
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    slot_pitch: f64,
    jitter_threshold: f64,
    wheel_threshold: f64,
    drag: Option<DragState>,
}

impl GestureRecognizer {
    pub fn new(config: &CarouselConfig) -> Self {
        Self {
            slot_pitch: config.slot_pitch,
            jitter_threshold: config.jitter_threshold,
            wheel_threshold: config.wheel_threshold,
            drag: None,
        }
    }

    /// Whether a pointer sequence is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a pointer sequence. Returns `false` if another pointer is active.
    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        x: f64,
        target: HitTarget,
        nav: &Navigator,
    ) -> bool {
        if let Some(active) = &self.drag {
            if active.pointer != pointer {
                debug!("Ignoring pointer {} while pointer {} is active", pointer, active.pointer);
                return false;
            }
        }
        self.drag = Some(DragState {
            pointer,
            start_x: x,
            start_centered: nav.centered(),
            max_movement: 0.0,
            target,
        });
        true
    }

    /// Track movement and recenter live. Returns `true` if the centered
    /// position changed.
    pub fn pointer_move(&mut self, pointer: PointerId, x: f64, nav: &mut Navigator) -> bool {
        let Some(drag) = self.drag.as_mut().filter(|d| d.pointer == pointer) else {
            return false;
        };

        let offset = x - drag.start_x;
        drag.max_movement = drag.max_movement.max(offset.abs());

        let target = (drag.start_centered as f64 - offset / self.slot_pitch).round() as i64;
        trace!("Drag offset {:.1} -> target {}", offset, target);
        if target != nav.centered() as i64 {
            nav.center_on(target)
        } else {
            false
        }
    }

    /// End the sequence and classify it as a drag or a tap.
    ///
    /// Taps are decided by the largest movement seen during the sequence,
    /// not by net displacement.
    pub fn pointer_up(&mut self, pointer: PointerId, x: f64, centered: usize) -> PointerOutcome {
        let Some(drag) = self.drag.filter(|d| d.pointer == pointer) else {
            return PointerOutcome::Ignored;
        };
        self.drag = None;

        let max_movement = drag.max_movement.max((x - drag.start_x).abs());
        if max_movement >= self.jitter_threshold {
            debug!("Drag ended after {:.1} of movement", max_movement);
            return PointerOutcome::Dragged;
        }

        let intent = match drag.target {
            HitTarget::Track => TapIntent::Nothing,
            HitTarget::Card { slot, region: CardRegion::Link } => TapIntent::PassThrough { slot },
            HitTarget::Card { slot, .. } if slot != centered => TapIntent::Select { slot },
            HitTarget::Card { slot, region: CardRegion::Front } => TapIntent::FrontFace { slot },
            HitTarget::Card { slot, region: CardRegion::Body } => TapIntent::Flip { slot },
        };
        debug!("Tap classified as {:?}", intent);
        PointerOutcome::Tap(intent)
    }

    /// Drop any in-progress sequence
    pub fn cancel(&mut self) {
        self.drag = None;
    }

    /// One step per wheel event in the sign of `delta`; noise is ignored
    pub fn wheel(&self, delta: f64) -> Option<GestureCommand> {
        if delta.abs() < self.wheel_threshold {
            return None;
        }
        Some(GestureCommand::Step(if delta > 0.0 { 1 } else { -1 }))
    }

    pub fn key(&self, key: KeyInput) -> GestureCommand {
        match key {
            KeyInput::Left => GestureCommand::Step(-1),
            KeyInput::Right => GestureCommand::Step(1),
            KeyInput::Activate => GestureCommand::FlipCentered,
            KeyInput::Reshuffle => GestureCommand::Reshuffle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::WindowPolicy;

    fn setup(len: usize) -> (GestureRecognizer, Navigator) {
        (
            GestureRecognizer::new(&CarouselConfig::default()),
            Navigator::new(len, WindowPolicy::new(3, 6)),
        )
    }

    fn card(slot: usize) -> HitTarget {
        HitTarget::Card { slot, region: CardRegion::Body }
    }

    #[test]
    fn test_drag_left_one_pitch_advances_one() {
        let (mut g, mut nav) = setup(5);
        nav.center_on(2);

        g.pointer_down(1, 500.0, HitTarget::Track, &nav);
        assert!(g.pointer_move(1, 360.0, &mut nav));
        assert_eq!(nav.centered(), 3);
        assert_eq!(g.pointer_up(1, 360.0, nav.centered()), PointerOutcome::Dragged);
    }

    #[test]
    fn test_drag_is_clamped_at_the_end() {
        let (mut g, mut nav) = setup(5);
        nav.center_on(4);

        g.pointer_down(1, 500.0, HitTarget::Track, &nav);
        assert!(!g.pointer_move(1, 360.0, &mut nav));
        assert_eq!(nav.centered(), 4);
    }

    #[test]
    fn test_drag_tracks_live_and_uses_start_position() {
        let (mut g, mut nav) = setup(10);
        g.pointer_down(1, 1000.0, HitTarget::Track, &nav);

        // 0.4 pitch rounds back to the start
        assert!(!g.pointer_move(1, 944.0, &mut nav));
        // 2.6 pitches rounds to 3
        assert!(g.pointer_move(1, 636.0, &mut nav));
        assert_eq!(nav.centered(), 3);
        // Dragging back right is relative to the start, not the live center
        assert!(g.pointer_move(1, 860.0, &mut nav));
        assert_eq!(nav.centered(), 1);
        // Same target again is not a change
        assert!(!g.pointer_move(1, 861.0, &mut nav));
    }

    #[test]
    fn test_small_wiggle_is_a_tap_even_if_it_returns() {
        let (mut g, mut nav) = setup(5);
        g.pointer_down(1, 100.0, card(0), &nav);
        g.pointer_move(1, 103.0, &mut nav);
        g.pointer_move(1, 97.0, &mut nav);
        assert_eq!(
            g.pointer_up(1, 100.0, nav.centered()),
            PointerOutcome::Tap(TapIntent::Flip { slot: 0 })
        );
    }

    #[test]
    fn test_large_movement_is_a_drag_even_with_zero_net_displacement() {
        let (mut g, mut nav) = setup(5);
        g.pointer_down(1, 100.0, card(0), &nav);
        g.pointer_move(1, 130.0, &mut nav);
        assert_eq!(g.pointer_up(1, 100.0, nav.centered()), PointerOutcome::Dragged);
    }

    #[test]
    fn test_tap_classification() {
        let (mut g, nav) = setup(5);
        let cases = [
            (card(2), TapIntent::Select { slot: 2 }),
            (card(0), TapIntent::Flip { slot: 0 }),
            (
                HitTarget::Card { slot: 0, region: CardRegion::Front },
                TapIntent::FrontFace { slot: 0 },
            ),
            (
                HitTarget::Card { slot: 3, region: CardRegion::Link },
                TapIntent::PassThrough { slot: 3 },
            ),
            (
                HitTarget::Card { slot: 0, region: CardRegion::Link },
                TapIntent::PassThrough { slot: 0 },
            ),
            (HitTarget::Track, TapIntent::Nothing),
        ];
        for (target, expected) in cases {
            g.pointer_down(7, 10.0, target, &nav);
            assert_eq!(g.pointer_up(7, 10.0, nav.centered()), PointerOutcome::Tap(expected));
        }
    }

    #[test]
    fn test_second_pointer_is_ignored() {
        let (mut g, mut nav) = setup(5);
        assert!(g.pointer_down(1, 500.0, HitTarget::Track, &nav));
        assert!(!g.pointer_down(2, 0.0, card(4), &nav));
        assert!(!g.pointer_move(2, 0.0, &mut nav));
        assert_eq!(g.pointer_up(2, 0.0, 0), PointerOutcome::Ignored);
        assert!(g.is_dragging());
        assert_eq!(g.pointer_up(1, 500.0, 0), PointerOutcome::Tap(TapIntent::Nothing));
        assert!(!g.is_dragging());
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let (mut g, mut nav) = setup(5);
        assert!(!g.pointer_move(1, -1000.0, &mut nav));
        assert_eq!(nav.centered(), 0);
        assert_eq!(g.pointer_up(1, 0.0, 0), PointerOutcome::Ignored);
    }

    #[test]
    fn test_wheel_threshold_and_sign() {
        let (g, _) = setup(5);
        assert_eq!(g.wheel(0.5), None);
        assert_eq!(g.wheel(-3.9), None);
        assert_eq!(g.wheel(4.0), Some(GestureCommand::Step(1)));
        assert_eq!(g.wheel(250.0), Some(GestureCommand::Step(1)));
        assert_eq!(g.wheel(-12.0), Some(GestureCommand::Step(-1)));
    }

    #[test]
    fn test_keys() {
        let (g, _) = setup(5);
        assert_eq!(g.key(KeyInput::Left), GestureCommand::Step(-1));
        assert_eq!(g.key(KeyInput::Right), GestureCommand::Step(1));
        assert_eq!(g.key(KeyInput::Activate), GestureCommand::FlipCentered);
        assert_eq!(g.key(KeyInput::Reshuffle), GestureCommand::Reshuffle);
    }
}
