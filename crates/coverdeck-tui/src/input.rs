use coverdeck_core::deck::ItemId;
use coverdeck_core::gesture::HitTarget;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::hit::HitMap;
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    StepLeft,
    StepRight,
    Flip,
    ToggleOverlay,
    Reshuffle,
    ToggleMode,
    OpenLink,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, keymap: &Keymap) -> Action {
    if let Some(action) = keymap.get(&KeyBinding::new(key.code, key.modifiers)) {
        return action.clone();
    }

    // Some terminals report uppercase letters without the Shift modifier
    if let KeyCode::Char(c) = key.code {
        if c.is_ascii_uppercase() {
            if let Some(action) = keymap.get(&KeyBinding::shift(key.code)) {
                return action.clone();
            }
        }
    }

    Action::None
}

/// Mouse input translated into carousel terms.
///
/// Horizontal positions are converted from terminal columns into the same
/// pixel-equivalent units the drag threshold and slot pitch are expressed in.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Down { x: f64, target: HitTarget },
    Move { x: f64 },
    Up { x: f64 },
    Wheel(f64),
    TraySelect(ItemId),
}

pub fn handle_mouse_event(
    mouse: MouseEvent,
    hits: &HitMap,
    cell_width_px: f64,
    wheel_step: f64,
) -> Option<PointerInput> {
    let x = f64::from(mouse.column) * cell_width_px;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(id) = hits.tray_entry(mouse.column, mouse.row) {
                return Some(PointerInput::TraySelect(id.clone()));
            }
            hits.carousel_target(mouse.column, mouse.row)
                .map(|target| PointerInput::Down { x, target })
        }
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerInput::Move { x }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerInput::Up { x }),
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            Some(PointerInput::Wheel(wheel_step))
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            Some(PointerInput::Wheel(-wheel_step))
        }
        _ => None,
    }
}
