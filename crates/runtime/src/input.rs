//! Input events forwarded by the host.
//!
//! Screen-to-map conversion is the host's job; mouse events arrive with the
//! map coordinate under the cursor already resolved when there is one.

use battle_core::HexCoordinate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Accept,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Press,
    Release,
    Move,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub button: MouseButton,
    pub x: f32,
    pub y: f32,
    /// Map tile under the cursor, if any.
    pub coordinate: Option<HexCoordinate>,
}

impl MouseEvent {
    pub fn release(button: MouseButton, x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::Release,
            button,
            x,
            y,
            coordinate: None,
        }
    }

    pub fn press(button: MouseButton, x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::Press,
            button,
            x,
            y,
            coordinate: None,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::Move,
            button: MouseButton::Accept,
            x,
            y,
            coordinate: None,
        }
    }

    /// Accept-button release on a map tile.
    pub fn click_tile(coordinate: HexCoordinate) -> Self {
        Self {
            coordinate: Some(coordinate),
            ..Self::release(MouseButton::Accept, 0.0, 0.0)
        }
    }

    pub fn is_release_of(&self, button: MouseButton) -> bool {
        self.kind == MouseEventKind::Release && self.button == button
    }
}

/// Keyboard commands after host key mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Accept,
    Cancel,
    NextSquaddie,
    EndTurn,
    /// Pick the n-th action of the selected squaddie.
    SelectAction(usize),
}
