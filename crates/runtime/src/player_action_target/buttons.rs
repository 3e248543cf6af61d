//! Confirm and cancel buttons shown while the player confirms a target.
//!
//! Each tick the pending mouse events are replayed against the button's
//! small state machine. A click is a press followed by a release, both
//! inside the button, while it is not disabled.

use crate::input::{MouseButton, MouseEvent, MouseEventKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonStatus {
    #[default]
    Active,
    Hover,
    Disabled,
}

/// Screen rectangle in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ButtonArea {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ButtonArea {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UiButton {
    pub label: String,
    pub area: ButtonArea,
    status: ButtonStatus,
    pressed_inside: bool,
}

impl UiButton {
    pub fn new(label: impl Into<String>, area: ButtonArea) -> Self {
        Self {
            label: label.into(),
            area,
            status: ButtonStatus::Active,
            pressed_inside: false,
        }
    }

    pub fn status(&self) -> ButtonStatus {
        self.status
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.pressed_inside = false;
        self.status = if disabled {
            ButtonStatus::Disabled
        } else {
            ButtonStatus::Active
        };
    }

    /// Feeds one mouse event through the button.
    ///
    /// # Returns
    ///
    /// `true` when the event completes a click.
    pub fn handle(&mut self, event: &MouseEvent) -> bool {
        if self.status == ButtonStatus::Disabled || event.button != MouseButton::Accept {
            return false;
        }

        let inside = self.area.contains(event.x, event.y);
        match event.kind {
            MouseEventKind::Move => {
                self.status = if inside {
                    ButtonStatus::Hover
                } else {
                    ButtonStatus::Active
                };
                false
            }
            MouseEventKind::Press => {
                self.pressed_inside = inside;
                false
            }
            MouseEventKind::Release => {
                let clicked = inside && self.pressed_inside;
                self.pressed_inside = false;
                self.status = if inside {
                    ButtonStatus::Hover
                } else {
                    ButtonStatus::Active
                };
                clicked
            }
        }
    }

    /// Replays a batch of events, reporting whether any of them clicked.
    pub fn replay<'a>(&mut self, events: impl IntoIterator<Item = &'a MouseEvent>) -> bool {
        let mut clicked = false;
        for event in events {
            clicked |= self.handle(event);
        }
        clicked
    }
}
