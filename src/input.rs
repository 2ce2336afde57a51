// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Backend-independent input events.
//!
//! The front end translates its native events into these once per frame.
//! Pointer positions are in display-pixel space (relative to the image's
//! top-left corner), and the front end resolves what a press landed on
//! from the layout of its last render pass.

use crate::models::annotation::Point;

/// Mouse button of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The image canvas.
    Canvas,
    /// An entry of the class list, by class id.
    ClassEntry(usize),
    /// "Delete" item of the class context menu.
    MenuDelete,
    ConfirmYes,
    ConfirmNo,
    /// Anywhere else (sidebar background, dialog body, ...).
    Elsewhere,
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Delete,
    Backspace,
    C,
    H,
    N,
    P,
    U,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const CTRL: Modifiers = Modifiers { ctrl: true, alt: false };
}

#[cfg(test)]
impl Modifiers {
    pub const NONE: Modifiers = Modifiers { ctrl: false, alt: false };
    pub const ALT: Modifiers = Modifiers { ctrl: false, alt: true };
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        pos: Point,
        button: PointerButton,
        target: PointerTarget,
    },
    PointerMove {
        pos: Point,
    },
    PointerUp {
        pos: Point,
        button: PointerButton,
    },
    Key {
        key: Key,
        modifiers: Modifiers,
    },
    /// Typed text.
    Text(String),
}

impl InputEvent {
    pub fn ctrl(key: Key) -> Self {
        InputEvent::Key {
            key,
            modifiers: Modifiers::CTRL,
        }
    }
}

#[cfg(test)]
impl InputEvent {
    pub fn key(key: Key) -> Self {
        InputEvent::Key {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Left-button press on the canvas.
    pub fn click(x: f64, y: f64) -> Self {
        InputEvent::PointerDown {
            pos: Point::new(x, y),
            button: PointerButton::Primary,
            target: PointerTarget::Canvas,
        }
    }

    /// Left-button press on something other than the canvas.
    pub fn click_on(target: PointerTarget) -> Self {
        InputEvent::PointerDown {
            pos: Point::new(0.0, 0.0),
            button: PointerButton::Primary,
            target,
        }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        InputEvent::PointerMove {
            pos: Point::new(x, y),
        }
    }

    pub fn release(x: f64, y: f64) -> Self {
        InputEvent::PointerUp {
            pos: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }
}
