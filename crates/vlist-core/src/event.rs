// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Event handling
//!
//! Events are delivered by the host on the UI thread, one at a time, to
//! [`Widget::handle_event`](crate::Widget::handle_event). The host is
//! responsible for translating platform input (keys, pointer, wheel, frame
//! callbacks) into these types.
//!
//! Pointer coordinates are given in the coordinate space of the receiving
//! widget's parent, that is the same space as [`Widget::rect`](crate::Widget::rect).

use crate::geom::Vec2;

/// Result of handling an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum IsUsed {
    /// Event was unused
    ///
    /// Unused events may be passed on to a parent or another handler.
    Unused,
    /// Event was used
    Used,
}

impl From<bool> for IsUsed {
    #[inline]
    fn from(is_used: bool) -> Self {
        match is_used {
            false => Self::Unused,
            true => Self::Used,
        }
    }
}

impl From<IsUsed> for bool {
    #[inline]
    fn from(is_used: IsUsed) -> bool {
        is_used == IsUsed::Used
    }
}

/// Navigation and activation commands
///
/// These are usually mapped from keyboard keys by the host.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move to the previous item
    Up,
    /// Move to the next item
    Down,
    /// Move to the first item
    Home,
    /// Move to the last item
    End,
    /// Move up by one page
    PageUp,
    /// Move down by one page
    PageDown,
    /// Activate the current item (space bar)
    Activate,
}

/// Events addressed to a widget
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// A keyboard command, received while the widget has keyboard focus
    Command(Command),
    /// Widget has gained keyboard focus
    FocusGained,
    /// Widget has lost keyboard focus
    FocusLost,
    /// A click or touch-tap at the given coordinate
    Tap(Vec2),
    /// Pointer hovering at the given coordinate, or `None` when it leaves
    Hover(Option<Vec2>),
    /// A press-drag motion; the coordinate is the current pointer position
    ///
    /// The first `Drag` event of a gesture is delivered with the pointer still
    /// over the row where the press started.
    Drag(Vec2),
    /// The press-drag gesture has ended
    DragEnd,
    /// Mouse wheel or touchpad scroll, in lines
    ///
    /// Positive values indicate scrolling up (toward the start of content).
    Scroll(f32),
    /// A frame tick, requested via [`Action::ANIMATE`](crate::Action::ANIMATE)
    Timer,
}
