// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Widget trait

use crate::draw::Draw;
use crate::event::{Event, IsUsed};
use crate::geom::{Rect, Size};
use crate::theme::Metrics;

/// The widget capability set
///
/// Widgets are composed, not inherited: a container owns its children and
/// forwards each of these calls as appropriate.
///
/// The host drives a widget through (roughly) this sequence:
///
/// 1.  [`Self::measure`] to find the minimum size
/// 2.  [`Self::layout`] whenever the assigned rect changes
/// 3.  [`Self::paint`] whenever a repaint is required
/// 4.  [`Self::handle_event`] for each input event
///
/// All calls happen on the UI thread.
pub trait Widget {
    /// Get the minimum size of this widget
    fn measure(&mut self, metrics: &Metrics) -> Size;

    /// Assign a position and size
    fn layout(&mut self, rect: Rect, metrics: &Metrics);

    /// Get the rect assigned by the last call to [`Self::layout`]
    fn rect(&self) -> Rect;

    /// Paint self
    fn paint(&self, draw: &mut dyn Draw);

    /// Handle an event
    ///
    /// The default implementation uses no events.
    fn handle_event(&mut self, event: Event) -> IsUsed {
        let _ = event;
        IsUsed::Unused
    }
}

impl<W: Widget + ?Sized> Widget for Box<W> {
    #[inline]
    fn measure(&mut self, metrics: &Metrics) -> Size {
        (**self).measure(metrics)
    }

    #[inline]
    fn layout(&mut self, rect: Rect, metrics: &Metrics) {
        (**self).layout(rect, metrics)
    }

    #[inline]
    fn rect(&self) -> Rect {
        (**self).rect()
    }

    #[inline]
    fn paint(&self, draw: &mut dyn Draw) {
        (**self).paint(draw)
    }

    #[inline]
    fn handle_event(&mut self, event: Event) -> IsUsed {
        (**self).handle_event(event)
    }
}
