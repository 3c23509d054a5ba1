// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Drag-to-reorder gesture
//!
//! States: idle → dragging → idle. While dragging, the gesture tracks the
//! pointer position (relative to the list's top edge), the current insertion
//! index and the auto-scroll speed used when the pointer nears an edge.

use crate::ItemId;
use vlist::config::ListConfig;

/// State of an in-progress drag
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    /// The row being dragged
    pub source: ItemId,
    /// Pointer position relative to the top of the list viewport
    pub pointer_y: f32,
    /// Insertion index: the row boundary nearest the pointer, in `0..=len`
    pub insert_at: ItemId,
}

/// Auto-scroll status change reported by [`DragGesture::pointer_moved`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoScroll {
    /// Nothing changed
    Unchanged,
    /// The scroll loop started: frame ticks are required
    Started,
    /// The scroll loop stopped
    Stopped,
}

/// Drag gesture state machine
#[derive(Clone, Debug, Default)]
pub struct DragGesture {
    state: Option<DragState>,
    // Signed: negative scrolls toward the start
    scroll_speed: f32,
    scrolling: bool,
}

impl DragGesture {
    /// True while a drag is in progress
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    /// Get the state of the in-progress drag, if any
    #[inline]
    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    /// Auto-scroll speed, while the scroll loop is active
    #[inline]
    pub fn scroll_speed(&self) -> Option<f32> {
        self.scrolling.then_some(self.scroll_speed)
    }

    /// Begin dragging `source`
    ///
    /// Returns false (and does nothing) if a drag is already in progress.
    pub fn begin(&mut self, source: ItemId) -> bool {
        if self.state.is_some() {
            return false;
        }
        log::trace!("DragGesture::begin: source={source}");
        self.state = Some(DragState {
            source,
            pointer_y: 0.0,
            insert_at: source,
        });
        true
    }

    /// Update pointer position and auto-scroll speed
    ///
    /// `pointer_y` is relative to the top of the viewport of height
    /// `view_height`. Scrolling starts when the pointer is within `threshold`
    /// of either edge (or beyond it).
    pub fn pointer_moved(
        &mut self,
        pointer_y: f32,
        view_height: f32,
        threshold: f32,
        config: &ListConfig,
    ) -> AutoScroll {
        let Some(state) = self.state.as_mut() else {
            return AutoScroll::Unchanged;
        };
        state.pointer_y = pointer_y;

        let top = pointer_y - threshold;
        let bottom = view_height - threshold;
        if top < 0.0 {
            self.scroll_speed = -config.drag_scroll_speed(top);
            self.start_scroll()
        } else if pointer_y > bottom {
            self.scroll_speed = config.drag_scroll_speed(pointer_y - bottom);
            self.start_scroll()
        } else {
            self.stop_scroll()
        }
    }

    /// Set the insertion index
    #[inline]
    pub fn set_insert_at(&mut self, index: ItemId) {
        if let Some(state) = self.state.as_mut() {
            state.insert_at = index;
        }
    }

    /// End the drag
    ///
    /// Returns `(source, insert_at)`, or `None` if no drag was in progress.
    pub fn end(&mut self) -> Option<(ItemId, ItemId)> {
        let _ = self.stop_scroll();
        let state = self.state.take()?;
        log::trace!(
            "DragGesture::end: source={}, insert_at={}",
            state.source,
            state.insert_at
        );
        Some((state.source, state.insert_at))
    }

    /// Abandon the drag without a result
    pub fn cancel(&mut self) {
        let _ = self.stop_scroll();
        if let Some(state) = self.state.take() {
            log::trace!("DragGesture::cancel: source={}", state.source);
        }
    }

    fn start_scroll(&mut self) -> AutoScroll {
        if self.scrolling {
            AutoScroll::Unchanged
        } else {
            log::trace!("DragGesture: start auto-scroll (speed={})", self.scroll_speed);
            self.scrolling = true;
            AutoScroll::Started
        }
    }

    fn stop_scroll(&mut self) -> AutoScroll {
        if self.scrolling {
            log::trace!("DragGesture: stop auto-scroll");
            self.scrolling = false;
            AutoScroll::Stopped
        } else {
            AutoScroll::Unchanged
        }
    }
}
