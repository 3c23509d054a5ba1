// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! List row wrapper

use crate::ItemId;
use crate::pool::Recycle;
use vlist::prelude::*;

/// A wrapper for list rows
///
/// Adds a selection or hover background behind the inner (view) widget and
/// remembers which row the widget is bound to.
#[derive(Debug)]
pub struct ListItem<W> {
    id: Option<ItemId>,
    rect: Rect,
    radius: f32,
    selected: bool,
    hovered: bool,
    inner: W,
}

impl<W> ListItem<W> {
    /// Construct, unbound
    #[inline]
    pub fn new(inner: W) -> Self {
        ListItem {
            id: None,
            rect: Rect::ZERO,
            radius: 0.0,
            selected: false,
            hovered: false,
            inner,
        }
    }

    /// The row this item is bound to, if any
    #[inline]
    pub fn id(&self) -> Option<ItemId> {
        self.id
    }

    /// Access the inner widget
    #[inline]
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// Access the inner widget (mutably)
    #[inline]
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// True if painted as selected
    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// True if painted as hovered (or keyboard-focused)
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Set highlight state
    ///
    /// Returns true if the state changed.
    pub(crate) fn set_highlight(&mut self, selected: bool, hovered: bool) -> bool {
        let changed = self.selected != selected || self.hovered != hovered;
        self.selected = selected;
        self.hovered = hovered;
        changed
    }
}

impl<W> Recycle for ListItem<W> {
    fn assign(&mut self, id: ItemId) {
        self.id = Some(id);
    }

    fn recycle(&mut self) {
        self.id = None;
        self.selected = false;
        self.hovered = false;
    }
}

impl<W: Widget> Widget for ListItem<W> {
    fn measure(&mut self, metrics: &Metrics) -> Size {
        self.inner.measure(metrics)
    }

    fn layout(&mut self, rect: Rect, metrics: &Metrics) {
        self.rect = rect;
        self.radius = metrics.selection_radius;
        self.inner.layout(rect, metrics);
    }

    #[inline]
    fn rect(&self) -> Rect {
        self.rect
    }

    fn paint(&self, draw: &mut dyn Draw) {
        if self.selected {
            draw.rect(self.rect, self.radius, Fill::Selection);
        } else if self.hovered {
            draw.rect(self.rect, self.radius, Fill::Hover);
        }
        self.inner.paint(draw);
    }

    fn handle_event(&mut self, event: Event) -> IsUsed {
        self.inner.handle_event(event)
    }
}
