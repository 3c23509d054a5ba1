// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! List view controller

use crate::ItemId;
use crate::drag::{AutoScroll, DragGesture};
use crate::item::ListItem;
use crate::range::{HeightTable, RangeParams, coord, visible_range};
use crate::reconcile::{Reconciled, Reconciler, VisibleRow};
use linear_map::set::LinearSet;
use smallvec::SmallVec;
use std::time::Instant;
use vlist::config::ListConfig;
use vlist::prelude::*;

/// Which visible rows to re-bind after reconciling
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Rebind {
    /// Rows newly assigned a handle, and rows whose highlight changed
    New,
    /// All visible rows
    All,
}

type LengthFn = Box<dyn Fn() -> usize>;
type CreateFn<W> = Box<dyn FnMut() -> W>;
type UpdateFn<W> = Box<dyn FnMut(ItemId, &mut W)>;
type IdFn = Box<dyn FnMut(ItemId)>;
type MoveFn = Box<dyn FnMut(ItemId, ItemId)>;

/// View controller for a virtualized list
///
/// Rows are stacked vertically inside a scrolled viewport. Only rows
/// intersecting the viewport have a view widget; these widgets are pooled and
/// re-used as the list scrolls, so the number of widgets in use is roughly
/// proportional to the number of rows visible.
///
/// The host supplies three callbacks:
///
/// -   `length`: the number of rows
/// -   `create_item`: construct a new view widget
/// -   `update_item`: bind a view widget to a row's current data
///
/// By default all rows have the height of a template widget constructed
/// (and measured) via `create_item`; [`Self::set_item_height`] overrides
/// the height of specific rows.
///
/// Single-item selection is supported; see [`Self::select`]. If enabled in
/// [`ListConfig`], rows may be dragged to a new position; the host receives
/// the result via [`Self::on_drag_end`] and should reorder its data.
///
/// Operations return an [`Action`] which the host should apply. Actions
/// arising from [`Widget::handle_event`] are accumulated; retrieve them with
/// [`Self::take_action`].
pub struct ListView<W: Widget> {
    rect: Rect,
    config: ListConfig,
    metrics: Metrics,
    length: Option<LengthFn>,
    create_item: Option<CreateFn<W>>,
    update_item: Option<UpdateFn<W>>,
    on_selected: Option<IdFn>,
    on_unselected: Option<IdFn>,
    on_drag_begin: Option<IdFn>,
    on_drag_end: Option<MoveFn>,
    item_min: Size,
    heights: HeightTable,
    offset: f32,
    selection: LinearSet<ItemId>,
    current_focus: ItemId,
    focused: bool,
    hover: Option<ItemId>,
    rows: Reconciler<ListItem<W>>,
    separators: Vec<Rect>,
    drag: DragGesture,
    drag_indicator: Option<Rect>,
    action: Action,
}

impl<W: Widget> std::fmt::Debug for ListView<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("rect", &self.rect)
            .field("offset", &self.offset)
            .field("item_min", &self.item_min)
            .field("selection", &self.selection)
            .field("current_focus", &self.current_focus)
            .field("visible", &self.rows.in_use())
            .field("dragging", &self.drag.state())
            .finish_non_exhaustive()
    }
}

impl<W: Widget> Default for ListView<W> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<W: Widget> ListView<W> {
    /// Construct a list
    ///
    /// See type-level documentation for the roles of `length`, `create_item`
    /// and `update_item`.
    pub fn new(
        length: impl Fn() -> usize + 'static,
        create_item: impl FnMut() -> W + 'static,
        update_item: impl FnMut(ItemId, &mut W) + 'static,
    ) -> Self {
        Self::empty()
            .with_length(length)
            .with_create_item(create_item)
            .with_update_item(update_item)
    }

    /// Construct a list without callbacks
    ///
    /// Such a list is empty until callbacks are supplied.
    pub fn empty() -> Self {
        ListView {
            rect: Rect::ZERO,
            config: ListConfig::default(),
            metrics: Metrics::default(),
            length: None,
            create_item: None,
            update_item: None,
            on_selected: None,
            on_unselected: None,
            on_drag_begin: None,
            on_drag_end: None,
            item_min: Size::ZERO,
            heights: HeightTable::default(),
            offset: 0.0,
            selection: LinearSet::new(),
            current_focus: 0,
            focused: false,
            hover: None,
            rows: Reconciler::default(),
            separators: Vec::new(),
            drag: DragGesture::default(),
            drag_indicator: None,
            action: Action::empty(),
        }
    }

    /// Set the row count callback (inline)
    #[must_use]
    pub fn with_length(mut self, f: impl Fn() -> usize + 'static) -> Self {
        self.length = Some(Box::new(f));
        self
    }

    /// Set the view widget constructor (inline)
    #[must_use]
    pub fn with_create_item(mut self, f: impl FnMut() -> W + 'static) -> Self {
        self.create_item = Some(Box::new(f));
        self
    }

    /// Set the view widget binder (inline)
    #[must_use]
    pub fn with_update_item(mut self, f: impl FnMut(ItemId, &mut W) + 'static) -> Self {
        self.update_item = Some(Box::new(f));
        self
    }

    /// Set the configuration (inline)
    #[must_use]
    pub fn with_config(mut self, config: ListConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the metrics used before the first layout (inline)
    #[must_use]
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Call `f` when a row is selected (inline)
    #[must_use]
    pub fn on_selected(mut self, f: impl FnMut(ItemId) + 'static) -> Self {
        self.on_selected = Some(Box::new(f));
        self
    }

    /// Call `f` when a row is unselected (inline)
    #[must_use]
    pub fn on_unselected(mut self, f: impl FnMut(ItemId) + 'static) -> Self {
        self.on_unselected = Some(Box::new(f));
        self
    }

    /// Call `f` when a row starts being dragged (inline)
    #[must_use]
    pub fn on_drag_begin(mut self, f: impl FnMut(ItemId) + 'static) -> Self {
        self.on_drag_begin = Some(Box::new(f));
        self
    }

    /// Call `f(from, to)` when a drag ends (inline)
    ///
    /// `to` is an insertion index in `0..=len`: the dragged row should be
    /// placed before the row currently at `to`. It may equal `from` (or
    /// `from + 1`), in which case the host may treat the drag as a no-op.
    #[must_use]
    pub fn on_drag_end(mut self, f: impl FnMut(ItemId, ItemId) + 'static) -> Self {
        self.on_drag_end = Some(Box::new(f));
        self
    }

    /// Access the configuration
    #[inline]
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: ListConfig) -> Action {
        self.config = config;
        let mut action = Action::empty();
        if !self.config.enable_dragging {
            action = self.cancel_drag();
        }
        action | self.update_list(Rebind::New)
    }

    /// Load and apply configuration from a file
    ///
    /// On failure the current configuration is kept.
    #[cfg(feature = "serde")]
    pub fn load_config(
        &mut self,
        path: &std::path::Path,
    ) -> Result<Action, vlist::config::Error> {
        let config = ListConfig::load(path)?;
        Ok(self.set_config(config))
    }

    /// Take accumulated actions from event handling
    #[inline]
    pub fn take_action(&mut self) -> Action {
        std::mem::take(&mut self.action)
    }

    /// The number of rows
    pub fn len(&self) -> usize {
        self.length.as_ref().map(|f| f()).unwrap_or(0)
    }

    /// True if the list has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The minimum row size, as measured from the template widget
    #[inline]
    pub fn item_min_size(&self) -> Size {
        self.item_min
    }

    /// The visible rows, in ascending order of ID
    #[inline]
    pub fn visible(&self) -> &[VisibleRow<ListItem<W>>] {
        self.rows.visible()
    }

    /// The number of view widgets in the pool
    #[inline]
    pub fn pooled(&self) -> usize {
        self.rows.pooled()
    }

    /// The number of view widgets ever constructed (excluding templates)
    #[inline]
    pub fn allocated(&self) -> usize {
        self.rows.allocated()
    }

    /// Positions of separators between visible rows
    #[inline]
    pub fn separators(&self) -> &[Rect] {
        &self.separators
    }

    /// Position of the drag insertion indicator, while dragging
    #[inline]
    pub fn drag_indicator(&self) -> Option<Rect> {
        self.drag_indicator
    }

    /// Insertion index of the in-progress drag, if any
    #[inline]
    pub fn drag_insert_at(&self) -> Option<ItemId> {
        self.drag.state().map(|s| s.insert_at)
    }

    /// Returns the view widget currently bound to `id`
    ///
    /// Returns `None` if `id` is not within the visible range.
    pub fn item_for_id(&self, id: ItemId) -> Option<&W> {
        self.rows.get(id).map(|item| item.inner())
    }

    /// Re-bind a single row, if visible
    pub fn refresh_item(&mut self, id: ItemId) -> Action {
        let selected = self.selection.contains(&id);
        let hovered = self.is_hovered(id);
        let Some(item) = self.rows.get_mut(id) else {
            return Action::empty();
        };
        let _ = item.set_highlight(selected, hovered);
        bind(&mut self.update_item, id, item);
        Action::REDRAW
    }

    /// Re-measure the template and re-bind all visible rows
    ///
    /// Call when the underlying data changes.
    pub fn refresh(&mut self) -> Action {
        self.measure_template();
        self.clamp_offset();
        self.update_list(Rebind::All) | Action::SET_RECT
    }

    /// Set the height of row `id`
    ///
    /// Rows normally take the height of the template widget. `height` refers
    /// to the row content, excluding padding.
    pub fn set_item_height(&mut self, id: ItemId, height: f32) -> Action {
        if !self.heights.set(id, height) {
            return Action::empty();
        }
        self.clamp_offset();
        self.update_list(Rebind::New) | self.refresh_item(id) | Action::SET_RECT
    }

    /// Remove all row height overrides
    ///
    /// All rows revert to the height of the template widget.
    pub fn reset_item_heights(&mut self) -> Action {
        if self.heights.is_empty() {
            return Action::empty();
        }
        self.heights.clear();
        self.clamp_offset();
        self.update_list(Rebind::New) | Action::SET_RECT
    }

    /// Total height of all rows, including padding between rows
    pub fn content_height(&self) -> f32 {
        let len = self.len();
        self.heights
            .content_height(len, self.item_min.1, self.metrics.padding)
    }

    /// Maximum scroll offset
    pub fn max_scroll_offset(&self) -> f32 {
        (self.content_height() - self.rect.size.1).max(0.0)
    }

    /// Current scroll offset
    #[inline]
    pub fn scroll_offset(&self) -> f32 {
        self.offset
    }

    /// Scroll so that row `id` is fully visible, moving as little as possible
    ///
    /// Does nothing if `id` is out of range.
    pub fn scroll_to(&mut self, id: ItemId) -> Action {
        if id >= self.len() {
            return Action::empty();
        }
        if self.scroll_to_row(id) {
            self.update_list(Rebind::New)
        } else {
            Action::empty()
        }
    }

    /// Scroll to the first row
    pub fn scroll_to_top(&mut self) -> Action {
        self.scroll_to(0)
    }

    /// Scroll to the last row
    pub fn scroll_to_bottom(&mut self) -> Action {
        let last = self.len().saturating_sub(1);
        self.scroll_to(last)
    }

    /// Scroll to the given offset
    ///
    /// Negative offsets are treated as zero. Does nothing if all content is
    /// visible.
    pub fn scroll_to_offset(&mut self, offset: f32) -> Action {
        if self.rect.size.1 >= self.content_height() {
            return Action::empty();
        }
        self.set_offset(offset.max(0.0))
    }

    /// Get the selected row, if any
    pub fn selected(&self) -> Option<ItemId> {
        self.selection.iter().next().copied()
    }

    /// Check whether a row is selected
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection.contains(&id)
    }

    /// Select row `id`
    ///
    /// Any previously selected row is unselected first. Observers are notified
    /// in the order unselect, then select. Does nothing if `id` is already
    /// selected or out of range. Scrolls `id` into view.
    pub fn select(&mut self, id: ItemId) -> Action {
        if self.selection.contains(&id) || id >= self.len() {
            return Action::empty();
        }

        let old = self.selected();
        self.selection.clear();
        self.selection.insert(id);
        let _ = self.scroll_to_row(id);
        let action = self.update_list(Rebind::New);

        if let (Some(f), Some(old)) = (self.on_unselected.as_mut(), old) {
            f(old);
        }
        if let Some(f) = self.on_selected.as_mut() {
            f(id);
        }
        action
    }

    /// Unselect row `id`
    ///
    /// Does nothing if `id` is not selected.
    pub fn unselect(&mut self, id: ItemId) -> Action {
        if !self.selection.remove(&id) {
            return Action::empty();
        }

        let action = self.update_list(Rebind::New);
        if let Some(f) = self.on_unselected.as_mut() {
            f(id);
        }
        action
    }

    /// Clear the selection
    pub fn unselect_all(&mut self) -> Action {
        if self.selection.is_empty() {
            return Action::empty();
        }

        let selected: SmallVec<[ItemId; 1]> = self.selection.iter().copied().collect();
        self.selection.clear();
        let action = self.update_list(Rebind::New);
        if let Some(f) = self.on_unselected.as_mut() {
            for id in selected {
                f(id);
            }
        }
        action
    }

    /// The row with keyboard focus (highlighted while the list is focused)
    #[inline]
    pub fn current_focus(&self) -> ItemId {
        self.current_focus
    }

    /// Abandon an in-progress drag without notifying observers
    pub fn cancel_drag(&mut self) -> Action {
        if !self.drag.is_dragging() {
            return Action::empty();
        }
        self.drag.cancel();
        self.drag_indicator = None;
        Action::REDRAW
    }

    /// Advance drag auto-scrolling by one frame
    ///
    /// Returns [`Action::ANIMATE`] while further frames are required.
    pub fn tick(&mut self) -> Action {
        let Some(speed) = self.drag.scroll_speed() else {
            return Action::empty();
        };
        self.set_offset(self.offset + speed) | Action::ANIMATE
    }

    /// Reconcile the visible rows against explicit viewport parameters
    ///
    /// This is the core of [`ListView`]: rows covering
    /// `[offset, offset + viewport_height]` are assigned view widgets (re-using
    /// widgets of rows which remain visible), positioned and bound. It is
    /// called internally on layout, scrolling and selection changes.
    ///
    /// `len` overrides the `length` callback for this call only. Returns the
    /// resulting visible set.
    pub fn reconcile(
        &mut self,
        offset: f32,
        viewport_height: f32,
        len: usize,
    ) -> &[VisibleRow<ListItem<W>>] {
        let params = RangeParams {
            offset,
            viewport: viewport_height,
            len,
            item_height: self.item_min.1,
            padding: self.metrics.padding,
        };
        let _ = self.reconcile_params(params, Rebind::New);
        self.rows.visible()
    }
}

// Internal implementation
impl<W: Widget> ListView<W> {
    fn measure_template(&mut self) {
        if let Some(f) = self.create_item.as_mut() {
            let mut template = f();
            self.item_min = template.measure(&self.metrics);
        }
    }

    #[inline]
    fn is_hovered(&self, id: ItemId) -> bool {
        (self.focused && self.current_focus == id) || self.hover == Some(id)
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Set offset (clamped) and update rows if it changed
    fn set_offset(&mut self, offset: f32) -> Action {
        let offset = offset.clamp(0.0, self.max_scroll_offset());
        if offset == self.offset {
            return Action::empty();
        }
        self.offset = offset;
        self.update_list(Rebind::New)
    }

    /// Adjust offset such that row `id` is fully visible
    ///
    /// Returns true if the offset changed. Does not update rows.
    fn scroll_to_row(&mut self, id: ItemId) -> bool {
        let (y, h) = self
            .heights
            .row_position(id, self.item_min.1, self.metrics.padding);
        let view_height = self.rect.size.1;

        let mut offset = self.offset;
        if y < offset {
            offset = y;
        } else if y + h > offset + view_height {
            offset = y + h - view_height;
        }
        let offset = offset.clamp(0.0, self.max_scroll_offset());
        let changed = offset != self.offset;
        self.offset = offset;
        changed
    }

    fn update_list(&mut self, rebind: Rebind) -> Action {
        let params = RangeParams {
            offset: self.offset,
            viewport: self.rect.size.1,
            len: self.len(),
            item_height: self.item_min.1,
            padding: self.metrics.padding,
        };
        self.reconcile_params(params, rebind)
    }

    fn reconcile_params(&mut self, params: RangeParams, rebind: Rebind) -> Action {
        let time = Instant::now();
        if self.update_item.is_none() {
            log::error!("ListView: missing update_item callback required for list");
        }

        let range = visible_range(params, &self.heights);
        let create_item = &mut self.create_item;
        let report = self
            .rows
            .reconcile(&range, || create_item.as_mut().map(|f| ListItem::new(f())));
        if report.added.len() > report.removed.len() {
            log::debug!(
                "ListView: {} rows added, {} allocated",
                report.added.len(),
                self.rows.allocated(),
            );
        }

        let positions: SmallVec<[(f32, f32); 32]> = range
            .rows(params.padding)
            .map(|(_, y, h)| (y, h))
            .collect();
        let bound =
            self.position_and_bind(params.offset, range.first, &positions, &report, rebind);
        self.update_separators();
        self.update_drag_indicator();

        let dur = (Instant::now() - time).as_micros();
        log::debug!(
            target: "vlist_perf::view::list_view",
            "reconcile: {bound} of {} rows bound in: {dur}μs",
            range.len(),
        );
        Action::REDRAW
    }

    fn position_and_bind(
        &mut self,
        offset: f32,
        first: ItemId,
        positions: &[(f32, f32)],
        report: &Reconciled,
        rebind: Rebind,
    ) -> usize {
        let origin = self.rect.pos - Vec2(0.0, offset);
        let width = self.rect.size.0;
        let focus = self.focused.then_some(self.current_focus);
        let mut bound = 0;

        for row in self.rows.visible_mut() {
            let (y, h) = positions[row.id - first];
            let rect = Rect::new(origin + Vec2(0.0, y), Size(width, h));
            row.handle.layout(rect, &self.metrics);

            let selected = self.selection.contains(&row.id);
            let hovered = focus == Some(row.id) || self.hover == Some(row.id);
            let stale = row.handle.set_highlight(selected, hovered);
            if rebind == Rebind::All || stale || report.is_added(row.id) {
                bind(&mut self.update_item, row.id, &mut row.handle);
                bound += 1;
            }
        }
        bound
    }

    fn update_separators(&mut self) {
        self.separators.clear();
        if self.config.hide_separators {
            return;
        }

        let thickness = self.metrics.separator_thickness;
        let off = (self.metrics.padding + thickness) / 2.0;
        for row in self.rows.visible().iter().skip(1) {
            let pos = Vec2(self.rect.pos.0, row.handle.rect().pos.1 - off);
            self.separators
                .push(Rect::new(pos, Size(self.rect.size.0, thickness)));
        }
    }

    fn update_drag_indicator(&mut self) {
        let Some(state) = self.drag.state() else {
            self.drag_indicator = None;
            return;
        };
        if !(self.rect.size.1 > 0.0) {
            self.drag_indicator = None;
            return;
        }

        let pointer_y = state.pointer_y.clamp(0.0, self.rect.size.1);
        let (index, boundary) = self.heights.nearest_boundary(
            pointer_y + self.offset,
            self.len(),
            self.item_min.1,
            self.metrics.padding,
        );
        self.drag.set_insert_at(index);

        let thickness = self.metrics.separator_thickness * self.config.drag_separator_multiplier;
        let y = boundary - self.metrics.padding / 2.0 - thickness;
        let pos = Vec2(self.rect.pos.0, self.rect.pos.1 + y - self.offset);
        self.drag_indicator = Some(Rect::new(pos, Size(self.rect.size.0, thickness)));
    }

    fn row_at(&self, coord: Vec2) -> Option<ItemId> {
        if !self.rect.contains(coord) {
            return None;
        }
        self.rows
            .visible()
            .iter()
            .find(|row| row.handle.rect().contains(coord))
            .map(|row| row.id)
    }

    fn set_focus_row(&mut self, id: ItemId) -> Action {
        self.current_focus = id;
        let _ = self.scroll_to_row(id);
        self.update_list(Rebind::New)
    }

    fn handle_command(&mut self, cmd: Command) -> IsUsed {
        let len = self.len();
        if len == 0 {
            return Unused;
        }
        let last = len - 1;
        let step = self.item_min.1 + self.metrics.padding;
        let page = if step > 0.0 {
            usize::conv_floor((self.rect.size.1 / step).clamp(1.0, coord(len)))
        } else {
            1
        };

        let focus = self.current_focus.min(last);
        let action = match cmd {
            Command::Activate => self.select(focus),
            Command::Up if focus == 0 => return Used,
            Command::Up => self.set_focus_row(focus - 1),
            Command::Down if focus >= last => return Used,
            Command::Down => self.set_focus_row(focus + 1),
            Command::Home => self.set_focus_row(0),
            Command::End => self.set_focus_row(last),
            Command::PageUp => self.set_focus_row(focus.saturating_sub(page)),
            Command::PageDown => self.set_focus_row((focus + page).min(last)),
            _ => return Unused,
        };
        self.action |= action;
        Used
    }

    fn handle_tap(&mut self, coord: Vec2) -> IsUsed {
        let Some(id) = self.row_at(coord) else {
            return Unused;
        };
        self.current_focus = id;
        let action = self.select(id) | self.update_list(Rebind::New);
        self.action |= action | Action::FOCUS;
        Used
    }

    fn handle_hover(&mut self, coord: Option<Vec2>) -> IsUsed {
        if self.drag.is_dragging() {
            return Unused;
        }
        let hover = coord.and_then(|coord| self.row_at(coord));
        if hover != self.hover {
            self.hover = hover;
            let action = self.update_list(Rebind::New);
            self.action |= action;
        }
        Used
    }

    fn handle_drag(&mut self, coord: Vec2) -> IsUsed {
        if !self.config.enable_dragging {
            return Unused;
        }
        if !self.drag.is_dragging() {
            let Some(source) = self.row_at(coord) else {
                return Unused;
            };
            let _ = self.drag.begin(source);
            self.hover = None;
            if let Some(f) = self.on_drag_begin.as_mut() {
                f(source);
            }
        }

        let pointer_y = coord.1 - self.rect.pos.1;
        let threshold = self.item_min.1 / 2.0;
        let scroll =
            self.drag
                .pointer_moved(pointer_y, self.rect.size.1, threshold, &self.config);
        self.update_drag_indicator();

        self.action |= Action::REDRAW;
        if scroll == AutoScroll::Started {
            self.action |= Action::ANIMATE;
        }
        Used
    }

    fn handle_drag_end(&mut self) -> IsUsed {
        let Some((from, to)) = self.drag.end() else {
            return Unused;
        };
        self.drag_indicator = None;
        if let Some(f) = self.on_drag_end.as_mut() {
            f(from, to);
        }
        // The host may have reordered rows: no bound content can be trusted
        let action = self.update_list(Rebind::All);
        self.action |= action;
        Used
    }
}

fn bind<W>(update_item: &mut Option<UpdateFn<W>>, id: ItemId, item: &mut ListItem<W>) {
    if let Some(f) = update_item.as_mut() {
        f(id, item.inner_mut());
    }
}

impl<W: Widget> Widget for ListView<W> {
    fn measure(&mut self, metrics: &Metrics) -> Size {
        self.metrics = *metrics;
        self.measure_template();
        self.item_min
    }

    fn layout(&mut self, rect: Rect, metrics: &Metrics) {
        self.metrics = *metrics;
        if self.item_min.is_zero() {
            self.measure_template();
        }
        self.rect = rect;
        self.clamp_offset();
        let action = self.update_list(Rebind::New);
        self.action |= action;
    }

    #[inline]
    fn rect(&self) -> Rect {
        self.rect
    }

    fn paint(&self, draw: &mut dyn Draw) {
        draw.with_clip_region(self.rect, &mut |draw| {
            for row in self.rows.visible() {
                row.handle.paint(draw);
            }
            for rect in &self.separators {
                draw.rect(*rect, 0.0, Fill::Separator);
            }
            if let Some(rect) = self.drag_indicator {
                draw.rect(rect, 0.0, Fill::DragIndicator);
            }
        });
    }

    fn handle_event(&mut self, event: Event) -> IsUsed {
        match event {
            Event::Command(cmd) => self.handle_command(cmd),
            Event::FocusGained => {
                self.focused = true;
                let _ = self.scroll_to_row(self.current_focus);
                let action = self.update_list(Rebind::New);
                self.action |= action;
                Used
            }
            Event::FocusLost => {
                self.focused = false;
                let action = self.update_list(Rebind::New);
                self.action |= action;
                Used
            }
            Event::Tap(coord) => self.handle_tap(coord),
            Event::Hover(coord) => self.handle_hover(coord),
            Event::Drag(coord) => self.handle_drag(coord),
            Event::DragEnd => self.handle_drag_end(),
            Event::Scroll(lines) => {
                let delta = lines * self.config.wheel_scroll_distance;
                let action = self.set_offset(self.offset - delta);
                self.action |= action;
                (!action.is_empty()).into()
            }
            Event::Timer => {
                let action = self.tick();
                self.action |= action;
                (!action.is_empty()).into()
            }
            _ => Unused,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use vlist::draw::Recorder;

    #[derive(Debug)]
    struct Label {
        serial: usize,
        text: String,
        rect: Rect,
    }

    impl Widget for Label {
        fn measure(&mut self, _: &Metrics) -> Size {
            Size(100.0, 30.0)
        }
        fn layout(&mut self, rect: Rect, _: &Metrics) {
            self.rect = rect;
        }
        fn rect(&self) -> Rect {
            self.rect
        }
        fn paint(&self, draw: &mut dyn Draw) {
            draw.text(self.rect, &self.text);
        }
    }

    fn list(len: usize) -> (ListView<Label>, Rc<Cell<usize>>) {
        let length = Rc::new(Cell::new(len));
        let serial = Rc::new(Cell::new(0));
        let l2 = length.clone();
        let list = ListView::new(
            move || l2.get(),
            move || {
                serial.set(serial.get() + 1);
                Label {
                    serial: serial.get(),
                    text: String::new(),
                    rect: Rect::ZERO,
                }
            },
            |id, label: &mut Label| label.text = format!("row {id}"),
        );
        (list, length)
    }

    fn laid_out(len: usize) -> ListView<Label> {
        let (mut list, _) = list(len);
        list.layout(
            Rect::new(Vec2::ZERO, Size(100.0, 300.0)),
            &Metrics::compact(),
        );
        list
    }

    fn ids(list: &ListView<Label>) -> Vec<ItemId> {
        list.visible().iter().map(|row| row.id).collect()
    }

    #[test]
    fn layout_binds_visible_rows() {
        let list = laid_out(1000);
        assert_eq!(ids(&list), (0..10).collect::<Vec<_>>());
        assert_eq!(list.item_for_id(3).map(|l| l.text.as_str()), Some("row 3"));
        assert!(list.item_for_id(10).is_none());
        assert_eq!(list.content_height(), 30000.0);
    }

    #[test]
    fn scroll_to_offset_and_identity() {
        let mut list = laid_out(1000);
        let serial_5 = list.item_for_id(5).map(|l| l.serial);
        let _ = list.scroll_to_offset(20.0);
        assert_eq!(list.item_for_id(5).map(|l| l.serial), serial_5);

        let _ = list.scroll_to_offset(315.0);
        assert_eq!(ids(&list), (10..21).collect::<Vec<_>>());
        assert_eq!(list.scroll_offset(), 315.0);
        let row = &list.visible()[0];
        assert_eq!(row.handle.rect().pos, Vec2(0.0, -15.0));

        let _ = list.scroll_to_offset(1e9);
        assert_eq!(list.scroll_offset(), 30000.0 - 300.0);
        let _ = list.scroll_to_offset(-5.0);
        assert_eq!(list.scroll_offset(), 0.0);
    }

    #[test]
    fn scroll_to_minimal() {
        let mut list = laid_out(1000);
        let _ = list.scroll_to(15);
        // Row 15 spans [450, 480]: bottom aligned
        assert_eq!(list.scroll_offset(), 180.0);
        let _ = list.scroll_to(10);
        assert_eq!(list.scroll_offset(), 180.0);
        let _ = list.scroll_to(2);
        assert_eq!(list.scroll_offset(), 60.0);
        let _ = list.scroll_to(5000);
        assert_eq!(list.scroll_offset(), 60.0);
        let _ = list.scroll_to_bottom();
        assert_eq!(list.scroll_offset(), 29700.0);
        let _ = list.scroll_to_top();
        assert_eq!(list.scroll_offset(), 0.0);
    }

    #[test]
    fn short_content_does_not_scroll() {
        let mut list = laid_out(5);
        let action = list.scroll_to_offset(50.0);
        assert!(action.is_empty());
        assert_eq!(list.scroll_offset(), 0.0);
        assert_eq!(ids(&list), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn selection_callbacks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (l1, l2) = (log.clone(), log.clone());
        let (list, _) = list(100);
        let mut list = list
            .on_selected(move |id| l1.borrow_mut().push(format!("select {id}")))
            .on_unselected(move |id| l2.borrow_mut().push(format!("unselect {id}")));
        list.layout(Rect::new(Vec2::ZERO, Size(100.0, 300.0)), &Metrics::compact());

        let _ = list.select(5);
        let _ = list.select(5);
        let _ = list.select(7);
        let _ = list.select(100);
        assert_eq!(list.selected(), Some(7));
        assert!(list.visible()[7].handle.is_selected());
        assert!(!list.visible()[5].handle.is_selected());
        let _ = list.unselect(3);
        let _ = list.unselect_all();
        let _ = list.unselect_all();
        assert_eq!(*log.borrow(), vec![
            "select 5",
            "unselect 5",
            "select 7",
            "unselect 7"
        ]);
    }

    #[test]
    fn keyboard_focus() {
        let mut list = laid_out(50);
        assert_eq!(list.handle_event(Event::FocusGained), Used);
        assert!(list.visible()[0].handle.is_hovered());

        for _ in 0..12 {
            let _ = list.handle_event(Event::Command(Command::Down));
        }
        assert_eq!(list.current_focus(), 12);
        assert_eq!(list.scroll_offset(), 13.0 * 30.0 - 300.0);
        assert!(list.item_for_id(12).is_some());

        let _ = list.handle_event(Event::Command(Command::Activate));
        assert_eq!(list.selected(), Some(12));

        let _ = list.handle_event(Event::Command(Command::End));
        assert_eq!(list.current_focus(), 49);
        let _ = list.handle_event(Event::Command(Command::Down));
        assert_eq!(list.current_focus(), 49);
        let _ = list.handle_event(Event::Command(Command::Home));
        let _ = list.handle_event(Event::Command(Command::Up));
        assert_eq!(list.current_focus(), 0);

        // One viewport holds ten rows
        let _ = list.handle_event(Event::Command(Command::PageDown));
        assert_eq!(list.current_focus(), 10);
        let _ = list.handle_event(Event::Command(Command::PageUp));
        let _ = list.handle_event(Event::Command(Command::PageUp));
        assert_eq!(list.current_focus(), 0);

        let _ = list.handle_event(Event::FocusLost);
        assert!(!list.visible()[0].handle.is_hovered());
    }

    #[test]
    fn tap_selects_and_requests_focus() {
        let mut list = laid_out(50);
        let _ = list.take_action();
        assert_eq!(list.handle_event(Event::Tap(Vec2(10.0, 95.0))), Used);
        assert_eq!(list.selected(), Some(3));
        assert_eq!(list.current_focus(), 3);
        assert!(list.take_action().contains(Action::FOCUS));
        assert_eq!(list.handle_event(Event::Tap(Vec2(10.0, 400.0))), Unused);
    }

    #[test]
    fn selective_rebind() {
        let count = Rc::new(Cell::new(0));
        let c2 = count.clone();
        let mut list = ListView::new(
            || 100,
            || Label {
                serial: 0,
                text: String::new(),
                rect: Rect::ZERO,
            },
            move |_, _: &mut Label| c2.set(c2.get() + 1),
        );
        list.layout(Rect::new(Vec2::ZERO, Size(100.0, 300.0)), &Metrics::compact());
        assert_eq!(count.get(), 10);

        // Scroll by one row: only the new row is bound
        let _ = list.scroll_to_offset(30.0);
        assert_eq!(count.get(), 11);

        // Selecting a visible row rebinds only that row
        let _ = list.select(4);
        assert_eq!(count.get(), 12);

        let _ = list.refresh();
        assert_eq!(count.get(), 22);
    }

    #[test]
    fn variable_height_layout() {
        let mut list = laid_out(100);
        let action = list.set_item_height(1, 100.0);
        assert!(action.contains(Action::SET_RECT));
        assert!(list.set_item_height(1, 100.0).is_empty());
        assert_eq!(list.content_height(), 99.0 * 30.0 + 100.0);
        let rects: Vec<_> = list.visible().iter().map(|r| r.handle.rect()).collect();
        assert_eq!(rects[1], Rect::new(Vec2(0.0, 30.0), Size(100.0, 100.0)));
        assert_eq!(rects[2].pos, Vec2(0.0, 130.0));
        assert_eq!(ids(&list), (0..8).collect::<Vec<_>>());

        assert!(list.reset_item_heights().contains(Action::SET_RECT));
        assert!(list.reset_item_heights().is_empty());
        assert_eq!(list.content_height(), 3000.0);
        assert_eq!(list.visible()[2].handle.rect().pos, Vec2(0.0, 60.0));
        assert_eq!(ids(&list), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn heights_survive_shrink_and_grow() {
        let (mut list, length) = list(30);
        list.layout(Rect::new(Vec2::ZERO, Size(100.0, 300.0)), &Metrics::compact());
        let _ = list.set_item_height(20, 100.0);
        assert_eq!(list.content_height(), 29.0 * 30.0 + 100.0);

        length.set(10);
        let _ = list.refresh();
        assert_eq!(list.content_height(), 300.0);
        assert_eq!(ids(&list), (0..10).collect::<Vec<_>>());

        length.set(30);
        let _ = list.refresh();
        assert_eq!(list.content_height(), 29.0 * 30.0 + 100.0);
        let _ = list.scroll_to(20);
        let row = list.visible().iter().find(|r| r.id == 20).map(|r| r.handle.rect());
        assert_eq!(row.map(|r| r.size.1), Some(100.0));
    }

    #[test]
    fn unbounded_geometry() {
        let (mut list, _) = list(50);
        let _ = list.measure(&Metrics::compact());
        assert_eq!(list.reconcile(1e30, 300.0, 1000).len(), 1);
        assert_eq!(list.reconcile(0.0, f32::INFINITY, 1000).len(), 1000);

        list.layout(Rect::new(Vec2::ZERO, Size(100.0, 1e30)), &Metrics::compact());
        assert_eq!(ids(&list), (0..50).collect::<Vec<_>>());
        assert_eq!(list.handle_event(Event::Command(Command::PageDown)), Used);
        assert_eq!(list.current_focus(), 49);
    }

    fn draggable(len: usize) -> (ListView<Label>, Rc<Cell<Option<(ItemId, ItemId)>>>) {
        let moved = Rc::new(Cell::new(None));
        let m2 = moved.clone();
        let (list, _) = list(len);
        let config = ListConfig {
            enable_dragging: true,
            ..Default::default()
        };
        let mut list = list
            .with_config(config)
            .on_drag_end(move |from, to| m2.set(Some((from, to))));
        list.layout(Rect::new(Vec2::ZERO, Size(100.0, 300.0)), &Metrics::compact());
        (list, moved)
    }

    #[test]
    fn disabling_drag_cancels_gesture() {
        let (mut list, moved) = draggable(100);
        assert_eq!(list.handle_event(Event::Drag(Vec2(10.0, 100.0))), Used);
        assert!(list.drag_indicator().is_some());

        let action = list.set_config(ListConfig::default());
        assert!(action.contains(Action::REDRAW));
        assert_eq!(list.drag_insert_at(), None);
        assert_eq!(list.drag_indicator(), None);
        assert_eq!(list.handle_event(Event::DragEnd), Unused);
        assert_eq!(moved.get(), None);
    }

    #[test]
    fn drag_over_variable_heights() {
        let (mut list, moved) = draggable(100);
        // Row boundaries: 0, 30, 130, 160, ...
        let _ = list.set_item_height(1, 100.0);

        let _ = list.handle_event(Event::Drag(Vec2(10.0, 10.0)));
        let _ = list.handle_event(Event::Drag(Vec2(10.0, 125.0)));
        assert_eq!(list.drag_insert_at(), Some(2));
        assert_eq!(list.drag_indicator().map(|r| r.pos.1), Some(128.5));

        let _ = list.handle_event(Event::Drag(Vec2(10.0, 70.0)));
        assert_eq!(list.drag_insert_at(), Some(1));
        let _ = list.handle_event(Event::DragEnd);
        assert_eq!(moved.get(), Some((0, 1)));
    }

    #[test]
    fn separators_and_paint() {
        let mut list = laid_out(3);
        let _ = list.select(1);
        assert_eq!(list.separators().len(), 2);
        assert_eq!(list.separators()[0].pos, Vec2(0.0, 29.5));

        let mut draw = Recorder::new();
        list.paint(&mut draw);
        assert_eq!(draw.rects(Fill::Selection).count(), 1);
        assert_eq!(draw.rects(Fill::Separator).count(), 2);
        let texts: Vec<_> = draw.texts().collect();
        assert_eq!(texts, vec!["row 0", "row 1", "row 2"]);

        let _ = list.set_config(ListConfig {
            hide_separators: true,
            ..Default::default()
        });
        assert!(list.separators().is_empty());
    }

    #[test]
    fn wheel_scroll() {
        let mut list = laid_out(100);
        assert_eq!(list.handle_event(Event::Scroll(-2.0)), Used);
        assert_eq!(list.scroll_offset(), 80.0);
        assert_eq!(list.handle_event(Event::Scroll(5.0)), Used);
        assert_eq!(list.scroll_offset(), 0.0);
        assert_eq!(list.handle_event(Event::Scroll(1.0)), Unused);
    }

    #[test]
    fn drag_disabled_is_noop() {
        let mut list = laid_out(100);
        assert_eq!(list.handle_event(Event::Drag(Vec2(10.0, 100.0))), Unused);
        assert_eq!(list.drag_insert_at(), None);
        assert_eq!(list.handle_event(Event::DragEnd), Unused);
    }

    #[test]
    fn empty_list() {
        let mut list = laid_out(0);
        assert!(list.visible().is_empty());
        assert_eq!(list.handle_event(Event::Command(Command::Down)), Unused);
        assert!(list.select(0).is_empty());
        assert_eq!(list.max_scroll_offset(), 0.0);
    }

    #[test]
    fn zero_viewport() {
        let (mut list, _) = list(100);
        list.layout(Rect::new(Vec2::ZERO, Size(100.0, 0.0)), &Metrics::compact());
        assert!(list.visible().is_empty());
        list.layout(Rect::new(Vec2::ZERO, Size(100.0, 300.0)), &Metrics::compact());
        assert_eq!(list.visible().len(), 10);
        list.layout(Rect::new(Vec2::ZERO, Size(100.0, -1.0)), &Metrics::compact());
        assert!(list.visible().is_empty());
        assert_eq!(list.pooled(), 10);
    }
}
