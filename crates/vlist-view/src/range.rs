// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Visible-range calculation
//!
//! Rows are stacked vertically from `y = 0`, each row followed by a gap of
//! `padding` (the last row's gap is not part of the content height). A row's
//! height is the uniform item height unless overridden in a [`HeightTable`].
//!
//! Two paths are used: when no heights are overridden, the first row is found
//! by division, O(1). Otherwise rows are scanned from the start, O(n) in the
//! index of the last visible row.

use crate::ItemId;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use vlist::cast::{Conv, ConvApprox, ConvFloat};

/// Convert a row count or index to a coordinate
///
/// Exact up to 2^24 rows; beyond that the nearest `f32` is used.
#[inline]
pub(crate) fn coord(n: usize) -> f32 {
    f32::conv_approx(f64::conv(n))
}

/// Per-row height overrides
///
/// Overrides are keyed by row ID. Entries for IDs beyond the current list
/// length are kept but ignored, so that heights survive a list shrinking and
/// growing again.
#[derive(Clone, Debug, Default)]
pub struct HeightTable {
    overrides: FxHashMap<ItemId, f32>,
}

impl HeightTable {
    /// True if no heights are overridden
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Get the override for `id`, if any
    #[inline]
    pub fn get(&self, id: ItemId) -> Option<f32> {
        self.overrides.get(&id).copied()
    }

    /// Get the height of row `id`
    #[inline]
    pub fn height_of(&self, id: ItemId, item_height: f32) -> f32 {
        self.get(id).unwrap_or(item_height)
    }

    /// Set the height of row `id`
    ///
    /// Returns true if the stored height changed.
    pub fn set(&mut self, id: ItemId, height: f32) -> bool {
        self.overrides.insert(id, height) != Some(height)
    }

    /// Remove all overrides
    pub fn clear(&mut self) {
        self.overrides.clear();
    }

    /// Total height of `len` rows
    ///
    /// Includes the padding between rows but not after the last.
    pub fn content_height(&self, len: usize, item_height: f32, padding: f32) -> f32 {
        if len == 0 {
            return 0.0;
        }

        let height = if self.is_empty() {
            (item_height + padding) * coord(len) - padding
        } else {
            let mut custom = 0;
            let mut height = 0.0;
            for (id, h) in self.overrides.iter() {
                if *id < len {
                    custom += 1;
                    height += *h;
                }
            }
            height += coord(len - custom) * item_height;
            height + padding * coord(len - 1)
        };
        height.max(0.0)
    }

    /// Get the position and height of row `id`
    ///
    /// Returns `(y, height)` where `y` is the top of the row.
    pub fn row_position(&self, id: ItemId, item_height: f32, padding: f32) -> (f32, f32) {
        if self.is_empty() {
            return ((item_height + padding) * coord(id), item_height);
        }

        let mut y = 0.0;
        for i in 0..id {
            y += self.height_of(i, item_height) + padding;
        }
        (y, self.height_of(id, item_height))
    }

    /// Find the row boundary nearest to content coordinate `y`
    ///
    /// Boundary `k` is the top of row `k`; boundary `len` is the end of the
    /// last row including its trailing padding. Returns the boundary index
    /// (in `0..=len`) and its position.
    pub fn nearest_boundary(
        &self,
        y: f32,
        len: usize,
        item_height: f32,
        padding: f32,
    ) -> (usize, f32) {
        let y = y.max(0.0);
        if self.is_empty() {
            let step = item_height + padding;
            if step <= 0.0 {
                return (0, 0.0);
            }
            let index = usize::conv_nearest((y / step).min(coord(len))).min(len);
            return (index, coord(index) * step);
        }

        let mut boundary = 0.0;
        for i in 0..len {
            let next = boundary + self.height_of(i, item_height) + padding;
            if y < next {
                if y - boundary < next - y {
                    return (i, boundary);
                } else {
                    return (i + 1, next);
                }
            }
            boundary = next;
        }
        (len, boundary)
    }
}

/// The range of rows intersecting a viewport
///
/// `heights[i]` is the height of row `first + i`; `y` is the top of row
/// `first` in content coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibleRange {
    pub first: ItemId,
    pub y: f32,
    pub heights: SmallVec<[f32; 32]>,
}

impl VisibleRange {
    /// The number of visible rows
    #[inline]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// True when nothing is visible
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// One past the last visible row
    #[inline]
    pub fn end(&self) -> ItemId {
        self.first + self.heights.len()
    }

    /// Iterate over `(id, y, height)` for each visible row
    pub fn rows(&self, padding: f32) -> impl Iterator<Item = (ItemId, f32, f32)> + '_ {
        let mut y = self.y;
        self.heights.iter().enumerate().map(move |(i, h)| {
            let row = (self.first + i, y, *h);
            y += *h + padding;
            row
        })
    }
}

/// Parameters of a visible-range calculation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeParams {
    /// Scroll offset: distance from content top to viewport top
    pub offset: f32,
    /// Height of the viewport
    pub viewport: f32,
    /// Number of rows
    pub len: usize,
    /// Uniform row height
    pub item_height: f32,
    /// Gap between rows
    pub padding: f32,
}

/// Calculate the rows covering the viewport
///
/// The result covers `[offset, offset + viewport]` intersected with the
/// content, with at most one partially-clipped row at each edge. A row whose
/// top lies exactly on the viewport's bottom edge is not included.
///
/// The first row is clamped to `len - 1`. The result is empty when
/// `viewport <= 0` or `len == 0`.
pub fn visible_range(params: RangeParams, heights: &HeightTable) -> VisibleRange {
    let RangeParams {
        offset,
        viewport,
        len,
        item_height,
        padding,
    } = params;
    let mut range = VisibleRange::default();
    if !(viewport > 0.0) || len == 0 {
        return range;
    }
    let offset = offset.max(0.0);

    if heights.is_empty() {
        let step = item_height + padding;
        if !(step > 0.0) {
            return range;
        }

        // Clamp in f32 first: offset and viewport may be arbitrarily large
        let rows = coord(len);
        let first = usize::conv_floor((offset / step).min(rows - 1.0)).min(len - 1);
        let end = usize::conv_ceil(((offset + viewport) / step).min(rows)).clamp(first + 1, len);
        range.first = first;
        range.y = coord(first) * step;
        range.heights.resize(end - first, item_height);
        return range;
    }

    let bottom = offset + viewport;
    let mut y = 0.0;
    let mut found = false;
    for i in 0..len {
        if y >= bottom {
            break;
        }
        let h = heights.height_of(i, item_height);
        if y + h + padding > offset {
            if !found {
                found = true;
                range.first = i;
                range.y = y;
            }
            range.heights.push(h);
        }
        y += h + padding;
    }

    if !found {
        let last = len - 1;
        let (y, h) = heights.row_position(last, item_height, padding);
        range.first = last;
        range.y = y;
        range.heights.push(h);
    }
    range
}

#[cfg(test)]
mod test {
    use super::*;

    fn params(offset: f32, viewport: f32, len: usize) -> RangeParams {
        RangeParams {
            offset,
            viewport,
            len,
            item_height: 30.0,
            padding: 0.0,
        }
    }

    #[test]
    fn uniform_ranges() {
        let heights = HeightTable::default();
        let range = visible_range(params(0.0, 300.0, 1000), &heights);
        assert_eq!((range.first, range.end()), (0, 10));
        assert_eq!(range.y, 0.0);

        let range = visible_range(params(315.0, 300.0, 1000), &heights);
        assert_eq!((range.first, range.end()), (10, 21));
        assert_eq!(range.y, 300.0);
        assert!(range.heights.iter().all(|h| *h == 30.0));
    }

    #[test]
    fn unbounded_inputs() {
        let heights = HeightTable::default();
        let range = visible_range(params(1e30, 300.0, 1000), &heights);
        assert_eq!((range.first, range.end()), (999, 1000));

        let range = visible_range(params(0.0, f32::INFINITY, 1000), &heights);
        assert_eq!((range.first, range.end()), (0, 1000));

        let range = visible_range(params(f32::INFINITY, f32::INFINITY, 5), &heights);
        assert_eq!((range.first, range.end()), (4, 5));

        let range = visible_range(params(f32::NAN, 300.0, 1000), &heights);
        assert_eq!((range.first, range.end()), (0, 10));

        assert_eq!(heights.nearest_boundary(1e30, 1000, 30.0, 0.0), (1000, 30000.0));
    }

    #[test]
    fn uniform_with_padding() {
        let heights = HeightTable::default();
        let p = RangeParams {
            padding: 10.0,
            ..params(45.0, 100.0, 100)
        };
        // step 40: rows 1..=3 intersect [45, 145]
        let range = visible_range(p, &heights);
        assert_eq!((range.first, range.end()), (1, 4));
        assert_eq!(range.y, 40.0);
    }

    #[test]
    fn empty_cases() {
        let heights = HeightTable::default();
        assert!(visible_range(params(0.0, 0.0, 10), &heights).is_empty());
        assert!(visible_range(params(0.0, -5.0, 10), &heights).is_empty());
        assert!(visible_range(params(0.0, 100.0, 0), &heights).is_empty());
    }

    #[test]
    fn short_list_and_clamping() {
        let heights = HeightTable::default();
        let range = visible_range(params(0.0, 300.0, 3), &heights);
        assert_eq!((range.first, range.end()), (0, 3));

        // Offset beyond content: clamp to last row
        let range = visible_range(params(5000.0, 300.0, 3), &heights);
        assert_eq!((range.first, range.end()), (2, 3));
        assert_eq!(range.y, 60.0);
    }

    #[test]
    fn variable_heights() {
        let mut heights = HeightTable::default();
        assert!(heights.set(1, 100.0));
        assert!(!heights.set(1, 100.0));
        // Rows: 0 [0,30), 1 [30,130), 2 [130,160), 3 [160,190), ...
        let range = visible_range(params(40.0, 100.0, 50), &heights);
        assert_eq!(range.first, 1);
        assert_eq!(range.y, 30.0);
        assert_eq!(range.heights.as_slice(), &[100.0, 30.0]);

        let range = visible_range(params(130.0, 60.0, 50), &heights);
        assert_eq!((range.first, range.end()), (2, 4));
    }

    #[test]
    fn stale_overrides_are_ignored() {
        let mut heights = HeightTable::default();
        heights.set(20, 500.0);
        assert_eq!(heights.content_height(10, 30.0, 0.0), 300.0);
        assert_eq!(heights.content_height(21, 30.0, 0.0), 20.0 * 30.0 + 500.0);

        let with_stale = visible_range(params(100.0, 100.0, 10), &heights);
        let without = visible_range(params(100.0, 100.0, 10), &HeightTable::default());
        assert_eq!(with_stale, without);
        assert_eq!(heights.get(20), Some(500.0));
    }

    #[test]
    fn content_height() {
        let heights = HeightTable::default();
        assert_eq!(heights.content_height(0, 30.0, 4.0), 0.0);
        assert_eq!(heights.content_height(1, 30.0, 4.0), 30.0);
        assert_eq!(heights.content_height(10, 30.0, 4.0), 336.0);
    }

    #[test]
    fn coverage() {
        let mut variable = HeightTable::default();
        for i in (0..200).step_by(7) {
            variable.set(i, 10.0 + coord(i % 5) * 17.0);
        }
        for heights in [HeightTable::default(), variable] {
            let len = 200;
            let content = heights.content_height(len, 30.0, 2.0);
            let mut offset = 0.0;
            while offset < content {
                let viewport = 250.0;
                let p = RangeParams {
                    offset,
                    viewport,
                    len,
                    item_height: 30.0,
                    padding: 2.0,
                };
                let range = visible_range(p, &heights);
                assert!(!range.is_empty());
                let (top, _) = heights.row_position(range.first, 30.0, 2.0);
                assert_eq!(top, range.y);
                assert!(range.y <= offset);
                let bottom = range
                    .rows(2.0)
                    .last()
                    .map(|(_, y, h)| y + h + 2.0)
                    .unwrap();
                assert!(bottom >= (offset + viewport).min(content));
                offset += 13.0;
            }
        }
    }

    #[test]
    fn boundaries() {
        let heights = HeightTable::default();
        assert_eq!(heights.nearest_boundary(210.0, 100, 30.0, 0.0), (7, 210.0));
        assert_eq!(heights.nearest_boundary(224.0, 100, 30.0, 0.0), (7, 210.0));
        assert_eq!(heights.nearest_boundary(226.0, 100, 30.0, 0.0), (8, 240.0));
        assert_eq!(heights.nearest_boundary(-50.0, 100, 30.0, 0.0), (0, 0.0));
        assert_eq!(heights.nearest_boundary(1e6, 5, 30.0, 0.0), (5, 150.0));

        let mut variable = HeightTable::default();
        variable.set(0, 100.0);
        assert_eq!(variable.nearest_boundary(40.0, 5, 30.0, 0.0), (0, 0.0));
        assert_eq!(variable.nearest_boundary(60.0, 5, 30.0, 0.0), (1, 100.0));
        assert_eq!(variable.nearest_boundary(1e6, 5, 30.0, 0.0), (5, 220.0));
    }
}
