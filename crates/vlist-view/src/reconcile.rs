// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Visible-set reconciliation
//!
//! Given the previous visible set and a new [`VisibleRange`], the
//! [`Reconciler`] builds the new visible set:
//!
//! -   rows visible before and after keep their handle
//! -   rows no longer visible release their handle to the [`Pool`]
//! -   newly visible rows take a pooled handle or construct a new one
//!
//! The visible set is sorted by row ID, so lookups use binary search.

use crate::ItemId;
use crate::pool::{Pool, Recycle};
use crate::range::VisibleRange;
use smallvec::SmallVec;

/// A visible row and its bound handle
#[derive(Debug)]
pub struct VisibleRow<T> {
    pub id: ItemId,
    pub handle: T,
}

/// Find `id` in a visible set
///
/// Invariant: `visible` is in ascending order of IDs.
/// Returns `Ok(index)` if found, otherwise `Err(insertion_index)`.
#[inline]
pub fn search_visible<T>(visible: &[VisibleRow<T>], id: ItemId) -> Result<usize, usize> {
    visible.binary_search_by_key(&id, |row| row.id)
}

/// Changes made by a call to [`Reconciler::reconcile`]
///
/// Each list is in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// Rows which were assigned a handle (these must be bound to content)
    pub added: SmallVec<[ItemId; 16]>,
    /// Rows whose handle was released to the pool
    pub removed: SmallVec<[ItemId; 16]>,
    /// Rows which kept their handle (these may need moving)
    pub kept: SmallVec<[ItemId; 32]>,
}

impl Reconciled {
    /// True if `id` was newly assigned a handle
    #[inline]
    pub fn is_added(&self, id: ItemId) -> bool {
        self.added.binary_search(&id).is_ok()
    }
}

/// Maintains the visible set and the pool of spare handles
#[derive(Debug)]
pub struct Reconciler<T> {
    visible: Vec<VisibleRow<T>>,
    spare: Vec<VisibleRow<T>>,
    pool: Pool<T>,
    allocated: usize,
}

impl<T> Default for Reconciler<T> {
    fn default() -> Self {
        Reconciler {
            visible: Vec::new(),
            spare: Vec::new(),
            pool: Pool::default(),
            allocated: 0,
        }
    }
}

impl<T: Recycle> Reconciler<T> {
    /// The current visible set, in ascending order of IDs
    #[inline]
    pub fn visible(&self) -> &[VisibleRow<T>] {
        &self.visible
    }

    /// The current visible set (mutable handles)
    ///
    /// IDs must not be modified.
    #[inline]
    pub fn visible_mut(&mut self) -> &mut [VisibleRow<T>] {
        &mut self.visible
    }

    /// Get the handle bound to `id`, if visible
    pub fn get(&self, id: ItemId) -> Option<&T> {
        search_visible(&self.visible, id)
            .ok()
            .map(|i| &self.visible[i].handle)
    }

    /// Get the handle bound to `id`, if visible (mutable)
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        search_visible(&self.visible, id)
            .ok()
            .map(|i| &mut self.visible[i].handle)
    }

    /// The number of handles bound to rows
    #[inline]
    pub fn in_use(&self) -> usize {
        self.visible.len()
    }

    /// The number of handles waiting in the pool
    #[inline]
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// The number of handles ever constructed
    ///
    /// This always equals `in_use() + pooled()`.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Rebuild the visible set to cover `range`
    ///
    /// `make` constructs a new handle when the pool is empty. If it returns
    /// `None` the row is skipped (it will be retried on the next call).
    pub fn reconcile(
        &mut self,
        range: &VisibleRange,
        mut make: impl FnMut() -> Option<T>,
    ) -> Reconciled {
        let mut report = Reconciled::default();
        let mut old = std::mem::replace(&mut self.visible, std::mem::take(&mut self.spare));
        debug_assert!(self.visible.is_empty());

        let (first, end) = (range.first, range.end());
        let start = search_visible(&old, first).unwrap_or_else(|i| i);
        let stop = search_visible(&old, end).unwrap_or_else(|i| i).max(start);

        // Release rows outside the new range first so that their handles
        // may be re-used below.
        for row in old.drain(stop..) {
            report.removed.push(row.id);
            self.pool.release(row.handle);
        }
        for row in old.drain(..start) {
            report.removed.push(row.id);
            self.pool.release(row.handle);
        }
        report.removed.sort_unstable();

        self.visible.reserve(range.len());
        let mut kept = old.drain(..).peekable();
        for id in first..end {
            if let Some(row) = kept.next_if(|row| row.id == id) {
                report.kept.push(id);
                self.visible.push(row);
                continue;
            }

            let handle = match self.pool.acquire() {
                Some(handle) => handle,
                None => match make() {
                    Some(handle) => {
                        self.allocated += 1;
                        handle
                    }
                    None => continue,
                },
            };
            let mut row = VisibleRow { id, handle };
            row.handle.assign(id);
            report.added.push(id);
            self.visible.push(row);
        }
        debug_assert!(kept.next().is_none());
        drop(kept);

        self.spare = old;
        report
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use smallvec::smallvec;

    #[derive(Debug)]
    struct Handle {
        serial: usize,
        id: Option<ItemId>,
    }

    impl Recycle for Handle {
        fn assign(&mut self, id: ItemId) {
            self.id = Some(id);
        }
        fn recycle(&mut self) {
            self.id = None;
        }
    }

    fn range(first: ItemId, end: ItemId) -> VisibleRange {
        VisibleRange {
            first,
            y: 0.0,
            heights: std::iter::repeat_n(10.0, end - first).collect(),
        }
    }

    struct Factory(usize);
    impl Factory {
        fn make(&mut self) -> Option<Handle> {
            self.0 += 1;
            Some(Handle {
                serial: self.0,
                id: None,
            })
        }
    }

    fn serials(r: &Reconciler<Handle>) -> Vec<(ItemId, usize)> {
        r.visible().iter().map(|row| (row.id, row.handle.serial)).collect()
    }

    #[test]
    fn first_pass_allocates() {
        let mut f = Factory(0);
        let mut r = Reconciler::default();
        let report = r.reconcile(&range(0, 4), || f.make());
        assert_eq!(report.added.as_slice(), &[0, 1, 2, 3]);
        assert!(report.removed.is_empty());
        assert_eq!(r.allocated(), 4);
        assert!(
            r.visible()
                .iter()
                .all(|row| row.handle.id == Some(row.id))
        );
    }

    #[test]
    fn kept_rows_keep_handles() {
        let mut f = Factory(0);
        let mut r = Reconciler::default();
        let _ = r.reconcile(&range(0, 4), || f.make());
        let before = serials(&r);

        let report = r.reconcile(&range(1, 5), || f.make());
        assert_eq!(report.kept.as_slice(), &[1, 2, 3]);
        assert_eq!(report.removed.as_slice(), &[0]);
        assert_eq!(report.added.as_slice(), &[4]);
        let after = serials(&r);
        assert_eq!(&after[..3], &before[1..]);
        // The handle released by row 0 was recycled for row 4
        assert_eq!(after[3], (4, before[0].1));
        assert_eq!(r.allocated(), 4);
        assert_eq!(r.get(4).and_then(|h| h.id), Some(4));
        assert!(r.get(0).is_none());
    }

    #[test]
    fn jump_recycles_everything() {
        let mut f = Factory(0);
        let mut r = Reconciler::default();
        let _ = r.reconcile(&range(0, 5), || f.make());
        let report = r.reconcile(&range(100, 105), || f.make());
        assert_eq!(report.removed.as_slice(), &[0, 1, 2, 3, 4]);
        assert_eq!(report.added.len(), 5);
        assert!(report.kept.is_empty());
        assert_eq!(r.allocated(), 5);
        assert_eq!(r.pooled(), 0);
    }

    #[test]
    fn conservation_and_order() {
        let mut f = Factory(0);
        let mut r = Reconciler::default();
        let starts = [0, 3, 2, 50, 49, 0, 7, 8, 9, 200, 198];
        for start in starts {
            let _ = r.reconcile(&range(start, start + 6), || f.make());
            assert_eq!(r.in_use() + r.pooled(), r.allocated());
            assert_eq!(r.allocated(), 6);
            let ids: Vec<_> = r.visible().iter().map(|row| row.id).collect();
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(ids, (start..start + 6).collect::<Vec<_>>());
        }
    }

    #[test]
    fn shrink_to_empty() {
        let mut f = Factory(0);
        let mut r = Reconciler::default();
        let _ = r.reconcile(&range(0, 3), || f.make());
        let report = r.reconcile(&VisibleRange::default(), || f.make());
        let expected: SmallVec<[ItemId; 16]> = smallvec![0, 1, 2];
        assert_eq!(report.removed, expected);
        assert_eq!(r.in_use(), 0);
        assert_eq!(r.pooled(), 3);
    }

    #[test]
    fn factory_failure_skips_row() {
        let mut r: Reconciler<Handle> = Reconciler::default();
        let report = r.reconcile(&range(0, 3), || None);
        assert!(report.added.is_empty());
        assert_eq!(r.in_use(), 0);
        assert_eq!(r.allocated(), 0);
    }

    #[test]
    fn search() {
        let mut f = Factory(0);
        let mut r = Reconciler::default();
        let _ = r.reconcile(&range(10, 14), || f.make());
        assert_eq!(search_visible(r.visible(), 12), Ok(2));
        assert_eq!(search_visible(r.visible(), 9), Err(0));
        assert_eq!(search_visible(r.visible(), 20), Err(4));
    }
}
