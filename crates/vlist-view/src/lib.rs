// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Virtualized list views
//!
//! [`ListView`] presents a (possibly very long) list of rows inside a
//! scrolled viewport while only constructing view widgets for visible rows.
//!
//! The implementation is split into layers usable on their own:
//!
//! -   [`range`]: calculate which rows intersect the viewport
//! -   [`pool`]: a free-list of recyclable handles
//! -   [`reconcile`]: maintain the visible set across scroll changes,
//!     preserving handles of rows which remain visible
//! -   [`drag`]: the drag-to-reorder gesture state machine
//!
//! # Callbacks
//!
//! Callbacks are invoked synchronously from within [`ListView`] methods and
//! event handling. A callback must not attempt to access the list which
//! invoked it; instead it should record any required changes and apply them
//! after the call returns.

mod item;
mod list_view;

pub mod drag;
pub mod pool;
pub mod range;
pub mod reconcile;

pub use item::ListItem;
pub use list_view::ListView;

/// Index of a row within the list
pub type ItemId = usize;
