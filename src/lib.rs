// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Virtualized list view
//!
//! This, the main crate, is merely a wrapper over other crates:
//!
//! -   [`vlist_core`] provides geometry, events, the [`Widget`] trait,
//!     drawing and configuration
//! -   [`vlist_view`] provides the [`view::ListView`] controller and its
//!     building blocks (visible-range calculation, pooling, reconciliation
//!     and drag reordering)
//!
//! All items from [`vlist_core`] are directly re-exported from this crate
//! (e.g. [`vlist::geom::Rect`](crate::geom::Rect)); [`vlist_view`] is
//! re-exported as [`view`].
//!
//! The [easy-cast](https://docs.rs/easy-cast/0.5/easy_cast) library is
//! re-exported as `vlist::cast`.

#![cfg_attr(docsrs, feature(doc_cfg))]

// public implementations:
pub mod prelude;

pub use vlist_core::*;

pub extern crate vlist_view as view;
