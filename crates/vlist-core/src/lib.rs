// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! vlist core
//!
//! Toolkit-independent building blocks shared by view controllers:
//!
//! -   [`geom`]: floating-point geometry ([`geom::Vec2`], [`geom::Size`], [`geom::Rect`])
//! -   [`event`]: input events delivered by the host and the [`IsUsed`] result
//! -   [`Widget`]: the capability set `{measure, layout, paint, handle_event}`
//! -   [`draw`]: the painting interface used by [`Widget::paint`]
//! -   [`theme`]: explicit style [`theme::Metrics`], replacing global theme lookups
//! -   [`config`]: list behaviour configuration and config file formats

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[macro_use]
extern crate bitflags;

pub extern crate easy_cast as cast;

mod action;
pub use action::Action;

pub mod config;
pub mod draw;
pub mod event;
pub mod geom;
pub mod prelude;
pub mod theme;

mod widget;
pub use widget::Widget;

pub use event::IsUsed::{self, Unused, Used};
