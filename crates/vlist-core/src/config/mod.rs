// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Configuration items and utilities
//!
//! [`ListConfig`] controls list behaviour which is not part of the theme:
//! drag-and-drop, drag auto-scroll tuning, separators and wheel distance.
//! It may be read from or written to a file using [`Format`]
//! (requires `feature = "serde"` and a format feature).

mod format;
pub use format::{Error, Format};

mod list;
pub use list::{ListConfig, ListConfigMsg};
