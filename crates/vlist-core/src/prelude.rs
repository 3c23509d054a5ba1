// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! vlist core prelude

#[doc(no_inline)] pub use crate::cast::traits::*;
#[doc(no_inline)] pub use crate::draw::{Draw, Fill};
#[doc(no_inline)]
pub use crate::event::{Command, Event};
#[doc(no_inline)]
pub use crate::geom::{Rect, Size, Vec2};
#[doc(no_inline)] pub use crate::theme::Metrics;
#[doc(no_inline)] pub use crate::{Action, IsUsed, Unused, Used, Widget};
