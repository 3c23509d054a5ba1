// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Theme metrics
//!
//! Widgets do not query a global theme. Instead, [`Metrics`] are passed in
//! explicitly by the host on each layout pass.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dimensions used when laying out and painting lists
///
/// This is serializable (using `feature = "serde"`) with the following fields:
///
/// > `padding`: `f32` (gap between consecutive rows) \
/// > `separator_thickness`: `f32` \
/// > `selection_radius`: `f32` (corner radius of row highlights)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metrics {
    #[cfg_attr(feature = "serde", serde(default = "defaults::padding"))]
    pub padding: f32,
    #[cfg_attr(feature = "serde", serde(default = "defaults::separator_thickness"))]
    pub separator_thickness: f32,
    #[cfg_attr(feature = "serde", serde(default = "defaults::selection_radius"))]
    pub selection_radius: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Metrics {
            padding: defaults::padding(),
            separator_thickness: defaults::separator_thickness(),
            selection_radius: defaults::selection_radius(),
        }
    }
}

impl Metrics {
    /// Metrics with no padding between rows
    ///
    /// Separators are still painted (with zero gap they overlap row edges).
    pub fn compact() -> Self {
        Metrics {
            padding: 0.0,
            ..Default::default()
        }
    }
}

mod defaults {
    pub fn padding() -> f32 {
        4.0
    }
    pub fn separator_thickness() -> f32 {
        1.0
    }
    pub fn selection_radius() -> f32 {
        4.0
    }
}
