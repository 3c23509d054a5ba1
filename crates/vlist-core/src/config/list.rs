// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! List behaviour configuration

use crate::Action;
#[cfg(feature = "serde")]
use super::{Error, Format};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::path::Path;

/// A message which may be used to update [`ListConfig`]
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum ListConfigMsg {
    MaxScrollSpeed(f32),
    MinScrollSpeed(f32),
    ScrollAccelerateRange(f32),
    DragSeparatorMultiplier(f32),
    HideSeparators(bool),
    EnableDragging(bool),
    WheelScrollDistance(f32),
    /// Reset all config values to default (not saved) values
    ResetToDefault,
}

/// List behaviour configuration
///
/// This is serializable (using `feature = "serde"`) with the following fields:
///
/// > `max_scroll_speed`: `f32` (units per frame) \
/// > `min_scroll_speed`: `f32` (units per frame) \
/// > `scroll_accelerate_range`: `f32` (units) \
/// > `drag_separator_multiplier`: `f32` (unitless) \
/// > `hide_separators`: `bool` \
/// > `enable_dragging`: `bool` \
/// > `wheel_scroll_distance`: `f32` (units per line)
///
/// While a row is dragged near the top or bottom edge of a list, the list
/// scrolls once per frame. The speed grows quadratically with the distance
/// the pointer is past the edge threshold, reaching `max_scroll_speed` at
/// `scroll_accelerate_range` and never falling below `min_scroll_speed`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListConfig {
    #[cfg_attr(feature = "serde", serde(default = "defaults::max_scroll_speed"))]
    pub max_scroll_speed: f32,

    #[cfg_attr(feature = "serde", serde(default = "defaults::min_scroll_speed"))]
    pub min_scroll_speed: f32,

    #[cfg_attr(feature = "serde", serde(default = "defaults::scroll_accelerate_range"))]
    pub scroll_accelerate_range: f32,

    #[cfg_attr(feature = "serde", serde(default = "defaults::drag_separator_multiplier"))]
    pub drag_separator_multiplier: f32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub hide_separators: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub enable_dragging: bool,

    #[cfg_attr(feature = "serde", serde(default = "defaults::wheel_scroll_distance"))]
    pub wheel_scroll_distance: f32,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            max_scroll_speed: defaults::max_scroll_speed(),
            min_scroll_speed: defaults::min_scroll_speed(),
            scroll_accelerate_range: defaults::scroll_accelerate_range(),
            drag_separator_multiplier: defaults::drag_separator_multiplier(),
            hide_separators: false,
            enable_dragging: false,
            wheel_scroll_distance: defaults::wheel_scroll_distance(),
        }
    }
}

impl ListConfig {
    /// Apply a configuration change
    pub fn change_config(&mut self, msg: ListConfigMsg) -> Action {
        match msg {
            ListConfigMsg::MaxScrollSpeed(v) => self.max_scroll_speed = v,
            ListConfigMsg::MinScrollSpeed(v) => self.min_scroll_speed = v,
            ListConfigMsg::ScrollAccelerateRange(v) => self.scroll_accelerate_range = v,
            ListConfigMsg::DragSeparatorMultiplier(v) => self.drag_separator_multiplier = v,
            ListConfigMsg::HideSeparators(v) => self.hide_separators = v,
            ListConfigMsg::EnableDragging(v) => self.enable_dragging = v,
            ListConfigMsg::WheelScrollDistance(v) => self.wheel_scroll_distance = v,
            ListConfigMsg::ResetToDefault => *self = ListConfig::default(),
        }

        Action::REDRAW
    }

    /// Auto-scroll speed for a pointer `x` units past the edge threshold
    ///
    /// The sign of `x` is ignored; the result is always positive.
    pub fn drag_scroll_speed(&self, x: f32) -> f32 {
        let range = self.scroll_accelerate_range.max(f32::EPSILON);
        let x = x.abs().min(range) / range;
        (x * x * self.max_scroll_speed).max(self.min_scroll_speed)
    }

    /// Parse config text
    ///
    /// Missing fields take their default values.
    #[cfg(feature = "serde")]
    pub fn parse(text: &str, format: Format) -> Result<Self, Error> {
        format.parse(text)
    }

    /// Load from a file
    ///
    /// The format is selected from the file extension.
    #[cfg(feature = "serde")]
    pub fn load(path: &Path) -> Result<Self, Error> {
        let format = Format::from_path(path);
        log::info!("ListConfig::load: path={}, format={format:?}", path.display());
        if format == Format::Unknown {
            return Err(Error::UnsupportedFormat(format));
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, format)
    }

    /// Save to a file
    ///
    /// The format is selected from the file extension. The file is only
    /// written once serialization has succeeded.
    #[cfg(feature = "serde")]
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let format = Format::from_path(path);
        log::info!("ListConfig::save: path={}, format={format:?}", path.display());
        let text = format.render(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

mod defaults {
    pub fn max_scroll_speed() -> f32 {
        500.0
    }
    pub fn min_scroll_speed() -> f32 {
        3.0
    }
    pub fn scroll_accelerate_range() -> f32 {
        250.0
    }
    pub fn drag_separator_multiplier() -> f32 {
        1.5
    }
    pub fn wheel_scroll_distance() -> f32 {
        40.0
    }
}
