// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Painting interface
//!
//! Widgets paint through the [`Draw`] trait, which the host implements over
//! its rendering backend. Colours are not chosen here: widgets request a
//! [`Fill`] role and the host maps it to its current theme.
//!
//! [`Recorder`] is a trivial implementation which records draw commands,
//! suitable for headless use and testing.

use crate::geom::Rect;

/// Fill role of a painted rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fill {
    /// Background of a hovered or keyboard-focused row
    Hover,
    /// Background of a selected row
    Selection,
    /// Separator between rows
    Separator,
    /// Insertion indicator shown while dragging
    DragIndicator,
}

/// Draw interface
pub trait Draw {
    /// Fill a rectangle, optionally with rounded corners of the given radius
    fn rect(&mut self, rect: Rect, radius: f32, fill: Fill);

    /// Paint a text label within the given rect
    fn text(&mut self, rect: Rect, text: &str);

    /// Restrict subsequent painting to `clip`, call `f`, then restore
    fn with_clip_region(&mut self, clip: Rect, f: &mut dyn FnMut(&mut dyn Draw));
}

/// A recorded draw command
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Rect { rect: Rect, radius: f32, fill: Fill },
    Text { rect: Rect, text: String },
    PushClip(Rect),
    PopClip,
}

/// A [`Draw`] implementation which records all commands
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCmd>,
}

impl Recorder {
    /// Construct an empty recorder
    pub fn new() -> Self {
        Recorder::default()
    }

    /// Iterate over recorded rects of the given fill
    pub fn rects(&self, fill: Fill) -> impl Iterator<Item = Rect> + '_ {
        self.commands.iter().filter_map(move |cmd| match cmd {
            DrawCmd::Rect { rect, fill: f, .. } if *f == fill => Some(*rect),
            _ => None,
        })
    }

    /// Iterate over recorded text
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Draw for Recorder {
    fn rect(&mut self, rect: Rect, radius: f32, fill: Fill) {
        self.commands.push(DrawCmd::Rect { rect, radius, fill });
    }

    fn text(&mut self, rect: Rect, text: &str) {
        self.commands.push(DrawCmd::Text {
            rect,
            text: text.to_string(),
        });
    }

    fn with_clip_region(&mut self, clip: Rect, f: &mut dyn FnMut(&mut dyn Draw)) {
        self.commands.push(DrawCmd::PushClip(clip));
        f(self);
        self.commands.push(DrawCmd::PopClip);
    }
}
