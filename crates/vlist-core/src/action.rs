// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Action enum

bitflags! {
    /// Action required after processing
    ///
    /// This type is returned by widget operations which modify state. The host
    /// is responsible for acting on it: repainting, re-running layout,
    /// moving keyboard focus or scheduling frame ticks.
    ///
    /// Two `Action` values may be combined via bit-or (`a | b`).
    #[must_use]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Action: u32 {
        /// The widget requires repainting
        const REDRAW = 1 << 0;
        /// Content size changed: the host should call
        /// [`Widget::layout`](crate::Widget::layout) again
        const SET_RECT = 1 << 8;
        /// The widget requests keyboard focus
        const FOCUS = 1 << 12;
        /// The widget is animating: deliver
        /// [`Event::Timer`](crate::event::Event::Timer) on the next frame
        const ANIMATE = 1 << 16;
    }
}
