// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Geometry data types
//!
//! [`Vec2`] and [`Size`] are 2D floating-point (`f32`) types representing
//! positions and sizes respectively. [`Rect`] combines the two.
//!
//! All list geometry is expressed in the same logical units as scroll
//! offsets; no scale factor is applied here.

use std::ops::{Add, Sub};

/// 2D vector
///
/// Usually used as either a coordinate or a difference of coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2(pub f32, pub f32);

impl Vec2 {
    /// Zero
    pub const ZERO: Vec2 = Vec2(0.0, 0.0);
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Vec2(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Vec2(self.0 - rhs.0, self.1 - rhs.1)
    }
}

/// A 2D size
///
/// The first component is the width, the second the height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size(pub f32, pub f32);

impl Size {
    /// Zero
    pub const ZERO: Size = Size(0.0, 0.0);

    /// True if both components are zero
    #[inline]
    pub fn is_zero(self) -> bool {
        self == Size::ZERO
    }
}

impl From<Size> for Vec2 {
    #[inline]
    fn from(size: Size) -> Vec2 {
        Vec2(size.0, size.1)
    }
}

/// An axis-aligned rectangular region
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub pos: Vec2,
    pub size: Size,
}

impl Rect {
    /// The empty rect (all fields zero)
    pub const ZERO: Self = Self::new(Vec2::ZERO, Size::ZERO);

    /// Construct from a [`Vec2`] and [`Size`]
    #[inline]
    pub const fn new(pos: Vec2, size: Size) -> Self {
        Rect { pos, size }
    }

    /// Get the second point (pos + size)
    #[inline]
    pub fn pos2(&self) -> Vec2 {
        self.pos + Vec2::from(self.size)
    }

    /// Check whether the given coordinate is contained within this rect
    ///
    /// The lower bound is inclusive, the upper bound exclusive.
    #[inline]
    pub fn contains(&self, c: Vec2) -> bool {
        let p2 = self.pos2();
        c.0 >= self.pos.0 && c.0 < p2.0 && c.1 >= self.pos.1 && c.1 < p2.1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rect_contains() {
        let r = Rect::new(Vec2(10.0, 20.0), Size(30.0, 40.0));
        assert!(r.contains(Vec2(10.0, 20.0)));
        assert!(r.contains(Vec2(39.9, 59.9)));
        assert!(!r.contains(Vec2(40.0, 30.0)));
        assert!(!r.contains(Vec2(15.0, 60.0)));
    }
}
