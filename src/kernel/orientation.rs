// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::geometry::{point::Point, util::EPSILON};

/// Side of a point relative to a directed great circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Left,
    Right,
    Collinear,
}

impl Orientation {
    #[inline]
    pub fn is_collinear(self) -> bool {
        self == Orientation::Collinear
    }

    /// Flips `Left` and `Right`, as seen from the reversed great circle.
    #[inline]
    pub fn reverse(self) -> Orientation {
        match self {
            Orientation::Left => Orientation::Right,
            Orientation::Right => Orientation::Left,
            Orientation::Collinear => Orientation::Collinear,
        }
    }
}

/// Returns `p · (a × b)`:
/// - >0 if `p` is left of the great circle `a -> b`
/// - <0 if right
/// - =0 if on it
#[inline]
pub fn triple_product(p: &Point, a: &Point, b: &Point) -> f64 {
    p.dot(&a.cross(b))
}

pub fn orient(p: &Point, a: &Point, b: &Point) -> Orientation {
    let stp = triple_product(p, a, b);
    if stp.abs() < EPSILON {
        Orientation::Collinear
    } else if stp > 0.0 {
        Orientation::Left
    } else {
        Orientation::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn north_pole_is_left_of_equator_eastwards() {
        let a = Point::new(1.0, 0.0, 0.0);
        let b = Point::new(0.0, 1.0, 0.0);
        let n = Point::new(0.0, 0.0, 1.0);

        assert_eq!(orient(&n, &a, &b), Orientation::Left);
        assert_eq!(orient(&n, &b, &a), Orientation::Right);
        assert_eq!(orient(&n.antipode(), &a, &b), Orientation::Right);
    }

    #[test]
    fn arc_end_points_and_mid_point_are_collinear() {
        let a = Point::new(0.3, -0.4, 0.8).normalize();
        let b = Point::new(-0.5, 0.2, 0.6).normalize();
        let m = (a + b).normalize();

        assert_eq!(orient(&a, &a, &b), Orientation::Collinear);
        assert_eq!(orient(&b, &a, &b), Orientation::Collinear);
        assert_eq!(orient(&m, &a, &b), Orientation::Collinear);
    }

    #[test]
    fn below_epsilon_is_collinear() {
        let a = Point::new(1.0, 0.0, 0.0);
        let b = Point::new(0.0, 1.0, 0.0);
        let nearly = Point::new(0.7, 0.7, EPSILON / 10.0).normalize();
        assert!(orient(&nearly, &a, &b).is_collinear());
    }

    #[test]
    fn reverse_swaps_sides() {
        assert_eq!(Orientation::Left.reverse(), Orientation::Right);
        assert_eq!(Orientation::Collinear.reverse(), Orientation::Collinear);
    }
}
