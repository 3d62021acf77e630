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

use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, Mul, Neg, Sub},
};

use crate::{
    error::GeometryError,
    geometry::util::{approx_eq, quantize},
    kernel::orientation::{Orientation, orient},
};

/// Cartesian position vector. Mesh vertices are unit vectors; intermediate
/// results (differences, cross products) are not.
///
/// Equality is coordinate-wise within [`EPSILON`](crate::geometry::util::EPSILON)
/// and hashing quantizes on the same grid.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Point) -> Point {
        Point {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector parallel to `self`. The zero vector yields NaN components,
    /// which callers use to detect coincident great circles.
    pub fn normalize(&self) -> Point {
        self.scale(1.0 / self.norm())
    }

    pub fn scale(&self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Diametrically opposite point on the sphere.
    pub fn antipode(&self) -> Point {
        self.scale(-1.0)
    }

    /// Great-circle distance in radians.
    pub fn distance(&self, other: &Point) -> f64 {
        self.cross(other).norm().atan2(self.dot(other))
    }

    /// Side of `self` relative to the great circle through `a` then `b`.
    pub fn left_of(&self, a: &Point, b: &Point) -> Orientation {
        orient(self, a, b)
    }

    /// Boolean form of [`left_of`](Self::left_of) for call sites where
    /// collinearity is a degenerate input rather than a case to handle.
    pub fn is_left_of(&self, a: &Point, b: &Point) -> Result<bool, GeometryError> {
        match self.left_of(a, b) {
            Orientation::Left => Ok(true),
            Orientation::Right => Ok(false),
            Orientation::Collinear => Err(GeometryError::Collinear {
                p: *self,
                a: *a,
                b: *b,
            }),
        }
    }

    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Grid cell of this point, consistent with `PartialEq`.
    #[inline(always)]
    pub fn key(&self) -> (i64, i64, i64) {
        (quantize(self.x), quantize(self.y), quantize(self.z))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        self.subtract(&rhs)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        self.scale(rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        self.antipode()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::util::EPSILON;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(p: &Point) -> u64 {
        let mut h = DefaultHasher::new();
        p.hash(&mut h);
        h.finish()
    }

    #[test]
    fn cross_of_axes() {
        let x = Point::new(1.0, 0.0, 0.0);
        let y = Point::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Point::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Point::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn normalize_has_unit_norm() {
        let p = Point::new(3.0, 4.0, 12.0).normalize();
        assert!((p.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_zero_is_nan() {
        assert!(Point::new(0.0, 0.0, 0.0).normalize().is_nan());
    }

    #[test]
    fn distance_quarter_turn() {
        let x = Point::new(1.0, 0.0, 0.0);
        let z = Point::new(0.0, 0.0, 1.0);
        assert!((x.distance(&z) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((x.distance(&x.antipode()) - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn equality_within_epsilon() {
        let p = Point::new(0.5, 0.5, 0.7071);
        let q = Point::new(0.5 + EPSILON / 4.0, 0.5, 0.7071);
        assert_eq!(p, q);
        assert_ne!(p, Point::new(0.5 + EPSILON * 4.0, 0.5, 0.7071));
    }

    #[test]
    fn identical_points_hash_equally() {
        let p = Point::new(0.1, -0.2, 0.3).normalize();
        let q = Point::new(0.1, -0.2, 0.3).normalize();
        assert_eq!(hash_of(&p), hash_of(&q));
    }

    #[test]
    fn differing_coordinates_are_not_equal() {
        assert_ne!(Point::new(1.0, 0.0, 0.0), Point::new(2.0, 0.0, 0.0));
        assert_ne!(Point::new(1.0, 1.0, 0.0), Point::new(1.0, 0.0, 0.0));
        assert_ne!(Point::new(2.0, 0.6, 1.1), Point::new(2.0, 0.6, 1.01));
    }

    #[test]
    fn operators_match_methods() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(-1.0, 0.5, 2.0);
        assert_eq!(a + b, Point::new(0.0, 2.5, 5.0));
        assert_eq!(a - b, a.subtract(&b));
        assert_eq!(a * 2.0, a.scale(2.0));
        assert_eq!(-a, a.antipode());
    }
}
