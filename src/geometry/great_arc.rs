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
};

use smallvec::SmallVec;

use crate::{error::GeometryError, geometry::point::Point};

/// Directed shortest path along the sphere from `start` to `end`.
///
/// `GreatArc::new(a, b) != GreatArc::new(b, a)`. Construction rejects
/// identical and antipodal end points, so the great circle is always unique.
#[derive(Debug, Clone, Copy)]
pub struct GreatArc {
    start: Point,
    end: Point,
    normal: Point,
}

impl GreatArc {
    pub fn new(start: Point, end: Point) -> Result<Self, GeometryError> {
        if start == end {
            return Err(GeometryError::IdenticalEndPoints { start, end });
        }
        if start.antipode() == end {
            return Err(GeometryError::AntipodalEndPoints { start, end });
        }
        Ok(Self {
            start,
            end,
            normal: start.cross(&end),
        })
    }

    #[inline]
    pub fn start(&self) -> &Point {
        &self.start
    }

    #[inline]
    pub fn end(&self) -> &Point {
        &self.end
    }

    /// Normal of the great circle plane, `start × end` (not normalized).
    #[inline]
    pub fn normal(&self) -> &Point {
        &self.normal
    }

    /// Same great circle, travelled the other way.
    pub fn opposite(&self) -> GreatArc {
        GreatArc {
            start: self.end,
            end: self.start,
            normal: self.normal.antipode(),
        }
    }

    pub fn mid_point(&self) -> Point {
        (self.start + self.end).normalize()
    }

    /// True iff `p` lies strictly between the end points on this arc.
    pub fn contains(&self, p: &Point) -> bool {
        p.left_of(&self.start, &self.end).is_collinear() && self.is_within(p)
    }

    /// Crossing point of the two arcs. Shared end points count only when
    /// `include_end_points` is set; identical arcs and arcs on the same great
    /// circle never intersect.
    pub fn intersection(&self, other: &GreatArc, include_end_points: bool) -> Option<Point> {
        let common = self.common_points(other);
        match common.len() {
            1 => include_end_points.then(|| common[0]),
            2 => None,
            _ => {
                let [first, anti] = self.circle_intersections(other)?;
                [first, anti]
                    .into_iter()
                    .find(|c| self.is_within(c) && other.is_within(c))
            }
        }
    }

    pub fn intersects(&self, other: &GreatArc, include_end_points: bool) -> bool {
        self.intersection(other, include_end_points).is_some()
    }

    fn common_points(&self, other: &GreatArc) -> SmallVec<[Point; 2]> {
        let mut out = SmallVec::new();
        if self.start == other.start || self.start == other.end {
            out.push(self.start);
        }
        if self.end == other.start || self.end == other.end {
            out.push(self.end);
        }
        out
    }

    /// Both antipodal intersections of the two great circles, or `None` when
    /// the circles coincide.
    fn circle_intersections(&self, other: &GreatArc) -> Option<[Point; 2]> {
        let a = self.normal.normalize();
        let b = other.normal.normalize();
        let x = a.cross(&b).normalize();
        if x.is_nan() {
            return None;
        }
        Some([x, x.antipode()])
    }

    /// Only meaningful for points already on this great circle.
    fn is_within(&self, p: &Point) -> bool {
        self.normal.dot(&self.start.cross(p)) > 0.0 && self.normal.dot(&p.cross(&self.end)) > 0.0
    }
}

impl PartialEq for GreatArc {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for GreatArc {}

impl Hash for GreatArc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl fmt::Display for GreatArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}
