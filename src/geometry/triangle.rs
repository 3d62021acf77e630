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

use crate::{
    error::GeometryError,
    geometry::{great_arc::GreatArc, point::Point, util::approx_eq},
    kernel::orientation::Orientation,
};

/// Spherical triangle, stored counter-clockwise as seen from outside the
/// sphere.
///
/// Two triangles are equal when their vertex triples are cyclic rotations of
/// one another; since both are canonicalized counter-clockwise, this is the
/// same as having the same vertex set.
#[derive(Debug, Clone)]
pub struct Triangle {
    vertices: [Point; 3],
    edges: [GreatArc; 3],
    circumcenter: Point,
    circumradius: f64,
}

impl Triangle {
    pub fn new(v0: Point, v1: Point, v2: Point) -> Result<Self, GeometryError> {
        let vertices = match v0.left_of(&v1, &v2) {
            Orientation::Left => [v0, v1, v2],
            Orientation::Right => [v2, v1, v0],
            Orientation::Collinear => {
                return Err(GeometryError::Collinear { p: v0, a: v1, b: v2 });
            }
        };
        let [a, b, c] = vertices;
        let edges = [
            GreatArc::new(a, b)?,
            GreatArc::new(b, c)?,
            GreatArc::new(c, a)?,
        ];
        // STRIPACK circumcenter
        let circumcenter = (b - a).cross(&(c - a)).normalize();
        let circumradius = circumcenter.distance(&a);
        Ok(Self {
            vertices,
            edges,
            circumcenter,
            circumradius,
        })
    }

    #[inline]
    pub fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }

    /// `[v0 -> v1, v1 -> v2, v2 -> v0]`.
    #[inline]
    pub fn edges(&self) -> &[GreatArc; 3] {
        &self.edges
    }

    #[inline]
    pub fn circumcenter(&self) -> &Point {
        &self.circumcenter
    }

    /// Angular radius of the circumcircle, in radians.
    #[inline]
    pub fn circumradius(&self) -> f64 {
        self.circumradius
    }

    /// Normalized vertex average; always strictly inside the triangle.
    pub fn centroid(&self) -> Point {
        let [a, b, c] = self.vertices;
        (a + b + c).normalize()
    }

    pub fn vertex_index(&self, p: &Point) -> Option<usize> {
        self.vertices.iter().position(|v| v == p)
    }

    pub fn has_vertex(&self, p: &Point) -> bool {
        self.vertex_index(p).is_some()
    }

    /// True iff `p` is inside the circumcircle or on it (within epsilon).
    pub fn circumcircle_contains(&self, p: &Point) -> bool {
        let d = p.distance(&self.circumcenter);
        d < self.circumradius || approx_eq(d, self.circumradius)
    }

    /// True iff `p` lies in the open interior of this triangle. Vertices are
    /// never contained. Fails with `Collinear` when `p` sits on the great
    /// circle of an edge that has to be consulted.
    pub fn contains(&self, p: &Point) -> Result<bool, GeometryError> {
        if self.has_vertex(p) || !self.circumcircle_contains(p) {
            return Ok(false);
        }
        // The circumcircle test above already rules out the antipodal hit.
        let [v0, v1, v2] = &self.vertices;
        let reference = p.is_left_of(v2, v0)?;
        for (a, b) in [(v0, v1), (v1, v2)] {
            if p.is_left_of(a, b)? != reference {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The edge that does not touch vertex `v`.
    pub fn opposed_edge(&self, v: &Point) -> Result<&GreatArc, GeometryError> {
        let i = self
            .vertex_index(v)
            .ok_or(GeometryError::NotAVertex { vertex: *v })?;
        Ok(&self.edges[(i + 1) % 3])
    }

    /// Index of the rotation starting at the smallest vertex key, used to
    /// make hashing independent of the starting vertex.
    fn canonical_start(&self) -> usize {
        (0..3)
            .min_by_key(|&i| self.vertices[i].key())
            .unwrap_or_default()
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        (0..3).any(|r| (0..3).all(|i| self.vertices[i] == other.vertices[(i + r) % 3]))
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let s = self.canonical_start();
        for i in 0..3 {
            self.vertices[(s + i) % 3].hash(state);
        }
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.vertices;
        write!(f, "[{a}, {b}, {c}]")
    }
}
