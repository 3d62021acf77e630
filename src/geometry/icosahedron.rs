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

//! Regular icosahedron inscribed in the unit sphere, the usual seed of a
//! global triangulation.

use crate::{
    error::GeometryError,
    geometry::{coordinates::to_cartesian, point::Point, triangle::Triangle},
};

const NORTH_POLE: Point = Point::new(0.0, 0.0, 1.0);
const SOUTH_POLE: Point = Point::new(0.0, 0.0, -1.0);

const LONGITUDE_STEP: f64 = 72.0;
const TWIST: f64 = 36.0;

/// Twelve vertices: north pole, top ring, bottom ring (twisted by half a
/// step), south pole.
pub fn icosahedron_vertices() -> [Point; 12] {
    let lat = 0.5_f64.atan().to_degrees();
    let ring = |lat: f64, offset: f64, i: usize| {
        let mut lon = i as f64 * LONGITUDE_STEP + offset;
        if lon > 180.0 {
            lon -= 360.0;
        }
        to_cartesian(lat, lon)
    };

    let mut v = [NORTH_POLE; 12];
    for i in 0..5 {
        v[i + 1] = ring(lat, 0.0, i);
        v[i + 6] = ring(-lat, TWIST, i);
    }
    v[11] = SOUTH_POLE;
    v
}

/// The 20 faces in a fixed order: 5 around the north pole, 5 upper middle,
/// 5 lower middle, 5 around the south pole.
pub fn icosahedron() -> Result<Vec<Triangle>, GeometryError> {
    let v = icosahedron_vertices();
    let top = |i: usize| 1 + i % 5;
    let bottom = |i: usize| 6 + i % 5;

    let mut faces = Vec::with_capacity(20);
    for i in 0..5 {
        faces.push(Triangle::new(v[0], v[top(i)], v[top(i + 1)])?);
    }
    for i in 0..5 {
        faces.push(Triangle::new(v[top(i)], v[top(i + 1)], v[bottom(i)])?);
    }
    for i in 0..5 {
        faces.push(Triangle::new(v[bottom(i)], v[bottom(i + 1)], v[top(i + 1)])?);
    }
    for i in 0..5 {
        faces.push(Triangle::new(v[bottom(i)], v[bottom(i + 1)], v[11])?);
    }
    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    #[test]
    fn twenty_distinct_faces() {
        let faces = icosahedron().unwrap();
        assert_eq!(faces.len(), 20);
        let set: AHashSet<_> = faces.iter().cloned().collect();
        assert_eq!(set.len(), 20);
    }

    #[test]
    fn every_edge_is_shared_once_in_each_direction() {
        let faces = icosahedron().unwrap();
        let arcs: Vec<_> = faces.iter().flat_map(|f| f.edges().iter().copied()).collect();
        assert_eq!(arcs.len(), 60);
        let set: AHashSet<_> = arcs.iter().copied().collect();
        assert_eq!(set.len(), 60);
        for a in &arcs {
            assert!(set.contains(&a.opposite()));
        }
    }

    #[test]
    fn vertices_are_evenly_spaced() {
        let v = icosahedron_vertices();
        let faces = icosahedron().unwrap();
        let edge = v[0].distance(&v[1]);
        for f in &faces {
            for e in f.edges() {
                assert!((e.start().distance(e.end()) - edge).abs() < 1e-9);
            }
        }
    }
}
