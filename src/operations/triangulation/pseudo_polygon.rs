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

use crate::{
    error::GeometryError,
    geometry::{point::Point, triangle::Triangle},
};

/// Delaunay triangulation of the pseudo-polygon bounded by the arc `a -> b`
/// and `polygon`, the chain of vertices left on one side of that arc, in
/// order from `a` to `b`. Triangles are appended to `out`.
///
/// Picks the chain vertex `c` whose circle through `a` and `b` holds no other
/// chain vertex, emits `(a, b, c)` and recurses on the sub-chains before and
/// after `c`.
pub fn triangulate_pseudo_polygon(
    polygon: &[Point],
    a: &Point,
    b: &Point,
    out: &mut Vec<Triangle>,
) -> Result<(), GeometryError> {
    let Some(&first) = polygon.first() else {
        return Ok(());
    };

    let mut split = 0;
    let mut best = Triangle::new(*a, *b, first)?;
    for (i, v) in polygon.iter().enumerate().skip(1) {
        if best.circumcircle_contains(v) {
            split = i;
            best = Triangle::new(*a, *b, *v)?;
        }
    }

    if polygon.len() > 1 {
        let c = polygon[split];
        triangulate_pseudo_polygon(&polygon[..split], a, &c, out)?;
        triangulate_pseudo_polygon(&polygon[split + 1..], &c, b, out)?;
    }
    out.push(best);
    Ok(())
}
