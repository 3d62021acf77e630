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

use crate::geometry::point::Point;

/// Degenerate input detected by a geometric primitive.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A great arc was requested between two equal points.
    #[error("great arc end points {start} and {end} are identical")]
    IdenticalEndPoints { start: Point, end: Point },

    /// A great arc was requested between two antipodal points; infinitely
    /// many great circles pass through them.
    #[error("great arc end points {start} and {end} are antipodal")]
    AntipodalEndPoints { start: Point, end: Point },

    /// `p` lies on the great circle through `a` and `b`.
    #[error("points {p}, {a} and {b} are collinear")]
    Collinear { p: Point, a: Point, b: Point },

    /// The point is not one of the vertices of the triangle it was used with.
    #[error("{vertex} is not a vertex of the triangle")]
    NotAVertex { vertex: Point },
}

/// Failure of a triangulation operation. A failed operation leaves the mesh
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriangulationError {
    /// No face of the mesh contains the point: it lies outside the
    /// triangulated domain.
    #[error("no face containing {point} was found")]
    FaceNotFound { point: Point },

    /// The operation would split, cross or otherwise alter an existing
    /// constrained edge.
    #[error("operation would alter constrained edge {start} -> {end}")]
    ConstrainedEdge { start: Point, end: Point },

    /// A constrained edge endpoint is not a vertex of the mesh.
    #[error("{point} is not a vertex of the mesh")]
    VertexNotFound { point: Point },

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// An internal consistency check failed (broken adjacency, runaway
    /// legalization, misuse of a kernel precondition).
    #[error("triangulation invariant violated: {0}")]
    Invariant(String),
}
