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

use ahash::AHashMap;

use crate::{
    geometry::{great_arc::GreatArc, point::Point, triangle::Triangle},
    mesh::half_edge::HalfEdge,
};

#[derive(Debug, Clone)]
pub struct Face {
    pub triangle: Triangle,
    pub half_edge: usize, // anchor, one of the three half-edges of the face
    pub removed: bool,
}

impl Face {
    pub fn new(triangle: Triangle) -> Self {
        Self {
            triangle,
            half_edge: usize::MAX,
            removed: false,
        }
    }
}

/// Half-edge mesh over the unit sphere.
///
/// Faces and half-edges live in arenas addressed by integer handles; removed
/// slots are recycled through free lists. `edge_map` indexes every live
/// directed arc and `face_map` every live triangle, so lookups by value are
/// O(1). All mutation goes through [`commit`](TriangulationKernel::commit).
#[derive(Debug, Clone, Default)]
pub struct TriangulationKernel {
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) faces: Vec<Face>,
    pub(crate) free_half_edges: Vec<usize>,
    pub(crate) free_faces: Vec<usize>,

    pub(crate) edge_map: AHashMap<GreatArc, usize>,
    pub(crate) face_map: AHashMap<Triangle, usize>,
}

/// Where a point falls relative to the current mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Equal to an existing vertex (the stored vertex is returned).
    Vertex(Point),
    /// Strictly inside the half-edge's arc.
    Edge(usize),
    /// Strictly inside the face.
    Face(usize),
    Outside,
}
