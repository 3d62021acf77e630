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

use std::fmt;

use crate::{
    geometry::{great_arc::GreatArc, point::Point, triangle::Triangle},
    mesh::basic_types::TriangulationKernel,
};

/// Directed edge record owned by exactly one face. `next` and `prev` index
/// the other two half-edges of the same face; `opposite` is the mirror
/// half-edge in the adjacent face, absent on an open boundary.
#[derive(Clone, Debug)]
pub struct HalfEdge {
    pub arc: GreatArc,
    pub face: usize,
    pub next: usize,
    pub prev: usize,
    pub opposite: Option<usize>,
    pub constrained: bool,
    pub removed: bool, // slot is on the free list
}

impl HalfEdge {
    pub fn new(arc: GreatArc, face: usize) -> Self {
        Self {
            arc,
            face,
            next: usize::MAX,
            prev: usize::MAX,
            opposite: None,
            constrained: false,
            removed: false,
        }
    }
}

/// Read-only view of a live half-edge, borrowed from the kernel.
#[derive(Clone, Copy)]
pub struct HalfEdgeRef<'a> {
    kernel: &'a TriangulationKernel,
    index: usize,
}

impl<'a> HalfEdgeRef<'a> {
    pub(crate) fn new(kernel: &'a TriangulationKernel, index: usize) -> Self {
        Self { kernel, index }
    }

    #[inline]
    fn record(&self) -> &'a HalfEdge {
        &self.kernel.half_edges[self.index]
    }

    /// Arena handle, stable until the owning face is removed.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Originating vertex.
    pub fn vertex(&self) -> &'a Point {
        self.record().arc.start()
    }

    pub fn end(&self) -> &'a Point {
        self.record().arc.end()
    }

    pub fn arc(&self) -> &'a GreatArc {
        &self.record().arc
    }

    pub fn face(&self) -> &'a Triangle {
        &self.kernel.faces[self.record().face].triangle
    }

    pub fn next(&self) -> HalfEdgeRef<'a> {
        HalfEdgeRef::new(self.kernel, self.record().next)
    }

    pub fn previous(&self) -> HalfEdgeRef<'a> {
        HalfEdgeRef::new(self.kernel, self.record().prev)
    }

    pub fn opposite(&self) -> Option<HalfEdgeRef<'a>> {
        self.record()
            .opposite
            .map(|o| HalfEdgeRef::new(self.kernel, o))
    }

    pub fn is_constrained(&self) -> bool {
        self.record().constrained
    }
}

impl PartialEq for HalfEdgeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.kernel, other.kernel) && self.index == other.index
    }
}

impl fmt::Debug for HalfEdgeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HalfEdgeRef")
            .field("index", &self.index)
            .field("arc", self.arc())
            .field("constrained", &self.is_constrained())
            .finish()
    }
}
