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

//! Incremental constrained Delaunay triangulation over the unit sphere.
//!
//! The mesh starts from a closed (or open) set of seed faces, usually the
//! [`geometry::icosahedron`], and is refined in place by
//! [`Triangulator`]: point insertion with edge-flip legalization,
//! constrained-edge insertion and uniform tessellation.

pub mod error;
pub mod geometry;
pub mod kernel;
pub mod mesh;
pub mod navigation;
pub mod operations;

pub use error::{GeometryError, TriangulationError};
pub use geometry::{GreatArc, Point, Triangle};
pub use mesh::{HalfEdgeRef, TriangulationKernel};
pub use navigation::NavigationMesh;
pub use operations::triangulation::{Triangulator, TriangulatorOptions};
