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

//! Navigation mesh over the whole sphere: a tessellated icosahedron carved
//! by obstacle polygons, with A* routing over the faces.

use std::{cmp::Ordering, collections::BinaryHeap};

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::{
    error::TriangulationError,
    geometry::{icosahedron::icosahedron, point::Point, triangle::Triangle},
    mesh::{HalfEdgeRef, Location},
    operations::triangulation::Triangulator,
};

#[derive(Debug, Clone)]
pub struct NavigationMesh {
    triangulator: Triangulator,
}

impl NavigationMesh {
    /// Icosahedron refined by `tessellation_level` rounds of tessellation,
    /// i.e. `20 * 3^level` faces before any obstacle is added.
    pub fn new(tessellation_level: usize) -> Result<Self, TriangulationError> {
        let mut triangulator = Triangulator::new(&icosahedron()?)?;
        triangulator.tessellate(tessellation_level)?;
        log::debug!(
            "navigation mesh ready: level {tessellation_level}, {} faces",
            triangulator.face_count()
        );
        Ok(Self { triangulator })
    }

    /// Adds a closed obstacle outline. Its edges become constrained and are
    /// never crossed by [`adjacent_faces`](Self::adjacent_faces).
    pub fn add_obstacle(&mut self, vertices: &[Point]) -> Result<(), TriangulationError> {
        self.triangulator.add_constraint("obstacle", vertices)
    }

    pub fn faces(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.triangulator.faces()
    }

    pub fn edges(&self) -> impl Iterator<Item = HalfEdgeRef<'_>> + '_ {
        self.triangulator.edges()
    }

    pub fn constrained_edges(&self) -> impl Iterator<Item = HalfEdgeRef<'_>> + '_ {
        self.edges().filter(|he| he.is_constrained())
    }

    pub fn face_count(&self) -> usize {
        self.triangulator.face_count()
    }

    /// Neighbours of `face` reachable without crossing an obstacle edge.
    /// Empty when `face` is not part of the mesh.
    pub fn adjacent_faces(&self, face: &Triangle) -> Vec<&Triangle> {
        let Some(edges) = self.triangulator.kernel().face_edges(face) else {
            return Vec::new();
        };
        edges
            .into_iter()
            .filter(|he| !he.is_constrained())
            .filter_map(|he| he.opposite())
            .map(|o| o.face())
            .collect()
    }

    /// Cheapest chain of faces from the face holding `start` to the face
    /// holding `target`, stepping only across unconstrained edges. Step cost
    /// and heuristic are both the great-circle distance between face
    /// centroids. `None` when either point is off the mesh or no route
    /// exists.
    pub fn find_path(
        &self,
        start: &Point,
        target: &Point,
    ) -> Result<Option<Vec<Triangle>>, TriangulationError> {
        let kernel = self.triangulator.kernel();
        let (Some(from), Some(to)) = (self.face_containing(start)?, self.face_containing(target)?)
        else {
            return Ok(None);
        };
        let (Some(&from), Some(&to)) = (kernel.face_map.get(from), kernel.face_map.get(to)) else {
            return Ok(None);
        };

        let centroid = |f: usize| kernel.faces[f].triangle.centroid();
        let goal = centroid(to);

        let mut open = BinaryHeap::new();
        let mut cost_from_start: AHashMap<usize, f64> = AHashMap::new();
        let mut parent: AHashMap<usize, usize> = AHashMap::new();
        cost_from_start.insert(from, 0.0);
        open.push(OpenFace {
            face: from,
            cost: 0.0,
            estimate: centroid(from).distance(&goal),
        });

        let mut expanded = 0;
        while let Some(OpenFace { face, cost, .. }) = open.pop() {
            if cost > cost_from_start.get(&face).copied().unwrap_or(f64::INFINITY) {
                continue; // stale entry
            }
            if face == to {
                let mut path = vec![face];
                let mut f = face;
                while let Some(&p) = parent.get(&f) {
                    path.push(p);
                    f = p;
                }
                path.reverse();
                log::debug!(
                    "path found: {} faces, cost {cost:.4}, {expanded} expanded",
                    path.len()
                );
                return Ok(Some(
                    path.into_iter()
                        .map(|f| kernel.faces[f].triangle.clone())
                        .collect(),
                ));
            }
            expanded += 1;

            let here = centroid(face);
            for next in self.passable_neighbours(face) {
                let there = centroid(next);
                let tentative = cost + here.distance(&there);
                if tentative < cost_from_start.get(&next).copied().unwrap_or(f64::INFINITY) {
                    cost_from_start.insert(next, tentative);
                    parent.insert(next, face);
                    open.push(OpenFace {
                        face: next,
                        cost: tentative,
                        estimate: tentative + there.distance(&goal),
                    });
                }
            }
        }
        log::debug!("no path: {expanded} faces expanded");
        Ok(None)
    }

    fn passable_neighbours(&self, f: usize) -> SmallVec<[usize; 3]> {
        let kernel = self.triangulator.kernel();
        kernel
            .face_half_edges(f)
            .into_iter()
            .map(|h| &kernel.half_edges[h])
            .filter(|he| !he.constrained)
            .filter_map(|he| he.opposite)
            .map(|o| kernel.half_edges[o].face)
            .collect()
    }

    /// A face whose closure contains `p`. For a point on an edge or vertex
    /// any one of the incident faces is returned.
    pub fn face_containing(&self, p: &Point) -> Result<Option<&Triangle>, TriangulationError> {
        let kernel = self.triangulator.kernel();
        Ok(match kernel.locate(p)? {
            Location::Face(f) => Some(&kernel.faces[f].triangle),
            Location::Edge(h) => kernel.half_edge(h).map(|he| he.face()),
            Location::Vertex(v) => kernel.faces().find(|f| f.has_vertex(&v)),
            Location::Outside => None,
        })
    }

    pub fn triangulator(&self) -> &Triangulator {
        &self.triangulator
    }
}

/// Frontier entry, ordered so the `BinaryHeap` pops the lowest estimate.
#[derive(Debug, Clone, Copy)]
struct OpenFace {
    face: usize,
    cost: f64,
    estimate: f64,
}

impl PartialEq for OpenFace {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenFace {}

impl PartialOrd for OpenFace {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenFace {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.cost.total_cmp(&self.cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_zero_is_the_icosahedron() {
        let mesh = NavigationMesh::new(0).unwrap();
        assert_eq!(mesh.face_count(), 20);
        assert_eq!(mesh.constrained_edges().count(), 0);
        for face in mesh.faces() {
            assert_eq!(mesh.adjacent_faces(face).len(), 3);
        }
    }

    #[test]
    fn open_faces_pop_lowest_estimate_first() {
        let mut heap = BinaryHeap::new();
        for (face, estimate) in [(0, 0.7), (1, 0.2), (2, 0.5)] {
            heap.push(OpenFace { face, cost: 0.0, estimate });
        }
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|o| o.face)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }
}
