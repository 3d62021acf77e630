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

use ahash::AHashSet;
use smallvec::SmallVec;

use crate::{
    error::{GeometryError, TriangulationError},
    geometry::{great_arc::GreatArc, point::Point, triangle::Triangle},
    mesh::{
        basic_types::{Location, TriangulationKernel},
        half_edge::HalfEdgeRef,
    },
};

impl TriangulationKernel {
    /// Live faces, in arena order.
    pub fn faces(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.faces
            .iter()
            .filter(|f| !f.removed)
            .map(|f| &f.triangle)
    }

    /// Live half-edges, in arena order.
    pub fn edges(&self) -> impl Iterator<Item = HalfEdgeRef<'_>> + '_ {
        self.live_half_edges().map(|h| HalfEdgeRef::new(self, h))
    }

    /// Distinct vertices, in order of first appearance.
    pub fn vertices(&self) -> Vec<Point> {
        let mut seen = AHashSet::new();
        self.live_half_edges()
            .map(|h| *self.half_edges[h].arc.start())
            .filter(|p| seen.insert(*p))
            .collect()
    }

    pub fn face_count(&self) -> usize {
        self.face_map.len()
    }

    /// Number of live half-edges (twice the number of interior edges plus
    /// the number of boundary edges).
    pub fn edge_count(&self) -> usize {
        self.edge_map.len()
    }

    pub fn half_edge(&self, index: usize) -> Option<HalfEdgeRef<'_>> {
        self.half_edges
            .get(index)
            .filter(|h| !h.removed)
            .map(|_| HalfEdgeRef::new(self, index))
    }

    /// Half-edge carrying exactly `arc`, if any.
    pub fn half_edge_of(&self, arc: &GreatArc) -> Option<HalfEdgeRef<'_>> {
        self.edge_map
            .get(arc)
            .map(|&h| HalfEdgeRef::new(self, h))
    }

    /// The three half-edges of `face`, starting at its anchor.
    pub fn face_edges(&self, face: &Triangle) -> Option<[HalfEdgeRef<'_>; 3]> {
        let f = *self.face_map.get(face)?;
        Some(self.face_half_edges(f).map(|h| HalfEdgeRef::new(self, h)))
    }

    pub fn contains_face(&self, face: &Triangle) -> bool {
        self.face_map.contains_key(face)
    }

    pub fn contains_edge(&self, arc: &GreatArc) -> bool {
        self.edge_map.contains_key(arc)
    }

    pub fn contains_vertex(&self, p: &Point) -> bool {
        self.vertex_edge(p).is_some()
    }

    /// The stored vertex equal to `p`. Linear scan.
    ///
    /// User-supplied points are snapped through this before they are used
    /// as map keys, so hashing only ever sees stored coordinates.
    pub fn vertex(&self, p: &Point) -> Option<Point> {
        self.vertex_edge(p)
            .map(|h| *self.half_edges[h].arc.start())
    }

    /// Any half-edge whose arc strictly contains `p`. Linear scan.
    pub fn edge(&self, p: &Point) -> Option<HalfEdgeRef<'_>> {
        self.edge_index(p).map(|h| HalfEdgeRef::new(self, h))
    }

    /// The face whose open interior contains `p`. Linear scan.
    ///
    /// Faces that report `p` as collinear with one of their edges are
    /// skipped; if no face strictly contains `p`, the last such error is
    /// returned. Check [`edge`](Self::edge) first to handle points lying on
    /// an edge.
    pub fn face(&self, p: &Point) -> Result<Option<&Triangle>, GeometryError> {
        Ok(self.face_index(p)?.map(|f| &self.faces[f].triangle))
    }

    /// Classifies `p` against the mesh: vertex, edge, face or outside.
    pub fn locate(&self, p: &Point) -> Result<Location, GeometryError> {
        if let Some(v) = self.vertex(p) {
            return Ok(Location::Vertex(v));
        }
        if let Some(h) = self.edge_index(p) {
            return Ok(Location::Edge(h));
        }
        Ok(match self.face_index(p)? {
            Some(f) => Location::Face(f),
            None => Location::Outside,
        })
    }

    /// First face around `arc.start()` whose edge opposite `arc.start()` is
    /// crossed by `arc` (end points excluded), or `None`.
    pub fn intersecting_face(
        &self,
        arc: &GreatArc,
    ) -> Result<Option<&Triangle>, TriangulationError> {
        for h in self.fan(arc.start())? {
            let he = &self.half_edges[h];
            let far = &self.half_edges[he.next].arc;
            if arc.intersects(far, false) {
                return Ok(Some(&self.faces[he.face].triangle));
            }
        }
        Ok(None)
    }

    /// A neighbour of `arc.start()` lying strictly inside `arc`, if any.
    pub fn fan_vertex_on(&self, arc: &GreatArc) -> Result<Option<Point>, TriangulationError> {
        for h in self.fan(arc.start())? {
            let he = &self.half_edges[h];
            let spokes = [he.arc.end(), self.half_edges[he.prev].arc.start()];
            if let Some(w) = spokes.into_iter().find(|w| arc.contains(w)) {
                return Ok(Some(*w));
            }
        }
        Ok(None)
    }

    /// Half-edge of `f2` whose opposite lies in `f1`.
    pub fn link(&self, f1: &Triangle, f2: &Triangle) -> Option<HalfEdgeRef<'_>> {
        let a = *self.face_map.get(f1)?;
        let b = *self.face_map.get(f2)?;
        self.face_half_edges(b)
            .into_iter()
            .find(|&h| {
                self.half_edges[h]
                    .opposite
                    .is_some_and(|o| self.half_edges[o].face == a)
            })
            .map(|h| HalfEdgeRef::new(self, h))
    }

    /// Neighbour of `face` across the edge opposite vertex `v`.
    pub fn opposed_face(&self, face: &Triangle, v: &Point) -> Option<&Triangle> {
        if !self.contains_face(face) {
            return None;
        }
        let edge = face.opposed_edge(v).ok()?;
        let h = *self.edge_map.get(edge)?;
        let o = self.half_edges[h].opposite?;
        Some(&self.faces[self.half_edges[o].face].triangle)
    }

    /// The vertex of `f2` that is not a vertex of `f1`, when the two share
    /// exactly one edge.
    pub fn opposed_vertex(&self, f1: &Triangle, f2: &Triangle) -> Option<Point> {
        let mut outside = f2.vertices().iter().filter(|v| !f1.has_vertex(v));
        match (outside.next(), outside.next()) {
            (Some(v), None) => Some(*v),
            _ => None,
        }
    }

    /// Checks the half-edge invariants and the consistency of the maps with
    /// the arenas. Returns the first violation found.
    pub fn validate(&self) -> Result<(), TriangulationError> {
        let broken = |msg: String| Err(TriangulationError::Invariant(msg));

        let mut live_faces = 0;
        for (f, face) in self.faces.iter().enumerate() {
            if face.removed {
                continue;
            }
            live_faces += 1;
            if self.face_map.get(&face.triangle) != Some(&f) {
                return broken(format!("face {} is not indexed", face.triangle));
            }
            let ids = self.face_half_edges(f);
            if self.half_edges[ids[2]].next != ids[0] {
                return broken(format!("face {} has an open cycle", face.triangle));
            }
            for (i, &h) in ids.iter().enumerate() {
                let he = &self.half_edges[h];
                if he.removed || he.face != f {
                    return broken(format!("half-edge {h} does not belong to face {f}"));
                }
                if self.half_edges[he.next].prev != h {
                    return broken(format!("half-edge {h} next/prev mismatch"));
                }
                if !face.triangle.edges().contains(&he.arc) {
                    return broken(format!("arc {} is not an edge of {}", he.arc, face.triangle));
                }
                if i > 0 && he.arc == self.half_edges[ids[0]].arc {
                    return broken(format!("face {} repeats an arc", face.triangle));
                }
            }
        }

        let mut live_half_edges = 0;
        for h in self.live_half_edges() {
            live_half_edges += 1;
            let he = &self.half_edges[h];
            if self.edge_map.get(&he.arc) != Some(&h) {
                return broken(format!("arc {} is not indexed", he.arc));
            }
            match he.opposite {
                Some(o) => {
                    let op = &self.half_edges[o];
                    if op.removed || op.opposite != Some(h) {
                        return broken(format!("half-edge {h} opposite is not mutual"));
                    }
                    if op.arc != he.arc.opposite() || op.face == he.face {
                        return broken(format!("half-edge {h} opposite is not its mirror"));
                    }
                    if op.constrained != he.constrained {
                        return broken(format!("arc {} is constrained on one side only", he.arc));
                    }
                }
                None => {
                    if self.edge_map.contains_key(&he.arc.opposite()) {
                        return broken(format!("arc {} has an unlinked mirror", he.arc));
                    }
                }
            }
        }

        if live_faces != self.face_map.len() || live_half_edges != self.edge_map.len() {
            return broken("maps and arenas disagree".to_string());
        }
        if live_half_edges != 3 * live_faces {
            return broken(format!(
                "{live_half_edges} half-edges for {live_faces} faces"
            ));
        }
        Ok(())
    }

    pub(crate) fn face_half_edges(&self, f: usize) -> [usize; 3] {
        let h0 = self.faces[f].half_edge;
        let h1 = self.half_edges[h0].next;
        let h2 = self.half_edges[h1].next;
        [h0, h1, h2]
    }

    fn live_half_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.half_edges
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.removed)
            .map(|(i, _)| i)
    }

    fn vertex_edge(&self, p: &Point) -> Option<usize> {
        self.live_half_edges()
            .find(|&h| self.half_edges[h].arc.start() == p)
    }

    fn edge_index(&self, p: &Point) -> Option<usize> {
        self.live_half_edges()
            .find(|&h| self.half_edges[h].arc.contains(p))
    }

    fn face_index(&self, p: &Point) -> Result<Option<usize>, GeometryError> {
        let mut collinear = None;
        for (f, face) in self.faces.iter().enumerate() {
            if face.removed {
                continue;
            }
            match face.triangle.contains(p) {
                Ok(true) => return Ok(Some(f)),
                Ok(false) => {}
                Err(e) => collinear = Some(e),
            }
        }
        collinear.map_or(Ok(None), Err)
    }

    /// Half-edges leaving `v`, one per incident face. Rotates forward with
    /// `prev.opposite`; if that hits the open boundary, continues from the
    /// first half-edge the other way with `opposite.next`.
    fn fan(&self, v: &Point) -> Result<SmallVec<[usize; 8]>, TriangulationError> {
        let mut out = SmallVec::new();
        let Some(h0) = self.vertex_edge(v) else {
            return Ok(out);
        };
        out.push(h0);
        let limit = self.half_edges.len();

        let mut h = h0;
        let open = loop {
            match self.half_edges[self.half_edges[h].prev].opposite {
                None => break true,
                Some(o) if o == h0 => break false,
                Some(o) => {
                    out.push(o);
                    h = o;
                }
            }
            if out.len() > limit {
                return Err(TriangulationError::Invariant(format!(
                    "fan around {v} does not close"
                )));
            }
        };

        if open {
            h = h0;
            while let Some(o) = self.half_edges[h].opposite {
                h = self.half_edges[o].next;
                if h == h0 {
                    break;
                }
                out.push(h);
                if out.len() > limit {
                    return Err(TriangulationError::Invariant(format!(
                        "fan around {v} does not close"
                    )));
                }
            }
        }
        Ok(out)
    }
}
