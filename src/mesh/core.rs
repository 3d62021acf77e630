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
    error::TriangulationError,
    geometry::{great_arc::GreatArc, point::Point, triangle::Triangle},
    mesh::{
        basic_types::{Face, TriangulationKernel},
        half_edge::HalfEdge,
    },
};

impl TriangulationKernel {
    /// Builds a kernel from an initial set of faces, typically the
    /// icosahedron or a subset of it. Faces sharing an arc (in opposite
    /// directions) become neighbours.
    pub fn new(boundaries: &[Triangle]) -> Result<Self, TriangulationError> {
        let mut kernel = Self::default();
        kernel.commit(boundaries, &[])?;
        Ok(kernel)
    }

    /// Replaces `removed` with `added` as one step.
    ///
    /// Every removed face must be present, and no added arc may collide with
    /// an arc that survives the removal or with another added arc. The whole
    /// batch is checked before anything is touched; on error the kernel is
    /// unchanged.
    ///
    /// New half-edges pick up the constrained flag of their opposite, and
    /// constrained arcs of removed faces that reappear in `added` stay
    /// constrained.
    pub fn commit(
        &mut self,
        added: &[Triangle],
        removed: &[Triangle],
    ) -> Result<(), TriangulationError> {
        let removed_ids = self.check_commit(added, removed)?;

        let mut preserved: SmallVec<[GreatArc; 4]> = SmallVec::new();
        for &f in &removed_ids {
            for h in self.face_half_edges(f) {
                let he = &self.half_edges[h];
                if he.constrained {
                    preserved.push(he.arc);
                }
            }
            self.remove_face(f);
        }

        for t in added {
            self.add_face(t.clone());
        }

        for arc in &preserved {
            if let Some(&h) = self.edge_map.get(arc) {
                self.mark_constrained(h);
            }
        }

        log::trace!(
            "commit: -{} +{} faces, {} live",
            removed.len(),
            added.len(),
            self.face_map.len()
        );
        Ok(())
    }

    fn check_commit(
        &self,
        added: &[Triangle],
        removed: &[Triangle],
    ) -> Result<SmallVec<[usize; 8]>, TriangulationError> {
        let mut removed_ids: SmallVec<[usize; 8]> = SmallVec::new();
        for t in removed {
            let f = *self.face_map.get(t).ok_or_else(|| {
                TriangulationError::Invariant(format!("face {t} is not in the mesh"))
            })?;
            if removed_ids.contains(&f) {
                return Err(TriangulationError::Invariant(format!(
                    "face {t} is removed twice"
                )));
            }
            removed_ids.push(f);
        }

        let released: AHashSet<GreatArc> = removed_ids
            .iter()
            .flat_map(|&f| self.face_half_edges(f))
            .map(|h| self.half_edges[h].arc)
            .collect();

        let mut incoming: AHashSet<GreatArc> = AHashSet::with_capacity(added.len() * 3);
        for t in added {
            for arc in t.edges() {
                if !incoming.insert(*arc) {
                    return Err(TriangulationError::Invariant(format!(
                        "arc {arc} is added twice"
                    )));
                }
                if self.edge_map.contains_key(arc) && !released.contains(arc) {
                    return Err(TriangulationError::Invariant(format!(
                        "arc {arc} of face {t} is already in the mesh"
                    )));
                }
            }
        }
        Ok(removed_ids)
    }

    fn remove_face(&mut self, f: usize) {
        for h in self.face_half_edges(f) {
            if let Some(o) = self.half_edges[h].opposite.take() {
                self.half_edges[o].opposite = None;
            }
            let arc = self.half_edges[h].arc;
            self.edge_map.remove(&arc);
            self.half_edges[h].removed = true;
            self.free_half_edges.push(h);
        }
        let face = &mut self.faces[f];
        face.removed = true;
        self.face_map.remove(&face.triangle);
        self.free_faces.push(f);
    }

    fn add_face(&mut self, triangle: Triangle) {
        let arcs = *triangle.edges();
        let f = self.alloc_face(Face::new(triangle.clone()));
        let ids = arcs.map(|arc| self.alloc_half_edge(HalfEdge::new(arc, f)));

        for i in 0..3 {
            let h = ids[i];
            self.half_edges[h].next = ids[(i + 1) % 3];
            self.half_edges[h].prev = ids[(i + 2) % 3];

            if let Some(&o) = self.edge_map.get(&arcs[i].opposite()) {
                self.half_edges[h].opposite = Some(o);
                self.half_edges[h].constrained = self.half_edges[o].constrained;
                self.half_edges[o].opposite = Some(h);
            }
            self.edge_map.insert(arcs[i], h);
        }

        self.faces[f].half_edge = ids[0];
        self.face_map.insert(triangle, f);
    }

    fn alloc_face(&mut self, face: Face) -> usize {
        match self.free_faces.pop() {
            Some(f) => {
                self.faces[f] = face;
                f
            }
            None => {
                self.faces.push(face);
                self.faces.len() - 1
            }
        }
    }

    fn alloc_half_edge(&mut self, he: HalfEdge) -> usize {
        match self.free_half_edges.pop() {
            Some(h) => {
                self.half_edges[h] = he;
                h
            }
            None => {
                self.half_edges.push(he);
                self.half_edges.len() - 1
            }
        }
    }

    fn mark_constrained(&mut self, h: usize) {
        self.half_edges[h].constrained = true;
        if let Some(o) = self.half_edges[h].opposite {
            self.half_edges[o].constrained = true;
        }
    }

    /// Flags the half-edge of `arc` and its opposite as constrained.
    pub fn constrain(&mut self, arc: &GreatArc) -> Result<(), TriangulationError> {
        let h = *self.edge_map.get(arc).ok_or_else(|| {
            TriangulationError::Invariant(format!("cannot constrain missing arc {arc}"))
        })?;
        self.mark_constrained(h);
        Ok(())
    }

    /// Splits `face` into three around `v`, which must lie strictly inside.
    pub fn divide_face(
        &mut self,
        face: &Triangle,
        v: Point,
    ) -> Result<Vec<Triangle>, TriangulationError> {
        let [v0, v1, v2] = *face.vertices();
        let added = vec![
            Triangle::new(v0, v1, v)?,
            Triangle::new(v1, v2, v)?,
            Triangle::new(v2, v0, v)?,
        ];
        self.commit(&added, std::slice::from_ref(face))?;
        Ok(added)
    }

    /// Splits the two faces sharing an edge into four around `v`, which must
    /// lie strictly inside that edge.
    pub fn divide_edge(
        &mut self,
        f1: &Triangle,
        f2: &Triangle,
        v: Point,
    ) -> Result<Vec<Triangle>, TriangulationError> {
        let (v1, v2) = {
            let link = self.link(f1, f2).ok_or_else(|| not_adjacent(f1, f2))?;
            (*link.vertex(), *link.end())
        };
        let v01 = self.opposed_vertex(f2, f1).ok_or_else(|| not_adjacent(f1, f2))?;
        let v02 = self.opposed_vertex(f1, f2).ok_or_else(|| not_adjacent(f1, f2))?;

        let added = vec![
            Triangle::new(v01, v, v1)?,
            Triangle::new(v01, v, v2)?,
            Triangle::new(v02, v, v1)?,
            Triangle::new(v02, v, v2)?,
        ];
        self.commit(&added, &[f1.clone(), f2.clone()])?;
        Ok(added)
    }

    /// Splits `face` in two around `v`, which must lie strictly inside one of
    /// its open-boundary edges.
    pub fn divide_border(
        &mut self,
        face: &Triangle,
        v: Point,
    ) -> Result<Vec<Triangle>, TriangulationError> {
        let i = face
            .edges()
            .iter()
            .position(|e| e.contains(&v))
            .ok_or_else(|| {
                TriangulationError::Invariant(format!("{v} is not on an edge of face {face}"))
            })?;
        let edge = face.edges()[i];
        if self.edge_map.contains_key(&edge.opposite()) {
            return Err(TriangulationError::Invariant(format!(
                "edge {edge} of face {face} is not on the boundary"
            )));
        }
        let apex = face.vertices()[(i + 2) % 3];

        let added = vec![
            Triangle::new(*edge.start(), v, apex)?,
            Triangle::new(v, *edge.end(), apex)?,
        ];
        self.commit(&added, std::slice::from_ref(face))?;
        Ok(added)
    }

    /// Flips the edge shared by `f1` and `f2`, returning the two new faces.
    pub fn swap_edge(
        &mut self,
        f1: &Triangle,
        f2: &Triangle,
    ) -> Result<[Triangle; 2], TriangulationError> {
        let v1 = self.opposed_vertex(f1, f2).ok_or_else(|| not_adjacent(f1, f2))?;
        let v2 = self.opposed_vertex(f2, f1).ok_or_else(|| not_adjacent(f1, f2))?;
        let (a, b) = {
            let link = self.link(f1, f2).ok_or_else(|| not_adjacent(f1, f2))?;
            (*link.vertex(), *link.end())
        };

        let swapped = [Triangle::new(v1, v2, a)?, Triangle::new(v1, v2, b)?];
        self.commit(&swapped, &[f1.clone(), f2.clone()])?;
        Ok(swapped)
    }
}

fn not_adjacent(f1: &Triangle, f2: &Triangle) -> TriangulationError {
    TriangulationError::Invariant(format!("faces {f1} and {f2} are not adjacent"))
}
