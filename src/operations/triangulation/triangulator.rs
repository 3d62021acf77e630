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
    error::TriangulationError,
    geometry::{great_arc::GreatArc, point::Point, triangle::Triangle},
    kernel::orientation::Orientation,
    mesh::{HalfEdgeRef, Location, TriangulationKernel},
    operations::triangulation::pseudo_polygon::triangulate_pseudo_polygon,
};

#[derive(Debug, Clone)]
pub struct TriangulatorOptions {
    /// Upper bound on edge flips during the legalization that follows one
    /// point insertion. Exceeding it aborts the operation.
    pub max_flips: usize,
}

impl Default for TriangulatorOptions {
    fn default() -> Self {
        Self { max_flips: 65_536 }
    }
}

/// Incremental constrained Delaunay triangulation over a
/// [`TriangulationKernel`].
///
/// Every public mutating call is all-or-nothing: when it fails, the mesh is
/// left exactly as it was before the call.
#[derive(Debug, Clone)]
pub struct Triangulator {
    kernel: TriangulationKernel,
    options: TriangulatorOptions,
}

/// Faces crossed by a new constrained edge and the two vertex chains left on
/// either side of it once they are removed.
struct Cavity {
    left: Vec<Point>,
    right: Vec<Point>,
    removed: Vec<Triangle>,
    /// Vertices whose whole fan was crossed; re-inserted afterwards.
    enclosed: Vec<Point>,
}

enum Trace {
    Cavity(Cavity),
    /// The edge runs exactly through this vertex.
    Through(Point),
}

impl Triangulator {
    pub fn new(boundaries: &[Triangle]) -> Result<Self, TriangulationError> {
        Self::with_options(boundaries, TriangulatorOptions::default())
    }

    pub fn with_options(
        boundaries: &[Triangle],
        options: TriangulatorOptions,
    ) -> Result<Self, TriangulationError> {
        Ok(Self {
            kernel: TriangulationKernel::new(boundaries)?,
            options,
        })
    }

    pub fn kernel(&self) -> &TriangulationKernel {
        &self.kernel
    }

    pub fn options(&self) -> &TriangulatorOptions {
        &self.options
    }

    pub fn faces(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.kernel.faces()
    }

    pub fn edges(&self) -> impl Iterator<Item = HalfEdgeRef<'_>> + '_ {
        self.kernel.edges()
    }

    pub fn face_count(&self) -> usize {
        self.kernel.face_count()
    }

    /// Inserts `p` as a new vertex and restores the Delaunay property around
    /// it. A point equal to an existing vertex is ignored.
    pub fn add_point(&mut self, p: Point) -> Result<(), TriangulationError> {
        self.transaction("add_point", |t| t.insert_point(p))
    }

    /// Makes `arc` an edge of the mesh that no later flip may remove. Both end
    /// points must already be vertices.
    pub fn add_constrained_edge(&mut self, arc: &GreatArc) -> Result<(), TriangulationError> {
        self.transaction("add_constrained_edge", |t| {
            t.insert_constrained_edge(arc.start(), arc.end())
        })
    }

    /// Inserts a chain of vertices joined by constrained edges. A chain of
    /// more than two vertices is closed back to its first vertex unless it
    /// already ends there. `name` only labels log output.
    pub fn add_constraint(
        &mut self,
        name: &str,
        vertices: &[Point],
    ) -> Result<(), TriangulationError> {
        self.transaction("add_constraint", |t| {
            for p in vertices {
                t.insert_point(*p)?;
            }
            for pair in vertices.windows(2) {
                t.insert_constrained_edge(&pair[0], &pair[1])?;
            }
            if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
                if vertices.len() > 2 && first != last {
                    t.insert_constrained_edge(last, first)?;
                }
            }
            log::debug!(
                "constraint '{name}' added ({} vertices), {} faces",
                vertices.len(),
                t.kernel.face_count()
            );
            Ok(())
        })
    }

    /// Runs `levels` rounds of uniform refinement. Each round snapshots the
    /// current faces and inserts one new vertex per face: its circumcenter, or
    /// its centroid when the circumcenter is already a vertex, lies on a
    /// constrained edge, falls outside an open mesh or cannot be located
    /// unambiguously. Every round therefore triples the face count.
    pub fn tessellate(&mut self, levels: usize) -> Result<(), TriangulationError> {
        self.transaction("tessellate", |t| {
            for level in 0..levels {
                t.tessellate_once()?;
                log::debug!(
                    "tessellation level {}: {} faces",
                    level + 1,
                    t.kernel.face_count()
                );
            }
            Ok(())
        })
    }

    fn transaction<F>(&mut self, op: &str, f: F) -> Result<(), TriangulationError>
    where
        F: FnOnce(&mut Self) -> Result<(), TriangulationError>,
    {
        let snapshot = self.kernel.clone();
        f(self).inspect_err(|e| {
            log::warn!("{op} failed, mesh rolled back: {e}");
            self.kernel = snapshot;
        })
    }

    fn tessellate_once(&mut self) -> Result<(), TriangulationError> {
        let targets: Vec<(Point, Point)> = self
            .kernel
            .faces()
            .map(|f| (*f.circumcenter(), f.centroid()))
            .collect();

        for (circumcenter, centroid) in targets {
            let usable = match self.kernel.locate(&circumcenter) {
                Ok(Location::Face(_)) => true,
                Ok(Location::Edge(h)) => self
                    .kernel
                    .half_edge(h)
                    .is_some_and(|he| !he.is_constrained()),
                // Collinear with an edge line but on no edge of the mesh.
                Ok(Location::Vertex(_) | Location::Outside) | Err(_) => false,
            };
            self.insert_point(if usable { circumcenter } else { centroid })?;
        }
        Ok(())
    }

    fn insert_point(&mut self, p: Point) -> Result<(), TriangulationError> {
        let divided = match self.kernel.locate(&p)? {
            Location::Vertex(_) => return Ok(()),
            Location::Edge(h) => {
                let (face, neighbour) = {
                    let he = self.kernel.half_edge(h).ok_or_else(|| {
                        TriangulationError::Invariant(format!("half-edge {h} vanished"))
                    })?;
                    if he.is_constrained() {
                        return Err(TriangulationError::ConstrainedEdge {
                            start: *he.vertex(),
                            end: *he.end(),
                        });
                    }
                    (he.face().clone(), he.opposite().map(|o| o.face().clone()))
                };
                match neighbour {
                    Some(other) => self.kernel.divide_edge(&face, &other, p)?,
                    None => self.kernel.divide_border(&face, p)?,
                }
            }
            Location::Face(f) => {
                let face = self.kernel.faces[f].triangle.clone();
                self.kernel.divide_face(&face, p)?
            }
            Location::Outside => return Err(TriangulationError::FaceNotFound { point: p }),
        };

        let flips = self.legalize(&p, divided)?;
        log::trace!("inserted {p} ({flips} flips)");
        Ok(())
    }

    /// Lawson flips around the freshly inserted vertex `v`. Returns the
    /// number of flips performed.
    fn legalize(&mut self, v: &Point, faces: Vec<Triangle>) -> Result<usize, TriangulationError> {
        let mut stack = faces;
        let mut flips = 0;

        while let Some(f) = stack.pop() {
            let Some(neighbour) = self.kernel.opposed_face(&f, v).cloned() else {
                continue;
            };
            let constrained = self
                .kernel
                .link(&f, &neighbour)
                .map(|l| l.is_constrained())
                .ok_or_else(|| {
                    TriangulationError::Invariant(format!("{f} and {neighbour} are not linked"))
                })?;
            if constrained || !neighbour.circumcircle_contains(v) {
                continue;
            }

            flips += 1;
            if flips > self.options.max_flips {
                return Err(TriangulationError::Invariant(format!(
                    "legalization around {v} exceeded {} flips",
                    self.options.max_flips
                )));
            }
            let [a, b] = self.kernel.swap_edge(&f, &neighbour)?;
            stack.push(a);
            stack.push(b);
        }
        Ok(flips)
    }

    fn insert_constrained_edge(
        &mut self,
        start: &Point,
        end: &Point,
    ) -> Result<(), TriangulationError> {
        let a = self
            .kernel
            .vertex(start)
            .ok_or(TriangulationError::VertexNotFound { point: *start })?;
        let b = self
            .kernel
            .vertex(end)
            .ok_or(TriangulationError::VertexNotFound { point: *end })?;
        let arc = GreatArc::new(a, b)?;

        if self.kernel.contains_edge(&arc) {
            return self.kernel.constrain(&arc);
        }
        if self.kernel.contains_edge(&arc.opposite()) {
            return self.kernel.constrain(&arc.opposite());
        }

        match self.trace_cavity(&arc)? {
            Trace::Through(w) => {
                log::trace!("constrained edge {arc} split at {w}");
                self.insert_constrained_edge(&a, &w)?;
                self.insert_constrained_edge(&w, &b)
            }
            Trace::Cavity(cavity) => {
                let mut added = Vec::with_capacity(cavity.removed.len());
                triangulate_pseudo_polygon(&cavity.right, &a, &b, &mut added)?;
                triangulate_pseudo_polygon(&cavity.left, &a, &b, &mut added)?;
                self.kernel.commit(&added, &cavity.removed)?;
                self.kernel.constrain(&arc)?;
                log::trace!(
                    "constrained edge {arc} replaced {} faces",
                    cavity.removed.len()
                );

                for p in cavity.enclosed {
                    self.insert_point(p)?;
                }
                Ok(())
            }
        }
    }

    /// Walks from `arc.start()` to `arc.end()` face by face, collecting the
    /// faces the arc crosses and the vertices on each side of it.
    fn trace_cavity(&self, arc: &GreatArc) -> Result<Trace, TriangulationError> {
        let (a, b) = (*arc.start(), *arc.end());
        if let Some(w) = self.kernel.fan_vertex_on(arc)? {
            return Ok(Trace::Through(w));
        }

        let mut face = self
            .kernel
            .intersecting_face(arc)?
            .cloned()
            .ok_or(TriangulationError::FaceNotFound { point: a })?;
        let mut pivot = a;
        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut removed = Vec::new();
        let limit = self.kernel.face_count();

        while !face.has_vertex(&b) {
            if removed.len() > limit {
                return Err(TriangulationError::Invariant(format!(
                    "walk along {arc} does not terminate"
                )));
            }
            let next = self
                .kernel
                .opposed_face(&face, &pivot)
                .cloned()
                .ok_or(TriangulationError::FaceNotFound { point: b })?;

            let (s, e) = {
                let link = self
                    .kernel
                    .link(&face, &next)
                    .ok_or_else(|| {
                        TriangulationError::Invariant(format!("{face} and {next} are not linked"))
                    })?;
                if link.is_constrained() {
                    return Err(TriangulationError::ConstrainedEdge {
                        start: *link.vertex(),
                        end: *link.end(),
                    });
                }
                (*link.vertex(), *link.end())
            };

            let (l, r) = match (s.left_of(&a, &b), e.left_of(&a, &b)) {
                (Orientation::Collinear, _) => return through(arc, s),
                (_, Orientation::Collinear) => return through(arc, e),
                (Orientation::Left, Orientation::Right) => (s, e),
                (Orientation::Right, Orientation::Left) => (e, s),
                _ => {
                    return Err(TriangulationError::Invariant(format!(
                        "edge {s} -> {e} does not cross {arc}"
                    )));
                }
            };

            if !next.has_vertex(&b) {
                let apex = self
                    .kernel
                    .opposed_vertex(&face, &next)
                    .ok_or_else(|| {
                        TriangulationError::Invariant(format!("{face} and {next} are not adjacent"))
                    })?;
                pivot = match apex.left_of(&a, &b) {
                    Orientation::Left => l,
                    Orientation::Right => r,
                    Orientation::Collinear => return through(arc, apex),
                };
            }

            left.push(l);
            right.push(r);
            removed.push(face);
            face = next;
        }
        removed.push(face);

        self.check_enclosed_edges(&removed)?;
        let (left, mut enclosed) = strip_pockets(left);
        let (right, more) = strip_pockets(right);
        enclosed.extend(more);

        Ok(Trace::Cavity(Cavity {
            left,
            right,
            removed,
            enclosed,
        }))
    }

    /// A constrained edge with removed faces on both sides would vanish with
    /// the cavity. Crossed edges are already checked during the walk; this
    /// catches the spokes of enclosed vertices.
    fn check_enclosed_edges(&self, removed: &[Triangle]) -> Result<(), TriangulationError> {
        for face in removed {
            let Some(edges) = self.kernel.face_edges(face) else {
                continue;
            };
            for he in edges {
                let inner = he
                    .opposite()
                    .is_some_and(|o| removed.contains(o.face()));
                if inner && he.is_constrained() {
                    return Err(TriangulationError::ConstrainedEdge {
                        start: *he.vertex(),
                        end: *he.end(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn through(arc: &GreatArc, w: Point) -> Result<Trace, TriangulationError> {
    if arc.contains(&w) {
        Ok(Trace::Through(w))
    } else {
        Err(TriangulationError::Invariant(format!(
            "{w} is collinear with {arc} but outside it"
        )))
    }
}

/// Collapses repeated visits in a side chain. Consecutive repeats are
/// dropped; a vertex seen again later closes a pocket, whose inner vertices
/// lose every incident face to the cavity and are returned separately.
fn strip_pockets(chain: Vec<Point>) -> (Vec<Point>, Vec<Point>) {
    let mut out: Vec<Point> = Vec::with_capacity(chain.len());
    let mut enclosed = Vec::new();
    for p in chain {
        if out.last() == Some(&p) {
            continue;
        }
        match out.iter().position(|q| *q == p) {
            Some(i) => enclosed.extend(out.drain(i + 1..)),
            None => out.push(p),
        }
    }
    enclosed.retain(|p| !out.contains(p));
    (out, enclosed)
}
