#![allow(dead_code)]

use spherical_cdt::{Point, Triangle, TriangulationKernel, geometry::to_cartesian};

pub fn malmoe() -> Point {
    to_cartesian(55.583333, 13.033333)
}

pub fn goteborg() -> Point {
    to_cartesian(57.7, 11.966667)
}

pub fn stockholm() -> Point {
    to_cartesian(59.35, 18.066667)
}

pub fn kalmar() -> Point {
    to_cartesian(56.666667, 16.366667)
}

pub fn perth() -> Point {
    to_cartesian(-31.952222, 115.858889)
}

pub fn darwin() -> Point {
    to_cartesian(-12.45, 130.833333)
}

pub fn melbourne() -> Point {
    to_cartesian(-37.813611, 144.963056)
}

/// Counts (face, neighbour) pairs across unconstrained edges where the
/// neighbour's far vertex lies strictly inside the face's circumcircle.
pub fn delaunay_violations(kernel: &TriangulationKernel) -> usize {
    let mut bad = 0;
    for face in kernel.faces() {
        let Some(edges) = kernel.face_edges(face) else {
            continue;
        };
        for he in edges {
            if he.is_constrained() {
                continue;
            }
            let Some(o) = he.opposite() else {
                continue;
            };
            let far = o.previous().vertex();
            if far.distance(face.circumcenter()) < face.circumradius() - 1e-9 {
                bad += 1;
            }
        }
    }
    bad
}

pub fn constrained_half_edges(kernel: &TriangulationKernel) -> usize {
    kernel.edges().filter(|he| he.is_constrained()).count()
}

/// Euler's formula for a closed triangulation of the sphere: `F = 2V - 4`.
pub fn is_closed_triangulation(kernel: &TriangulationKernel) -> bool {
    kernel.face_count() + 4 == 2 * kernel.vertices().len()
}

pub fn face_with(faces: &[Triangle], p: &Point) -> usize {
    faces
        .iter()
        .position(|f| f.contains(p).unwrap_or(false))
        .unwrap()
}
