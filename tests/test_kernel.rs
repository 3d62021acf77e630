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

mod common;

use spherical_cdt::{
    GreatArc, Triangle, TriangulationError, TriangulationKernel, geometry::icosahedron,
    mesh::Location,
};

fn icosahedron_kernel() -> (TriangulationKernel, Vec<Triangle>) {
    let faces = icosahedron().unwrap();
    (TriangulationKernel::new(&faces).unwrap(), faces)
}

#[test]
fn test_icosahedron_kernel() {
    let (kernel, faces) = icosahedron_kernel();
    kernel.validate().unwrap();
    assert_eq!(kernel.face_count(), 20);
    assert_eq!(kernel.edge_count(), 60);
    assert_eq!(kernel.vertices().len(), 12);
    assert!(kernel.edges().all(|he| he.opposite().is_some()));
    for f in &faces {
        assert!(kernel.contains_face(f));
    }
}

#[test]
fn test_half_edge_cycles() {
    let (kernel, faces) = icosahedron_kernel();
    let [h0, h1, h2] = kernel.face_edges(&faces[3]).unwrap();
    assert_eq!(h0.next(), h1);
    assert_eq!(h1.next(), h2);
    assert_eq!(h2.next(), h0);
    assert_eq!(h0.previous(), h2);
    assert_eq!(h0.end(), h1.vertex());
    for he in [h0, h1, h2] {
        assert_eq!(he.face(), &faces[3]);
        let o = he.opposite().unwrap();
        assert_eq!(o.opposite(), Some(he));
        assert_eq!(*o.arc(), he.arc().opposite());
        assert_ne!(o.face(), he.face());
    }
}

#[test]
fn test_adjacency_queries() {
    let (kernel, faces) = icosahedron_kernel();
    let f = &faces[0];
    let v = f.vertices()[0];
    let neighbour = kernel.opposed_face(f, &v).unwrap().clone();
    assert!(!neighbour.has_vertex(&v));

    let link = kernel.link(f, &neighbour).unwrap();
    assert_eq!(link.face(), &neighbour);
    assert_eq!(link.opposite().unwrap().face(), f);

    let apex = kernel.opposed_vertex(f, &neighbour).unwrap();
    assert!(neighbour.has_vertex(&apex) && !f.has_vertex(&apex));

    // Faces not sharing an edge.
    assert!(kernel.link(&faces[0], &faces[19]).is_none());
    assert!(kernel.opposed_vertex(&faces[0], &faces[19]).is_none());
}

#[test]
fn test_locate() {
    let (kernel, faces) = icosahedron_kernel();
    let f = &faces[7];
    let v = f.vertices()[1];
    assert_eq!(kernel.locate(&v).unwrap(), Location::Vertex(v));

    let mid = f.edges()[2].mid_point();
    match kernel.locate(&mid).unwrap() {
        Location::Edge(h) => assert!(kernel.half_edge(h).unwrap().arc().contains(&mid)),
        other => panic!("expected an edge, got {other:?}"),
    }

    let c = f.centroid();
    assert_eq!(kernel.face(&c).unwrap(), Some(f));
    assert!(matches!(kernel.locate(&c).unwrap(), Location::Face(_)));
}

#[test]
fn test_divide_face() {
    let (mut kernel, faces) = icosahedron_kernel();
    let i = common::face_with(&faces, &common::malmoe());
    let added = kernel.divide_face(&faces[i], common::malmoe()).unwrap();
    assert_eq!(added.len(), 3);
    assert_eq!(kernel.face_count(), 22);
    assert!(!kernel.contains_face(&faces[i]));
    assert!(kernel.contains_vertex(&common::malmoe()));
    kernel.validate().unwrap();
}

#[test]
fn test_divide_edge() {
    let (mut kernel, faces) = icosahedron_kernel();
    let f1 = faces[0].clone();
    let f2 = kernel.opposed_face(&f1, &f1.vertices()[2]).unwrap().clone();
    let mid = f1.opposed_edge(&f1.vertices()[2]).unwrap().mid_point();

    kernel.divide_edge(&f1, &f2, mid).unwrap();
    assert_eq!(kernel.face_count(), 22);
    kernel.validate().unwrap();
}

#[test]
fn test_swap_edge() {
    let (mut kernel, faces) = icosahedron_kernel();
    let f1 = faces[5].clone();
    let f2 = kernel.opposed_face(&f1, &f1.vertices()[0]).unwrap().clone();
    let a1 = kernel.opposed_vertex(&f2, &f1).unwrap();
    let a2 = kernel.opposed_vertex(&f1, &f2).unwrap();

    let [n1, n2] = kernel.swap_edge(&f1, &f2).unwrap();
    assert_eq!(kernel.face_count(), 20);
    assert!(kernel.contains_face(&n1) && kernel.contains_face(&n2));
    let diagonal = GreatArc::new(a1, a2).unwrap();
    assert!(kernel.contains_edge(&diagonal) && kernel.contains_edge(&diagonal.opposite()));
    kernel.validate().unwrap();
}

#[test]
fn test_constrain_marks_both_half_edges() {
    let (mut kernel, faces) = icosahedron_kernel();
    let arc = faces[2].edges()[1];
    kernel.constrain(&arc).unwrap();
    assert!(kernel.half_edge_of(&arc).unwrap().is_constrained());
    assert!(kernel.half_edge_of(&arc.opposite()).unwrap().is_constrained());
    kernel.validate().unwrap();

    // Re-adding the faces on both sides keeps the constraint.
    let f1 = kernel.half_edge_of(&arc).unwrap().face().clone();
    let f2 = kernel.half_edge_of(&arc.opposite()).unwrap().face().clone();
    let batch = [f1, f2];
    kernel.commit(&batch, &batch).unwrap();
    assert!(kernel.half_edge_of(&arc).unwrap().is_constrained());
    kernel.validate().unwrap();
}

#[test]
fn test_commit_rejects_bad_batches() {
    let (mut kernel, faces) = icosahedron_kernel();

    let duplicate = kernel.commit(std::slice::from_ref(&faces[0]), &[]);
    assert!(matches!(duplicate, Err(TriangulationError::Invariant(_))));

    let foreign = Triangle::new(common::malmoe(), common::goteborg(), common::stockholm()).unwrap();
    let missing = kernel.commit(&[], std::slice::from_ref(&foreign));
    assert!(matches!(missing, Err(TriangulationError::Invariant(_))));

    let twice = kernel.commit(&[], &[faces[1].clone(), faces[1].clone()]);
    assert!(matches!(twice, Err(TriangulationError::Invariant(_))));

    assert_eq!(kernel.face_count(), 20);
    kernel.validate().unwrap();
}

#[test]
fn test_open_boundary() {
    let faces = icosahedron().unwrap();
    let mut kernel = TriangulationKernel::new(&faces[..1]).unwrap();
    kernel.validate().unwrap();
    assert!(kernel.edges().all(|he| he.opposite().is_none()));
    assert_eq!(kernel.locate(&common::perth()).unwrap(), Location::Outside);

    let face = faces[0].clone();
    let mid = face.edges()[0].mid_point();
    kernel.divide_border(&face, mid).unwrap();
    assert_eq!(kernel.face_count(), 2);
    kernel.validate().unwrap();
}

#[test]
fn test_divide_border_rejects_interior_edge() {
    let (mut kernel, faces) = icosahedron_kernel();
    let mid = faces[0].edges()[0].mid_point();
    assert!(kernel.divide_border(&faces[0], mid).is_err());
    assert_eq!(kernel.face_count(), 20);
}
