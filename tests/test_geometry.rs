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

use ahash::AHashSet;
use spherical_cdt::{
    GeometryError, GreatArc, Point, Triangle,
    geometry::{icosahedron, to_cartesian, to_geodetic},
    kernel::Orientation,
};

#[test]
fn test_left_of_orientation() {
    let a = to_cartesian(0.0, 0.0);
    let b = to_cartesian(0.0, 90.0);
    let north = to_cartesian(45.0, 45.0);
    let south = to_cartesian(-45.0, 45.0);
    assert_eq!(north.left_of(&a, &b), Orientation::Left);
    assert_eq!(south.left_of(&a, &b), Orientation::Right);
    assert_eq!(north.is_left_of(&a, &b), Ok(true));
    assert_eq!(south.is_left_of(&a, &b), Ok(false));
}

#[test]
fn test_left_of_collinear_midpoint_fails() {
    let arc = GreatArc::new(common::malmoe(), common::melbourne()).unwrap();
    let mid = arc.mid_point();
    assert_eq!(mid.left_of(arc.start(), arc.end()), Orientation::Collinear);
    assert!(matches!(
        mid.is_left_of(arc.start(), arc.end()),
        Err(GeometryError::Collinear { .. })
    ));
}

#[test]
fn test_great_arc_rejects_degenerate_end_points() {
    let p = common::perth();
    assert!(matches!(
        GreatArc::new(p, p),
        Err(GeometryError::IdenticalEndPoints { .. })
    ));
    assert!(matches!(
        GreatArc::new(p, p.antipode()),
        Err(GeometryError::AntipodalEndPoints { .. })
    ));
}

#[test]
fn test_great_arc_is_directional() {
    let ab = GreatArc::new(common::malmoe(), common::kalmar()).unwrap();
    let ba = ab.opposite();
    assert_ne!(ab, ba);
    assert_eq!(ba.opposite(), ab);
    assert_eq!(ba.start(), ab.end());
}

#[test]
fn test_great_arc_crossing() {
    let a = GreatArc::new(to_cartesian(10.0, 0.0), to_cartesian(-10.0, 0.0)).unwrap();
    let b = GreatArc::new(to_cartesian(0.0, -10.0), to_cartesian(0.0, 10.0)).unwrap();
    let x = a.intersection(&b, false).unwrap();
    assert_eq!(x, Point::new(1.0, 0.0, 0.0));
    assert!(a.contains(&x));
    assert!(b.contains(&x));
}

#[test]
fn test_great_arc_disjoint() {
    let a = GreatArc::new(to_cartesian(10.0, 0.0), to_cartesian(20.0, 0.0)).unwrap();
    let b = GreatArc::new(to_cartesian(0.0, -10.0), to_cartesian(0.0, 10.0)).unwrap();
    assert_eq!(a.intersection(&b, true), None);
    assert!(!a.intersects(&b, true));
}

#[test]
fn test_triangle_canonical_order() {
    let (a, b, c) = (common::malmoe(), common::goteborg(), common::stockholm());
    let t1 = Triangle::new(a, b, c).unwrap();
    let t2 = Triangle::new(c, b, a).unwrap();
    let t3 = Triangle::new(b, c, a).unwrap();
    assert_eq!(t1, t2);
    assert_eq!(t1, t3);

    let [v0, v1, v2] = t1.vertices();
    assert_eq!(v0.left_of(v1, v2), Orientation::Left);

    let set: AHashSet<Triangle> = [t1, t2, t3].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_triangle_circumcircle() {
    let t = Triangle::new(common::malmoe(), common::goteborg(), common::stockholm()).unwrap();
    for v in t.vertices() {
        assert!((v.distance(t.circumcenter()) - t.circumradius()).abs() < 1e-9);
        assert!(t.circumcircle_contains(v));
    }
    assert!(t.circumcircle_contains(&t.centroid()));
    assert!(!t.circumcircle_contains(&common::perth()));
}

#[test]
fn test_triangle_contains() {
    let t = Triangle::new(common::malmoe(), common::goteborg(), common::stockholm()).unwrap();
    assert_eq!(t.contains(&t.centroid()), Ok(true));
    assert_eq!(t.contains(&common::malmoe()), Ok(false));
    assert_eq!(t.contains(&common::darwin()), Ok(false));

    let mid = t.edges()[0].mid_point();
    assert!(matches!(t.contains(&mid), Err(GeometryError::Collinear { .. })));
}

#[test]
fn test_triangle_opposed_edge() {
    let t = Triangle::new(common::malmoe(), common::goteborg(), common::stockholm()).unwrap();
    for v in t.vertices() {
        let e = t.opposed_edge(v).unwrap();
        assert!(e.start() != v && e.end() != v);
    }
    assert!(matches!(
        t.opposed_edge(&common::kalmar()),
        Err(GeometryError::NotAVertex { .. })
    ));
}

#[test]
fn test_icosahedron_covers_sphere() {
    let faces = icosahedron().unwrap();
    assert_eq!(faces.len(), 20);

    let vertices: AHashSet<Point> = faces.iter().flat_map(|f| *f.vertices()).collect();
    assert_eq!(vertices.len(), 12);

    let arcs: AHashSet<GreatArc> = faces.iter().flat_map(|f| *f.edges()).collect();
    assert_eq!(arcs.len(), 60);
    for arc in &arcs {
        assert!(arcs.contains(&arc.opposite()));
    }

    for city in [common::malmoe(), common::perth(), common::darwin()] {
        let inside = faces.iter().filter(|f| f.contains(&city) == Ok(true)).count();
        assert_eq!(inside, 1);
    }
}

#[test]
fn test_geodetic_round_trip() {
    let (lat, lon) = to_geodetic(&common::melbourne());
    assert!((lat + 37.813611).abs() < 1e-9);
    assert!((lon - 144.963056).abs() < 1e-9);
}
