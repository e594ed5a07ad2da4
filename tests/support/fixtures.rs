#![allow(dead_code)]

use glam::{DVec2, DVec3};
use planeclip::{Polygon, Polyhedron};
use rand::Rng;
use std::f64::consts::PI;

/// Unit cube with neighbor rings counter-clockwise from outside.
pub fn unit_cube() -> Polyhedron {
    let positions = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(1.0, 0.0, 1.0),
        DVec3::new(1.0, 1.0, 1.0),
        DVec3::new(0.0, 1.0, 1.0),
    ];
    Polyhedron::new(&positions, &cube_rings())
}

pub fn cube_rings() -> Vec<Vec<usize>> {
    vec![
        vec![1, 4, 3],
        vec![5, 0, 2],
        vec![3, 6, 1],
        vec![7, 2, 0],
        vec![5, 7, 0],
        vec![1, 6, 4],
        vec![5, 2, 7],
        vec![4, 6, 3],
    ]
}

/// Non-convex 4×2×1 block with a triangular notch cut into one long side.
/// Volume 7.
pub fn notched_block() -> Polyhedron {
    let footprint = [
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 2.0),
        (3.0, 2.0),
        (2.0, 1.0),
        (1.0, 2.0),
        (0.0, 2.0),
    ];
    let mut positions = Vec::with_capacity(14);
    for &(x, y) in &footprint {
        positions.push(DVec3::new(x, y, 0.0));
    }
    for &(x, y) in &footprint {
        positions.push(DVec3::new(x, y, 1.0));
    }
    let neighbors = vec![
        vec![7, 6, 1],
        vec![0, 2, 8],
        vec![1, 3, 9],
        vec![4, 10, 2],
        vec![5, 11, 3],
        vec![6, 12, 4],
        vec![13, 5, 0],
        vec![8, 13, 0],
        vec![1, 9, 7],
        vec![2, 10, 8],
        vec![9, 3, 11],
        vec![10, 4, 12],
        vec![11, 5, 13],
        vec![7, 12, 6],
    ];
    Polyhedron::new(&positions, &neighbors)
}

/// Unit cube with its top face squeezed into one point: a square pyramid
/// described with four coincident apex vertices. Volume 1/3.
pub fn degenerate_cube() -> Polyhedron {
    let apex = DVec3::new(0.0, 0.0, 1.0);
    let positions = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        apex,
        apex,
        apex,
        apex,
    ];
    Polyhedron::new(&positions, &cube_rings())
}

/// 10-unit cube with vertices 2, 3, 6, and 7 squeezed into the
/// `(10, 10, 0)` corner, collapsing the y = 10 face: a square pyramid over
/// the y = 0 face, described with eight vertices. Volume 1000/3.
pub fn degenerate_cube_corner() -> Polyhedron {
    let corner = DVec3::new(10.0, 10.0, 0.0);
    let positions = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(10.0, 0.0, 0.0),
        corner,
        corner,
        DVec3::new(0.0, 0.0, 10.0),
        DVec3::new(10.0, 0.0, 10.0),
        corner,
        corner,
    ];
    Polyhedron::new(&positions, &cube_rings())
}

/// Unit square, counter-clockwise.
pub fn unit_square() -> Polygon {
    let positions = [
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(0.0, 1.0),
    ];
    let neighbors = [[3, 1], [0, 2], [1, 3], [2, 0]];
    Polygon::new(&positions, &neighbors)
}

/// Non-convex 4×2 rectangle with a triangular notch in its top edge.
/// Area 7.
pub fn notched_rectangle() -> Polygon {
    let positions = [
        DVec2::new(0.0, 0.0),
        DVec2::new(4.0, 0.0),
        DVec2::new(4.0, 2.0),
        DVec2::new(3.0, 2.0),
        DVec2::new(2.0, 1.0),
        DVec2::new(1.0, 2.0),
        DVec2::new(0.0, 2.0),
    ];
    let neighbors = [[6, 1], [0, 2], [1, 3], [2, 4], [3, 5], [4, 6], [5, 0]];
    Polygon::new(&positions, &neighbors)
}

/// Uniformly distributed unit vector.
pub fn random_unit_vector3<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    let z: f64 = rng.random_range(-1.0..1.0);
    let theta: f64 = rng.random_range(0.0..2.0 * PI);
    let r = (1.0 - z * z).sqrt();
    DVec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Uniformly distributed unit vector in the plane.
pub fn random_unit_vector2<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
    let theta: f64 = rng.random_range(0.0..2.0 * PI);
    DVec2::new(theta.cos(), theta.sin())
}

/// Random point in the axis-aligned box spanned by `min` and `max`.
pub fn random_point_in<R: Rng + ?Sized>(rng: &mut R, min: DVec3, max: DVec3) -> DVec3 {
    DVec3::new(
        rng.random_range(min.x..max.x),
        rng.random_range(min.y..max.y),
        rng.random_range(min.z..max.z),
    )
}

/// Random point in the axis-aligned rectangle spanned by `min` and `max`.
pub fn random_point_in2<R: Rng + ?Sized>(rng: &mut R, min: DVec2, max: DVec2) -> DVec2 {
    DVec2::new(
        rng.random_range(min.x..max.x),
        rng.random_range(min.y..max.y),
    )
}
