// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Test meshes with controlled edge hardness

use super::polymesh::PolyMesh;
use super::topology::{face_pair, get_edge_to_faces};
use nalgebra::Point3;
use rand::Rng;

/// Build an `x` by `y` grid of quads between two corners.
///
/// Faces are numbered row by row from the top-left corner. Each interior
/// edge is smooth when `pattern(face_a, face_b, x, y)` returns true, with
/// `face_a < face_b`; boundary edges stay smooth.
///
/// # Panics
///
/// If `x` or `y` is zero.
pub fn plane<F>(
    top_left: Point3<f64>,
    bottom_right: Point3<f64>,
    x: u32,
    y: u32,
    pattern: F,
) -> PolyMesh
where
    F: Fn(u32, u32, u32, u32) -> bool,
{
    assert!(x > 0 && y > 0, "plane needs at least one quad per side");

    let x_step = (bottom_right.x - top_left.x) / x as f64;
    let y_step = (top_left.y - bottom_right.y) / y as f64;

    let mut positions = Vec::with_capacity(((x + 1) * (y + 1)) as usize);
    for i in 0..=y {
        let height = top_left.y - i as f64 * y_step;
        for j in 0..=x {
            positions.push(Point3::new(top_left.x + j as f64 * x_step, height, top_left.z));
        }
    }

    let mut faces = Vec::with_capacity((x * y) as usize);
    for i in 0..y {
        let row = i * (x + 1);
        let next_row = (i + 1) * (x + 1);
        for j in 0..x {
            faces.push(vec![j + row, j + row + 1, j + next_row + 1, j + next_row]);
        }
    }

    let mut mesh = PolyMesh::new(positions, faces);
    let edge_to_faces = get_edge_to_faces(&mesh);
    for (edge, faces) in mesh.edges.iter_mut().zip(&edge_to_faces) {
        if let Some((a, b)) = face_pair(faces) {
            edge.smooth = pattern(a, b, x, y);
        }
    }

    mesh
}

/// Cube of six quads with every edge smooth except `edge`.
///
/// # Panics
///
/// If `edge` is not below 12.
pub fn cube_with_hard_edge(edge: usize) -> PolyMesh {
    let positions = vec![
        Point3::new(-1.0, -1.0, -1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(1.0, -1.0, 1.0),
        Point3::new(-1.0, -1.0, 1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(-1.0, 1.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(1.0, 1.0, -1.0),
    ];
    let faces = vec![
        vec![0, 1, 2, 3],
        vec![4, 5, 6, 7],
        vec![3, 2, 6, 5],
        vec![0, 3, 5, 4],
        vec![0, 4, 7, 1],
        vec![1, 7, 6, 2],
    ];

    let mut mesh = PolyMesh::new(positions, faces);
    mesh.set_edge_smooth(edge, false);
    mesh
}

/// Make each edge hard with probability `fraction_hard`
pub fn randomize_hardness<R: Rng + ?Sized>(mesh: &mut PolyMesh, fraction_hard: f32, rng: &mut R) {
    for edge in &mut mesh.edges {
        edge.smooth = rng.gen::<f32>() >= fraction_hard;
    }
}

/// Murmur3 32-bit finalizer
#[inline]
pub fn mix_hash(mut a: u32) -> u32 {
    a ^= a >> 16;
    a = a.wrapping_mul(0x85eb_ca6b);
    a ^= a >> 13;
    a = a.wrapping_mul(0xc2b2_ae35);
    a ^= a >> 16;
    a
}

/// Deterministic hardness: edge `i` is hard when `mix_hash(i) % 100` falls
/// below `fraction_hard` as a percentage
pub fn hash_hardness(mesh: &mut PolyMesh, fraction_hard: f32) {
    let percentage = (fraction_hard.clamp(0.0, 1.0) * 100.0) as u32;
    for (index, edge) in mesh.edges.iter_mut().enumerate() {
        edge.smooth = mix_hash(index as u32) % 100 >= percentage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_plane_layout() {
        let mesh = plane(
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            3,
            2,
            |_, _, _, _| true,
        );

        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 6);
        // 3 * 3 horizontal + 4 * 2 vertical
        assert_eq!(mesh.edge_count(), 17);
        assert_relative_eq!(mesh.positions[11].x, 3.0);
        assert_relative_eq!(mesh.positions[11].y, 0.0);
        assert_eq!(mesh.faces[4], vec![5, 6, 10, 9]);
    }

    #[test]
    fn test_plane_pattern_sees_neighbours() {
        // Hard between columns 0 and 1
        let mesh = plane(
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            2,
            1,
            |a, b, x, _| {
                assert!(a < b);
                !(a % x == 0 && b % x == 1)
            },
        );
        let hard: Vec<_> = mesh.edges.iter().filter(|edge| !edge.smooth).collect();
        assert_eq!(hard.len(), 1);
        assert_eq!(hard[0].vertices, [1, 4]);
    }

    #[test]
    fn test_cube() {
        let cube = cube_with_hard_edge(5);
        assert_eq!(cube.face_count(), 6);
        assert_eq!(cube.edge_count(), 12);
        assert_eq!(cube.edges.iter().filter(|edge| !edge.smooth).count(), 1);
        assert!(!cube.edges[5].smooth);
    }

    #[test]
    fn test_randomize_hardness_extremes() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut cube = cube_with_hard_edge(0);

        randomize_hardness(&mut cube, 0.0, &mut rng);
        assert!(cube.edges.iter().all(|edge| edge.smooth));

        randomize_hardness(&mut cube, 1.0, &mut rng);
        assert!(cube.edges.iter().all(|edge| !edge.smooth));
    }

    #[test]
    fn test_hash_hardness_is_deterministic() {
        let mut first = cube_with_hard_edge(0);
        let mut second = cube_with_hard_edge(7);
        hash_hardness(&mut first, 0.4);
        hash_hardness(&mut second, 0.4);
        assert_eq!(first.edges, second.edges);

        hash_hardness(&mut first, 0.0);
        assert!(first.edges.iter().all(|edge| edge.smooth));
    }

    #[test]
    fn test_mix_hash() {
        assert_eq!(mix_hash(0), 0);
        assert_ne!(mix_hash(1), mix_hash(2));
    }
}
