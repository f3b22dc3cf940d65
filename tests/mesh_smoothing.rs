// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Smoothing group encoding of whole meshes

use nalgebra::Point3;
use polyframe_smoothing::mesh::generate::{cube_with_hard_edge, plane, randomize_hardness};
use polyframe_smoothing::mesh::{
    create_smoothing_groups, non_manifold_edge_count, verify_smoothing_groups, EncodingSource,
    PolyMesh,
};
use polyframe_smoothing::{SmoothingConfig, SmoothingError};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// 4x4 quads with hard edges along the middle row and column lines
fn quartered_plane() -> PolyMesh {
    plane(Point3::new(0.0, 4.0, 0.0), Point3::new(4.0, 0.0, 0.0), 4, 4, |a, b, x, _| {
        (a % x < 2) == (b % x < 2) && (a / x < 2) == (b / x < 2)
    })
}

#[test]
fn test_cube_with_each_hard_edge() {
    let config = SmoothingConfig::default();
    for edge in 0..12 {
        let cube = cube_with_hard_edge(edge);
        let groups = create_smoothing_groups(&cube, &[], &config).unwrap();

        assert_eq!(groups.source, EncodingSource::Computed);
        assert_eq!(groups.flags.len(), 6);
        assert!(
            verify_smoothing_groups(&cube, &groups.flags).unwrap().is_empty(),
            "hard edge {}: {:?}",
            edge,
            groups.flags
        );
    }
}

#[test]
fn test_crosstalk_correction_separates_diagonal_quadrants() {
    let mesh = quartered_plane();

    let corrected = create_smoothing_groups(&mesh, &[], &SmoothingConfig::default()).unwrap();
    assert!(verify_smoothing_groups(&mesh, &corrected.flags).unwrap().is_empty());

    // Faces 5, 6, 9 and 10 meet at the centre vertex
    let flags = &corrected.flags;
    assert_eq!(flags[5] & flags[10], 0);
    assert_eq!(flags[6] & flags[9], 0);
    assert_eq!(flags[5] & flags[6], 0);
    assert_eq!(flags[5] & flags[9], 0);

    // Every quadrant is one smooth patch
    for quadrant in [[0, 1, 4, 5], [2, 3, 6, 7], [8, 9, 12, 13], [10, 11, 14, 15]] {
        assert!(quadrant.iter().all(|&face| flags[face] == flags[quadrant[0]]));
    }
}

#[test]
fn test_without_correction_diagonals_may_share() {
    let mesh = quartered_plane();
    let raw = create_smoothing_groups(&mesh, &[], &SmoothingConfig::raw()).unwrap();

    // Edge constraints still hold, only the vertex-only neighbours overlap
    assert!(verify_smoothing_groups(&mesh, &raw.flags).unwrap().is_empty());
    let flags = &raw.flags;
    assert!(flags[5] & flags[10] != 0 || flags[6] & flags[9] != 0);
}

#[test]
fn test_valid_previous_encoding_is_reused() {
    let cube = cube_with_hard_edge(3);
    let config = SmoothingConfig::default();

    let first = create_smoothing_groups(&cube, &[], &config).unwrap();
    let second = create_smoothing_groups(&cube, &first.flags, &config).unwrap();
    assert_eq!(second.source, EncodingSource::Reused);
    assert_eq!(second.flags, first.flags);

    // A hint of the wrong length is ignored
    let third = create_smoothing_groups(&cube, &first.flags[..5], &config).unwrap();
    assert_eq!(third.source, EncodingSource::Computed);

    let no_reuse = SmoothingConfig {
        reuse_previous_encoding: false,
        ..SmoothingConfig::default()
    };
    let fourth = create_smoothing_groups(&cube, &first.flags, &no_reuse).unwrap();
    assert_eq!(fourth.source, EncodingSource::Computed);
}

#[test]
fn test_uniform_meshes_take_the_shortcut() {
    let mut cube = cube_with_hard_edge(0);
    let config = SmoothingConfig::default();

    cube.set_all_smooth(true);
    let smooth = create_smoothing_groups(&cube, &[], &config).unwrap();
    assert_eq!(smooth.source, EncodingSource::Constant);
    assert_eq!(smooth.flags, vec![1; 6]);

    cube.set_all_smooth(false);
    let hard = create_smoothing_groups(&cube, &[], &config).unwrap();
    assert_eq!(hard.source, EncodingSource::Constant);
    assert_eq!(hard.flags, vec![0; 6]);

    // Colouring agrees with the shortcut
    let coloured = create_smoothing_groups(&cube, &[], &SmoothingConfig::raw()).unwrap();
    assert_eq!(coloured.flags, vec![0; 6]);
}

#[test]
fn test_faces_without_smooth_edges_get_no_flag() {
    // Two quads split by a hard edge, plus a loose triangle
    let positions = (0..9).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
    let faces = vec![vec![0, 1, 4, 3], vec![1, 2, 5, 4], vec![6, 7, 8]];
    let mut mesh = PolyMesh::new(positions, faces);
    assert!(mesh.set_edge_smooth_between(1, 4, false));

    let groups = create_smoothing_groups(&mesh, &[], &SmoothingConfig::default()).unwrap();
    assert_eq!(groups.flags, vec![0, 0, 0]);
}

#[test]
fn test_empty_mesh() {
    let groups =
        create_smoothing_groups(&PolyMesh::default(), &[], &SmoothingConfig::default()).unwrap();
    assert!(groups.flags.is_empty());
}

#[test]
fn test_random_hardness_planes() {
    let mut rng = StdRng::seed_from_u64(7);
    let config = SmoothingConfig::default();

    for fraction in [0.1, 0.3, 0.5, 0.7, 0.9] {
        let mut mesh = plane(
            Point3::new(0.0, 8.0, 0.0),
            Point3::new(8.0, 0.0, 0.0),
            8,
            8,
            |_, _, _, _| true,
        );
        randomize_hardness(&mut mesh, fraction, &mut rng);

        let groups = create_smoothing_groups(&mesh, &[], &config).unwrap();
        assert!(
            verify_smoothing_groups(&mesh, &groups.flags).unwrap().is_empty(),
            "fraction {}",
            fraction
        );
    }
}

#[test]
fn test_out_of_range_vertex_is_an_error() {
    let mut cube = cube_with_hard_edge(0);
    cube.faces[2][1] = 100;

    let err = create_smoothing_groups(&cube, &[], &SmoothingConfig::default()).unwrap_err();
    assert_eq!(
        err,
        SmoothingError::InvalidVertexIndex {
            vertex: 100,
            vertex_count: 8
        }
    );
}

#[test]
fn test_verify_rejects_out_of_range_vertex() {
    let mut cube = cube_with_hard_edge(0);
    cube.faces[2][1] = 100;

    let err = verify_smoothing_groups(&cube, &[1; 6]).unwrap_err();
    assert_eq!(
        err,
        SmoothingError::InvalidVertexIndex {
            vertex: 100,
            vertex_count: 8
        }
    );
}

#[test]
fn test_verify_rejects_wrong_flag_count() {
    let cube = cube_with_hard_edge(0);

    let err = verify_smoothing_groups(&cube, &[1; 3]).unwrap_err();
    assert_eq!(
        err,
        SmoothingError::FaceCountMismatch {
            expected: 6,
            actual: 3
        }
    );
}

#[test]
fn test_verify_reports_wrong_flags() {
    let cube = cube_with_hard_edge(0);

    // Everything shares bit 1, so only the hard edge is wrong
    let violations = verify_smoothing_groups(&cube, &[1; 6]).unwrap();
    assert_eq!(violations.len(), 1);
    assert!(violations[0].hard);
    assert_eq!(violations[0].shared(), 1);
}

#[test]
fn test_non_manifold_edges_are_counted() {
    // Three triangles hinged on edge 0-1
    let positions = (0..5).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
    let faces = vec![vec![0, 1, 2], vec![1, 0, 3], vec![0, 1, 4]];
    let mesh = PolyMesh::new(positions, faces);

    assert_eq!(non_manifold_edge_count(&mesh), 1);
    assert_eq!(non_manifold_edge_count(&cube_with_hard_edge(0)), 0);
}
