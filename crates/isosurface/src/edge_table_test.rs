use super::*;
use crate::constants::{CUBE_CORNERS, SQUARE_CORNERS};

/// The published 256-entry edge table, reproduced for comparison.
#[rustfmt::skip]
const CLASSIC_EDGE_TABLE: [u16; 256] = [
  0x000, 0x109, 0x203, 0x30a, 0x406, 0x50f, 0x605, 0x70c,
  0x80c, 0x905, 0xa0f, 0xb06, 0xc0a, 0xd03, 0xe09, 0xf00,
  0x190, 0x099, 0x393, 0x29a, 0x596, 0x49f, 0x795, 0x69c,
  0x99c, 0x895, 0xb9f, 0xa96, 0xd9a, 0xc93, 0xf99, 0xe90,
  0x230, 0x339, 0x033, 0x13a, 0x636, 0x73f, 0x435, 0x53c,
  0xa3c, 0xb35, 0x83f, 0x936, 0xe3a, 0xf33, 0xc39, 0xd30,
  0x3a0, 0x2a9, 0x1a3, 0x0aa, 0x7a6, 0x6af, 0x5a5, 0x4ac,
  0xbac, 0xaa5, 0x9af, 0x8a6, 0xfaa, 0xea3, 0xda9, 0xca0,
  0x460, 0x569, 0x663, 0x76a, 0x066, 0x16f, 0x265, 0x36c,
  0xc6c, 0xd65, 0xe6f, 0xf66, 0x86a, 0x963, 0xa69, 0xb60,
  0x5f0, 0x4f9, 0x7f3, 0x6fa, 0x1f6, 0x0ff, 0x3f5, 0x2fc,
  0xdfc, 0xcf5, 0xfff, 0xef6, 0x9fa, 0x8f3, 0xbf9, 0xaf0,
  0x650, 0x759, 0x453, 0x55a, 0x256, 0x35f, 0x055, 0x15c,
  0xe5c, 0xf55, 0xc5f, 0xd56, 0xa5a, 0xb53, 0x859, 0x950,
  0x7c0, 0x6c9, 0x5c3, 0x4ca, 0x3c6, 0x2cf, 0x1c5, 0x0cc,
  0xfcc, 0xec5, 0xdcf, 0xcc6, 0xbca, 0xac3, 0x9c9, 0x8c0,
  0x8c0, 0x9c9, 0xac3, 0xbca, 0xcc6, 0xdcf, 0xec5, 0xfcc,
  0x0cc, 0x1c5, 0x2cf, 0x3c6, 0x4ca, 0x5c3, 0x6c9, 0x7c0,
  0x950, 0x859, 0xb53, 0xa5a, 0xd56, 0xc5f, 0xf55, 0xe5c,
  0x15c, 0x055, 0x35f, 0x256, 0x55a, 0x453, 0x759, 0x650,
  0xaf0, 0xbf9, 0x8f3, 0x9fa, 0xef6, 0xfff, 0xcf5, 0xdfc,
  0x2fc, 0x3f5, 0x0ff, 0x1f6, 0x6fa, 0x7f3, 0x4f9, 0x5f0,
  0xb60, 0xa69, 0x963, 0x86a, 0xf66, 0xe6f, 0xd65, 0xc6c,
  0x36c, 0x265, 0x16f, 0x066, 0x76a, 0x663, 0x569, 0x460,
  0xca0, 0xda9, 0xea3, 0xfaa, 0x8a6, 0x9af, 0xaa5, 0xbac,
  0x4ac, 0x5a5, 0x6af, 0x7a6, 0x0aa, 0x1a3, 0x2a9, 0x3a0,
  0xd30, 0xc39, 0xf33, 0xe3a, 0x936, 0x83f, 0xb35, 0xa3c,
  0x53c, 0x435, 0x73f, 0x636, 0x13a, 0x033, 0x339, 0x230,
  0xe90, 0xf99, 0xc93, 0xd9a, 0xa96, 0xb9f, 0x895, 0x99c,
  0x69c, 0x795, 0x49f, 0x596, 0x29a, 0x393, 0x099, 0x190,
  0xf00, 0xe09, 0xd03, 0xc0a, 0xb06, 0xa0f, 0x905, 0x80c,
  0x70c, 0x605, 0x50f, 0x406, 0x30a, 0x203, 0x109, 0x000,];

#[test]
fn test_cube_edge_table_matches_classic() {
  for code in 0..256 {
    assert_eq!(
      CUBE_EDGE_TABLE[code], CLASSIC_EDGE_TABLE[code],
      "edge mask mismatch for code {}",
      code
    );
  }
}

#[test]
fn test_edge_table_homogeneous() {
  // All corners same side = no crossings
  assert_eq!(CUBE_EDGE_TABLE[0], 0, "All outside should have no edges");
  assert_eq!(CUBE_EDGE_TABLE[255], 0, "All inside should have no edges");
  assert_eq!(SQUARE_EDGE_TABLE[0], 0);
  assert_eq!(SQUARE_EDGE_TABLE[15], 0);
}

#[test]
fn test_edge_table_single_corner() {
  // Single inside corner should cut exactly 3 edges
  for corner in 0..8 {
    let mask = 1usize << corner;
    let edge_count = CUBE_EDGE_TABLE[mask].count_ones();
    assert_eq!(
      edge_count, 3,
      "Corner {} should have 3 edges, got {}",
      corner, edge_count
    );
  }
}

#[test]
fn test_edge_table_symmetry() {
  // Complementary configurations cut the same edges
  for i in 0..128 {
    assert_eq!(CUBE_EDGE_TABLE[i], CUBE_EDGE_TABLE[255 - i]);
  }
  for i in 0..8 {
    assert_eq!(SQUARE_EDGE_TABLE[i], SQUARE_EDGE_TABLE[15 - i]);
  }
}

#[test]
fn test_cube_edge_shifts_match_corners() {
  // Each shift must be the lower endpoint of its edge, along the one axis
  // where the endpoints differ
  for (edge, [c0, c1]) in CUBE_EDGE_CORNERS.iter().enumerate() {
    let p0 = CUBE_CORNERS[*c0 as usize];
    let p1 = CUBE_CORNERS[*c1 as usize];
    let differing: Vec<usize> = (0..3).filter(|&a| p0[a] != p1[a]).collect();
    assert_eq!(differing.len(), 1, "edge {} must be axis aligned", edge);

    let shift = CUBE_EDGE_SHIFTS[edge];
    assert_eq!(shift.axis as usize, differing[0], "edge {} axis", edge);
    let lower: [u8; 3] = std::array::from_fn(|a| p0[a].min(p1[a]));
    assert_eq!(shift.offset, lower, "edge {} offset", edge);
  }
}

#[test]
fn test_square_edge_shifts_match_corners() {
  for (edge, [c0, c1]) in SQUARE_EDGE_CORNERS.iter().enumerate() {
    let p0 = SQUARE_CORNERS[*c0 as usize];
    let p1 = SQUARE_CORNERS[*c1 as usize];
    let shift = SQUARE_EDGE_SHIFTS[edge];
    let axis = shift.axis as usize;
    assert_ne!(p0[axis], p1[axis]);
    assert_eq!(p0[1 - axis], p1[1 - axis]);
    let lower: [u8; 2] = std::array::from_fn(|a| p0[a].min(p1[a]));
    assert_eq!(shift.offset, lower);
  }
}

#[test]
fn test_square_edge_table_values() {
  // Corner 0 inside cuts edges 0 and 3
  assert_eq!(SQUARE_EDGE_TABLE[1], 0b1001);
  // Corners 0 and 1 inside cut edges 1 and 3
  assert_eq!(SQUARE_EDGE_TABLE[3], 0b1010);
  // Saddle cuts every edge
  assert_eq!(SQUARE_EDGE_TABLE[5], 0b1111);
  assert_eq!(SQUARE_EDGE_TABLE[10], 0b1111);
}
