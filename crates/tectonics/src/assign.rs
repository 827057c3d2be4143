use crate::grid::{HexGrid, project_to_hex, wrapped_hex_distance_sq};
use glam::Vec2;

/// Index of the seed nearest to `point` in wrapped hex space.
///
/// Linear scan with a strict `<`, so ties go to the lowest index. Returns `None` only when
/// `seeds_px` is empty.
fn nearest_seed(point_px: Vec2, seeds_px: &[Vec2], wrap_width: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, seed) in seeds_px.iter().enumerate() {
        let d = wrapped_hex_distance_sq(point_px, *seed, wrap_width);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Assigns every tile of the grid to its nearest seed.
///
/// For every tile:
/// - project the tile's column/row into hex space (odd columns shifted half a hex down);
/// - compare against all projected seeds, wrapping on x;
/// - store the winning seed index at the tile's row-major index.
///
/// `seeds` must not be empty.
pub fn assign_tiles(grid: &HexGrid, seeds: &[Vec2]) -> Vec<i16> {
    debug_assert!(!seeds.is_empty());
    let seeds_px: Vec<Vec2> = seeds.iter().map(|s| project_to_hex(*s)).collect();
    let wrap = grid.wrap_width_px();

    let mut plate_id = vec![0i16; grid.len()];
    for y in 0..grid.height {
        for x in 0..grid.width {
            let tile_px = project_to_hex(Vec2::new(x as f32, y as f32));
            let best = nearest_seed(tile_px, &seeds_px, wrap).unwrap_or(0);
            plate_id[grid.index(x, y)] = best as i16;
        }
    }
    plate_id
}

/// Assigns arbitrary sample points to their nearest seed.
pub fn assign_points(grid: &HexGrid, points: &[Vec2], seeds: &[Vec2]) -> Vec<usize> {
    let seeds_px: Vec<Vec2> = seeds.iter().map(|s| project_to_hex(*s)).collect();
    let wrap = grid.wrap_width_px();
    points
        .iter()
        .map(|p| nearest_seed(project_to_hex(*p), &seeds_px, wrap).unwrap_or(0))
        .collect()
}

/// Number of points owned by each of `seed_count` seeds.
pub fn ownership_counts(assignment: &[usize], seed_count: usize) -> Vec<usize> {
    let mut counts = vec![0usize; seed_count];
    for &owner in assignment {
        if let Some(c) = counts.get_mut(owner) {
            *c += 1;
        }
    }
    counts
}
