//! Plate boundary detection and classification
//!
//! A tile is a boundary tile when one of its hex neighbours belongs to another plate. Each
//! boundary tile is classified from the relative motion of the two plates sampled at that tile.

use crate::constants::*;
use crate::grid::HexGrid;
use crate::plate::Plate;
use glam::Vec2;

/// Type of plate boundary interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BoundaryType {
    /// No significant relative motion, or outside any boundary's influence
    #[default]
    None = 0,
    /// Plates closing on each other
    Convergent = 1,
    /// Plates spreading apart
    Divergent = 2,
    /// Plates sliding past each other
    Transform = 3,
}

impl BoundaryType {
    /// Classify from physics scores. Thresholds are checked in priority order: convergence,
    /// divergence, then shear.
    pub fn classify(sample: BoundarySample) -> Self {
        if sample.subduction > CONVERGENT_THRESHOLD {
            BoundaryType::Convergent
        } else if sample.subduction < DIVERGENT_THRESHOLD {
            BoundaryType::Divergent
        } else if sample.sliding > TRANSFORM_THRESHOLD {
            BoundaryType::Transform
        } else {
            BoundaryType::None
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Boundary tiles and, for each, the first differing neighbour plate.
#[derive(Debug, Clone)]
pub struct BoundaryMap {
    pub is_boundary: Vec<bool>,
    /// Plate across the boundary, or -1 for interior tiles.
    pub neighbor_plate: Vec<i16>,
}

impl BoundaryMap {
    /// Scan every tile's neighbours in offset-table order and keep the first foreign plate.
    pub fn detect(grid: &HexGrid, plate_id: &[i16]) -> Self {
        let mut is_boundary = vec![false; grid.len()];
        let mut neighbor_plate = vec![-1i16; grid.len()];

        for y in 0..grid.height {
            for x in 0..grid.width {
                let i = grid.index(x, y);
                let mine = plate_id[i];
                if let Some(n) = grid.neighbors(x, y).find(|n| plate_id[n.index] != mine) {
                    is_boundary[i] = true;
                    neighbor_plate[i] = plate_id[n.index];
                }
            }
        }

        Self {
            is_boundary,
            neighbor_plate,
        }
    }

    pub fn boundary_count(&self) -> usize {
        self.is_boundary.iter().filter(|b| **b).count()
    }

    pub fn boundary_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.is_boundary
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.then_some(i))
    }
}

/// Relative motion of two plates at one boundary tile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundarySample {
    /// Positive when plate A closes on plate B.
    pub subduction: f32,
    /// Shear magnitude along the boundary.
    pub sliding: f32,
}

/// Sample both plates' local movement at `pos` and project onto the seed-to-seed normal.
pub fn sample_boundary(plate_a: &Plate, plate_b: &Plate, pos: Vec2, rotation_multiple: f32) -> BoundarySample {
    let movement_a = plate_a.movement_at(pos, rotation_multiple);
    let movement_b = plate_b.movement_at(pos, rotation_multiple);

    // Unit normal from A's seed to B's seed, taken from the unwrapped delta.
    let normal = (plate_b.seed - plate_a.seed).normalize_or_zero();
    let tangent = normal.perp();

    BoundarySample {
        subduction: normal.dot(movement_a) - normal.dot(movement_b),
        sliding: (tangent.dot(movement_a) - tangent.dot(movement_b)).abs(),
    }
}

/// Classify every boundary tile. Interior tiles stay `None`; they inherit later.
pub fn classify_boundaries(
    grid: &HexGrid,
    plate_id: &[i16],
    boundaries: &BoundaryMap,
    plates: &[Plate],
    rotation_multiple: f32,
) -> Vec<BoundaryType> {
    let mut types = vec![BoundaryType::None; grid.len()];

    for i in boundaries.boundary_indices() {
        let other = boundaries.neighbor_plate[i];
        let (Some(plate_a), Some(plate_b)) = (
            usize::try_from(plate_id[i]).ok().and_then(|p| plates.get(p)),
            usize::try_from(other).ok().and_then(|p| plates.get(p)),
        ) else {
            continue;
        };
        let (x, y) = grid.coords(i);
        let pos = Vec2::new(x as f32, y as f32);
        types[i] = BoundaryType::classify(sample_boundary(plate_a, plate_b, pos, rotation_multiple));
    }

    types
}
