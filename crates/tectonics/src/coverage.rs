use crate::constants::{CLOSENESS_LIMIT, SATURATION_LIMIT};

/// How much of the map boundary effects cover in one attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageSummary {
    /// Share of tiles that are themselves boundary tiles.
    pub boundary_tile_share: f32,
    /// Share of tiles with nonzero closeness.
    pub boundary_influence_share: f32,
    pub avg_closeness: f32,
    /// Average closeness over influenced tiles only; 0 when none are influenced.
    pub avg_influence_closeness: f32,
    pub max_closeness: u8,
    pub boundary_tiles: usize,
    pub influenced_tiles: usize,
    pub total_tiles: usize,
    /// Auxiliary region cells owned by each plate.
    pub plate_cell_counts: Vec<usize>,
}

impl CoverageSummary {
    /// Single pass over the boundary mask and closeness field.
    pub fn summarize(is_boundary: &[bool], closeness: &[u8]) -> Self {
        let mut boundary_tiles = 0usize;
        let mut influenced_tiles = 0usize;
        let mut closeness_sum = 0u64;
        let mut max_closeness = 0u8;

        for (&boundary, &c) in is_boundary.iter().zip(closeness) {
            if boundary {
                boundary_tiles += 1;
            }
            if c > 0 {
                influenced_tiles += 1;
            }
            closeness_sum += c as u64;
            max_closeness = max_closeness.max(c);
        }

        let total_tiles = closeness.len();
        let size = total_tiles.max(1) as f32;
        // zero closeness adds nothing, so the influenced sum equals the full sum
        let avg_influence_closeness = if influenced_tiles > 0 {
            closeness_sum as f32 / influenced_tiles as f32
        } else {
            0.0
        };

        Self {
            boundary_tile_share: boundary_tiles as f32 / size,
            boundary_influence_share: influenced_tiles as f32 / size,
            avg_closeness: closeness_sum as f32 / size,
            avg_influence_closeness,
            max_closeness,
            boundary_tiles,
            influenced_tiles,
            total_tiles,
            plate_cell_counts: Vec::new(),
        }
    }

    pub fn with_plate_cell_counts(mut self, counts: Vec<usize>) -> Self {
        self.plate_cell_counts = counts;
        self
    }
}

/// Limits an attempt must stay within to be accepted without falling back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityGate {
    pub max_influence_share: f32,
    pub max_boundary_share: f32,
    pub max_avg_influence_closeness: f32,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self {
            max_influence_share: SATURATION_LIMIT,
            max_boundary_share: SATURATION_LIMIT,
            max_avg_influence_closeness: CLOSENESS_LIMIT,
        }
    }
}

impl QualityGate {
    pub fn passes(&self, summary: &CoverageSummary) -> bool {
        summary.boundary_influence_share <= self.max_influence_share
            && summary.boundary_tile_share <= self.max_boundary_share
            && summary.avg_influence_closeness <= self.max_avg_influence_closeness
    }
}
