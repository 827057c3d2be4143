//! Per-tile tectonic fields derived from plate ownership and boundary distance.

use crate::boundaries::{BoundaryMap, BoundaryType};
use crate::constants::KINEMATIC_SCALE;
use crate::distance::DistanceField;
use crate::grid::HexGrid;
use crate::plate::Plate;
use glam::Vec2;

/// How far boundary effects reach and how fast they fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Influence {
    /// Hop distance at which closeness drops to zero.
    pub distance: u32,
    /// Exponential decay per hop.
    pub decay: f32,
}

/// All per-tile output arrays of one generation, row-major, one entry per tile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TectonicFields {
    pub plate_id: Vec<i16>,
    pub boundary_closeness: Vec<u8>,
    pub boundary_type: Vec<BoundaryType>,
    pub tectonic_stress: Vec<u8>,
    pub uplift_potential: Vec<u8>,
    pub rift_potential: Vec<u8>,
    pub shield_stability: Vec<u8>,
    /// Local plate movement ×100, x component.
    pub plate_movement_u: Vec<i8>,
    /// Local plate movement ×100, y component.
    pub plate_movement_v: Vec<i8>,
    /// Owning plate's rotation in degrees ×100.
    pub plate_rotation: Vec<i8>,
}

/// `[0, 1]` to `0..=255`, rounding and saturating.
pub fn to_byte(f: f32) -> u8 {
    (f * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn clamp_i8(v: f32) -> i8 {
    v.clamp(-127.0, 127.0) as i8
}

/// `(uplift, rift)` for a tile with the given closeness and (possibly inherited) boundary type.
pub fn potentials(closeness: u8, boundary_type: BoundaryType) -> (u8, u8) {
    match boundary_type {
        BoundaryType::Convergent => (closeness, closeness >> 2),
        BoundaryType::Divergent => (closeness >> 2, closeness),
        BoundaryType::Transform | BoundaryType::None => (closeness >> 2, closeness >> 2),
    }
}

impl TectonicFields {
    /// Fills plate ownership and the per-tile kinematics sampled from each tile's owning plate.
    ///
    /// Boundary-derived fields start in their "far from any boundary" state.
    pub fn with_kinematics(
        grid: &HexGrid,
        plate_id: Vec<i16>,
        plates: &[Plate],
        rotation_multiple: f32,
    ) -> Self {
        let len = grid.len();
        let mut plate_movement_u = vec![0i8; len];
        let mut plate_movement_v = vec![0i8; len];
        let mut plate_rotation = vec![0i8; len];

        for (i, &owner) in plate_id.iter().enumerate() {
            let Some(plate) = usize::try_from(owner).ok().and_then(|p| plates.get(p)) else {
                continue;
            };
            let (x, y) = grid.coords(i);
            let movement = plate.movement_at(Vec2::new(x as f32, y as f32), rotation_multiple);
            plate_movement_u[i] = clamp_i8((movement.x * KINEMATIC_SCALE).round());
            plate_movement_v[i] = clamp_i8((movement.y * KINEMATIC_SCALE).round());
            plate_rotation[i] = clamp_i8((plate.rotation_deg * KINEMATIC_SCALE).round());
        }

        Self {
            plate_id,
            boundary_closeness: vec![0; len],
            boundary_type: vec![BoundaryType::None; len],
            tectonic_stress: vec![0; len],
            uplift_potential: vec![0; len],
            rift_potential: vec![0; len],
            shield_stability: vec![255; len],
            plate_movement_u,
            plate_movement_v,
            plate_rotation,
        }
    }

    /// Writes closeness, type, stress, shield and potentials for every tile.
    ///
    /// Boundary tiles keep their own classification; other reached tiles take the type of the
    /// boundary tile they inherited from. Tiles at or beyond `influence.distance` are reset to
    /// the far state regardless of what the propagation reached.
    pub fn apply_boundaries(
        &mut self,
        boundaries: &BoundaryMap,
        classified: &[BoundaryType],
        distance: &DistanceField,
        influence: Influence,
    ) {
        for i in 0..self.plate_id.len() {
            let d = distance.distance[i];
            if d >= influence.distance {
                self.boundary_closeness[i] = 0;
                self.boundary_type[i] = BoundaryType::None;
                self.uplift_potential[i] = 0;
                self.rift_potential[i] = 0;
                self.shield_stability[i] = 255;
                self.tectonic_stress[i] = 0;
                continue;
            }

            let closeness = to_byte((-(d as f32) * influence.decay).exp());
            let boundary_type = if boundaries.is_boundary[i] {
                classified[i]
            } else {
                distance.nearest_source[i]
                    .map(|src| classified[src])
                    .unwrap_or_default()
            };
            let (uplift, rift) = potentials(closeness, boundary_type);

            self.boundary_closeness[i] = closeness;
            self.boundary_type[i] = boundary_type;
            self.tectonic_stress[i] = closeness;
            self.shield_stability[i] = 255 - closeness;
            self.uplift_potential[i] = uplift;
            self.rift_potential[i] = rift;
        }
    }

    pub fn len(&self) -> usize {
        self.plate_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plate_id.is_empty()
    }

    /// Boundary types as their `u8` field codes.
    pub fn boundary_type_codes(&self) -> Vec<u8> {
        self.boundary_type.iter().map(|t| t.as_u8()).collect()
    }
}
