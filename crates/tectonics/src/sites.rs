//! Plate seed placement and plate kinematics.
//!
//! This is the only place generation draws from the host RNG.

use crate::assign::assign_tiles;
use crate::config::DirectionalityConfig;
use crate::constants::*;
use crate::grid::HexGrid;
use crate::plate::Plate;
use crate::rng::HostRng;
use glam::Vec2;
use std::f32::consts::TAU;

/// Draws `count` points uniformly over the grid's coordinate space.
pub fn random_sites<R: HostRng>(rng: &mut R, grid: &HexGrid, count: usize) -> Vec<Vec2> {
    (0..count)
        .map(|_| {
            let x = rng.next_below(SITE_RESOLUTION, "SiteX") as f32 / SITE_RESOLUTION as f32;
            let y = rng.next_below(SITE_RESOLUTION, "SiteY") as f32 / SITE_RESOLUTION as f32;
            Vec2::new(x * grid.width as f32, y * grid.height as f32)
        })
        .collect()
}

/// Lloyd relaxation over the tile grid.
///
/// Each iteration assigns tiles to their nearest site and moves every site to the centroid of
/// the tiles it owns. The x centroid is a circular mean so sites straddling the seam stay put
/// instead of jumping to the middle of the map. Sites that own no tile do not move.
pub fn relax_sites(grid: &HexGrid, sites: &mut [Vec2], iterations: usize) {
    if sites.is_empty() || grid.is_empty() {
        return;
    }
    let width = grid.width as f32;

    for _ in 0..iterations {
        let owners = assign_tiles(grid, sites);
        // (sum cos, sum sin, sum y, count)
        let mut acc = vec![(0.0f32, 0.0f32, 0.0f32, 0usize); sites.len()];
        for (i, &owner) in owners.iter().enumerate() {
            let (x, y) = grid.coords(i);
            let theta = x as f32 / width * TAU;
            let entry = &mut acc[owner as usize];
            entry.0 += theta.cos();
            entry.1 += theta.sin();
            entry.2 += y as f32;
            entry.3 += 1;
        }

        let mut moved = false;
        for (site, (cos_sum, sin_sum, y_sum, count)) in sites.iter_mut().zip(acc) {
            if count == 0 {
                continue;
            }
            let x = if cos_sum.abs() + sin_sum.abs() < 1e-6 {
                // ring-shaped cell; no meaningful circular mean
                site.x
            } else {
                sin_sum.atan2(cos_sum).rem_euclid(TAU) / TAU * width
            };
            let next = Vec2::new(x, y_sum / count as f32);
            if next.distance_squared(*site) > 1e-8 {
                moved = true;
            }
            *site = next;
        }

        if !moved {
            break;
        }
    }
}

/// Builds one plate per site with random translation and rotation.
///
/// Draw order per plate: heading, speed, rotation, then (if configured) directionality jitter.
pub fn create_plates<R: HostRng>(
    rng: &mut R,
    sites: &[Vec2],
    directionality: Option<&DirectionalityConfig>,
) -> Vec<Plate> {
    sites
        .iter()
        .enumerate()
        .map(|(id, &seed)| {
            let angle = (rng.next_below(360, "PlateAngle") as f32).to_radians();
            let speed = SPEED_BASE + rng.next_below(SPEED_STEPS, "PlateSpeed") as f32 / SPEED_DIVISOR;
            let rotation_deg = (rng.next_below(ROTATION_STEPS, "PlateRotation") as f32
                - (ROTATION_STEPS / 2) as f32)
                * ROTATION_SCALE;
            let mut translation = Vec2::from_angle(angle) * speed;

            if let Some(dir) = directionality {
                translation = apply_directionality(&mut *rng, translation, dir);
            }

            Plate::new(id, seed, translation, rotation_deg)
        })
        .collect()
}

/// Rotates `translation` toward the configured global axis, keeping its magnitude.
///
/// The target heading is `current * (1 - cohesion) + axis * cohesion + jitter * variance`
/// degrees, with integer jitter drawn from `[-angle_jitter_deg, angle_jitter_deg]`.
pub fn apply_directionality<R: HostRng>(
    rng: &mut R,
    translation: Vec2,
    dir: &DirectionalityConfig,
) -> Vec2 {
    let cohesion = dir.cohesion.clamp(0.0, 1.0);
    let axis_deg = dir.primary_axes.plate_axis_deg.trunc();
    let jitter_deg = dir.variability.angle_jitter_deg.max(0);
    let variance = dir.variability.magnitude_variance;

    let current_deg = translation.y.atan2(translation.x).to_degrees();
    let magnitude = translation.length();

    let span = (jitter_deg as u32).saturating_mul(2).saturating_add(1);
    let jitter = rng.next_below(span, "PlateDirJit") as i64 - jitter_deg as i64;
    let target_deg =
        current_deg * (1.0 - cohesion) + axis_deg * cohesion + jitter as f32 * variance;

    Vec2::from_angle(target_deg.to_radians()) * magnitude
}
