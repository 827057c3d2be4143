//! Quality-gated plate generation.
//!
//! One attempt places plates, assigns tiles, classifies boundaries and synthesizes the field set.
//! Attempts run under a fixed list of increasingly conservative presets; the first attempt whose
//! coverage passes the [`QualityGate`] wins, otherwise the last attempt is kept anyway.

use crate::assign::{assign_points, assign_tiles, ownership_counts};
use crate::boundaries::{BoundaryMap, classify_boundaries};
use crate::config::PlateConfig;
use crate::constants::*;
use crate::coverage::{CoverageSummary, QualityGate};
use crate::distance::DistanceField;
use crate::error::GenerationError;
use crate::fields::{Influence, TectonicFields};
use crate::grid::HexGrid;
use crate::plate::Plate;
use crate::rng::HostRng;
use crate::seed::{self, SeedSnapshot};
use crate::sites::{create_plates, random_sites, relax_sites};
use glam::Vec2;
use log::{debug, info, warn};

/// Parameters of one generation attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttemptParams {
    /// Auxiliary region cells per tile.
    pub cell_density: f32,
    pub influence: Influence,
    pub plate_count_override: Option<usize>,
}

impl AttemptParams {
    /// Plates to place in this attempt: the override if any, else the configured count, at least 2.
    pub fn plate_count(&self, configured: usize) -> usize {
        self.plate_count_override
            .unwrap_or(configured)
            .max(MIN_PLATE_COUNT)
    }

    pub fn region_cell_count(&self, grid: &HexGrid, plate_count: usize) -> usize {
        let by_density = (grid.len() as f64 * self.cell_density as f64).floor() as usize;
        (plate_count * 2).max(by_density).max(plate_count)
    }
}

/// The attempt sequence for a configured plate count, most detailed first.
///
/// Later presets shorten and sharpen boundary influence; the last two also place fewer plates.
pub fn attempt_presets(count: usize) -> [AttemptParams; 4] {
    let scaled = |factor: f32| (count as f32 * factor).round() as usize;
    [
        AttemptParams {
            cell_density: 0.003,
            influence: Influence { distance: 3, decay: 0.8 },
            plate_count_override: None,
        },
        AttemptParams {
            cell_density: 0.002,
            influence: Influence { distance: 2, decay: 0.9 },
            plate_count_override: None,
        },
        AttemptParams {
            cell_density: 0.002,
            influence: Influence { distance: 2, decay: 0.9 },
            plate_count_override: Some(scaled(0.6).max(6)),
        },
        AttemptParams {
            cell_density: 0.0015,
            influence: Influence { distance: 2, decay: 1.0 },
            plate_count_override: Some(scaled(0.4).max(4)),
        },
    ]
}

/// Anything the attempt loop can judge by its coverage.
pub trait Covered {
    fn coverage(&self) -> &CoverageSummary;
}

/// Verdict on a single attempt. Rejected attempts keep their result so the loop can fall back
/// to the last one.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome<T> {
    Accepted(T),
    Rejected(T),
}

impl<T: Covered> AttemptOutcome<T> {
    pub fn judge(result: T, gate: &QualityGate) -> Self {
        if gate.passes(result.coverage()) {
            AttemptOutcome::Accepted(result)
        } else {
            AttemptOutcome::Rejected(result)
        }
    }
}

/// The attempt the loop settled on.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected<T> {
    pub result: T,
    pub attempt_index: usize,
    /// `false` when every attempt was rejected and the last one was kept.
    pub passed_gate: bool,
}

/// Folds `attempt` over `presets`, stopping at the first accepted result.
///
/// Errors abort the fold immediately; they are never retried.
pub fn run_presets<T, F>(
    presets: &[AttemptParams],
    gate: &QualityGate,
    mut attempt: F,
) -> Result<Selected<T>, GenerationError>
where
    T: Covered,
    F: FnMut(usize, &AttemptParams) -> Result<T, GenerationError>,
{
    let mut last = None;

    for (index, params) in presets.iter().enumerate() {
        match AttemptOutcome::judge(attempt(index, params)?, gate) {
            AttemptOutcome::Accepted(result) => {
                return Ok(Selected {
                    result,
                    attempt_index: index,
                    passed_gate: true,
                });
            }
            AttemptOutcome::Rejected(result) => {
                let c = result.coverage();
                debug!(
                    "plate attempt {index} rejected: influence={:.3} boundary={:.3} avg_closeness={:.1}",
                    c.boundary_influence_share, c.boundary_tile_share, c.avg_influence_closeness
                );
                last = Some((index, result));
            }
        }
    }

    let (attempt_index, result) = last.ok_or(GenerationError::NoAttempts)?;
    warn!(
        "all {} plate attempts oversaturated boundaries; keeping attempt {attempt_index}",
        presets.len()
    );
    Ok(Selected {
        result,
        attempt_index,
        passed_gate: false,
    })
}

/// Everything one attempt produced.
#[derive(Debug, Clone)]
pub struct AttemptResult {
    pub fields: TectonicFields,
    pub plates: Vec<Plate>,
    pub boundaries: BoundaryMap,
    pub distance: DistanceField,
    pub coverage: CoverageSummary,
}

impl Covered for AttemptResult {
    fn coverage(&self) -> &CoverageSummary {
        &self.coverage
    }
}

/// Deterministic part of an attempt: from a fixed plate set to the full field set.
///
/// # Algorithm
/// 1. Assign every tile to its nearest plate seed and sample per-tile kinematics.
/// 2. Mark boundary tiles and classify each from the two plates' relative motion.
/// 3. Propagate hop distance out of all boundary tiles at once, capped one past the influence.
/// 4. Derive closeness and potentials, inheriting types from the nearest boundary tile.
/// 5. Summarize coverage.
pub fn synthesize(
    grid: &HexGrid,
    plates: Vec<Plate>,
    influence: Influence,
    rotation_multiple: f32,
) -> Result<AttemptResult, GenerationError> {
    if plates.is_empty() {
        return Err(GenerationError::NoPlates);
    }

    let seeds: Vec<Vec2> = plates.iter().map(|p| p.seed).collect();
    let plate_id = assign_tiles(grid, &seeds);
    let mut fields = TectonicFields::with_kinematics(grid, plate_id, &plates, rotation_multiple);

    let boundaries = BoundaryMap::detect(grid, &fields.plate_id);
    let classified = classify_boundaries(
        grid,
        &fields.plate_id,
        &boundaries,
        &plates,
        rotation_multiple,
    );
    let distance =
        DistanceField::propagate(grid, &boundaries.is_boundary, influence.distance + 1);
    fields.apply_boundaries(&boundaries, &classified, &distance, influence);

    let coverage = CoverageSummary::summarize(&boundaries.is_boundary, &fields.boundary_closeness);

    Ok(AttemptResult {
        fields,
        plates,
        boundaries,
        distance,
        coverage,
    })
}

/// One full attempt: draws plates and region cells from `rng`, then synthesizes.
pub fn run_attempt<R: HostRng>(
    rng: &mut R,
    grid: &HexGrid,
    config: &PlateConfig,
    params: &AttemptParams,
) -> Result<AttemptResult, GenerationError> {
    let plate_count = params.plate_count(config.count);

    let mut sites = random_sites(rng, grid, plate_count);
    relax_sites(grid, &mut sites, config.relaxation_steps);
    let plates = create_plates(rng, &sites, config.directionality.as_ref());
    if plates.is_empty() {
        return Err(GenerationError::NoPlates);
    }

    let cell_count = params.region_cell_count(grid, plate_count);
    let mut cells = random_sites(rng, grid, cell_count);
    relax_sites(grid, &mut cells, REGION_CELL_RELAXATION_STEPS);
    let cell_owners = assign_points(grid, &cells, &sites);
    let cell_counts = ownership_counts(&cell_owners, plates.len());

    let mut result = synthesize(grid, plates, params.influence, config.plate_rotation_multiple)?;
    result.coverage = result.coverage.with_plate_cell_counts(cell_counts);
    Ok(result)
}

/// Final output of plate generation.
#[derive(Debug, Clone)]
pub struct PlateGeneration {
    pub fields: TectonicFields,
    pub plates: Vec<Plate>,
    pub boundaries: BoundaryMap,
    pub distance: DistanceField,
    pub coverage: CoverageSummary,
    pub seed: SeedSnapshot,
    pub params: AttemptParams,
    pub attempt_index: usize,
    pub passed_gate: bool,
}

/// Generates the plate field set for a `width` × `height` map.
///
/// The host RNG is borrowed for the whole attempt sequence and restored before returning,
/// on success and on error alike.
pub fn generate<R: HostRng>(
    width: u32,
    height: u32,
    config: &PlateConfig,
    rng: &mut R,
) -> Result<PlateGeneration, GenerationError> {
    let grid = HexGrid::new(width, height);
    if grid.is_empty() {
        return Err(GenerationError::EmptyGrid { width, height });
    }

    let config = config.sanitized();
    debug!(
        "generating plates on {width}x{height}: count={} relaxation={} convergence_mix={} rotation_multiple={}",
        config.count, config.relaxation_steps, config.convergence_mix, config.plate_rotation_multiple
    );

    let mut scope = seed::capture(rng, width, height, &config);
    let presets = attempt_presets(config.count);
    let selected = run_presets(&presets, &QualityGate::default(), |index, params| {
        debug!(
            "plate attempt {index}: density={} influence={} decay={} override={:?}",
            params.cell_density,
            params.influence.distance,
            params.influence.decay,
            params.plate_count_override
        );
        run_attempt(scope.rng(), &grid, &config, params)
    })?;

    let attempt = selected.result;
    let seeds: Vec<Vec2> = attempt.plates.iter().map(|p| p.seed).collect();
    let snapshot = seed::finalize(scope.snapshot(), &config, &seeds);
    drop(scope);

    if selected.passed_gate {
        info!(
            "plates generated with attempt {}: {} plates, {:.1}% boundary influence",
            selected.attempt_index,
            attempt.plates.len(),
            attempt.coverage.boundary_influence_share * 100.0
        );
    }

    Ok(PlateGeneration {
        fields: attempt.fields,
        plates: attempt.plates,
        boundaries: attempt.boundaries,
        distance: attempt.distance,
        coverage: attempt.coverage,
        seed: snapshot,
        params: presets[selected.attempt_index],
        attempt_index: selected.attempt_index,
        passed_gate: selected.passed_gate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedMode;
    use crate::rng::{EngineRng, OpaqueRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    #[rstest]
    #[case(8, 6, 4)]
    #[case(20, 12, 8)]
    #[case(2, 6, 4)]
    #[case(15, 9, 6)]
    fn preset_overrides(#[case] count: usize, #[case] third: usize, #[case] fourth: usize) {
        let presets = attempt_presets(count);
        assert_eq!(presets[0].plate_count_override, None);
        assert_eq!(presets[1].plate_count_override, None);
        assert_eq!(presets[2].plate_count_override, Some(third));
        assert_eq!(presets[3].plate_count_override, Some(fourth));
    }

    #[test]
    fn presets_get_more_conservative() {
        let presets = attempt_presets(8);
        for pair in presets.windows(2) {
            assert!(pair[1].cell_density <= pair[0].cell_density);
            assert!(pair[1].influence.distance <= pair[0].influence.distance);
            assert!(pair[1].influence.decay >= pair[0].influence.decay);
        }
    }

    #[rstest]
    #[case(None, 8, 8)]
    #[case(None, 1, 2)]
    #[case(Some(6), 8, 6)]
    #[case(Some(0), 8, 2)]
    fn plate_count_resolution(
        #[case] override_count: Option<usize>,
        #[case] configured: usize,
        #[case] expected: usize,
    ) {
        let params = AttemptParams {
            plate_count_override: override_count,
            ..attempt_presets(8)[0]
        };
        assert_eq!(params.plate_count(configured), expected);
    }

    #[rstest]
    #[case(10, 10, 8, 16)]
    #[case(100, 100, 8, 30)]
    #[case(100, 100, 32, 64)]
    fn region_cell_count(
        #[case] width: u32,
        #[case] height: u32,
        #[case] plates: usize,
        #[case] expected: usize,
    ) {
        let params = attempt_presets(8)[0];
        assert_eq!(params.region_cell_count(&HexGrid::new(width, height), plates), expected);
    }

    struct Fake(CoverageSummary);

    impl Covered for Fake {
        fn coverage(&self) -> &CoverageSummary {
            &self.0
        }
    }

    fn fake(influence_share: f32) -> Fake {
        Fake(CoverageSummary {
            boundary_influence_share: influence_share,
            boundary_tile_share: 0.1,
            avg_influence_closeness: 50.0,
            ..Default::default()
        })
    }

    #[test]
    fn saturated_attempt_advances_to_next_preset() {
        let presets = attempt_presets(8);
        let mut calls = 0;
        let selected = run_presets(&presets, &QualityGate::default(), |index, _| {
            calls += 1;
            Ok(fake(if index == 0 { 0.9 } else { 0.3 }))
        })
        .unwrap();

        assert_eq!(calls, 2);
        assert_eq!(selected.attempt_index, 1);
        assert!(selected.passed_gate);
    }

    #[test]
    fn last_preset_is_kept_when_all_saturate() {
        let presets = attempt_presets(8);
        let mut calls = 0;
        let selected = run_presets(&presets, &QualityGate::default(), |_, _| {
            calls += 1;
            Ok(fake(0.9))
        })
        .unwrap();

        assert_eq!(calls, 4);
        assert_eq!(selected.attempt_index, 3);
        assert!(!selected.passed_gate);
    }

    #[test]
    fn errors_stop_the_fold() {
        let presets = attempt_presets(8);
        let mut calls = 0;
        let result = run_presets::<Fake, _>(&presets, &QualityGate::default(), |_, _| {
            calls += 1;
            Err(GenerationError::NoPlates)
        });
        assert!(matches!(result, Err(GenerationError::NoPlates)));
        assert_eq!(calls, 1);
    }

    #[test]
    fn empty_preset_list_is_an_error() {
        let result = run_presets(&[], &QualityGate::default(), |_, _| Ok(fake(0.1)));
        assert!(matches!(result, Err(GenerationError::NoAttempts)));
    }

    #[test]
    fn synthesize_without_plates_fails() {
        let grid = HexGrid::new(10, 10);
        let influence = attempt_presets(8)[0].influence;
        assert!(matches!(
            synthesize(&grid, Vec::new(), influence, 1.0),
            Err(GenerationError::NoPlates)
        ));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let mut rng = EngineRng::seed_from_u64(1);
        let result = generate(0, 10, &PlateConfig::default(), &mut rng);
        assert!(matches!(result, Err(GenerationError::EmptyGrid { width: 0, height: 10 })));
    }

    #[test]
    fn attempt_records_region_cell_ownership() {
        let grid = HexGrid::new(40, 25);
        let mut rng = EngineRng::seed_from_u64(21);
        let params = attempt_presets(8)[0];
        let result = run_attempt(&mut rng, &grid, &PlateConfig::default(), &params).unwrap();

        assert_eq!(result.plates.len(), 8);
        assert_eq!(result.coverage.plate_cell_counts.len(), 8);
        let cells: usize = result.coverage.plate_cell_counts.iter().sum();
        assert_eq!(cells, params.region_cell_count(&grid, 8));
        assert_eq!(result.coverage.total_tiles, grid.len());
    }

    #[test]
    fn generation_packages_seed_locations() {
        let config = PlateConfig {
            seed_mode: SeedMode::Fixed,
            fixed_seed: Some(7),
            ..Default::default()
        };
        let mut rng = EngineRng::seed_from_u64(5);
        let generation = generate(48, 30, &config, &mut rng).unwrap();

        assert_eq!(generation.seed.seed, Some(7));
        assert_eq!(generation.seed.seed_locations.len(), generation.plates.len());
        assert_eq!(generation.seed.config.as_ref(), Some(&config.sanitized()));
        assert_eq!(generation.params, attempt_presets(8)[generation.attempt_index]);
        for (loc, plate) in generation.seed.seed_locations.iter().zip(&generation.plates) {
            assert_eq!((loc.x, loc.y), (plate.seed.x, plate.seed.y));
        }
    }

    #[test]
    fn opaque_host_still_generates() {
        let mut rng = OpaqueRng(ChaCha8Rng::seed_from_u64(3));
        let generation = generate(30, 20, &PlateConfig::default(), &mut rng).unwrap();
        assert_eq!(generation.seed.seed, None);
        assert_eq!(generation.fields.len(), 600);
    }
}
