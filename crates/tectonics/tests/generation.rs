use glam::Vec2;
use rstest::rstest;
use std::collections::VecDeque;
use tectonics::boundaries::{BoundaryType, sample_boundary};
use tectonics::config::{PlateConfig, SeedMode};
use tectonics::generator::{PlateGeneration, attempt_presets, generate, synthesize};
use tectonics::grid::HexGrid;
use tectonics::plate::Plate;
use tectonics::rng::{EngineRng, HostRng};

fn generated(width: u32, height: u32, count: usize, host_seed: u64) -> PlateGeneration {
    let config = PlateConfig {
        count,
        ..Default::default()
    };
    let mut rng = EngineRng::seed_from_u64(host_seed);
    generate(width, height, &config, &mut rng).unwrap()
}

fn hops_from(grid: &HexGrid, source: usize) -> Vec<u32> {
    let mut dist = vec![u32::MAX; grid.len()];
    let mut queue = VecDeque::from([source]);
    dist[source] = 0;
    while let Some(i) = queue.pop_front() {
        for n in grid.neighbors_of(i) {
            if dist[n.index] == u32::MAX {
                dist[n.index] = dist[i] + 1;
                queue.push_back(n.index);
            }
        }
    }
    dist
}

#[rstest]
#[case(64, 40, 8, 1)]
#[case(80, 50, 12, 2)]
#[case(32, 20, 2, 3)]
#[case(50, 31, 32, 4)]
fn every_tile_has_one_owner(
    #[case] width: u32,
    #[case] height: u32,
    #[case] count: usize,
    #[case] host_seed: u64,
) {
    let generation = generated(width, height, count, host_seed);
    let plates = generation.plates.len() as i16;

    assert!(plates >= 2);
    assert_eq!(generation.fields.plate_id.len(), (width * height) as usize);
    assert!(generation.fields.plate_id.iter().all(|p| (0..plates).contains(p)));
}

#[rstest]
#[case(64, 40, 8, 11)]
#[case(80, 50, 16, 12)]
fn closeness_decays_with_distance(
    #[case] width: u32,
    #[case] height: u32,
    #[case] count: usize,
    #[case] host_seed: u64,
) {
    let generation = generated(width, height, count, host_seed);
    let grid = HexGrid::new(width, height);
    let influence = generation.params.influence.distance;
    let closeness = &generation.fields.boundary_closeness;
    let distance = &generation.distance.distance;

    for i in 0..grid.len() {
        if distance[i] >= influence {
            assert_eq!(closeness[i], 0);
            assert_eq!(generation.fields.boundary_type[i], BoundaryType::None);
        }
        for n in grid.neighbors_of(i) {
            if distance[n.index] > distance[i] {
                assert!(closeness[n.index] <= closeness[i]);
            }
        }
    }
}

#[test]
fn boundary_labels_come_from_their_own_sample() {
    let generation = generated(64, 40, 10, 21);
    let grid = HexGrid::new(64, 40);
    let multiple = PlateConfig::default().plate_rotation_multiple;

    for i in generation.boundaries.boundary_indices() {
        let own = &generation.plates[generation.fields.plate_id[i] as usize];
        let other = &generation.plates[generation.boundaries.neighbor_plate[i] as usize];
        let (x, y) = grid.coords(i);
        let sample = sample_boundary(own, other, Vec2::new(x as f32, y as f32), multiple);
        assert_eq!(generation.fields.boundary_type[i], BoundaryType::classify(sample));
    }
}

#[test]
fn inherited_types_come_from_a_nearest_boundary_tile() {
    let generation = generated(48, 30, 8, 31);
    let grid = HexGrid::new(48, 30);
    let influence = generation.params.influence.distance;

    for i in 0..grid.len() {
        let d = generation.distance.distance[i];
        if generation.boundaries.is_boundary[i] || d >= influence {
            continue;
        }
        let source = generation.distance.nearest_source[i].unwrap();
        assert!(generation.boundaries.is_boundary[source]);
        assert_eq!(generation.fields.boundary_type[i], generation.fields.boundary_type[source]);
        assert_eq!(hops_from(&grid, source)[i], d, "tile {:?}", grid.coords(i));
    }
}

#[test]
fn potentials_follow_closeness_and_type() {
    let generation = generated(64, 40, 8, 41);
    let f = &generation.fields;

    for i in 0..f.len() {
        assert_eq!(f.shield_stability[i] as u16 + f.boundary_closeness[i] as u16, 255);
        assert_eq!(f.tectonic_stress[i], f.boundary_closeness[i]);
        match f.boundary_type[i] {
            BoundaryType::Convergent => assert_eq!(f.rift_potential[i], f.uplift_potential[i] >> 2),
            BoundaryType::Divergent => assert_eq!(f.uplift_potential[i], f.rift_potential[i] >> 2),
            _ => assert_eq!(f.uplift_potential[i], f.rift_potential[i]),
        }
    }
}

#[test]
fn head_on_plates_build_a_convergent_seam() {
    let grid = HexGrid::new(10, 10);
    let plates = vec![
        Plate::new(0, Vec2::new(2.0, 5.0), Vec2::new(0.75, 0.0), 0.0),
        Plate::new(1, Vec2::new(7.0, 5.0), Vec2::new(-0.75, 0.0), 0.0),
    ];
    let influence = attempt_presets(2)[1].influence;
    let result = synthesize(&grid, plates, influence, 1.0).unwrap();

    for y in 0..10 {
        for x in [4, 5] {
            let i = grid.index(x, y);
            assert!(result.boundaries.is_boundary[i]);
            assert_eq!(result.fields.boundary_type[i], BoundaryType::Convergent);
            assert_eq!(result.fields.boundary_closeness[i], 255);
        }
        // two hops from every seam
        for x in [2, 7] {
            let i = grid.index(x, y);
            assert_eq!(result.distance.distance[i], influence.distance);
            assert_eq!(result.fields.boundary_closeness[i], 0);
            assert_eq!(result.fields.boundary_type[i], BoundaryType::None);
        }
    }
    assert_eq!(result.coverage.boundary_tiles, 40);
}

#[test]
fn fixed_seed_reproduces_the_same_map() {
    let config = PlateConfig {
        count: 9,
        seed_mode: SeedMode::Fixed,
        fixed_seed: Some(20_240_601),
        ..Default::default()
    };
    let mut a = EngineRng::seed_from_u64(100);
    let mut b = EngineRng::seed_from_u64(200);

    let first = generate(60, 36, &config, &mut a).unwrap();
    let second = generate(60, 36, &config, &mut b).unwrap();

    assert_eq!(first.fields, second.fields);
    assert_eq!(first.plates, second.plates);
    assert_eq!(first.attempt_index, second.attempt_index);
}

#[test]
fn generation_hands_the_host_rng_back_untouched() {
    let mut baseline = EngineRng::seed_from_u64(77);
    let expected: Vec<u32> = (0..16).map(|_| baseline.next_below(1 << 30, "after")).collect();

    let mut rng = EngineRng::seed_from_u64(77);
    let config = PlateConfig {
        seed_offset: 5,
        ..Default::default()
    };
    generate(40, 24, &config, &mut rng).unwrap();
    let actual: Vec<u32> = (0..16).map(|_| rng.next_below(1 << 30, "after")).collect();

    assert_eq!(actual, expected);
}
