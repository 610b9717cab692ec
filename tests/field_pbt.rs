use formica_core::ants::AntPopulation;
use formica_core::grid::GridField;
use formica_core::pheromone::{PheromoneSimulator, DECAY_FLOOR};
use formica_data::{AntStats, GridSpec, PheromoneParams, Vec2};
use proptest::prelude::*;

prop_compose! {
    fn arb_position(extent: f32)(
        x in 0.0f32..extent,
        y in 0.0f32..extent
    ) -> Vec2 {
        Vec2::new(x, y)
    }
}

prop_compose! {
    fn arb_params()(
        decay_rate in 0.0f32..=1.0,
        deposit_rate in 0.0f32..=1.0
    ) -> PheromoneParams {
        PheromoneParams { decay_rate, deposit_rate }
    }
}

fn seeded_field(spec: GridSpec, values: &[f32]) -> GridField {
    let mut field = GridField::new(spec).unwrap();
    let width = spec.width as usize;
    for (idx, &v) in values.iter().enumerate() {
        field.set((idx % width) as i32, (idx / width) as i32, v);
    }
    field
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_field_stays_in_unit_interval(
        params in arb_params(),
        positions in prop::collection::vec(arb_position(16.0), 0..200),
        cycles in 1usize..8
    ) {
        let mut sim = PheromoneSimulator::new(GridSpec::new(16, 16, 1.0), params).unwrap();
        for _ in 0..cycles {
            sim.run_cycle(&positions);
            for &v in sim.snapshot() {
                prop_assert!((0.0..=1.0).contains(&v), "intensity {} out of range", v);
            }
        }
    }

    #[test]
    fn test_decay_is_monotone(
        values in prop::collection::vec(0.0f32..=1.0, 64),
        decay_rate in 0.01f32..=1.0
    ) {
        let spec = GridSpec::new(8, 8, 1.0);
        let mut sim = PheromoneSimulator::with_initial_field(
            seeded_field(spec, &values),
            PheromoneParams { decay_rate, deposit_rate: 0.5 },
        ).unwrap();
        let before = sim.snapshot().to_vec();
        sim.decay_only();
        for (&old, &new) in before.iter().zip(sim.snapshot()) {
            if old < DECAY_FLOOR {
                prop_assert_eq!(new, 0.0);
            } else {
                prop_assert!(new < old || new == 0.0, "{} did not decay from {}", new, old);
            }
        }
    }

    #[test]
    fn test_deposit_saturates_at_one(
        visits in 1usize..500,
        deposit_rate in 0.0f32..=1.0,
        start in 0.0f32..=1.0
    ) {
        let spec = GridSpec::new(4, 4, 1.0);
        let mut field = GridField::new(spec).unwrap();
        field.set(2, 1, start);
        let mut sim = PheromoneSimulator::with_initial_field(
            field,
            PheromoneParams { decay_rate: 0.0, deposit_rate },
        ).unwrap();
        sim.run_cycle(&vec![Vec2::new(2.0, 1.0); visits]);
        prop_assert!(sim.published().sample(2, 1) <= 1.0);
    }

    #[test]
    fn test_batched_deposit_matches_one_by_one(
        params in arb_params(),
        positions in prop::collection::vec(arb_position(8.0), 1..100)
    ) {
        let spec = GridSpec::new(8, 8, 1.0);
        let mut sim = PheromoneSimulator::new(spec, params).unwrap();
        sim.run_cycle(&positions);

        let mut reference = GridField::new(spec).unwrap();
        for &p in &positions {
            let (x, y) = reference.nearest_cell(p);
            if let Some(v) = reference.get(x, y) {
                reference.set(x, y, (v + params.deposit_rate).min(1.0));
            }
        }
        for (&got, &want) in sim.snapshot().iter().zip(reference.as_slice()) {
            prop_assert!((got - want).abs() < 1e-4, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_movement_stays_on_torus(
        start in arb_position(20.0),
        heading in 0.0f32..std::f32::consts::TAU,
        speed in 0.0f32..50.0,
        dt in 0.0f32..1.0
    ) {
        let stats = AntStats { speed, turn_speed: 0.0, pheromone_turn_gain: 0.0 };
        let mut ants = AntPopulation::from_parts(vec![start], vec![heading], stats).unwrap();
        let extent = Vec2::new(20.0, 10.0);
        for _ in 0..5 {
            ants.movement_pass(dt, extent);
            let p = ants.positions()[0];
            prop_assert!((0.0..=extent.x).contains(&p.x), "x = {}", p.x);
            prop_assert!((0.0..=extent.y).contains(&p.y), "y = {}", p.y);
        }
    }

    #[test]
    fn test_crossing_right_edge_keeps_overshoot(
        gap in 0.01f32..1.0,
        overshoot in 0.01f32..1.0
    ) {
        let stats = AntStats { speed: 1.0, turn_speed: 0.0, pheromone_turn_gain: 0.0 };
        let extent = Vec2::new(10.0, 10.0);
        let mut ants = AntPopulation::from_parts(
            vec![Vec2::new(extent.x - gap, 5.0)],
            vec![0.0],
            stats,
        ).unwrap();
        ants.movement_pass(gap + overshoot, extent);
        prop_assert!((ants.positions()[0].x - overshoot).abs() < 1e-4);
    }
}
