use formica_core::ants::AntPopulation;
use formica_core::grid::GridField;
use formica_core::random::RandomAngleSource;
use formica_core::Simulation;
use formica_data::{AntStats, GridSpec, PheromoneParams, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

type FieldMod = Box<dyn FnOnce(&mut GridField)>;

#[allow(dead_code)]
pub struct SimulationBuilder {
    grid: GridSpec,
    params: PheromoneParams,
    stats: AntStats,
    positions: Vec<Vec2>,
    headings: Vec<f32>,
    angle_range: (f32, f32),
    pool_size: usize,
    seed: u64,
    field_mods: Vec<FieldMod>,
}

#[allow(dead_code)]
impl SimulationBuilder {
    pub fn new(width: u32, height: u32, resolution: f32) -> Self {
        Self {
            grid: GridSpec::new(width, height, resolution),
            params: PheromoneParams::default(),
            stats: AntStats::default(),
            positions: Vec::new(),
            headings: Vec::new(),
            angle_range: (0.0, 0.0),
            pool_size: 1024,
            seed: 0,
            field_mods: Vec::new(),
        }
    }

    pub fn with_params(mut self, decay_rate: f32, deposit_rate: f32) -> Self {
        self.params = PheromoneParams {
            decay_rate,
            deposit_rate,
        };
        self
    }

    pub fn with_stats(mut self, stats: AntStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_ant(mut self, x: f32, y: f32, heading: f32) -> Self {
        self.positions.push(Vec2::new(x, y));
        self.headings.push(heading);
        self
    }

    /// Adds `count` ants at seeded random positions and headings.
    pub fn with_random_ants(mut self, count: usize, seed: u64) -> Self {
        let extent = self.grid.world_extent();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..count {
            self.positions.push(Vec2::new(
                rng.gen_range(0.0..extent.x),
                rng.gen_range(0.0..extent.y),
            ));
            self.headings
                .push(rng.gen_range(0.0..std::f32::consts::TAU));
        }
        self
    }

    pub fn with_angle_range(mut self, min: f32, max: f32) -> Self {
        self.angle_range = (min, max);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_cell(mut self, x: i32, y: i32, intensity: f32) -> Self {
        self.field_mods
            .push(Box::new(move |field| field.set(x, y, intensity)));
        self
    }

    pub fn with_uniform_field(mut self, intensity: f32) -> Self {
        let (w, h) = (self.grid.width as i32, self.grid.height as i32);
        self.field_mods.push(Box::new(move |field| {
            for x in 0..w {
                for y in 0..h {
                    field.set(x, y, intensity);
                }
            }
        }));
        self
    }

    pub fn build(self) -> Simulation {
        let ants = AntPopulation::from_parts(self.positions, self.headings, self.stats)
            .expect("valid population");
        let angles = RandomAngleSource::from_seed(self.pool_size, self.angle_range, self.seed)
            .expect("valid angle pool");
        let mut field = GridField::new(self.grid).expect("valid grid");
        for modify in self.field_mods {
            modify(&mut field);
        }
        Simulation::from_parts(self.grid, self.params, ants, angles)
            .and_then(|sim| sim.with_field(field))
            .expect("valid simulation")
    }
}

#[allow(dead_code)]
pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {expected}, got {actual}"
    );
}
