//! Oriented box collision demo
//!
//! Spins a handful of boxes around fixed positions, tests every pair each
//! step and reports contacts and the separating axes the SAT finds. Debug
//! primitives are collected into a frame list the way a renderer would
//! consume them.
//!
//! Usage: `sat_demo [config.toml|config.ron]`

use collision_engine::foundation::logging;
use collision_engine::foundation::math::Unit;
use collision_engine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::time::Instant;

const BOX_COUNT: usize = 6;
const STEPS: u32 = 240;
const TIME_STEP: f32 = 1.0 / 60.0;
const SEED: u64 = 2024;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),

    #[error("Collision query failed: {0}")]
    Collision(#[from] CollisionError),
}

struct SpinningBox {
    handle: VolumeHandle,
    position: Vec3,
    spin_axis: Unit<Vec3>,
    spin_rate: f32,
}

impl SpinningBox {
    fn model_matrix(&self, time: f32) -> Mat4 {
        let rotation = Quat::from_axis_angle(&self.spin_axis, self.spin_rate * time);
        Transform::from_position_rotation(self.position, rotation).to_matrix()
    }
}

struct SatDemo {
    world: CollisionWorld,
    boxes: Vec<SpinningBox>,
    frame: DebugDrawSystem,
    time: f32,
    axis_counts: HashMap<SeparatingAxis, usize>,
}

impl SatDemo {
    fn new(config: CollisionConfig) -> Self {
        log::info!("Creating SAT demo with {} boxes...", BOX_COUNT);
        let mut rng = StdRng::seed_from_u64(SEED);
        let mut world = CollisionWorld::new(config);

        let boxes = (0..BOX_COUNT)
            .map(|_| {
                let half = Vec3::new(rng.gen_range(0.3..1.0), rng.gen_range(0.3..1.0), rng.gen_range(0.3..1.0));
                let corners = BoundingVolume::from_min_max(-half, half).local_corners();
                let handle = world.insert_points(&corners);

                SpinningBox {
                    handle,
                    position: Vec3::new(rng.gen_range(-2.0..2.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
                    spin_axis: Unit::new_normalize(Vec3::new(
                        rng.gen_range(-1.0..1.0),
                        rng.gen_range(-1.0..1.0),
                        rng.gen_range(0.1..1.0),
                    )),
                    spin_rate: rng.gen_range(0.5..2.0),
                }
            })
            .collect();

        Self {
            world,
            boxes,
            frame: DebugDrawSystem::new(),
            time: 0.0,
            axis_counts: HashMap::new(),
        }
    }

    /// Advance one step; returns the number of colliding pairs
    fn step(&mut self) -> Result<usize, DemoError> {
        self.time += TIME_STEP;

        for spinning in &self.boxes {
            self.world.set_model_matrix(spinning.handle, spinning.model_matrix(self.time))?;
        }

        let mut contacts = 0;
        for (i, first) in self.boxes.iter().enumerate() {
            for second in &self.boxes[i + 1..] {
                let outcome = self
                    .world
                    .test_and_update_visualized(first.handle, second.handle, &mut self.frame)?;

                if outcome.is_colliding() {
                    contacts += 1;
                } else if let Some(axis) = outcome.separating_axis() {
                    *self.axis_counts.entry(axis).or_insert(0) += 1;
                }
            }
        }

        self.world.add_to_render_list(&mut self.frame);
        log::debug!("t={:.3}: {} debug shapes queued", self.time, self.frame.shape_count());
        // A renderer would draw the frame here
        self.frame.clear();

        Ok(contacts)
    }

    fn run(&mut self) -> Result<(), DemoError> {
        let start = Instant::now();
        let mut total_contacts = 0;

        for step in 1..=STEPS {
            let contacts = self.step()?;
            total_contacts += contacts;

            if step % 60 == 0 {
                let busiest = self
                    .world
                    .iter()
                    .map(|(_, volume)| volume.colliding_count())
                    .max()
                    .unwrap_or(0);
                log::info!(
                    "Step {}: {} colliding pairs, busiest box touches {}",
                    step, contacts, busiest
                );
            }
        }

        log::info!(
            "Finished {} steps in {:.2?} ({} pair contacts total)",
            STEPS,
            start.elapsed(),
            total_contacts
        );
        for axis in SeparatingAxis::ALL {
            if let Some(count) = self.axis_counts.get(&axis) {
                log::info!("  separated along {:<9} {} times", axis.to_string(), count);
            }
        }

        Ok(())
    }
}

fn load_config() -> Result<CollisionConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            Ok(CollisionConfig::load_from_file(&path)?)
        }
        None => Ok(CollisionConfig::default()),
    }
}

fn main() {
    logging::init();

    let result = load_config().and_then(|config| SatDemo::new(config).run());
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
