//! Single body orbiting the central anchor
//!
//! Demonstrates the quadtree gravity pass with one body launched on a
//! circular orbit, printing radius drift as the orbit progresses.
//!
//! Run with: cargo run --package orrery --example simple_orbit

use std::f64::consts::FRAC_PI_2;

use orrery::{SimulationConfig, Universe};

fn main() {
    println!("Orrery: Single Body Orbit\n");
    println!("{}", "=".repeat(60));

    let config = SimulationConfig {
        theta: 0.5,
        ..SimulationConfig::default()
    };

    // Tangential speed for a circular orbit at this radius. The anchor
    // contributes gravity twice per tick (through the tree and directly),
    // hence the factor of two.
    let radius = 250.0;
    let speed = (2.0 * config.gravity_constant * config.anchor_mass / radius).sqrt();

    println!("Anchor mass: {}", config.anchor_mass);
    println!("Orbital radius: {radius}");
    println!("Circular speed: {speed:.4}");

    let mut universe = Universe::new(config.clone());
    let x = config.world_width / 2.0 + radius;
    let y = config.world_height / 2.0;
    let id = universe.spawn_body(x, y, speed, FRAC_PI_2, 200.0);

    let steps = 2_000;
    println!("\nIntegrating {steps} ticks...\n");

    for step in 1..=steps {
        universe.step();

        if step % 250 == 0 {
            match universe.get_body(id) {
                Some(body) => {
                    let r = body.distance_to(universe.anchor());
                    let v = body.velocity.magnitude();
                    let drift = ((r - radius) / radius).abs();
                    println!(
                        "tick {step:>5}: r={r:8.3}  v={v:.4}  dr={:.2e}  ({})",
                        drift, body.name
                    );
                }
                None => {
                    println!("tick {step:>5}: body lost!");
                    break;
                }
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    match universe.get_body(id) {
        Some(body) => {
            let r = body.distance_to(universe.anchor());
            let drift = ((r - radius) / radius).abs();
            if drift < 0.1 {
                println!("✓ Orbit stayed within 10% of the launch radius");
            } else {
                println!("✗ Orbit drifted: dr = {drift:.2e}");
            }
        }
        None => println!("✗ Body was destroyed during the run"),
    }

    println!("\nDemo complete!");
}
