//! Collision and absorption example
//!
//! Spawns a cloud of randomly placed bodies and runs the simulation until
//! most have merged or fallen into the anchor, printing each tick on which
//! the population changes.
//!
//! Run with: cargo run --package orrery --example collision_demo

use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use orrery::{SimulationConfig, Universe};

fn main() {
    println!("Orrery: Collision Demo\n");
    println!("{}", "=".repeat(60));

    let config = SimulationConfig::default();
    let mut universe = Universe::new(config);
    let mut rng = ChaChaRng::seed_from_u64(42);

    let initial = 40;
    for _ in 0..initial {
        universe.spawn_random(&mut rng);
    }

    let total_mass: f64 = universe.bodies().iter().map(|b| b.mass()).sum();
    println!("Spawned {} bodies, total mass {:.1}", initial, total_mass);
    println!("Anchor mass: {:.1}\n", universe.anchor().mass());

    let steps = 5_000;
    let mut last_count = universe.body_count();

    for step in 1..=steps {
        universe.step();

        let count = universe.body_count();
        if count != last_count {
            println!(
                "tick {step:>5}: {last_count} -> {count} bodies, anchor mass {:.1}",
                universe.anchor().mass()
            );
            last_count = count;
        }
        if count == 0 {
            break;
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Final statistics:");
    println!("  Surviving bodies: {}", universe.body_count());
    println!("  Anchor mass: {:.1}", universe.anchor().mass());

    if !universe.bodies().is_empty() {
        println!("\nSurvivors:");
        for body in universe.bodies() {
            println!(
                "  {:<12} mass={:8.1}  pos=({:7.1}, {:7.1})  age={:.2}",
                body.name,
                body.mass(),
                body.position.x,
                body.position.y,
                body.age
            );
        }
    }

    println!("\nDemo complete!");
}
