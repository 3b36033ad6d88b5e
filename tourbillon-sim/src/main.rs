//! Scripted simulator run
//!
//! Boots a world against the virtual shell and plays through the full
//! gesture cycle (twist to launch, idle to park), printing the scene at
//! each milestone. `RUST_LOG=trace` shows every directive.

use log::info;

use tourbillon_core::config::WorldConfig;
use tourbillon_core::math::Fixed32;
use tourbillon_core::state::{TapAxis, World};
use tourbillon_sim::VirtualShell;

fn fixed(value: Fixed32) -> f64 {
    value.raw() as f64 / 65536.0
}

fn print_scene(world: &World, shell: &VirtualShell) {
    let scene = world.scene();
    let values: Vec<String> = scene.digits.iter().map(|d| d.value.to_string()).collect();
    info!(
        "t={:>6}ms mode={:?} digits={} rot={:+.3} cam=({:+.2}, {:+.2}, {:+.2}) redraws={}",
        shell.now_ms(),
        world.mode(),
        values.join(""),
        fixed(scene.camera.rotation_z),
        fixed(scene.camera.position.x),
        fixed(scene.camera.position.y),
        fixed(scene.camera.position.z),
        shell.redraws(),
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut world = World::new(WorldConfig::default());
    let mut shell = VirtualShell::new();

    shell.boot(&mut world);
    print_scene(&world, &shell);

    // Twist into the free-spinning view.
    shell.tap(&mut world, TapAxis::Y);
    shell.run_for(&mut world, 4_000);
    print_scene(&world, &shell);

    // Another twist keeps it spinning for a while.
    shell.tap(&mut world, TapAxis::Y);
    shell.run_for(&mut world, 5_000);
    print_scene(&world, &shell);

    // Hands off: friction drains the spin, inactivity parks the world.
    shell.run_for(&mut world, 30_000);
    print_scene(&world, &shell);

    // Punch in steady swaps the digit skin.
    shell.tap(&mut world, TapAxis::X);
    shell.run_for(&mut world, 1_000);
    print_scene(&world, &shell);
}
