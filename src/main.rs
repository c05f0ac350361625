// src/main.rs
//
// Headless demo: builds a small panel on the default registry, drives it
// the way a user would, and prints what the controls show.
//
// cargo run --features demo
// RUST_LOG=trace shows every set and broadcast.

use tweakable::{Container, TweakOptions, create, default_registry, on_tweak_event, tweak};

fn print_panel(container: &Container) {
    for group in container.groups() {
        println!(
            "  [{:<8}] number={:<6} slider={:<6} reset={}",
            group.label.text,
            group.number.value(),
            group.slider.value(),
            if group.reset.is_disabled() { "disabled" } else { "enabled" }
        );
    }
}

fn main() {
    env_logger::init();

    on_tweak_event(|event| {
        println!("event {:?}: {} -> {}", event.kind, event.tweak.name(), event.tweak);
    });

    // --------------------------------
    // Tweaks
    // --------------------------------

    let size = tweak("Size", 10.0);
    let speed = create("Speed", 0.5, TweakOptions::new().range(0.0, 2.0).step(0.05));
    let again = tweak("Size", 999.0);

    println!("size={} speed={} (duplicate sees {})", size, speed, again);
    println!("area = {}", &size * &size);

    let container = default_registry().container();
    print_panel(&container);

    // --------------------------------
    // Simulated interaction
    // --------------------------------

    let size_controls = container.groups()[0].clone();

    println!("-- drag slider to 25");
    size_controls.slider.input("25");
    println!("area = {}", &size * &size);

    println!("-- programmatic set speed = 1.25");
    speed.set(1.25);
    print_panel(&container);

    println!("-- reset size");
    size_controls.reset.click();
    print_panel(&container);
}
