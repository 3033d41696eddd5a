//! Self-registration example for singleton-manager.
//!
//! Demonstrates:
//! - Declaring a self-registering type with `singleton!`
//! - Constructors that register the instance they build
//! - The error reported for a type declared under the wrong type
//!
//! Run with: `RUST_LOG=debug cargo run --example self_registration`

use singleton_manager::{define_registry, singleton, RegistryError, Singleton};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

define_registry!(services);

/// Audio mixer shared across the application.
#[derive(Debug)]
struct AudioMixer {
    channels: u8,
}

singleton!(AudioMixer);

impl AudioMixer {
    fn start(channels: u8) -> Result<Arc<Self>, RegistryError> {
        services::register_self(AudioMixer { channels })
    }
}

/// Copy of `AudioMixer` whose declaration was never updated.
#[derive(Debug)]
struct VideoMixer {
    layers: u8,
}

impl Singleton for VideoMixer {
    type Declared = AudioMixer;
}

impl VideoMixer {
    fn start(layers: u8) -> Result<Arc<Self>, RegistryError> {
        services::register_self(VideoMixer { layers })
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== singleton-manager: Self Registration ===\n");

    println!("1. Starting the audio mixer...");
    let mixer = AudioMixer::start(8).unwrap();
    println!("   Registered with {} channels", mixer.channels);

    let looked_up: Arc<AudioMixer> = services::get().unwrap();
    println!("   Lookup returns the same instance: {}", Arc::ptr_eq(&mixer, &looked_up));

    println!("\n2. Starting a second audio mixer...");
    match AudioMixer::start(2) {
        Ok(m) => println!("   Unexpectedly accepted: {:?}", m),
        Err(e) => println!("   Error (expected): {}", e),
    }

    println!("\n3. Starting a mis-declared video mixer...");
    match VideoMixer::start(3) {
        Ok(m) => println!("   Unexpectedly accepted with {} layers", m.layers),
        Err(e) => println!("   Error (expected): {}", e),
    }
    println!(
        "   VideoMixer registered: {}",
        services::has_been_registered::<VideoMixer>()
    );

    println!("\n=== Example Complete ===");
}
