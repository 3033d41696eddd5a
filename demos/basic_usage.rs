//! Basic usage example for singleton-manager.
//!
//! Demonstrates:
//! - Registering values with the strict `register()`
//! - Retrieving values with `get()` (returns `Arc<T>`) and `try_get()`
//! - The errors reported for double registration and missing types
//! - Removing entries with `unregister()` / `try_unregister()`
//!
//! Run with: `RUST_LOG=debug cargo run --example basic_usage`

use singleton_manager::{
    clear, get, get_cloned, has_been_registered, register, try_get, try_unregister, unregister,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
struct Player {
    name: String,
    age: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct AppConfig {
    name: String,
    debug_mode: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== singleton-manager: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Register singletons
    // -------------------------------------------------------------------------
    println!("1. Registering singletons...");

    let player = register(Player {
        name: "Dave".to_string(),
        age: 35,
    })
    .unwrap();
    register(AppConfig {
        name: "MyApp".to_string(),
        debug_mode: true,
    })
    .unwrap();

    println!("   Registered: {:?}", *player);

    // -------------------------------------------------------------------------
    // 2. A second registration of the same type is a wiring bug
    // -------------------------------------------------------------------------
    println!("\n2. Registering Player again...");

    match register(Player {
        name: "James".to_string(),
        age: 24,
    }) {
        Ok(_) => println!("   Unexpectedly accepted"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    // -------------------------------------------------------------------------
    // 3. Lookups
    // -------------------------------------------------------------------------
    println!("\n3. Looking up singletons...");

    let same: Arc<Player> = get().unwrap();
    println!("   get::<Player>() is the registered instance: {}", Arc::ptr_eq(&player, &same));

    let cfg: AppConfig = get_cloned().unwrap();
    println!("   get_cloned::<AppConfig>() = {:?}", cfg);

    println!("   try_get::<Vec<u8>>()      = {:?}", try_get::<Vec<u8>>());
    match get::<Vec<u8>>() {
        Ok(value) => println!("   Found Vec<u8>: {:?}", value),
        Err(e) => println!("   Error (expected): {}", e),
    }

    // -------------------------------------------------------------------------
    // 4. Removal
    // -------------------------------------------------------------------------
    println!("\n4. Removing singletons...");

    let removed = unregister::<Player>().unwrap();
    println!("   Removed {}, still usable through our handle", removed.name);
    println!("   has_been_registered::<Player>() = {}", has_been_registered::<Player>());

    if let Err(e) = unregister::<Player>() {
        println!("   Error (expected): {}", e);
    }
    println!("   try_unregister::<Player>() = {:?}", try_unregister::<Player>());

    clear();

    println!("\n=== Example Complete ===");
}
