//! Live stats feed demo
//!
//! Run with: cargo run --example stats_feed
//!
//! Seeds the store with four users, spawns the periodic stats generator,
//! and consumes the snapshot stream from two independent subscribers; the
//! second joins late and first catches up from the replay buffer. A few of
//! the composition pipelines run against the same store along the way.

use std::sync::Arc;
use std::time::Duration;

use userhub::{
    GeneratorConfig, RandomSampler, StatsGenerator, StatsHub, UserService, UserStore,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let store = Arc::new(UserStore::seeded());
    let hub = Arc::new(StatsHub::new());

    let generator = StatsGenerator::with_config(
        Arc::clone(&store),
        Arc::clone(&hub),
        RandomSampler,
        GeneratorConfig::default().interval(Duration::from_secs(2)),
    );
    let ticker = generator.spawn();

    // First subscriber sees everything live
    let mut early = hub.subscribe().await;
    println!("--- early subscriber ---");
    for _ in 0..3 {
        if let Some(snapshot) = early.recv().await {
            println!("early: {}", serde_json::to_string(&snapshot).unwrap());
        }
    }

    // Late joiner: replayed snapshots arrive immediately, then live ones
    let mut late = hub.subscribe().await;
    println!("--- late subscriber (replay then live) ---");
    for _ in 0..4 {
        if let Some(snapshot) = late.recv().await {
            println!("late:  {}", serde_json::to_string(&snapshot).unwrap());
        }
    }

    ticker.abort();

    // A few composition pipelines over the same store
    let service = UserService::new(store);

    println!("--- paced full scan ---");
    let mut users = service.stream_all().await;
    while let Some(user) = users.recv().await {
        println!("user: {} <{}>", user.name, user.contact);
    }

    println!("--- zip with roles ---");
    for pair in service.users_with_roles().await {
        println!("{pair}");
    }

    println!("--- merged (fast partition first) ---");
    let mut merged = service.merged().await;
    while let Some(user) = merged.recv().await {
        println!("merged: {}", user.name);
    }

    println!("--- fallback on a missing id ---");
    let user = service.get_user_or_default("999").await;
    println!("fallback: {} <{}>", user.name, user.contact);
}
