//! Demo entry point: drives the guide bot with scripted world events and
//! in-process collaborators.
mod config;
mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde_json::json;

use config::BotConfig;
use fixtures::{ConsoleTransport, ScriptedGenerator};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = BotConfig::from_env();

    let bot = agent::Agent::builder()
        .config(config.agent.clone())
        .transport(Arc::new(ConsoleTransport))
        .generator(Arc::new(ScriptedGenerator::new(config.generation_delay)))
        .build()?;

    // Events arrive as raw tagged payloads, exactly as a live transport
    // would deliver them.
    bot.handle_raw_event(
        "mapUpdate",
        json!({
            "mapId": "arcade-floor-1",
            "barriers": [
                [4, 4], [5, 4], [6, 4],
                [4, 5], [6, 5],
                [4, 6], [5, 6], [6, 6],
                [10, 2], [10, 3], [10, 4],
            ],
            "terminals": [[5, 5], [12, 12]],
            "spawnPoint": [1, 1],
            "gridSize": 16,
            "cellSize": 32,
        }),
    );
    bot.handle_raw_event(
        "sessionOpened",
        json!({
            "sessionId": "s-1",
            "userName": "ada",
            "challenge": "fizzbuzz",
            "terminal": [5, 5],
        }),
    );

    bot.start();

    // Let the bot wander for a bit, then have ada ask for help.
    tokio::time::sleep(Duration::from_secs(10)).await;
    bot.handle_raw_event(
        "helpRequest",
        json!({
            "requestId": "r-1",
            "targetX": 5,
            "targetY": 5,
            "requesterName": "ada",
            "challenge": "fizzbuzz",
            "code": "for i in 1..=100 { println!(\"{}\", i); }",
        }),
    );

    tokio::time::sleep(config.demo_duration).await;
    bot.shutdown();
    Ok(())
}
