//! Simple test harness for the recommendation service.
//!
//! This binary exercises the end-to-end pipeline by sending one sample
//! payload through a running scoring service and printing the envelope.

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use tracing::info;

use catalog::SubjectCatalog;
use server::RecommendationService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,pipeline=debug,scorer_client=debug")
        .init();

    info!("Starting career recommendation test harness");

    let catalog = Arc::new(SubjectCatalog::default());
    info!("Subject catalog holds {} subjects", catalog.len());

    let scorer_addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:50051".to_string());
    info!("Connecting to scoring service at {}", scorer_addr);
    let service = RecommendationService::connect(catalog, scorer_addr).await?;
    info!(
        "Connected; model declares {} feature columns and {} career classes",
        service.schema().num_features(),
        service.schema().num_classes()
    );

    let payload = json!({
        "subjects": ["Mathematics", "Physics", "Computer Science"],
        "interests": {"1": "yes", "17": "yes", "30": "yes"}
    });

    let response = service.handle(&payload).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
