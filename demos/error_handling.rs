//! Example demonstrating error handling.
//!
//! This example shows how to:
//! - Tell HTTP error statuses (data) apart from failures
//! - Access raw response data when decoding fails
//! - Recognize timeouts and connection failures
//! - Cancel a request that takes too long
//!
//! Run with: `cargo run --example error_handling`

use courier::{Client, Error, RequestSpec};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    id: u32,
    title: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("courier=info")
        .init();

    let client = Client::new()?;

    println!("=== Example 1: HTTP Error Statuses Are Data ===");
    match client
        .get::<Post>("https://jsonplaceholder.typicode.com/posts/999999")
        .await
    {
        Ok(response) if response.is_client_error() => {
            println!("Client error!");
            println!("  Status: {}", response.status);
            println!("  Category: {}", response.category);
            println!("  Raw response: {}", response.raw_body);
            println!("  Content-Type: {:?}", response.header("content-type"));
        }
        Ok(response) => println!("Got: {:?}", response.data),
        Err(e) => println!("Failure: {}", e),
    }
    println!();

    println!("=== Example 2: Handling Deserialization Errors ===");
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct WrongSchema {
        nonexistent_field: String,
    }

    match client
        .get::<WrongSchema>("https://jsonplaceholder.typicode.com/posts/1")
        .await
    {
        Ok(_) => println!("Unexpected success"),
        Err(Error::Parsing {
            raw_response,
            source,
            status,
        }) => {
            println!("Deserialization Failed!");
            println!("  Status: {}", status);
            println!("  Serde error: {}", source);
            println!(
                "  Raw response (first 200 chars): {}",
                raw_response.chars().take(200).collect::<String>()
            );
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 3: Handling Network Errors ===");
    match client
        .get::<serde_json::Value>("https://this-domain-does-not-exist-12345.com/")
        .await
    {
        Ok(_) => println!("Unexpected success"),
        Err(e) if e.is_connection() => println!("Connection failed: {}", e),
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 4: Timeouts and Cancellation ===");
    let spec = RequestSpec::builder()
        .url("https://httpbin.org/delay/5")
        .timeout(Duration::from_millis(500))
        .build();
    match client.execute_text(spec).await {
        Err(Error::Timeout { timeout, .. }) => println!("Timed out after {:?}", timeout),
        other => println!("Unexpected: {:?}", other.map(|r| r.status)),
    }

    let spec = RequestSpec::builder()
        .url("https://httpbin.org/delay/5")
        .build();
    let result = client
        .execute_with_cancel::<String, _>(spec, tokio::time::sleep(Duration::from_millis(200)))
        .await;
    match result {
        Err(e) if e.is_cancelled() => println!("Cancelled before the server answered"),
        other => println!("Unexpected: {:?}", other.map(|r| r.status)),
    }

    Ok(())
}
