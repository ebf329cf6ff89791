//! Basic example demonstrating simple GET and POST requests.
//!
//! This example shows how to:
//! - Create a client with a custom default timeout
//! - Make GET requests and read typed data
//! - Describe a POST request with the request builder
//! - Dispatch on the response category
//!
//! Run with: `cargo run --example basic_call`

use courier::{handle_response, Client, Config, Error, HttpMethod, RequestSpec, ResponseCallbacks};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    #[serde(rename = "userId")]
    user_id: u32,
    id: u32,
    title: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct NewPost {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u32,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("courier=debug,basic_call=info")
        .init();

    let client = Client::builder()
        .config(Config::default().with_default_timeout(Duration::from_secs(10)))
        .build()?;

    println!("=== GET Request Example ===");
    let response = client
        .get::<Post>("https://jsonplaceholder.typicode.com/posts/1")
        .await?;

    if let Some(post) = &response.data {
        println!("Post ID: {}", post.id);
        println!("Title: {}", post.title);
    }
    println!("Status: {} ({})", response.status, response.category);
    println!("Request latency: {:?}", response.latency);
    println!();

    println!("=== POST Request Example ===");
    let new_post = NewPost {
        title: "My New Post".to_string(),
        body: "This is the content of my new post!".to_string(),
        user_id: 1,
    };

    let spec = RequestSpec::builder()
        .url("https://jsonplaceholder.typicode.com/posts")
        .method(HttpMethod::Post)
        .header("Accept", "application/json")
        .json_body(&new_post)?
        .timeout(Duration::from_secs(5))
        .build();
    let response = client.execute::<Post>(spec).await?;

    handle_response(
        &response,
        ResponseCallbacks::new()
            .on_success(|post: &Post| println!("Created post ID: {}", post.id))
            .on_client_error(|r| println!("Rejected: {}", r.raw_body))
            .on_server_error(|r| println!("Server failed with {}", r.status)),
    );
    println!();

    println!("=== Accessing Response Metadata ===");
    println!("Raw response length: {} bytes", response.raw_body.len());
    println!("Content-Type: {:?}", response.header("content-type"));

    Ok(())
}
