use std::env;
use textual_review::{ChainResolver, MetadataResolver, QueryContext, ResolveError};
use tokio::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    let chain_rest_url = env::var("CHAIN_REST_URL")
        .map_err(|_| "CHAIN_REST_URL must be set in .env file")?;
    let denom = env::args().nth(1).unwrap_or_else(|| "uatom".to_string());

    println!("🔍 Testing denomination metadata endpoint...");
    println!(
        "Endpoint (password hidden):\n  {}",
        redact_url(&chain_rest_url)
    );

    println!("\n📡 Resolving {}...", denom);

    let resolver = ChainResolver::new(&chain_rest_url)?;
    let ctx = QueryContext::new().with_timeout(Duration::from_secs(10));

    match resolver.by_base(&ctx, &denom).await {
        Ok(metadata) => {
            println!(
                "✅ SUCCESS! {} displays as {} (exponent {})",
                metadata.base, metadata.display, metadata.exponent
            );
            Ok(())
        }
        Err(e) => {
            println!("❌ Lookup failed!");
            println!("\nError details:");
            println!("  {}", e);

            // Provide helpful suggestions
            match &e {
                ResolveError::NotFound(_) => {
                    println!("\n💡 Suggestions:");
                    println!("  1. Check the base denomination spelling (e.g. uatom, not atom)");
                    println!("  2. The chain may not have registered metadata for this denom");
                }
                ResolveError::DeadlineExceeded | ResolveError::Transport(_) => {
                    println!("\n💡 Suggestions:");
                    println!("  1. Check your internet connection");
                    println!("  2. Verify the node exposes its REST API (usually port 1317)");
                }
                ResolveError::InvalidMetadata(_) => {
                    println!("\n💡 Suggestions:");
                    println!("  1. The display unit is missing from denom_units on chain");
                }
                _ => {}
            }

            Err(format!("Lookup error: {}", e).into())
        }
    }
}

fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("********"));
            }
            parsed.to_string()
        }
        Err(_) => "<invalid CHAIN_REST_URL>".to_string(),
    }
}
