use std::env;
use std::path::Path;
use std::sync::Arc;
use textual_review::{
    Coin, FieldDescriptor, QueryContext, Screen, StaticResolver, Textual, Value,
};

const USAGE: &str = "usage:\n  render format <coins.json> <metadata.json>\n  render parse \"<text>\" <metadata.json>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (command, input, metadata_path) = match args.as_slice() {
        [command, input, metadata_path] => (command.as_str(), input, metadata_path),
        _ => return Err(anyhow::anyhow!(USAGE)),
    };

    let resolver = StaticResolver::from_file(Path::new(metadata_path))?;
    println!("🔍 Loaded {} denomination(s) from {}", resolver.len(), metadata_path);

    let textual = Textual::new(Arc::new(resolver));
    let renderer = textual.value_renderer(&FieldDescriptor::coins())?;
    let ctx = QueryContext::new();

    match command {
        "format" => {
            let raw = std::fs::read_to_string(input)?;
            let coins: Vec<Coin> = serde_json::from_str(&raw)?;
            let screens = renderer.format(&ctx, &Value::Coins(coins.clone())).await?;
            for (i, screen) in screens.iter().enumerate() {
                println!("📄 Screen {}: {}", i + 1, screen.text);
            }

            // Confirm the text reads back before anyone reviews it.
            let parsed = match renderer.parse(&ctx, &screens).await? {
                Value::Coins(parsed) => parsed,
                Value::Coin(coin) => vec![coin],
            };
            if !same_coins(&coins, &parsed) {
                println!("❌ Round trip mismatch");
                return Err(anyhow::anyhow!(
                    "round trip changed the coins: {} -> {}",
                    serde_json::to_string(&coins)?,
                    serde_json::to_string(&parsed)?
                ));
            }
            println!("✅ Round trip OK ({} coin(s))", parsed.len());
        }
        "parse" => {
            let value = renderer.parse(&ctx, &[Screen::new(input.as_str())]).await?;
            let coins = match value {
                Value::Coins(coins) => coins,
                Value::Coin(coin) => vec![coin],
            };
            println!("{}", serde_json::to_string_pretty(&coins)?);
        }
        other => {
            return Err(anyhow::anyhow!("unknown command {:?}\n{}", other, USAGE));
        }
    }

    Ok(())
}

// Order is not significant: the text lists coins sorted by denomination.
fn same_coins(expected: &[Coin], actual: &[Coin]) -> bool {
    let mut expected = expected.to_vec();
    let mut actual = actual.to_vec();
    expected.sort_by(|a, b| a.denom.cmp(&b.denom));
    actual.sort_by(|a, b| a.denom.cmp(&b.denom));
    expected == actual
}
