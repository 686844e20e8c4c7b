//! Conformance cases for the coin-list renderer.
//!
//! Each case in `fixtures/coins.json` with a `proto` list is formatted and,
//! unless `error` is set, compared with `text` and parsed back. Cases without
//! a `proto` only parse `text` and expect an error.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use textual_review::{
    Coin, ContextResolver, DenomMetadata, FieldDescriptor, QueryContext, Screen, Textual, Value,
};

#[derive(Debug, Deserialize)]
struct CoinsTestCase {
    proto: Option<Vec<Coin>>,
    metadata: HashMap<String, DenomMetadata>,
    text: String,
    error: bool,
}

fn load_cases() -> Vec<CoinsTestCase> {
    let raw = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/coins.json"))
        .expect("fixture readable");
    serde_json::from_str(&raw).expect("fixture parses")
}

fn context_for(metadata: &HashMap<String, DenomMetadata>) -> QueryContext {
    metadata
        .values()
        .cloned()
        .fold(QueryContext::new(), QueryContext::with_metadata)
}

fn sorted(mut coins: Vec<Coin>) -> Vec<Coin> {
    coins.sort_by(|a, b| a.denom.cmp(&b.denom));
    coins
}

#[tokio::test]
async fn test_coins_json_cases() {
    let textual = Textual::new(Arc::new(ContextResolver));
    let renderer = textual.value_renderer(&FieldDescriptor::coins()).unwrap();

    let cases = load_cases();
    assert!(!cases.is_empty());

    for case in cases {
        let ctx = context_for(&case.metadata);

        let Some(proto) = case.proto else {
            let result = renderer.parse(&ctx, &[Screen::new(case.text.as_str())]).await;
            assert!(case.error, "parse-only case {:?} must expect an error", case.text);
            assert!(result.is_err(), "{:?} parsed as {:?}", case.text, result);
            continue;
        };

        let formatted = renderer.format(&ctx, &Value::Coins(proto.clone())).await;
        if case.error {
            assert!(formatted.is_err(), "{:?} formatted as {:?}", proto, formatted);
            continue;
        }

        let screens = formatted.unwrap();
        assert_eq!(screens.len(), 1);
        assert_eq!(screens[0].text, case.text);

        let parsed = match renderer.parse(&ctx, &screens).await.unwrap() {
            Value::Coins(coins) => coins,
            other => panic!("expected a coin list, got {:?}", other),
        };
        assert_eq!(sorted(parsed), sorted(proto), "{}", case.text);
    }
}
