//! The format/parse contract shared by all value renderers, and the registry
//! that picks a renderer from a field's declared type.
//!
//! Renderers form a closed set: dispatch is a match on [`ValueRenderer`], not
//! runtime type inspection. Formatting is a pure function of the value and the
//! metadata visible through the context; parsing accepts only text that
//! formatting could have produced.

use crate::context::QueryContext;
use crate::error::{TextualError, TextualResult};
use crate::models::{Coin, Screen};
use crate::services::coin::{format_coin, parse_coin};
use crate::services::coins::{format_coins, parse_coins};
use crate::services::metadata::MetadataResolver;
use std::sync::Arc;

pub const COIN_TYPE_NAME: &str = "cosmos.base.v1beta1.Coin";

/// Declared type of a field to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub type_name: String,
    pub repeated: bool,
}

impl FieldDescriptor {
    pub fn coin() -> Self {
        Self {
            type_name: COIN_TYPE_NAME.to_string(),
            repeated: false,
        }
    }

    pub fn coins() -> Self {
        Self {
            type_name: COIN_TYPE_NAME.to_string(),
            repeated: true,
        }
    }
}

/// A value flowing through a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Coin(Coin),
    Coins(Vec<Coin>),
}

/// Binds a metadata resolver to the renderers. Built once, then shared
/// read-only between concurrent calls.
#[derive(Clone)]
pub struct Textual {
    resolver: Arc<dyn MetadataResolver>,
}

impl Textual {
    pub fn new(resolver: Arc<dyn MetadataResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &dyn MetadataResolver {
        self.resolver.as_ref()
    }

    pub fn value_renderer(&self, field: &FieldDescriptor) -> TextualResult<ValueRenderer<'_>> {
        match (field.type_name.as_str(), field.repeated) {
            (COIN_TYPE_NAME, false) => Ok(ValueRenderer::Coin(self.resolver())),
            (COIN_TYPE_NAME, true) => Ok(ValueRenderer::Coins(self.resolver())),
            (other, repeated) => Err(TextualError::UnsupportedField(if repeated {
                format!("repeated {}", other)
            } else {
                other.to_string()
            })),
        }
    }
}

#[derive(Clone, Copy)]
pub enum ValueRenderer<'a> {
    Coin(&'a dyn MetadataResolver),
    Coins(&'a dyn MetadataResolver),
}

impl ValueRenderer<'_> {
    pub async fn format(&self, ctx: &QueryContext, value: &Value) -> TextualResult<Vec<Screen>> {
        match (self, value) {
            (ValueRenderer::Coin(resolver), Value::Coin(coin)) => {
                let text = format_coin(*resolver, ctx, coin).await?;
                Ok(vec![Screen::new(text)])
            }
            (ValueRenderer::Coins(resolver), Value::Coins(coins)) => {
                format_coins(*resolver, ctx, coins).await
            }
            (ValueRenderer::Coin(_), _) => Err(TextualError::UnexpectedValue("a single coin")),
            (ValueRenderer::Coins(_), _) => Err(TextualError::UnexpectedValue("a coin list")),
        }
    }

    pub async fn parse(&self, ctx: &QueryContext, screens: &[Screen]) -> TextualResult<Value> {
        match self {
            ValueRenderer::Coin(resolver) => match screens {
                [screen] => Ok(Value::Coin(parse_coin(*resolver, ctx, &screen.text).await?)),
                _ => Err(TextualError::ScreenCount(screens.len())),
            },
            ValueRenderer::Coins(resolver) => {
                Ok(Value::Coins(parse_coins(*resolver, ctx, screens).await?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DenomMetadata;
    use crate::services::metadata::ContextResolver;
    use malachite::Natural;

    fn textual() -> Textual {
        Textual::new(Arc::new(ContextResolver))
    }

    fn ctx() -> QueryContext {
        QueryContext::new().with_metadata(DenomMetadata::new("uatom", "atom", 6))
    }

    #[tokio::test]
    async fn test_coin_field_round_trip() {
        let textual = textual();
        let renderer = textual.value_renderer(&FieldDescriptor::coin()).unwrap();
        let value = Value::Coin(Coin::new("uatom", Natural::from(2_500_000u32)).unwrap());

        let screens = renderer.format(&ctx(), &value).await.unwrap();
        assert_eq!(screens, vec![Screen::new("2.5 atom")]);
        assert_eq!(renderer.parse(&ctx(), &screens).await.unwrap(), value);
    }

    #[tokio::test]
    async fn test_coins_field_round_trip() {
        let textual = textual();
        let renderer = textual.value_renderer(&FieldDescriptor::coins()).unwrap();
        let value = Value::Coins(vec![Coin::new("uatom", Natural::from(7u32)).unwrap()]);

        let screens = renderer.format(&ctx(), &value).await.unwrap();
        assert_eq!(screens[0].text, "0.000007 atom");
        assert_eq!(renderer.parse(&ctx(), &screens).await.unwrap(), value);
    }

    #[tokio::test]
    async fn test_mismatched_value() {
        let textual = textual();
        let renderer = textual.value_renderer(&FieldDescriptor::coin()).unwrap();
        assert_eq!(
            renderer.format(&ctx(), &Value::Coins(vec![])).await,
            Err(TextualError::UnexpectedValue("a single coin"))
        );
    }

    #[test]
    fn test_unknown_field_type() {
        let field = FieldDescriptor {
            type_name: "google.protobuf.Timestamp".to_string(),
            repeated: false,
        };
        assert!(matches!(
            textual().value_renderer(&field),
            Err(TextualError::UnsupportedField(name)) if name == "google.protobuf.Timestamp"
        ));
    }
}
