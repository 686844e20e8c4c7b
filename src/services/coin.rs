use crate::context::QueryContext;
use crate::error::{TextualError, TextualResult};
use crate::models::Coin;
use crate::services::amount::{format_amount, parse_amount};
use crate::services::metadata::MetadataResolver;
use crate::utils::validate_denom;
use tracing::trace;

/// Render one coin as `<amount> <display-denom>`.
pub async fn format_coin(
    resolver: &dyn MetadataResolver,
    ctx: &QueryContext,
    coin: &Coin,
) -> TextualResult<String> {
    validate_denom(&coin.denom)?;
    let metadata = resolver.by_base(ctx, &coin.denom).await?;
    metadata.validate()?;
    let text = format!(
        "{} {}",
        format_amount(&coin.amount, metadata.exponent),
        metadata.display
    );
    trace!("{} {} -> {:?}", coin.amount, coin.denom, text);
    Ok(text)
}

/// Inverse of [`format_coin`].
pub async fn parse_coin(
    resolver: &dyn MetadataResolver,
    ctx: &QueryContext,
    text: &str,
) -> TextualResult<Coin> {
    let (amount_text, display) = text
        .rsplit_once(' ')
        .filter(|(amount, display)| !amount.is_empty() && !display.is_empty())
        .ok_or_else(|| TextualError::MalformedCoinText(text.to_string()))?;

    let metadata = resolver.by_display(ctx, display).await?;
    metadata.validate()?;
    let amount = parse_amount(amount_text, metadata.exponent)?;
    Ok(Coin {
        denom: metadata.base,
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::models::DenomMetadata;
    use crate::services::metadata::ContextResolver;
    use malachite::Natural;
    use std::str::FromStr;

    fn atom_ctx() -> QueryContext {
        QueryContext::new().with_metadata(DenomMetadata::new("uatom", "atom", 6))
    }

    fn coin(denom: &str, amount: &str) -> Coin {
        Coin::new(denom, Natural::from_str(amount).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_format_coin() {
        let text = format_coin(&ContextResolver, &atom_ctx(), &coin("uatom", "1500000"))
            .await
            .unwrap();
        assert_eq!(text, "1.5 atom");
    }

    #[tokio::test]
    async fn test_format_coin_zero_amount() {
        let text = format_coin(&ContextResolver, &atom_ctx(), &coin("uatom", "0"))
            .await
            .unwrap();
        assert_eq!(text, "0 atom");
    }

    #[tokio::test]
    async fn test_format_coin_missing_metadata() {
        let result = format_coin(&ContextResolver, &atom_ctx(), &coin("uosmo", "1")).await;
        assert_eq!(
            result,
            Err(TextualError::MetadataNotFound {
                denom: "uosmo".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_format_coin_rejects_multi_word_display() {
        let ctx = QueryContext::new().with_metadata(DenomMetadata::new("uatom", "cosmos atom", 6));
        assert!(matches!(
            format_coin(&ContextResolver, &ctx, &coin("uatom", "1500000")).await,
            Err(TextualError::Resolver(ResolveError::InvalidMetadata(_)))
        ));
    }

    #[tokio::test]
    async fn test_format_coin_rejects_huge_exponent() {
        let ctx = QueryContext::new().with_metadata(DenomMetadata::new("uatom", "atom", u32::MAX));
        assert!(matches!(
            format_coin(&ContextResolver, &ctx, &coin("uatom", "1")).await,
            Err(TextualError::Resolver(ResolveError::InvalidMetadata(_)))
        ));
    }

    #[tokio::test]
    async fn test_parse_coin() {
        let parsed = parse_coin(&ContextResolver, &atom_ctx(), "1'000.000001 atom")
            .await
            .unwrap();
        assert_eq!(parsed, coin("uatom", "1000000001"));
    }

    #[tokio::test]
    async fn test_parse_coin_without_space() {
        for text in ["1atom", "", " atom", "1 "] {
            assert_eq!(
                parse_coin(&ContextResolver, &atom_ctx(), text).await,
                Err(TextualError::MalformedCoinText(text.to_string())),
                "{text:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_parse_coin_double_space() {
        assert_eq!(
            parse_coin(&ContextResolver, &atom_ctx(), "1  atom").await,
            Err(TextualError::MalformedNumber("1 ".to_string()))
        );
    }

    #[tokio::test]
    async fn test_parse_coin_base_denom_is_not_display() {
        assert_eq!(
            parse_coin(&ContextResolver, &atom_ctx(), "1500000 uatom").await,
            Err(TextualError::MetadataNotFound {
                denom: "uatom".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_parse_coin_precision() {
        assert!(matches!(
            parse_coin(&ContextResolver, &atom_ctx(), "0.0000001 atom").await,
            Err(TextualError::PrecisionExceeded { exponent: 6, .. })
        ));
    }

    #[tokio::test]
    async fn test_cancelled_lookup_aborts() {
        let (ctx, handle) = atom_ctx().with_cancel();
        handle.cancel();
        assert_eq!(
            format_coin(&ContextResolver, &ctx, &coin("uatom", "1")).await,
            Err(TextualError::Resolver(ResolveError::Cancelled))
        );
    }
}
