//! Rendering of coin lists.
//!
//! A list renders as a single screen, coins joined with `", "` in ascending
//! base-denomination order so equal lists always produce the same text. The
//! empty list renders as the placeholder [`EMPTY_COINS_TEXT`].

use crate::context::QueryContext;
use crate::error::{TextualError, TextualResult};
use crate::models::{Coin, Screen};
use crate::services::coin::{format_coin, parse_coin};
use crate::services::metadata::MetadataResolver;
use std::collections::HashSet;
use tracing::debug;

pub const COIN_SEPARATOR: &str = ", ";
pub const EMPTY_COINS_TEXT: &str = "zero";

pub async fn format_coins(
    resolver: &dyn MetadataResolver,
    ctx: &QueryContext,
    coins: &[Coin],
) -> TextualResult<Vec<Screen>> {
    ensure_unique_denoms(coins)?;

    if coins.is_empty() {
        return Ok(vec![Screen::new(EMPTY_COINS_TEXT)]);
    }

    let mut sorted: Vec<&Coin> = coins.iter().collect();
    sorted.sort_by(|a, b| a.denom.as_bytes().cmp(b.denom.as_bytes()));

    let mut parts = Vec::with_capacity(sorted.len());
    for coin in sorted {
        parts.push(format_coin(resolver, ctx, coin).await?);
    }

    debug!("Formatted {} coin(s) via {} metadata", parts.len(), resolver.source());
    Ok(vec![Screen::new(parts.join(COIN_SEPARATOR))])
}

pub async fn parse_coins(
    resolver: &dyn MetadataResolver,
    ctx: &QueryContext,
    screens: &[Screen],
) -> TextualResult<Vec<Coin>> {
    let text = match screens {
        [screen] => screen.text.as_str(),
        _ => return Err(TextualError::ScreenCount(screens.len())),
    };

    if text == EMPTY_COINS_TEXT {
        return Ok(Vec::new());
    }

    let mut coins = Vec::new();
    for part in text.split(COIN_SEPARATOR) {
        coins.push(parse_coin(resolver, ctx, part).await?);
    }

    // Two display names may resolve to the same base denomination.
    ensure_unique_denoms(&coins)?;

    debug!("Parsed {} coin(s) via {} metadata", coins.len(), resolver.source());
    Ok(coins)
}

fn ensure_unique_denoms(coins: &[Coin]) -> TextualResult<()> {
    let mut seen = HashSet::with_capacity(coins.len());
    for coin in coins {
        if !seen.insert(coin.denom.as_str()) {
            return Err(TextualError::DuplicateDenomination(coin.denom.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DenomMetadata;
    use crate::services::metadata::ContextResolver;
    use malachite::Natural;
    use std::str::FromStr;

    fn ctx() -> QueryContext {
        QueryContext::new()
            .with_metadata(DenomMetadata::new("uatom", "atom", 6))
            .with_metadata(DenomMetadata::new("uosmo", "osmo", 6))
    }

    fn coin(denom: &str, amount: &str) -> Coin {
        Coin::new(denom, Natural::from_str(amount).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_format_single_coin_list() {
        let screens = format_coins(&ContextResolver, &ctx(), &[coin("uatom", "1500000")])
            .await
            .unwrap();
        assert_eq!(screens, vec![Screen::new("1.5 atom")]);
    }

    #[tokio::test]
    async fn test_format_sorts_by_denom() {
        let coins = [coin("uosmo", "2000000"), coin("uatom", "1000000")];
        let screens = format_coins(&ContextResolver, &ctx(), &coins).await.unwrap();
        assert_eq!(screens[0].text, "1 atom, 2 osmo");

        let reversed = [coins[1].clone(), coins[0].clone()];
        let again = format_coins(&ContextResolver, &ctx(), &reversed).await.unwrap();
        assert_eq!(screens, again);
    }

    #[tokio::test]
    async fn test_format_keeps_zero_amounts() {
        let coins = [coin("uatom", "0"), coin("uosmo", "1")];
        let screens = format_coins(&ContextResolver, &ctx(), &coins).await.unwrap();
        assert_eq!(screens[0].text, "0 atom, 0.000001 osmo");
    }

    #[tokio::test]
    async fn test_format_duplicate_denom() {
        let coins = [coin("uatom", "1"), coin("uatom", "2")];
        assert_eq!(
            format_coins(&ContextResolver, &ctx(), &coins).await,
            Err(TextualError::DuplicateDenomination("uatom".to_string()))
        );
    }

    #[tokio::test]
    async fn test_duplicate_checked_before_lookup() {
        let coins = [coin("unknown", "1"), coin("unknown", "2")];
        assert_eq!(
            format_coins(&ContextResolver, &QueryContext::new(), &coins).await,
            Err(TextualError::DuplicateDenomination("unknown".to_string()))
        );
    }

    #[tokio::test]
    async fn test_format_fails_whole_list_on_missing_metadata() {
        let coins = [coin("uatom", "1"), coin("ujuno", "1")];
        assert_eq!(
            format_coins(&ContextResolver, &ctx(), &coins).await,
            Err(TextualError::MetadataNotFound {
                denom: "ujuno".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_empty_list_placeholder() {
        let screens = format_coins(&ContextResolver, &ctx(), &[]).await.unwrap();
        assert_eq!(screens, vec![Screen::new(EMPTY_COINS_TEXT)]);
        let coins = parse_coins(&ContextResolver, &ctx(), &screens).await.unwrap();
        assert!(coins.is_empty());
    }

    #[tokio::test]
    async fn test_parse_list() {
        let screens = [Screen::new("1 atom, 2 osmo")];
        let coins = parse_coins(&ContextResolver, &ctx(), &screens).await.unwrap();
        assert_eq!(coins, vec![coin("uatom", "1000000"), coin("uosmo", "2000000")]);
    }

    #[tokio::test]
    async fn test_parse_requires_one_screen() {
        assert_eq!(
            parse_coins(&ContextResolver, &ctx(), &[]).await,
            Err(TextualError::ScreenCount(0))
        );
        let two = [Screen::new("1 atom"), Screen::new("2 osmo")];
        assert_eq!(
            parse_coins(&ContextResolver, &ctx(), &two).await,
            Err(TextualError::ScreenCount(2))
        );
    }

    #[tokio::test]
    async fn test_parse_rejects_bad_separators() {
        for text in ["1 atom,2 osmo", "1 atom , 2 osmo", "1 atom, ", "1 atom,  2 osmo"] {
            let result = parse_coins(&ContextResolver, &ctx(), &[Screen::new(text)]).await;
            assert!(result.is_err(), "{text:?} parsed as {result:?}");
        }
    }

    #[tokio::test]
    async fn test_parse_detects_aliased_duplicates() {
        let ctx = ctx().with_metadata(DenomMetadata::new("uatom", "atomz", 6));
        let screens = [Screen::new("1 atom, 2 atomz")];
        assert_eq!(
            parse_coins(&ContextResolver, &ctx, &screens).await,
            Err(TextualError::DuplicateDenomination("uatom".to_string()))
        );
    }
}
