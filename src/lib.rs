//! Textual rendering of coin amounts for pre-signing review.
//!
//! Coins are shown in display units (`1.5 atom`) and parsed back into base
//! units (`1500000 uatom`) without loss. Denomination metadata comes from a
//! [`MetadataResolver`] supplied by the caller.

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use context::{CancelHandle, QueryContext};
pub use error::{ResolveError, TextualError, TextualResult};
pub use models::{BankMetadata, Coin, DenomMetadata, DenomUnit, Screen};
pub use services::amount::{format_amount, parse_amount};
pub use services::chain::ChainResolver;
pub use services::coin::{format_coin, parse_coin};
pub use services::coins::{format_coins, parse_coins, EMPTY_COINS_TEXT};
pub use services::metadata::{ContextResolver, MetadataResolver, StaticResolver};
pub use services::renderer::{FieldDescriptor, Textual, Value, ValueRenderer};
