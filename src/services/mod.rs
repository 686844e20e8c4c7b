pub mod amount;
pub mod chain;
pub mod coin;
pub mod coins;
pub mod metadata;
pub mod renderer;
