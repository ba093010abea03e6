use crate::errors::Result;
use crate::models::token::{PriceSnapshot, ResolvedSymbol, UserProfile};
use async_trait::async_trait;

/// Base trait for price history sources
#[async_trait]
pub trait SnapshotSource {
    /// Fetch the hourly price snapshots for a resolved symbol.
    /// Returns an ascending series; an empty result is a valid outcome
    /// (the token may not exist yet or its auction is still ongoing).
    async fn fetch_snapshots(&self, symbol: &ResolvedSymbol) -> Result<Vec<PriceSnapshot>>;
}

/// Base trait for user profile sources
#[async_trait]
pub trait ProfileSource {
    /// Fetch display data for a resolved symbol.
    /// Returns `None` when no matching profile exists.
    async fn fetch_profile(&self, symbol: &ResolvedSymbol) -> Result<Option<UserProfile>>;
}
