//! Sources of game records.
//!
//! Catalog data is read-only: every fetch hands out owned copies, and joining a
//! game copies it into the [`JoinedGamesStore`](crate::JoinedGamesStore).

mod cached;
mod http;
mod mock;

pub use cached::CachedCatalog;
pub use http::HttpCatalog;
pub use mock::MockCatalog;

use crate::error::Result;
use crate::model::Game;

/// Something that can list the games on offer.
#[allow(async_fn_in_trait)]
pub trait GameCatalog {
    /// Short name used in logs and `SourceUnavailable` errors.
    fn name(&self) -> &str;

    /// All games currently on offer, in feed order.
    async fn fetch_games(&self) -> Result<Vec<Game>>;
}
