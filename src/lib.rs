//! Shared game-roster state and sport filtering for the WhoGotNext
//! pickup-sports app.
//!
//! A [`Session`] loads games from a [`GameCatalog`], records joins in a
//! [`JoinedGamesStore`] shared across screens, and derives the sectioned
//! Games view through the pure functions in [`filter`].

mod config;
mod error;
mod session;
mod store;

pub mod catalog;
pub mod filter;
pub mod model;

pub use catalog::{CachedCatalog, GameCatalog, HttpCatalog, MockCatalog};
pub use config::SessionConfig;
pub use error::{Result, WgnError};
pub use model::*;
pub use session::Session;
pub use store::JoinedGamesStore;
