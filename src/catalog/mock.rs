use tracing::{debug, instrument};

use crate::catalog::GameCatalog;
use crate::error::{Result, WgnError};
use crate::model::{Game, GameStatus, Participant};

/// In-memory catalog serving a fixed list of games.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    games: Vec<Game>,
    available: bool,
}

impl MockCatalog {
    /// The demo feed shown on the Discover screen.
    pub fn new() -> Self {
        Self::with_games(demo_games())
    }

    pub fn with_games(games: Vec<Game>) -> Self {
        Self {
            games,
            available: true,
        }
    }

    /// A catalog whose every fetch fails.
    pub fn unavailable() -> Self {
        Self {
            games: Vec::new(),
            available: false,
        }
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl GameCatalog for MockCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    #[instrument(skip(self))]
    async fn fetch_games(&self) -> Result<Vec<Game>> {
        if !self.available {
            return Err(WgnError::unavailable(self.name(), "mock source switched off"));
        }
        debug!(count = self.games.len(), "serving mock games");
        Ok(self.games.clone())
    }
}

fn participant(id: &str, avatar_url: &str) -> Participant {
    Participant {
        id: id.to_string(),
        avatar_url: Some(avatar_url.to_string()),
    }
}

fn demo_games() -> Vec<Game> {
    vec![
        Game {
            id: "1".to_string(),
            sport: "Basketball".to_string(),
            location: "Court 2".to_string(),
            date_time: "Today 6:00 PM".to_string(),
            starts_at: None,
            roster: vec![
                participant("u1", "https://randomuser.me/api/portraits/men/1.jpg"),
                participant("u2", "https://randomuser.me/api/portraits/women/2.jpg"),
            ],
            max_players: Some(10),
            status: Some(GameStatus::Open),
            created_by: None,
        },
        Game {
            id: "2".to_string(),
            sport: "Soccer".to_string(),
            location: "Central Turf".to_string(),
            date_time: "Tomorrow 4:00 PM".to_string(),
            starts_at: None,
            roster: vec![participant(
                "u3",
                "https://randomuser.me/api/portraits/men/3.jpg",
            )],
            max_players: Some(14),
            status: Some(GameStatus::Full),
            created_by: None,
        },
        Game {
            id: "3".to_string(),
            sport: "Flag Football".to_string(),
            location: "Field 1".to_string(),
            date_time: "Sat 2:00 PM".to_string(),
            starts_at: None,
            roster: Vec::new(),
            max_players: None,
            status: None,
            created_by: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_feed() {
        let games = MockCatalog::new().fetch_games().await.unwrap();

        assert_eq!(games.len(), 3);
        assert!(games.iter().all(|g| g.validate().is_ok()));
        assert_eq!(games[0].sport, "Basketball");
        assert_eq!(games[0].roster.len(), 2);
        assert_eq!(games[1].effective_status(), Some(GameStatus::Full));
        assert!(games[2].roster.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_returns_copies() {
        let catalog = MockCatalog::new();
        let mut first = catalog.fetch_games().await.unwrap();
        first[0].roster.clear();

        let second = catalog.fetch_games().await.unwrap();
        assert_eq!(second[0].roster.len(), 2);
    }

    #[tokio::test]
    async fn test_unavailable() {
        let err = MockCatalog::unavailable().fetch_games().await.unwrap_err();
        assert!(matches!(err, WgnError::SourceUnavailable { .. }));
    }
}
