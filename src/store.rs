use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::Game;

/// The games the current user has joined, shared by every screen of a session.
///
/// Cloning the store hands out another handle to the same set. Mutations are
/// serialized behind the write lock; reads return an owned snapshot so callers
/// never hold the lock while deriving views.
#[derive(Debug, Clone, Default)]
pub struct JoinedGamesStore {
    games: Arc<RwLock<Vec<Game>>>,
}

impl JoinedGamesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joined games in join order.
    pub fn get_joined(&self) -> Vec<Game> {
        self.read().clone()
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.read().iter().any(|g| g.id == game_id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Append `game` unless a game with the same id is already joined.
    ///
    /// Returns `true` when the set changed. A malformed game is rejected before
    /// the lock is taken, so a failed join never mutates the store.
    #[instrument(skip(self, game), fields(game_id = %game.id))]
    pub fn join(&self, game: Game) -> Result<bool> {
        game.validate()?;

        let mut games = self.write();
        if games.iter().any(|g| g.id == game.id) {
            debug!("game already joined");
            return Ok(false);
        }
        games.push(game);
        debug!(joined = games.len(), "joined game");
        Ok(true)
    }

    /// Remove the game with `game_id`. Returns `true` when it was present.
    #[instrument(skip(self))]
    pub fn leave(&self, game_id: &str) -> bool {
        let mut games = self.write();
        let before = games.len();
        games.retain(|g| g.id != game_id);
        let removed = games.len() != before;
        debug!(removed, joined = games.len(), "left game");
        removed
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Game>> {
        // Every mutation leaves the vec consistent, so a poisoned lock is still usable.
        self.games.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Game>> {
        self.games.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use itertools::Itertools;

    use super::*;

    fn game(id: &str, sport: &str) -> Game {
        Game::new(id, sport).unwrap()
    }

    #[test]
    fn test_join_twice_keeps_one_entry() {
        let store = JoinedGamesStore::new();

        assert!(store.join(game("1", "Basketball")).unwrap());
        assert!(!store.join(game("1", "Basketball")).unwrap());

        assert_eq!(store.get_joined().len(), 1);
    }

    #[test]
    fn test_join_preserves_insertion_order() {
        let store = JoinedGamesStore::new();
        for id in ["3", "1", "2"] {
            store.join(game(id, "Soccer")).unwrap();
        }

        let ids: Vec<_> = store.get_joined().into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_repeated_join_leaves_state_unchanged() {
        let store = JoinedGamesStore::new();
        store.join(game("1", "Basketball")).unwrap();
        store.join(game("2", "Soccer")).unwrap();
        let before = store.get_joined();

        store.join(game("2", "Soccer")).unwrap();
        store.join(game("1", "Basketball")).unwrap();

        assert_eq!(store.get_joined(), before);
    }

    #[test]
    fn test_malformed_game_is_rejected_without_mutation() {
        let store = JoinedGamesStore::new();
        store.join(game("1", "Basketball")).unwrap();

        let mut broken = game("2", "Soccer");
        broken.id = String::new();
        let err = store.join(broken).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_leave() {
        let store = JoinedGamesStore::new();
        store.join(game("1", "Basketball")).unwrap();
        store.join(game("2", "Soccer")).unwrap();

        assert!(store.leave("1"));
        assert!(!store.leave("1"));
        assert!(!store.leave("missing"));
        assert!(!store.contains("1"));
        assert!(store.contains("2"));
    }

    #[test]
    fn test_clones_share_state() {
        let home = JoinedGamesStore::new();
        let games_screen = home.clone();

        home.join(game("1", "Basketball")).unwrap();

        assert_eq!(games_screen.len(), 1);
        assert!(!games_screen.is_empty());
    }

    #[test]
    fn test_concurrent_joins_do_not_duplicate() {
        let store = JoinedGamesStore::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                thread::spawn(move || {
                    for id in 0..20 {
                        store.join(game(&id.to_string(), "Soccer")).unwrap();
                        let _ = store.get_joined();
                    }
                    i
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let ids: Vec<_> = store.get_joined().into_iter().map(|g| g.id).collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(ids.iter().unique().count(), 20);
    }
}
