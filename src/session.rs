use chrono::{DateTime, Utc};
use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::catalog::GameCatalog;
use crate::config::SessionConfig;
use crate::error::{Result, WgnError};
use crate::filter;
use crate::model::{Game, GamesView, ProfileStats, ProfileSummary, SportFilter, UserProfile};
use crate::store::JoinedGamesStore;

/// The main entry point: one user's view of the game catalog.
///
/// `Session` keeps the last catalog snapshot and the [`JoinedGamesStore`]
/// shared by the Home, Games and Profile screens.
///
/// # Examples
///
/// ```
/// # async fn example() -> whogotnext::Result<()> {
/// use whogotnext::{MockCatalog, Session, SessionConfig, SportFilter};
///
/// let mut session = Session::new(MockCatalog::new(), SessionConfig::default())?;
/// session.refresh().await?;
/// session.join_game("1")?;
///
/// let view = session.games_view(Some(SportFilter::All));
/// println!("{} joined", view.sections[0].data.len());
/// # Ok(())
/// # }
/// ```
pub struct Session<C> {
    config: SessionConfig,
    catalog: C,
    games: Vec<Game>,
    /// Games created in this session; they survive a catalog refresh.
    created: Vec<Game>,
    joined: JoinedGamesStore,
    profile: UserProfile,
}

impl<C: GameCatalog> Session<C> {
    /// Create a session with an empty joined set.
    pub fn new(catalog: C, config: SessionConfig) -> Result<Self> {
        Self::with_store(catalog, config, JoinedGamesStore::new())
    }

    /// Create a session around an existing store handle.
    pub fn with_store(
        catalog: C,
        config: SessionConfig,
        joined: JoinedGamesStore,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            games: Vec::new(),
            created: Vec::new(),
            joined,
            profile: UserProfile::default(),
        })
    }

    /// Replace the signed-in user's profile.
    pub fn with_profile(mut self, profile: UserProfile) -> Result<Self> {
        profile.validate()?;
        self.profile = profile;
        Ok(self)
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Another handle to the shared joined-games store.
    pub fn store(&self) -> JoinedGamesStore {
        self.joined.clone()
    }

    /// Re-fetch the catalog. On failure the previous snapshot is kept.
    #[instrument(skip(self), fields(source = %self.catalog.name()))]
    pub async fn refresh(&mut self) -> Result<usize> {
        let games = self.catalog.fetch_games().await?;
        info!(count = games.len(), "catalog refreshed");
        self.games = games;
        Ok(self.games.len())
    }

    /// Games for the Discover feed, in catalog order.
    pub fn discover_feed(&self) -> &[Game] {
        &self.games
    }

    fn find_game(&self, game_id: &str) -> Option<&Game> {
        self.games
            .iter()
            .chain(&self.created)
            .find(|g| g.id == game_id)
    }

    /// Handle the join action for `game_id`.
    ///
    /// The catalog record is copied into the store; the snapshot itself is never
    /// touched. Returns `true` when the game was newly joined.
    #[instrument(skip(self))]
    pub fn join_game(&self, game_id: &str) -> Result<bool> {
        let game = self
            .find_game(game_id)
            .cloned()
            .ok_or_else(|| WgnError::GameNotFound {
                game_id: game_id.to_string(),
            })?;
        self.joined.join(game)
    }

    pub fn leave_game(&self, game_id: &str) -> bool {
        self.joined.leave(game_id)
    }

    /// Organize a new game as the current user.
    ///
    /// `createdBy` is overwritten with the current user id. Ids already used by
    /// the catalog or an earlier created game are rejected.
    #[instrument(skip(self, game), fields(game_id = %game.id))]
    pub fn create_game(&mut self, game: Game) -> Result<Game> {
        let game = game.with_created_by(self.config.current_user_id.clone());
        game.validate()?;
        if self.find_game(&game.id).is_some() {
            return Err(WgnError::validation(
                "id",
                format!("game {} already exists", game.id),
            ));
        }
        self.created.push(game.clone());
        info!(created = self.created.len(), "created game");
        Ok(game)
    }

    /// Games organized by the current user, catalog records first.
    pub fn created_games(&self) -> Vec<Game> {
        let user = &self.config.current_user_id;
        self.games
            .iter()
            .chain(&self.created)
            .filter(|g| g.is_created_by(user))
            .unique_by(|g| g.id.clone())
            .cloned()
            .collect()
    }

    /// Joined and created games, split by ownership.
    ///
    /// Joined games are looked up in the current snapshot first, so ownership
    /// follows the latest catalog data rather than the copy taken at join time.
    pub fn my_games(&self) -> (Vec<Game>, Vec<Game>) {
        let all = self
            .joined
            .get_joined()
            .into_iter()
            .map(|joined| self.find_game(&joined.id).cloned().unwrap_or(joined))
            .chain(self.created_games())
            .unique_by(|g| g.id.clone())
            .collect_vec();
        filter::partition_by_ownership(&all, &self.config.current_user_id)
    }

    /// Everything the Games screen renders for `selection`.
    #[instrument(skip(self))]
    pub fn games_view(&self, selection: Option<SportFilter>) -> GamesView {
        let (joined, created) = self.my_games();
        let fallback = &self.config.fallback_sports;

        let available_sports = filter::derive_available_sports(&joined, &created, fallback);
        let selection =
            filter::resolve_selection(selection, &available_sports, &joined, &created, fallback);
        let sections = filter::build_sections(&joined, &created, &selection);
        debug!(sports = available_sports.len(), %selection, "built games view");

        GamesView {
            available_sports,
            selection,
            sections,
        }
    }

    /// The user's games that have not started yet, joined first.
    pub fn upcoming_games(&self, now: DateTime<Utc>) -> Vec<Game> {
        let (joined, created) = self.my_games();
        let mine = joined.into_iter().chain(created).collect_vec();
        filter::upcoming(&mine, now)
    }

    /// Count for the "You have N upcoming games" summary.
    pub fn upcoming_count(&self, now: DateTime<Utc>) -> usize {
        self.upcoming_games(now).len()
    }

    /// The Profile screen: profile, counters from the user's games, upcoming list.
    ///
    /// `played` counts joined games the user does not host; `hosted` counts
    /// created games.
    pub fn profile_summary(&self, now: DateTime<Utc>) -> ProfileSummary {
        let (joined, created) = self.my_games();
        let stats = ProfileStats {
            played: joined.len(),
            hosted: created.len(),
            friends: self.profile.friends.len(),
        };
        debug!(?stats, "built profile summary");

        ProfileSummary {
            profile: self.profile.clone(),
            stats,
            upcoming_games: self.upcoming_games(now),
        }
    }
}
