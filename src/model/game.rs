use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use tracing::warn;

use crate::error::{Result, WgnError};

/// Fill state of a game as shown on its status badge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, strum_macros::Display,
)]
pub enum GameStatus {
    Open,
    Full,
    #[strum(serialize = "In-Progress")]
    #[serde(rename = "In-Progress")]
    InProgress,
}

/// A player attached to a game roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub avatar_url: Option<String>,
}

/// A validated pickup game.
///
/// Built once at the ingestion boundary through [`Game::try_from`] on a
/// [`GameRecord`]; everything downstream trusts the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub sport: String,
    pub location: String,
    pub date_time: String,
    pub starts_at: Option<DateTime<Utc>>,
    /// In join order.
    pub roster: Vec<Participant>,
    pub max_players: Option<u32>,
    pub status: Option<GameStatus>,
    pub created_by: Option<String>,
}

impl Game {
    /// Create a game with the required fields and everything else empty.
    pub fn new(id: impl Into<String>, sport: impl Into<String>) -> Result<Self> {
        let game = Self {
            id: id.into(),
            sport: sport.into(),
            location: String::new(),
            date_time: String::new(),
            starts_at: None,
            roster: Vec::new(),
            max_players: None,
            status: None,
            created_by: None,
        };
        game.validate()?;
        Ok(game)
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_date_time(mut self, date_time: impl Into<String>) -> Self {
        self.date_time = date_time.into();
        self
    }

    pub fn with_starts_at(mut self, starts_at: DateTime<Utc>) -> Self {
        self.starts_at = Some(starts_at);
        self
    }

    pub fn with_roster(mut self, roster: Vec<Participant>) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_max_players(mut self, max_players: u32) -> Self {
        self.max_players = Some(max_players);
        self
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_created_by(mut self, user_id: impl Into<String>) -> Self {
        self.created_by = Some(user_id.into());
        self
    }

    /// Check the invariants every stored game must hold.
    ///
    /// Fields are public, so the store re-checks before accepting a game.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(WgnError::validation("id", "game id is missing"));
        }
        if self.sport.trim().is_empty() {
            return Err(WgnError::validation(
                "sport",
                format!("game {} has no sport", self.id),
            ));
        }
        if self.max_players == Some(0) {
            return Err(WgnError::validation(
                "maxPlayers",
                format!("game {} has zero capacity", self.id),
            ));
        }
        Ok(())
    }

    /// The explicit status, or one derived from roster size against capacity.
    pub fn effective_status(&self) -> Option<GameStatus> {
        self.status.or_else(|| {
            self.max_players.map(|max| {
                if self.roster.len() >= max as usize {
                    GameStatus::Full
                } else {
                    GameStatus::Open
                }
            })
        })
    }

    /// Remaining capacity, if the game has one.
    pub fn open_slots(&self) -> Option<u32> {
        self.max_players
            .map(|max| max.saturating_sub(self.roster.len() as u32))
    }

    pub fn is_created_by(&self, user_id: &str) -> bool {
        self.created_by.as_deref() == Some(user_id)
    }
}

/// A participant as it arrives in a game feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub id: Option<String>,
    #[serde(alias = "avatar")]
    pub avatar_url: Option<String>,
}

/// A game as it arrives in a game feed, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: Option<String>,
    pub sport: Option<String>,
    pub location: Option<String>,
    pub date_time: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub roster: Option<Vec<ParticipantRecord>>,
    pub max_players: Option<u32>,
    pub status: Option<String>,
    pub created_by: Option<String>,
}

impl TryFrom<GameRecord> for Game {
    type Error = WgnError;

    fn try_from(record: GameRecord) -> Result<Self> {
        let id = record
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| WgnError::validation("id", "game id is missing"))?;

        let sport = record
            .sport
            .map(|sport| sport.trim().to_string())
            .filter(|sport| !sport.is_empty())
            .ok_or_else(|| WgnError::validation("sport", format!("game {id} has no sport")))?;

        let status = record
            .status
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim().parse::<GameStatus>().map_err(|_| {
                    WgnError::validation("status", format!("game {id} has unknown status {s:?}"))
                })
            })
            .transpose()?;

        let roster = record
            .roster
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| match p.id.filter(|pid| !pid.trim().is_empty()) {
                Some(pid) => Some(Participant {
                    id: pid,
                    avatar_url: p.avatar_url.filter(|url| !url.is_empty()),
                }),
                None => {
                    warn!(game_id = %id, "dropping roster entry without id");
                    None
                }
            })
            .collect();

        let game = Self {
            id,
            sport,
            location: record.location.unwrap_or_default(),
            date_time: record.date_time.unwrap_or_default(),
            starts_at: record.starts_at,
            roster,
            max_players: record.max_players,
            status,
            created_by: record.created_by.filter(|c| !c.is_empty()),
        };
        game.validate()?;
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> GameRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_absent_fields_default_safely() {
        let game = Game::try_from(record(r#"{"id": "1", "sport": "Basketball"}"#)).unwrap();

        assert!(game.roster.is_empty());
        assert_eq!(game.status, None);
        assert_eq!(game.max_players, None);
        assert_eq!(game.created_by, None);
        assert_eq!(game.effective_status(), None);
    }

    #[test]
    fn test_full_record() {
        let game = Game::try_from(record(
            r#"{
                "id": "2",
                "sport": "Soccer",
                "location": "Central Turf",
                "dateTime": "Tomorrow 4:00 PM",
                "startsAt": "2026-10-18T16:00:00Z",
                "roster": [{"id": "u3", "avatar": "https://example.com/u3.jpg"}],
                "maxPlayers": 14,
                "status": "In-Progress",
                "createdBy": "me"
            }"#,
        ))
        .unwrap();

        assert_eq!(game.location, "Central Turf");
        assert_eq!(game.date_time, "Tomorrow 4:00 PM");
        assert!(game.starts_at.is_some());
        assert_eq!(game.roster.len(), 1);
        assert_eq!(
            game.roster[0].avatar_url.as_deref(),
            Some("https://example.com/u3.jpg")
        );
        assert_eq!(game.status, Some(GameStatus::InProgress));
        assert_eq!(game.open_slots(), Some(13));
        assert!(game.is_created_by("me"));
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let err = Game::try_from(record(r#"{"sport": "Basketball"}"#)).unwrap_err();
        assert!(err.is_validation());

        let err = Game::try_from(record(r#"{"id": "  ", "sport": "Basketball"}"#)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err =
            Game::try_from(record(r#"{"id": "1", "sport": "Soccer", "status": "Maybe"}"#))
                .unwrap_err();
        assert!(matches!(err, WgnError::Validation { field: "status", .. }));
    }

    #[test]
    fn test_roster_entries_without_id_are_dropped() {
        let game = Game::try_from(record(
            r#"{"id": "1", "sport": "Soccer", "roster": [{"avatar": "x"}, {"id": "u1", "avatar": ""}]}"#,
        ))
        .unwrap();

        assert_eq!(game.roster.len(), 1);
        assert_eq!(game.roster[0].id, "u1");
        assert_eq!(game.roster[0].avatar_url, None);
    }

    #[test]
    fn test_effective_status_derived_from_capacity() {
        let players = vec![
            Participant {
                id: "u1".into(),
                avatar_url: None,
            },
            Participant {
                id: "u2".into(),
                avatar_url: None,
            },
        ];
        let full = Game::new("1", "Basketball")
            .unwrap()
            .with_roster(players.clone())
            .with_max_players(2);
        assert_eq!(full.effective_status(), Some(GameStatus::Full));
        assert_eq!(full.open_slots(), Some(0));

        let open = full.clone().with_max_players(10);
        assert_eq!(open.effective_status(), Some(GameStatus::Open));

        let explicit = open.with_status(GameStatus::InProgress);
        assert_eq!(explicit.effective_status(), Some(GameStatus::InProgress));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(Game::try_from(record(r#"{"id": "1", "sport": "Soccer", "maxPlayers": 0}"#))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(GameStatus::InProgress.to_string(), "In-Progress");
        assert_eq!("Full".parse::<GameStatus>().unwrap(), GameStatus::Full);
    }
}
