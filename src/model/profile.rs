use serde::{Deserialize, Serialize};

use super::Game;
use crate::error::{Result, WgnError};

/// Highest XP value; the profile bar is drawn as a percentage.
pub const MAX_XP: u8 = 100;

/// Someone on the user's friends list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "avatar")]
    pub avatar_url: Option<String>,
}

/// The signed-in user as shown on the Profile screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub username: String,
    #[serde(alias = "avatar")]
    pub avatar_url: Option<String>,
    pub bio: String,
    pub badges: Vec<String>,
    pub xp: u8,
    pub friends: Vec<Friend>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            username: "@me".to_string(),
            avatar_url: None,
            bio: String::new(),
            badges: Vec::new(),
            xp: 0,
            friends: Vec::new(),
        }
    }
}

impl UserProfile {
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn with_badges<I, S>(mut self, badges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.badges = badges.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_xp(mut self, xp: u8) -> Self {
        self.xp = xp;
        self
    }

    pub fn with_friends(mut self, friends: Vec<Friend>) -> Self {
        self.friends = friends;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(WgnError::validation("name", "profile name is missing"));
        }
        if self.xp > MAX_XP {
            return Err(WgnError::validation(
                "xp",
                format!("{} is above {MAX_XP}", self.xp),
            ));
        }
        if self.friends.iter().any(|f| f.id.trim().is_empty()) {
            return Err(WgnError::validation("friends", "friend id is missing"));
        }
        Ok(())
    }
}

/// Counters on the Profile screen header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub played: usize,
    pub hosted: usize,
    pub friends: usize,
}

/// Everything the Profile screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub profile: UserProfile,
    pub stats: ProfileStats,
    pub upcoming_games: Vec<Game>,
}
