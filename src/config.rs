use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WgnError};
use crate::filter::DEFAULT_FALLBACK_SPORTS;

/// Settings for a [`Session`](crate::Session).
///
/// Every field has a default, so a partial JSON document is enough.
///
/// ```
/// use whogotnext::SessionConfig;
///
/// let config = SessionConfig::from_json_str(r#"{"currentUserId": "u42"}"#).unwrap();
/// assert_eq!(config.current_user_id, "u42");
/// assert_eq!(config.fallback_sports.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Marks games whose `createdBy` equals it as created by the user.
    pub current_user_id: String,
    pub fallback_sports: Vec<String>,
    /// Extra attempts after the first failed catalog fetch.
    pub catalog_retries: u32,
    pub retry_backoff_ms: u64,
    pub catalog_url: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            current_user_id: "me".to_string(),
            fallback_sports: DEFAULT_FALLBACK_SPORTS.iter().map(|s| s.to_string()).collect(),
            catalog_retries: 2,
            retry_backoff_ms: 200,
            catalog_url: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_current_user(mut self, user_id: impl Into<String>) -> Self {
        self.current_user_id = user_id.into();
        self
    }

    pub fn with_fallback_sports<I, S>(mut self, sports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_sports = sports.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_retries(mut self, retries: u32, backoff: Duration) -> Self {
        self.catalog_retries = retries;
        self.retry_backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = Some(url.into());
        self
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.current_user_id.trim().is_empty() {
            return Err(WgnError::validation("currentUserId", "must not be empty"));
        }
        if self.fallback_sports.is_empty() {
            return Err(WgnError::validation(
                "fallbackSports",
                "needs at least one sport",
            ));
        }
        if self.fallback_sports.iter().any(|s| s.trim().is_empty()) {
            return Err(WgnError::validation(
                "fallbackSports",
                "sports must not be blank",
            ));
        }
        Ok(())
    }
}
