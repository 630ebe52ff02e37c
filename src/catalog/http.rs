use tracing::{debug, instrument, warn};

use crate::catalog::GameCatalog;
use crate::config::SessionConfig;
use crate::error::{Result, WgnError};
use crate::model::{Game, GameRecord};

/// Catalog backed by a JSON feed: an array of game records served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: reqwest::Client,
    url: String,
}

impl HttpCatalog {
    /// Create a catalog for `url` with a default client.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Create a catalog using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http: client,
            url: url.into(),
        }
    }

    /// Create a catalog for the `catalogUrl` of `config`.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        config
            .catalog_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(Self::new)
            .ok_or_else(|| WgnError::validation("catalogUrl", "no catalog url configured"))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get_body(&self) -> Result<String> {
        debug!(url = %self.url, "fetching game feed");

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| WgnError::Http {
                url: self.url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WgnError::UnexpectedStatus {
                url: self.url.clone(),
                status,
            });
        }

        response.text().await.map_err(|e| WgnError::ResponseBody {
            url: self.url.clone(),
            source: e,
        })
    }
}

impl GameCatalog for HttpCatalog {
    fn name(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_games(&self) -> Result<Vec<Game>> {
        let body = self.get_body().await?;
        parse_feed(&body)
    }
}

/// Decode a feed body, validating each record.
///
/// Records that fail validation are skipped so one bad entry does not hide
/// the rest of the feed. A body that is not a JSON array is an error.
pub(crate) fn parse_feed(body: &str) -> Result<Vec<Game>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let total = records.len();

    let games: Vec<Game> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let parsed = serde_json::from_value::<GameRecord>(value)
                .map_err(WgnError::from)
                .and_then(Game::try_from);
            match parsed {
                Ok(game) => Some(game),
                Err(err) => {
                    warn!(index, error = %err, "skipping invalid game record");
                    None
                }
            }
        })
        .collect();

    debug!(total, valid = games.len(), "parsed game feed");
    Ok(games)
}
