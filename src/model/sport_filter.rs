use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Picker value meaning "no sport filter".
pub const ALL_SPORTS: &str = "All";

/// The sport picked on the Games screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SportFilter {
    #[default]
    All,
    Sport(String),
}

impl SportFilter {
    /// The sport being filtered on. A blank or `"All"` payload counts as no filter.
    pub fn selected_sport(&self) -> Option<&str> {
        match self {
            SportFilter::All => None,
            SportFilter::Sport(sport) => {
                let sport = sport.trim();
                (!sport.is_empty() && sport != ALL_SPORTS).then_some(sport)
            }
        }
    }

    /// Collapse a sentinel payload into [`SportFilter::All`] and trim the rest.
    pub fn normalized(self) -> Self {
        match self.selected_sport() {
            None => SportFilter::All,
            Some(sport) => SportFilter::Sport(sport.to_string()),
        }
    }

    pub fn matches(&self, sport: &str) -> bool {
        self.selected_sport().is_none_or(|selected| selected == sport)
    }

    pub fn is_all(&self) -> bool {
        self.selected_sport().is_none()
    }
}

impl From<&str> for SportFilter {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_SPORTS {
            SportFilter::All
        } else {
            SportFilter::Sport(value.to_string())
        }
    }
}

impl From<String> for SportFilter {
    fn from(value: String) -> Self {
        SportFilter::from(value.as_str())
    }
}

impl From<SportFilter> for String {
    fn from(filter: SportFilter) -> Self {
        filter.to_string()
    }
}

impl Display for SportFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SportFilter::All => write!(f, "{ALL_SPORTS}"),
            SportFilter::Sport(sport) => write!(f, "{sport}"),
        }
    }
}
