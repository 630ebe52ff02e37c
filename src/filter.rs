//! Pure derivations from catalog and joined state into what the screens show.
//!
//! Nothing here mutates its inputs; every function returns fresh vectors.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use tracing::debug;

use crate::model::{
    Game, Section, SportFilter, ALL_SPORTS, CREATED_SECTION_TITLE, JOINED_SECTION_TITLE,
};

/// Sports offered when the user has neither joined nor created anything yet.
pub const DEFAULT_FALLBACK_SPORTS: [&str; 3] = ["Basketball", "Soccer", "Flag Football"];

/// Sports across `joined` then `created`, in first-seen order.
///
/// Falls back to `fallback` when both inputs are empty so the picker always
/// has something to offer.
pub fn derive_available_sports(
    joined: &[Game],
    created: &[Game],
    fallback: &[String],
) -> Vec<String> {
    if joined.is_empty() && created.is_empty() {
        return fallback.to_vec();
    }
    joined
        .iter()
        .chain(created)
        .map(|g| g.sport.clone())
        .unique()
        .collect()
}

/// Picker entries: the "All" sentinel followed by `available`.
pub fn picker_options(available: &[String]) -> Vec<String> {
    std::iter::once(ALL_SPORTS.to_string())
        .chain(available.iter().filter(|s| *s != ALL_SPORTS).cloned())
        .collect()
}

/// Games whose sport matches `selected`, in input order.
pub fn filter_by_sport(games: &[Game], selected: &SportFilter) -> Vec<Game> {
    games
        .iter()
        .filter(|g| selected.matches(&g.sport))
        .cloned()
        .collect()
}

/// Split `all_games` into `(joined, created)` by ownership.
///
/// A game created by `current_user_id` always lands in the created half, even
/// if the user has also joined it.
pub fn partition_by_ownership(
    all_games: &[Game],
    current_user_id: &str,
) -> (Vec<Game>, Vec<Game>) {
    let (created, joined): (Vec<Game>, Vec<Game>) = all_games
        .iter()
        .cloned()
        .partition(|g| g.is_created_by(current_user_id));
    (joined, created)
}

/// The two Games-screen sections, each filtered by `selected`.
///
/// Always exactly "Joined Games" then "Created Games"; empty sections are kept.
pub fn build_sections(
    joined: &[Game],
    created: &[Game],
    selected: &SportFilter,
) -> Vec<Section> {
    let sections = vec![
        Section {
            title: JOINED_SECTION_TITLE.to_string(),
            data: filter_by_sport(joined, selected),
        },
        Section {
            title: CREATED_SECTION_TITLE.to_string(),
            data: filter_by_sport(created, selected),
        },
    ];
    debug!(
        selected = %selected,
        joined = sections[0].data.len(),
        created = sections[1].data.len(),
        "built game sections"
    );
    sections
}

/// Pick the sport filter to show.
///
/// A `current` selection is kept when it is `All` or one of `available`.
/// Otherwise it counts as unset: an empty joined/created pair selects the
/// first fallback sport instead of leaving the picker unset, anything else
/// shows everything.
pub fn resolve_selection(
    current: Option<SportFilter>,
    available: &[String],
    joined: &[Game],
    created: &[Game],
    fallback: &[String],
) -> SportFilter {
    let current = current
        .map(SportFilter::normalized)
        .filter(|selection| match selection.selected_sport() {
            None => true,
            Some(sport) => available.iter().any(|a| a == sport),
        });
    match current {
        Some(selection) => selection,
        None if joined.is_empty() && created.is_empty() => fallback
            .iter()
            .find(|sport| !sport.trim().is_empty())
            .map(|sport| SportFilter::from(sport.as_str()))
            .unwrap_or_default(),
        None => SportFilter::All,
    }
}

/// Games that have not started as of `now`. Games without a timestamp are kept.
pub fn upcoming(games: &[Game], now: DateTime<Utc>) -> Vec<Game> {
    games
        .iter()
        .filter(|g| g.starts_at.is_none_or(|t| t >= now))
        .cloned()
        .collect()
}
