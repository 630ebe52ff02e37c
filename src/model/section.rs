use serde::Serialize;

use super::{Game, SportFilter};

pub const JOINED_SECTION_TITLE: &str = "Joined Games";
pub const CREATED_SECTION_TITLE: &str = "Created Games";

/// A titled group of games for sectioned display.
///
/// An empty `data` means the display should render its empty-state placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub data: Vec<Game>,
}

/// Everything the Games screen needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamesView {
    pub available_sports: Vec<String>,
    pub selection: SportFilter,
    pub sections: Vec<Section>,
}
