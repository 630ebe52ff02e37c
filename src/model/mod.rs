mod game;
mod profile;
mod section;
mod sport_filter;

pub use game::*;
pub use profile::*;
pub use section::*;
pub use sport_filter::*;
