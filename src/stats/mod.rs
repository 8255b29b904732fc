//! Statistics core: team-name canonicalization, direct-matchup filtering,
//! aggregate computation, and forecast derivation.

pub mod aggregate;
pub mod engine;
pub mod forecast;
pub mod normalize;

pub use aggregate::{head_to_head, recent_form, team_history};
pub use engine::StatsEngine;
pub use normalize::Normalizer;
