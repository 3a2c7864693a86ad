//! Against-the-spread analytics: a pure, deterministic engine that turns
//! already-fetched game results and betting lines into verified historical
//! ATS performance metrics, with built-in verified-vs-estimated data-quality
//! scoring. The binary in `main.rs` is a thin CLI collaborator.

pub mod config;
pub mod engine;
pub mod models;
pub mod report;

pub use self::engine::{analyze_team, analyze_team_json, compare_teams};
pub use self::engine::{ComparisonAnalysis, EngineError, TeamAnalysis, TeamAtsResult};
