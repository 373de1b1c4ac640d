//! Converts captured VALORANT match-history responses into match reports.

pub mod batch;
pub mod error;
pub mod export;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod telemetry;
pub mod translator;

pub use error::{ConvertError, Result};
pub use pipeline::convert;
pub use report::{MatchReport, PlayerDoc, Team};
pub use stats::PlayerStat;
