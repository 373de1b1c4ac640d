use crate::error::Result;
use crate::loader;
use crate::report::{self, MatchReport};
use tracing::debug;

/// Converts one raw capture into a match report.
///
/// Stateless; captures can be converted concurrently.
pub fn convert(raw: &[u8]) -> Result<MatchReport> {
    let doc = loader::decode(raw)?;
    let report = report::assemble(&doc)?;

    debug!(
        map = %report.map,
        score_a = report.team_a().score,
        score_b = report.team_b().score,
        "capture converted"
    );

    Ok(report)
}
