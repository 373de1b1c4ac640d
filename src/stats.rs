use crate::error::{ConvertError, Result};
use crate::telemetry::PlayerRecord;
use serde::Serialize;

// Unofficial rating weights; reports depend on these exact values.
const KD_WEIGHT: f64 = 0.5;
const ACS_SCALE: f64 = 300.0;
const ADR_SCALE: f64 = 150.0;
const RATING_TERMS: f64 = 3.0;

/// Not present in capture data.
pub const KAST_PLACEHOLDER: &str = "0%";
pub const FIRST_DEATHS_PLACEHOLDER: i64 = 0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStat {
    pub rating: f64,
    pub acs: i64,
    pub k: i64,
    pub d: i64,
    pub a: i64,
    pub diff: i64,
    pub kast: String,
    pub adr: i64,
    pub hs_percent: String,
    pub fk: i64,
    pub fd: i64,
    pub fkfd_diff: i64,
}

impl PlayerStat {
    pub fn compute(player: &PlayerRecord, total_rounds: u32) -> Result<Self> {
        let acs = per_round(player.stats_score, total_rounds);
        let adr = per_round(player.total_damage, total_rounds);
        let k = player.stats_kills;
        let d = player.stats_deaths;

        let diff = k.checked_sub(d).ok_or_else(|| {
            ConvertError::MissingField(format!(
                "statsKills - statsDeaths out of range for {}",
                player.name
            ))
        })?;

        Ok(Self {
            rating: rating(k, d, acs, adr),
            acs,
            k,
            d,
            a: player.stats_assists,
            diff,
            kast: KAST_PLACEHOLDER.to_string(),
            adr,
            hs_percent: headshot_percent(
                player.total_headshots,
                player.total_bodyshots,
                player.total_legshots,
            ),
            fk: player.first_kill_count,
            fd: FIRST_DEATHS_PLACEHOLDER,
            // First deaths are unknown, so the differential is just first kills.
            fkfd_diff: player.first_kill_count,
        })
    }
}

/// `round(total / rounds)`, or 0 for a match with no rounds.
pub fn per_round(total: f64, total_rounds: u32) -> i64 {
    if total_rounds == 0 {
        return 0;
    }
    (total / f64::from(total_rounds)).round_ties_even() as i64
}

pub fn headshot_percent(headshots: i64, bodyshots: i64, legshots: i64) -> String {
    let total_shots = i128::from(headshots) + i128::from(bodyshots) + i128::from(legshots);
    if total_shots <= 0 {
        return "0%".to_string();
    }
    let percent = (headshots as f64 / total_shots as f64 * 100.0).round_ties_even() as i64;
    format!("{}%", percent)
}

pub fn rating(kills: i64, deaths: i64, acs: i64, adr: i64) -> f64 {
    let kd_ratio = kills as f64 / deaths.max(1) as f64;
    let composite =
        (kd_ratio * KD_WEIGHT + acs as f64 / ACS_SCALE + adr as f64 / ADR_SCALE) / RATING_TERMS;
    round_to_hundredths(composite)
}

// Rounds the exact binary value; scaling by 100 first would add a rounding step.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: f64, damage: f64, shots: (i64, i64, i64), kda: (i64, i64, i64)) -> PlayerRecord {
        PlayerRecord {
            name: "player#TAG".to_string(),
            character_id: "id".to_string(),
            team_id: "Blue".to_string(),
            stats_score: score,
            total_damage: damage,
            total_headshots: shots.0,
            total_bodyshots: shots.1,
            total_legshots: shots.2,
            stats_kills: kda.0,
            stats_deaths: kda.1,
            stats_assists: kda.2,
            first_kill_count: 3,
        }
    }

    #[test]
    fn acs_and_adr_use_total_rounds() {
        let stat = PlayerStat::compute(&record(4800.0, 3120.0, (10, 5, 5), (20, 10, 4)), 24).unwrap();
        assert_eq!(stat.acs, 200);
        assert_eq!(stat.adr, 130);
        assert_eq!(stat.hs_percent, "50%");
        assert_eq!(stat.diff, 10);
        assert_eq!(stat.rating, 0.84);
        assert_eq!(stat.kast, "0%");
        assert_eq!(stat.fd, 0);
        assert_eq!(stat.fkfd_diff, 3);
    }

    #[test]
    fn zero_rounds_gives_zero_rates() {
        let stat = PlayerStat::compute(&record(4800.0, 3120.0, (0, 0, 0), (5, 0, 1)), 0).unwrap();
        assert_eq!(stat.acs, 0);
        assert_eq!(stat.adr, 0);
        assert_eq!(stat.hs_percent, "0%");
        // 5 kills over max(0, 1) deaths
        assert_eq!(stat.rating, round_to_hundredths(5.0 * 0.5 / 3.0));
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(per_round(25.0, 10), 2);
        assert_eq!(per_round(35.0, 10), 4);
        assert_eq!(headshot_percent(1, 7, 0), "12%");
        assert_eq!(headshot_percent(1, 2, 0), "33%");
    }

    #[test]
    fn rating_is_deterministic_and_two_decimals() {
        let first = rating(17, 13, 231, 152);
        for _ in 0..10 {
            assert_eq!(rating(17, 13, 231, 152), first);
        }
        assert_eq!(format!("{:.2}", first).parse::<f64>().unwrap(), first);
        assert_eq!(rating(0, 0, 0, 0), 0.0);
    }

    #[test]
    fn negative_diff() {
        let stat = PlayerStat::compute(&record(1200.0, 900.0, (1, 1, 1), (3, 12, 2)), 12).unwrap();
        assert_eq!(stat.diff, -9);
        assert_eq!(stat.hs_percent, "33%");
    }

    #[test]
    fn rating_rounds_the_stored_value() {
        // 0.345 / 3 is stored just below 0.115
        assert_eq!(rating(1, 4, 0, 33), 0.11);
        assert_eq!(rating(1, 4, 14, 242), 0.59);
        assert_eq!(round_to_hundredths(0.125), 0.12);
        assert_eq!(round_to_hundredths(0.375), 0.38);
    }

    #[test]
    fn extreme_shot_counts_do_not_overflow() {
        assert_eq!(headshot_percent(i64::MAX, 1, 0), "100%");
        assert_eq!(headshot_percent(0, i64::MAX, i64::MAX), "0%");

        let stat = PlayerStat::compute(&record(0.0, 0.0, (i64::MAX, 1, 0), (1, 1, 0)), 10).unwrap();
        assert_eq!(stat.hs_percent, "100%");
    }

    #[test]
    fn kill_diff_overflow_is_an_error() {
        let result = PlayerStat::compute(&record(0.0, 0.0, (0, 0, 0), (i64::MAX, -1, 0)), 10);
        assert!(matches!(result, Err(ConvertError::MissingField(_))));
    }
}
