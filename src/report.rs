use crate::error::Result;
use crate::stats::PlayerStat;
use crate::telemetry::{MatchTelemetry, PlayerRecord};
use crate::translator;
use serde::Serialize;
use serde_json::Value;

/// Affiliation label of side A. Every other label is side B.
pub const BLUE_TEAM: &str = "Blue";
pub const TEAM_A_NAME: &str = "Team A (Blue)";
pub const TEAM_B_NAME: &str = "Team B (Red)";
pub const MAP_PICK_PLACEHOLDER: &str = "Unknown";
pub const ROUND_PLACEHOLDER: &str = "none";
pub const NATIONALITY_PLACEHOLDER: &str = "cn";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDoc {
    pub name: String,
    pub nationality: String,
    pub agents: Vec<String>,
    pub stats: PlayerStat,
}

impl PlayerDoc {
    pub fn new(name: &str, agent: &str, stats: PlayerStat) -> Self {
        Self {
            name: name.to_string(),
            nationality: NATIONALITY_PLACEHOLDER.to_string(),
            agents: vec![agent.to_string()],
            stats,
        }
    }

    fn from_record(record: &PlayerRecord, total_rounds: u32) -> Result<Self> {
        Ok(Self::new(
            display_name(&record.name),
            translator::agent_name(&record.character_id),
            PlayerStat::compute(record, total_rounds)?,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub team_name: String,
    pub score: i64,
    pub players: Vec<PlayerDoc>,
    pub round_history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub map: String,
    pub map_pick: String,
    /// Side A (Blue) first, side B second.
    pub teams: [Team; 2],
}

impl MatchReport {
    pub fn team_a(&self) -> &Team {
        &self.teams[0]
    }

    pub fn team_b(&self) -> &Team {
        &self.teams[1]
    }
}

/// Builds a report straight from the decoded document.
pub fn assemble(doc: &Value) -> Result<MatchReport> {
    let telemetry = MatchTelemetry::from_value(doc)?;
    assemble_telemetry(&telemetry)
}

pub fn assemble_telemetry(telemetry: &MatchTelemetry) -> Result<MatchReport> {
    let total_rounds = telemetry.rounds_played;

    let (mut side_a, mut side_b): (Vec<PlayerDoc>, Vec<PlayerDoc>) = (Vec::new(), Vec::new());
    for record in &telemetry.players {
        let player = PlayerDoc::from_record(record, total_rounds)?;
        if record.team_id == BLUE_TEAM {
            side_a.push(player);
        } else {
            side_b.push(player);
        }
    }

    sort_by_rating(&mut side_a);
    sort_by_rating(&mut side_b);

    let (score_a, score_b) = scores(
        total_rounds,
        telemetry.rounds_won,
        telemetry.player_team_id == BLUE_TEAM,
    );

    Ok(MatchReport {
        map: translator::map_name(&telemetry.map_id),
        map_pick: MAP_PICK_PLACEHOLDER.to_string(),
        teams: [
            build_team(TEAM_A_NAME, score_a, side_a, total_rounds),
            build_team(TEAM_B_NAME, score_b, side_b, total_rounds),
        ],
    })
}

/// Drops the `#tag` suffix of a Riot ID.
pub fn display_name(name: &str) -> &str {
    name.split('#').next().unwrap_or(name)
}

// The recording player's side gets `rounds_won`, the other side the remainder.
fn scores(total_rounds: u32, rounds_won: u32, recorder_is_blue: bool) -> (i64, i64) {
    let won = i64::from(rounds_won);
    let lost = i64::from(total_rounds) - won;
    if recorder_is_blue { (won, lost) } else { (lost, won) }
}

// Stable: ties keep scoreboard order.
fn sort_by_rating(players: &mut [PlayerDoc]) {
    players.sort_by(|a, b| b.stats.rating.total_cmp(&a.stats.rating));
}

fn build_team(name: &str, score: i64, players: Vec<PlayerDoc>, total_rounds: u32) -> Team {
    Team {
        team_name: name.to_string(),
        score,
        players,
        round_history: vec![ROUND_PLACEHOLDER.to_string(); total_rounds as usize],
    }
}
