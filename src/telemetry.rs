use crate::error::{ConvertError, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub character_id: String,
    pub team_id: String,
    pub stats_score: f64,
    pub total_damage: f64,
    pub total_headshots: i64,
    pub total_bodyshots: i64,
    pub total_legshots: i64,
    pub stats_kills: i64,
    pub stats_deaths: i64,
    pub stats_assists: i64,
    pub first_kill_count: i64,
}

/// `battle_detail.playerGameView` plus the `battle_detail.players` scoreboard.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchTelemetry {
    pub map_id: String,
    pub rounds_played: u32,
    pub player_team_id: String,
    pub rounds_won: u32,
    pub players: Vec<PlayerRecord>,
}

impl MatchTelemetry {
    pub fn from_value(doc: &Value) -> Result<Self> {
        let battle = doc
            .get("battle_detail")
            .filter(|value| value.is_object())
            .ok_or_else(|| missing("battle_detail"))?;

        let view = battle
            .get("playerGameView")
            .filter(|value| value.is_object())
            .ok_or_else(|| missing("battle_detail.playerGameView"))?;

        let players = battle
            .get("players")
            .and_then(|value| value.as_array())
            .ok_or_else(|| missing("battle_detail.players"))?;

        let players = players
            .iter()
            .enumerate()
            .map(|(idx, player)| {
                PlayerRecord::from_value(player, &format!("battle_detail.players[{}]", idx))
            })
            .collect::<Result<Vec<_>>>()?;

        let view_path = "battle_detail.playerGameView";
        Ok(Self {
            map_id: str_field(view, view_path, "mapId")?,
            rounds_played: round_field(view, view_path, "roundsPlayed")?,
            player_team_id: str_field(view, view_path, "playerTeamId")?,
            rounds_won: round_field(view, view_path, "roundsWon")?,
            players,
        })
    }
}

impl PlayerRecord {
    /// Reads one scoreboard entry; `path` prefixes field names in errors.
    pub fn from_value(player: &Value, path: &str) -> Result<Self> {
        if !player.is_object() {
            return Err(missing(path));
        }

        Ok(Self {
            name: str_field(player, path, "name")?,
            character_id: str_field(player, path, "characterId")?,
            team_id: str_field(player, path, "teamId")?,
            stats_score: lenient_number_field(player, path, "statsScore")?.trunc(),
            total_damage: number_field(player, path, "totalDamage")?,
            total_headshots: count_field(player, path, "totalHeadshots")?,
            total_bodyshots: count_field(player, path, "totalBodyshots")?,
            total_legshots: count_field(player, path, "totalLegshots")?,
            stats_kills: count_field(player, path, "statsKills")?,
            stats_deaths: count_field(player, path, "statsDeaths")?,
            stats_assists: count_field(player, path, "statsAssists")?,
            first_kill_count: count_field(player, path, "firstKillCount")?,
        })
    }
}

fn missing(path: &str) -> ConvertError {
    ConvertError::MissingField(path.to_string())
}

fn field<'a>(obj: &'a Value, path: &str, key: &str) -> Result<&'a Value> {
    obj.get(key)
        .filter(|value| !value.is_null())
        .ok_or_else(|| missing(&format!("{}.{}", path, key)))
}

fn str_field(obj: &Value, path: &str, key: &str) -> Result<String> {
    field(obj, path, key)?
        .as_str()
        .map(|value| value.to_string())
        .ok_or_else(|| missing(&format!("{}.{}", path, key)))
}

fn number_field(obj: &Value, path: &str, key: &str) -> Result<f64> {
    field(obj, path, key)?
        .as_f64()
        .filter(|value| value.is_finite())
        .ok_or_else(|| missing(&format!("{}.{}", path, key)))
}

// Some capture tools serialize the combat score as a string; only integer
// strings are accepted there.
fn lenient_number_field(obj: &Value, path: &str, key: &str) -> Result<f64> {
    let value = field(obj, path, key)?;
    value
        .as_f64()
        .or_else(|| {
            value
                .as_str()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .map(|n| n as f64)
        })
        .filter(|value| value.is_finite())
        .ok_or_else(|| missing(&format!("{}.{}", path, key)))
}

fn count_field(obj: &Value, path: &str, key: &str) -> Result<i64> {
    let value = field(obj, path, key)?;
    value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| missing(&format!("{}.{}", path, key)))
}

fn round_field(obj: &Value, path: &str, key: &str) -> Result<u32> {
    let count = count_field(obj, path, key)?;
    u32::try_from(count).map_err(|_| missing(&format!("{}.{}", path, key)))
}
