use crate::error::Result;
use crate::report::MatchReport;
use csv::Writer;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One flat row per player per converted match.
#[derive(Debug, Serialize)]
struct StatsRow<'a> {
    source: &'a str,
    map: &'a str,
    team_name: &'a str,
    team_score: i64,
    opponent_score: i64,
    player: &'a str,
    agent: &'a str,
    rating: f64,
    acs: i64,
    k: i64,
    d: i64,
    a: i64,
    diff: i64,
    kast: &'a str,
    adr: i64,
    hs_percent: &'a str,
    fk: i64,
    fd: i64,
    fkfd_diff: i64,
}

/// Writes the player stats of every `(source, report)` pair to a CSV file.
pub fn write_stats_csv<'a, I>(reports: I, out_file: &Path) -> Result<usize>
where
    I: IntoIterator<Item = (&'a str, &'a MatchReport)>,
{
    if let Some(parent) = out_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = Writer::from_path(out_file)?;
    let mut rows = 0usize;

    for (source, report) in reports {
        for (idx, team) in report.teams.iter().enumerate() {
            let opponent = &report.teams[1 - idx];
            for player in &team.players {
                let stats = &player.stats;
                writer.serialize(StatsRow {
                    source,
                    map: &report.map,
                    team_name: &team.team_name,
                    team_score: team.score,
                    opponent_score: opponent.score,
                    player: &player.name,
                    agent: player.agents.first().map(String::as_str).unwrap_or(""),
                    rating: stats.rating,
                    acs: stats.acs,
                    k: stats.k,
                    d: stats.d,
                    a: stats.a,
                    diff: stats.diff,
                    kast: &stats.kast,
                    adr: stats.adr,
                    hs_percent: &stats.hs_percent,
                    fk: stats.fk,
                    fd: stats.fd,
                    fkfd_diff: stats.fkfd_diff,
                })?;
                rows += 1;
            }
        }
    }

    writer.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{PlayerDoc, Team};
    use crate::stats::PlayerStat;

    fn stat(rating: f64) -> PlayerStat {
        PlayerStat {
            rating,
            acs: 200,
            k: 20,
            d: 10,
            a: 4,
            diff: 10,
            kast: "0%".to_string(),
            adr: 130,
            hs_percent: "50%".to_string(),
            fk: 3,
            fd: 0,
            fkfd_diff: 3,
        }
    }

    #[test]
    fn writes_header_and_one_row_per_player() {
        let report = MatchReport {
            map: "Bind".to_string(),
            map_pick: "Unknown".to_string(),
            teams: [
                Team {
                    team_name: "Team A (Blue)".to_string(),
                    score: 13,
                    players: vec![PlayerDoc::new("alpha", "jett", stat(0.84))],
                    round_history: vec![],
                },
                Team {
                    team_name: "Team B (Red)".to_string(),
                    score: 11,
                    players: vec![PlayerDoc::new("bravo", "sova", stat(0.5))],
                    round_history: vec![],
                },
            ],
        };

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("stats.csv");
        let rows = write_stats_csv([("m1.json", &report)], &out).unwrap();
        assert_eq!(rows, 2);

        let text = fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "source,map,team_name,team_score,opponent_score,player,agent,rating,acs,k,d,a,diff,kast,adr,hs_percent,fk,fd,fkfd_diff"
        );
        assert_eq!(
            lines.next().unwrap(),
            "m1.json,Bind,Team A (Blue),13,11,alpha,jett,0.84,200,20,10,4,10,0%,130,50%,3,0,3"
        );
        assert!(lines.next().unwrap().starts_with("m1.json,Bind,Team B (Red),11,13,bravo,sova,0.5,"));
    }
}
