//! Fixture and standings data sourced from JSON documents. Live retrieval from a
//! fixtures provider sits outside this crate; callers shape whatever they fetch into
//! these types.

use std::fs::File;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::from_reader;
use thiserror::Error;

use crate::rates::TeamRecord;

/// A scheduled match.
#[derive(Clone, Debug, Deserialize)]
pub struct Fixture {
    pub home: String,
    pub away: String,
    pub kickoff: DateTime<Utc>,
}

/// A league table snapshot.
#[derive(Clone, Debug, Deserialize)]
pub struct Standings {
    pub teams: Vec<TeamRecord>,
}
impl Standings {
    pub fn team(&self, name: &str) -> Result<&TeamRecord, UnknownTeam> {
        self.teams
            .iter()
            .find(|team| team.name == name)
            .ok_or_else(|| UnknownTeam(name.into()))
    }
}

#[derive(Debug, Error)]
#[error("no team named '{0}' in the standings")]
pub struct UnknownTeam(pub String);

/// Reads a JSON-encoded type from a given file `path`.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, io::Error> {
    let file = File::open(path)?;
    Ok(from_reader(file)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_standings() -> Standings {
        serde_json::from_str(
            r#"{
                "teams": [
                    {"name": "Arsenal", "played": 10, "points": 23, "goals_for": 21, "goals_against": 9},
                    {"name": "Chelsea", "played": 10, "points": 15, "goals_for": 14, "goals_against": 13}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn team_lookup() {
        let standings = sample_standings();
        let team = standings.team("Arsenal").unwrap();
        assert_eq!(23, team.points);
    }

    #[test]
    fn unknown_team_lookup() {
        let standings = sample_standings();
        let err = standings.team("Wrexham").unwrap_err();
        assert_eq!("no team named 'Wrexham' in the standings", err.to_string());
    }

    #[test]
    fn fixture_deserialisation() {
        let fixture: Fixture = serde_json::from_str(
            r#"{"home": "Arsenal", "away": "Chelsea", "kickoff": "2026-08-08T14:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!("Arsenal", fixture.home);
        assert_eq!("Chelsea", fixture.away);
        assert_eq!("2026-08-08 14:00:00 UTC", fixture.kickoff.to_string());
    }
}
