//! Mock-interview interactions: question generation, answer evaluation,
//! audio upload/transcription, and transcript feedback.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};

/// Seniority level of the interview candidate. Wire form is kebab-case
/// ("junior", "mid-level", "senior").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    Junior,
    MidLevel,
    Senior,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Junior => "junior",
            Level::MidLevel => "mid-level",
            Level::Senior => "senior",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_deserializes_kebab_case() {
        let level: Level = serde_json::from_str(r#""mid-level""#).unwrap();
        assert_eq!(level, Level::MidLevel);
    }

    #[test]
    fn test_level_round_trips_all_variants() {
        for level in [Level::Junior, Level::MidLevel, Level::Senior] {
            let json = serde_json::to_string(&level).unwrap();
            let back: Level = serde_json::from_str(&json).unwrap();
            assert_eq!(back, level);
            assert_eq!(json.trim_matches('"'), level.as_str());
        }
    }
}
