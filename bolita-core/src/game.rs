use crate::{BolitaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Lottery game a play belongs to.
///
/// Serialized as the tag string used on slips (`"Pick 3"`, `"Pulito-1,3"`, `"-"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GameMode {
    Pick3,
    Win4,
    Pick2,
    Venezuela,
    RdQuiniela,
    Pale,
    PaleRd,
    SingleAction,
    /// Two-digit play against the toggled derived positions (1..=4).
    Pulito { positions: BTreeSet<u8> },
    Unclassified,
}

impl GameMode {
    pub const PULITO_POSITIONS: std::ops::RangeInclusive<u8> = 1..=4;

    pub fn pulito<I: IntoIterator<Item = u8>>(positions: I) -> Result<Self> {
        let positions: BTreeSet<u8> = positions.into_iter().collect();
        if let Some(bad) = positions
            .iter()
            .find(|p| !Self::PULITO_POSITIONS.contains(*p))
        {
            return Err(BolitaError::invalid_game_mode(format!(
                "Pulito position {} out of range 1-4",
                bad
            )));
        }
        Ok(GameMode::Pulito { positions })
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, GameMode::Unclassified)
    }

    /// Key under which this mode's multipliers live in a prize table.
    pub fn prize_key(&self) -> &'static str {
        match self {
            GameMode::Pick3 => "Pick 3",
            GameMode::Win4 => "Win 4",
            GameMode::Pick2 => "Pick 2",
            GameMode::Venezuela => "Venezuela",
            GameMode::RdQuiniela => "RD-Quiniela",
            GameMode::Pale => "Palé",
            GameMode::PaleRd => "Pale-RD",
            GameMode::SingleAction => "Single Action",
            GameMode::Pulito { .. } => "Pulito",
            GameMode::Unclassified => "-",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Pulito { positions } => {
                let joined = positions
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "Pulito-{}", joined)
            }
            other => f.write_str(other.prize_key()),
        }
    }
}

impl FromStr for GameMode {
    type Err = BolitaError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim();
        match tag {
            "Pick 3" => return Ok(GameMode::Pick3),
            "Win 4" => return Ok(GameMode::Win4),
            "Pick 2" => return Ok(GameMode::Pick2),
            "Venezuela" => return Ok(GameMode::Venezuela),
            "RD-Quiniela" => return Ok(GameMode::RdQuiniela),
            "Palé" | "Pale" => return Ok(GameMode::Pale),
            "Pale-RD" => return Ok(GameMode::PaleRd),
            "-" | "" => return Ok(GameMode::Unclassified),
            _ => {}
        }

        if tag.starts_with("Single Action") {
            return Ok(GameMode::SingleAction);
        }

        if let Some(list) = tag.strip_prefix("Pulito-") {
            let positions = list
                .split(',')
                .filter(|token| !token.trim().is_empty())
                .map(|token| {
                    token.trim().parse::<u8>().map_err(|_| {
                        BolitaError::invalid_game_mode(format!("bad Pulito position '{}'", token))
                    })
                })
                .collect::<Result<Vec<u8>>>()?;
            return GameMode::pulito(positions);
        }

        Err(BolitaError::invalid_game_mode(tag))
    }
}

impl TryFrom<String> for GameMode {
    type Error = BolitaError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<GameMode> for String {
    fn from(mode: GameMode) -> Self {
        mode.to_string()
    }
}
