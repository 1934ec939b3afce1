use crate::digits::{digits_only, first_two, last_two};
use crate::GameMode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of a lottery slip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Play {
    pub bet_number: String,
    pub game_mode: GameMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub straight_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_amount: Option<f64>,
}

impl Play {
    pub fn new(bet_number: impl Into<String>, game_mode: GameMode) -> Self {
        Self {
            bet_number: bet_number.into(),
            game_mode,
            straight_amount: None,
            box_amount: None,
            combo_amount: None,
        }
    }

    pub fn with_straight(mut self, amount: f64) -> Self {
        self.straight_amount = Some(amount);
        self
    }

    pub fn with_box(mut self, amount: f64) -> Self {
        self.box_amount = Some(amount);
        self
    }

    pub fn with_combo(mut self, amount: f64) -> Self {
        self.combo_amount = Some(amount);
        self
    }

    /// Amount wagered on `wager`, zero when not wagered.
    pub fn amount(&self, wager: WagerType) -> f64 {
        let amount = match wager {
            WagerType::Straight => self.straight_amount,
            WagerType::Box => self.box_amount,
            WagerType::Combo => self.combo_amount,
        };
        amount.unwrap_or(0.0)
    }

    pub fn price(&self) -> f64 {
        crate::pricing::price(
            &self.bet_number,
            &self.game_mode,
            self.straight_amount,
            self.box_amount,
            self.combo_amount,
        )
    }
}

/// Published winning numbers for one track on one date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryResult {
    pub track: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick4: Option<String>,
}

impl LotteryResult {
    pub fn new(track: impl Into<String>) -> Self {
        Self {
            track: track.into(),
            ..Default::default()
        }
    }

    pub fn pick3_digits(&self) -> String {
        field_digits(&self.pick3)
    }

    pub fn pick4_digits(&self) -> String {
        field_digits(&self.pick4)
    }

    /// First, second and third place, derived from Pick 3 / Win 4 when blank.
    ///
    /// `first` is the last two digits of Pick 3, `second` the first two of
    /// Win 4, `third` the last two of Win 4. Explicit values always win.
    pub fn positions(&self) -> Positions {
        let pick3 = self.pick3_digits();
        let pick4 = self.pick4_digits();

        let derive = |explicit: &Option<String>, fallback: Option<&str>| {
            let explicit = field_digits(explicit);
            if explicit.is_empty() {
                fallback.map(str::to_string).unwrap_or_default()
            } else {
                explicit
            }
        };

        Positions {
            first: derive(&self.first, last_two(&pick3)),
            second: derive(&self.second, first_two(&pick4)),
            third: derive(&self.third, last_two(&pick4)),
        }
    }
}

fn field_digits(field: &Option<String>) -> String {
    field.as_deref().map(digits_only).unwrap_or_default()
}

/// Quiniela positions after derivation. Blank strings never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positions {
    pub first: String,
    pub second: String,
    pub third: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WagerType {
    Straight,
    Box,
    Combo,
}

impl fmt::Display for WagerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WagerType::Straight => write!(f, "STRAIGHT"),
            WagerType::Box => write!(f, "BOX"),
            WagerType::Combo => write!(f, "COMBO"),
        }
    }
}

/// One winning wager produced by settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub track: String,
    pub bet_number: String,
    pub game_mode: GameMode,
    pub wager_type: WagerType,
    pub wager_amount: f64,
    pub prize: f64,
    pub match_type: String,
}
