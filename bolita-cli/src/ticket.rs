use bolita_core::{classify, pricing, GameMode, LotteryResult, Play, RegionConfig};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// A slip as entered: plays repeated over every track and every date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub tracks: BTreeSet<String>,
    pub dates: Vec<NaiveDate>,
    #[serde(default)]
    pub pulito_positions: Vec<u8>,
    pub plays: Vec<TicketEntry>,
}

/// A play line as keyed in. The game is inferred when not given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketEntry {
    pub bet_number: String,
    #[serde(default)]
    pub game_mode: Option<GameMode>,
    #[serde(default)]
    pub straight_amount: Option<f64>,
    #[serde(default)]
    pub box_amount: Option<f64>,
    #[serde(default)]
    pub combo_amount: Option<f64>,
}

impl Ticket {
    pub fn plays(&self, regions: &RegionConfig) -> Vec<Play> {
        self.plays
            .iter()
            .map(|entry| {
                let game_mode = entry.game_mode.clone().unwrap_or_else(|| {
                    classify(&entry.bet_number, &self.tracks, &self.pulito_positions, regions)
                });
                Play {
                    bet_number: entry.bet_number.clone(),
                    game_mode,
                    straight_amount: entry.straight_amount,
                    box_amount: entry.box_amount,
                    combo_amount: entry.combo_amount,
                }
            })
            .collect()
    }

    pub fn total(&self, regions: &RegionConfig) -> f64 {
        pricing::ticket_total(&self.plays(regions), self.tracks.len(), self.dates.len())
    }

    /// First negative wager amount on the ticket, if any.
    pub fn negative_amount(&self) -> Option<(&str, f64)> {
        self.plays.iter().find_map(|entry| {
            [entry.straight_amount, entry.box_amount, entry.combo_amount]
                .into_iter()
                .flatten()
                .find(|amount| *amount < 0.0)
                .map(|amount| (entry.bet_number.as_str(), amount))
        })
    }
}

/// Published results indexed by draw date and track name.
#[derive(Debug, Default)]
pub struct ResultBook {
    results: HashMap<(NaiveDate, String), LotteryResult>,
}

impl ResultBook {
    pub fn new(results: Vec<LotteryResult>) -> Self {
        let mut book = Self::default();
        for result in results {
            match result.date {
                Some(date) => {
                    book.results.insert((date, result.track.clone()), result);
                }
                None => {
                    tracing::warn!("Ignoring result for {} without a date", result.track);
                }
            }
        }
        book
    }

    pub fn get(&self, date: NaiveDate, track: &str) -> Option<&LotteryResult> {
        self.results.get(&(date, track.to_string()))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
