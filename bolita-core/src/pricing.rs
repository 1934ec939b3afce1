//! Price of a single play.

use crate::digits::{digits_only, permutation_count};
use crate::{GameMode, Play};

/// Total price of one play.
///
/// Missing amounts count as zero. Wager types that a game does not offer are
/// ignored rather than rejected.
pub fn price(
    bet: &str,
    mode: &GameMode,
    straight: Option<f64>,
    boxed: Option<f64>,
    combo: Option<f64>,
) -> f64 {
    if bet.trim().is_empty() {
        return 0.0;
    }

    let straight = straight.unwrap_or(0.0);
    let boxed = boxed.unwrap_or(0.0);
    let combo = combo.unwrap_or(0.0);

    match mode {
        GameMode::Unclassified => 0.0,
        GameMode::Pulito { positions } => (straight + boxed) * positions.len().max(1) as f64,
        GameMode::PaleRd
        | GameMode::Pale
        | GameMode::RdQuiniela
        | GameMode::Pick2
        | GameMode::Venezuela
        | GameMode::SingleAction => straight + boxed,
        GameMode::Win4 | GameMode::Pick3 => {
            let combinations = permutation_count(&digits_only(bet));
            straight + boxed + combo * combinations as f64
        }
    }
}

/// Grand total of a slip: every play once per track and per date.
pub fn ticket_total(plays: &[Play], track_count: usize, date_count: usize) -> f64 {
    let subtotal: f64 = plays.iter().map(Play::price).sum();
    subtotal * track_count as f64 * date_count as f64
}
