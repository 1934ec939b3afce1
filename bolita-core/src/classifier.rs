//! Infers the game a raw bet string belongs to.

use crate::{GameMode, RegionConfig};
use std::collections::BTreeSet;

/// Classify `bet` given the tracks on the slip and the toggled Pulito positions.
///
/// Never fails: anything unrecognizable is [`GameMode::Unclassified`].
pub fn classify(
    bet: &str,
    tracks: &BTreeSet<String>,
    pulito_positions: &[u8],
    regions: &RegionConfig,
) -> GameMode {
    let cleaned: String = bet
        .chars()
        .filter(|c| c.is_ascii_digit() || is_separator(*c))
        .collect();
    if cleaned.is_empty() {
        return GameMode::Unclassified;
    }

    let usa = regions.any_usa(tracks);
    let santo_domingo = regions.any_santo_domingo(tracks);

    if is_pair_pattern(&cleaned) {
        // USA wins when both regions are on the slip
        return if usa {
            GameMode::Pale
        } else if santo_domingo {
            GameMode::PaleRd
        } else {
            GameMode::Pale
        };
    }

    let digits = cleaned.chars().filter(|c| c.is_ascii_digit()).count();
    match digits {
        1 if usa => GameMode::SingleAction,
        2 => {
            let positions: Vec<u8> = pulito_positions
                .iter()
                .copied()
                .filter(|p| GameMode::PULITO_POSITIONS.contains(p))
                .collect();
            if tracks.contains(&regions.pulito_track) && !positions.is_empty() {
                GameMode::Pulito {
                    positions: positions.into_iter().collect(),
                }
            } else if tracks.contains(&regions.venezuela_track) {
                GameMode::Venezuela
            } else if santo_domingo {
                GameMode::RdQuiniela
            } else {
                GameMode::Pick2
            }
        }
        3 => GameMode::Pick3,
        4 => GameMode::Win4,
        _ => GameMode::Unclassified,
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '-' | 'x' | 'X')
}

/// `DD-DD`, `DDxDD` or `DDXDD`.
fn is_pair_pattern(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars.len() == 5
        && chars[0].is_ascii_digit()
        && chars[1].is_ascii_digit()
        && is_separator(chars[2])
        && chars[3].is_ascii_digit()
        && chars[4].is_ascii_digit()
}
