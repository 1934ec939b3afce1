use crate::{BolitaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Multipliers per $1 wagered, keyed by prize-table mode key and then by
/// match label. Every label the settlement engine looks up has an entry here.
pub const DEFAULT_PRIZES: &[(&str, &[(&str, f64)])] = &[
    (
        "Pick 3",
        &[
            ("STRAIGHT", 700.0),
            ("STRAIGHT_TRIPLE", 500.0),
            ("BOX_6WAY", 700.0 / 6.0),
            ("BOX_3WAY", 700.0 / 3.0),
        ],
    ),
    (
        "Win 4",
        &[
            ("STRAIGHT", 5000.0),
            ("BOX_24WAY", 200.0),
            ("BOX_12WAY", 400.0),
            ("BOX_6WAY", 800.0),
            ("BOX_4WAY", 1200.0),
        ],
    ),
    (
        "Venezuela",
        &[
            ("FIRST", 55.0),
            ("SECOND", 15.0),
            ("THIRD", 10.0),
            ("FIRST_BOX", 27.5),
            ("SECOND_BOX", 7.5),
            ("THIRD_BOX", 5.0),
        ],
    ),
    (
        "RD-Quiniela",
        &[
            ("FIRST", 56.0),
            ("SECOND", 12.0),
            ("THIRD", 4.0),
            ("FIRST_BOX", 28.0),
            ("SECOND_BOX", 6.0),
            ("THIRD_BOX", 2.0),
        ],
    ),
    ("Palé", &[("WIN_FULL", 700.0), ("WIN_BOX", 175.0)]),
    (
        "Pale-RD",
        &[
            ("WIN_FULL", 1300.0),
            ("WIN_PARCIAL", 200.0),
            ("BOX_FULL", 325.0),
            ("BOX_PARCIAL", 50.0),
        ],
    ),
    ("Pulito", &[("STRAIGHT", 80.0), ("BOX", 40.0)]),
    ("Single Action", &[("STRAIGHT", 9.0)]),
];

pub type PrizeEntries = BTreeMap<String, BTreeMap<String, f64>>;

/// Prize table consumed read-only by the settlement engine.
///
/// A mode missing from the table never wins. A label missing from a mode
/// that is present falls back to [`DEFAULT_PRIZES`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrizeTable {
    entries: PrizeEntries,
}

impl Default for PrizeTable {
    fn default() -> Self {
        let entries = DEFAULT_PRIZES
            .iter()
            .map(|(mode, labels)| {
                let labels = labels
                    .iter()
                    .map(|(label, value)| (label.to_string(), *value))
                    .collect();
                (mode.to_string(), labels)
            })
            .collect();
        Self { entries }
    }
}

impl PrizeTable {
    /// Raw table, no defaults merged in. Modes absent here never win.
    pub fn from_entries(entries: PrizeEntries) -> Self {
        Self { entries }
    }

    /// Defaults with `overrides` layered on top, label by label.
    pub fn with_overrides(overrides: &PrizeEntries) -> Self {
        let mut table = Self::default();
        for (mode, labels) in overrides {
            let slot = table.entries.entry(mode.clone()).or_default();
            for (label, value) in labels {
                slot.insert(label.clone(), *value);
            }
        }
        table
    }

    pub fn has_mode(&self, mode_key: &str) -> bool {
        self.entries.contains_key(mode_key)
    }

    pub fn multiplier(&self, mode_key: &str, label: &str) -> Option<f64> {
        self.entries
            .get(mode_key)
            .and_then(|labels| labels.get(label))
            .copied()
            .or_else(|| default_multiplier(mode_key, label))
    }

    pub fn entries(&self) -> &PrizeEntries {
        &self.entries
    }

    pub fn validate(&self) -> Result<()> {
        for (mode, labels) in &self.entries {
            for (label, value) in labels {
                if !value.is_finite() || *value < 0.0 {
                    return Err(BolitaError::config(format!(
                        "Prize {}.{} must be a non-negative number, got {}",
                        mode, label, value
                    )));
                }
            }
        }
        Ok(())
    }
}

pub fn default_multiplier(mode_key: &str, label: &str) -> Option<f64> {
    DEFAULT_PRIZES
        .iter()
        .find(|(mode, _)| *mode == mode_key)
        .and_then(|(_, labels)| labels.iter().find(|(l, _)| *l == label))
        .map(|(_, value)| *value)
}
