use crate::{BolitaError, Result};
use serde::{Deserialize, Serialize};

/// Keyword table deciding which track names belong to which region.
///
/// A track belongs to a region when its name contains one of the region's
/// keywords (case-sensitive substring match). The same table is handed to
/// the classifier and the settlement engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub usa: Vec<String>,
    pub santo_domingo: Vec<String>,
    /// Tracks whose Win 4 prizes are paid at the full rate.
    pub new_york: Vec<String>,
    /// Tracks that do not run the Venezuela game.
    pub horses: Vec<String>,
    pub venezuela_track: String,
    pub pulito_track: String,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            usa: to_strings(&[
                "New York",
                "Georgia",
                "New Jersey",
                "Florida",
                "Connecticut",
                "Pensilvania",
                "Brooklyn",
                "Front",
                "Pulito",
                "Horses",
                "Chicago",
                "Philadelphia",
                "Maryland",
                "Virginia",
                "Delaware",
                "Tennessee",
                "Texas",
                "Massachusetts",
                "Michigan",
                "North Carolina",
                "South Carolina",
            ]),
            santo_domingo: to_strings(&[
                "Real",
                "Gana mas",
                "Loteka",
                "Nacional",
                "Quiniela Pale",
                "Primera",
                "Suerte",
                "Lotedom",
                "Anguila",
                "King Lottery",
                "Leidsa",
            ]),
            new_york: to_strings(&["New York", "Horses"]),
            horses: to_strings(&["Horses"]),
            venezuela_track: "Venezuela".to_string(),
            pulito_track: "Pulito".to_string(),
        }
    }
}

impl RegionConfig {
    pub fn is_usa(&self, track: &str) -> bool {
        matches_any(track, &self.usa)
    }

    pub fn is_santo_domingo(&self, track: &str) -> bool {
        matches_any(track, &self.santo_domingo)
    }

    pub fn is_new_york(&self, track: &str) -> bool {
        matches_any(track, &self.new_york)
    }

    pub fn is_horses(&self, track: &str) -> bool {
        matches_any(track, &self.horses)
    }

    pub fn any_usa<'a, I: IntoIterator<Item = &'a String>>(&self, tracks: I) -> bool {
        tracks.into_iter().any(|t| self.is_usa(t))
    }

    pub fn any_santo_domingo<'a, I: IntoIterator<Item = &'a String>>(&self, tracks: I) -> bool {
        tracks.into_iter().any(|t| self.is_santo_domingo(t))
    }

    pub fn validate(&self) -> Result<()> {
        if self.usa.is_empty() {
            return Err(BolitaError::config("USA keyword list cannot be empty"));
        }

        if self.santo_domingo.is_empty() {
            return Err(BolitaError::config(
                "Santo Domingo keyword list cannot be empty",
            ));
        }

        let lists = [&self.usa, &self.santo_domingo, &self.new_york, &self.horses];
        if lists.iter().any(|list| list.iter().any(|k| k.is_empty())) {
            // an empty keyword would match every track
            return Err(BolitaError::config("Region keywords cannot be empty strings"));
        }

        if self.venezuela_track.is_empty() || self.pulito_track.is_empty() {
            return Err(BolitaError::config("Special track names cannot be empty"));
        }

        Ok(())
    }
}

fn matches_any(track: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| track.contains(k.as_str()))
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
