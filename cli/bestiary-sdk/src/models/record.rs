//! Canonical species records normalized from the upstream wire types.
//!
//! [`SpeciesRecord::from_raw`] is the single normalization point: pure,
//! deterministic, no I/O. Records are constructed fresh per request and
//! never mutated afterwards.

use bestiary_catalog::types::{RawProfile, RawSpecies};
use serde::{Deserialize, Serialize};

/// Placeholder description when no profile or no matching language entry
/// exists.
pub const NO_DESCRIPTION: &str = "No description available.";
/// Placeholder genus when the profile carries none.
pub const UNKNOWN_GENUS: &str = "Unknown";
/// Color key used when the profile carries none.
pub const DEFAULT_COLOR: &str = "gray";

/// Language key selecting description and genus entries.
const DISPLAY_LANGUAGE: &str = "en";

/// Stat keys whose display label is not derivable from the generic
/// hyphen-capitalization rule.
const STAT_LABELS: [(&str, &str); 3] = [
    ("hp", "HP"),
    ("special-attack", "Sp. Atk"),
    ("special-defense", "Sp. Def"),
];

/// Format a lowercase hyphenated key for display: each segment
/// capitalized, joined by spaces (`"mr-mime"` becomes `"Mr Mime"`).
pub fn display_name(key: &str) -> String {
    key.split('-').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Display label for a stat or ability key: special-case table first,
/// the generic rule otherwise.
pub fn label(key: &str) -> String {
    STAT_LABELS
        .iter()
        .find(|(raw, _)| *raw == key)
        .map(|(_, special)| (*special).to_string())
        .unwrap_or_else(|| display_name(key))
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upstream descriptions embed control characters as soft line-wrap
/// markers; flatten them to spaces.
fn unwrap_soft_breaks(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// A named numeric attribute of a species, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    pub label: String,
    pub value: i64,
}

/// A named trait of a species; `hidden` marks secondary traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub label: String,
    pub hidden: bool,
}

/// The normalized species record, the only shape surfaced across the
/// service boundary.
///
/// `groups` is ordered by upstream priority; the first element is the
/// primary group. `height_m` and `weight_kg` are converted from the
/// source-native tenths and are always non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRecord {
    pub id: u64,
    /// Lowercase canonical key.
    pub name: String,
    /// Human-formatted name.
    pub display_name: String,
    pub groups: Vec<String>,
    pub height_m: f64,
    pub weight_kg: f64,
    pub stats: Vec<Stat>,
    pub abilities: Vec<Ability>,
    pub description: String,
    pub genus: String,
    pub color: String,
    pub popularity: i64,
    pub friendliness: i64,
    /// High resolution artwork, falling back to the thumbnail.
    pub image: String,
    pub thumbnail: String,
}

impl SpeciesRecord {
    /// Normalize one species and its optional profile.
    ///
    /// Always succeeds; a missing profile yields the documented
    /// placeholder values.
    pub fn from_raw(species: RawSpecies, profile: Option<RawProfile>) -> Self {
        let mut group_slots = species.groups;
        group_slots.sort_by_key(|slot| slot.slot);
        let groups = group_slots
            .into_iter()
            .map(|slot| slot.group.name)
            .collect();

        let stats = species
            .stats
            .into_iter()
            .map(|slot| Stat {
                label: label(&slot.stat.name),
                value: slot.base_value,
            })
            .collect();

        let abilities = species
            .abilities
            .into_iter()
            .map(|slot| Ability {
                label: label(&slot.ability.name),
                hidden: slot.is_hidden,
            })
            .collect();

        let thumbnail = species.images.front_default.unwrap_or_default();
        let image = species
            .images
            .artwork
            .unwrap_or_else(|| thumbnail.clone());

        let (description, genus, color, popularity, friendliness) = match profile {
            Some(profile) => (
                profile
                    .descriptions
                    .iter()
                    .find(|entry| entry.language.name == DISPLAY_LANGUAGE)
                    .map(|entry| unwrap_soft_breaks(&entry.text))
                    .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                profile
                    .genera
                    .into_iter()
                    .find(|entry| entry.language.name == DISPLAY_LANGUAGE)
                    .map(|entry| entry.genus)
                    .unwrap_or_else(|| UNKNOWN_GENUS.to_string()),
                profile
                    .color
                    .map(|color| color.name)
                    .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
                profile.popularity.unwrap_or(0),
                profile.friendliness.unwrap_or(0),
            ),
            None => (
                NO_DESCRIPTION.to_string(),
                UNKNOWN_GENUS.to_string(),
                DEFAULT_COLOR.to_string(),
                0,
                0,
            ),
        };

        SpeciesRecord {
            id: species.id,
            display_name: display_name(&species.name),
            name: species.name,
            groups,
            height_m: f64::from(species.height) / 10.0,
            weight_kg: f64::from(species.weight) / 10.0,
            stats,
            abilities,
            description,
            genus,
            color,
            popularity,
            friendliness,
            image,
            thumbnail,
        }
    }
}
