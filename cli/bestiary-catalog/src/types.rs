//! Wire types for the upstream species catalog.
//!
//! These mirror the JSON shapes the upstream returns. They are owned
//! transiently for the duration of one fetch; the SDK normalizes them into
//! its own record model and never retains them.

use serde::{Deserialize, Serialize};

/// A bare named reference, the upstream's universal "pointer" shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

impl NamedRef {
    pub fn new(name: impl Into<String>) -> Self {
        NamedRef { name: name.into() }
    }
}

/// One entry of the paginated species index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesSummary {
    pub name: String,
    pub url: String,
}

/// One page of the species index endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesIndex {
    /// Total number of species in the catalog, not just on this page.
    pub count: u64,
    pub results: Vec<SpeciesSummary>,
}

/// A group membership slot on a species. `slot` orders groups by upstream
/// priority; slot 1 is the primary group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSlot {
    pub slot: u32,
    pub group: NamedRef,
}

/// A named numeric attribute of a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_value: i64,
    pub stat: NamedRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    #[serde(default)]
    pub is_hidden: bool,
    pub ability: NamedRef,
}

/// Image references of a species. Both fields may be missing upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSet {
    pub front_default: Option<String>,
    /// High resolution artwork, preferred over `front_default` when present.
    pub artwork: Option<String>,
}

/// The upstream representation of one species.
///
/// `height` and `weight` are in source-native tenths of the target unit
/// (decimetres and hectograms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSpecies {
    pub id: u64,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub groups: Vec<GroupSlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub images: ImageSet,
}

/// A description entry keyed by language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub text: String,
    pub language: NamedRef,
}

/// A genus entry keyed by language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedGenus {
    pub genus: String,
    pub language: NamedRef,
}

/// Descriptive metadata for one species. Entirely optional: a species
/// without a profile is still a valid species.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub descriptions: Vec<LocalizedText>,
    #[serde(default)]
    pub genera: Vec<LocalizedGenus>,
    pub color: Option<NamedRef>,
    pub popularity: Option<i64>,
    pub friendliness: Option<i64>,
}

/// One member of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub species: NamedRef,
}

/// The full, unpaginated membership of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub members: Vec<GroupMember>,
}

/// The full group listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupIndex {
    pub results: Vec<NamedRef>,
}
