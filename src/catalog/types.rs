//! Catalog Data Types
//!
//! Mirrors the JSON documents served by the remote catalog API. An `Artist` is
//! decoded from the root listing and carries locators for its three
//! sub-resources; the bodies are filled in later by ingestion or enrichment.

use crate::dates::CalendarDate;

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::index::SortedIndex;

/// Raw location tokens of one artist (`london-uk`, `new_york-usa`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSet {
    pub id: u32,
    pub locations: Vec<String>,
    /// Locator of the matching date list.
    #[serde(default)]
    pub dates: String,
}

/// Raw concert dates of one artist, some prefixed with `*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSet {
    pub id: u32,
    pub dates: Vec<String>,
}

/// Raw location token -> raw dates played there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationMap {
    pub id: u32,
    #[serde(rename = "datesLocations")]
    pub dates_locations: BTreeMap<String, Vec<String>>,
}

/// One catalog entry (a performing group or solo artist).
///
/// Sub-resource bodies live in write-once cells: readers either see nothing
/// or the complete decoded document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: u32,
    #[serde(default)]
    pub image: String,
    pub name: String,
    pub members: Vec<String>,
    pub first_album: String,
    pub creation_date: u32,
    #[serde(rename(deserialize = "locations", serialize = "locationsUrl"))]
    pub locations_url: String,
    #[serde(rename(deserialize = "concertDates", serialize = "concertDatesUrl"))]
    pub concert_dates_url: String,
    #[serde(rename(deserialize = "relations", serialize = "relationsUrl"))]
    pub relations_url: String,

    #[serde(skip_deserializing, serialize_with = "serialize_cell")]
    locations: OnceLock<LocationSet>,
    #[serde(skip_deserializing, serialize_with = "serialize_cell")]
    concert_dates: OnceLock<DateSet>,
    #[serde(skip_deserializing, serialize_with = "serialize_cell")]
    relations: OnceLock<RelationMap>,
}

fn serialize_cell<T, S>(cell: &OnceLock<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    cell.get().serialize(serializer)
}

impl Artist {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn first_album_date(&self) -> Option<CalendarDate> {
        CalendarDate::parse_catalog(&self.first_album)
    }

    pub fn locations(&self) -> Option<&LocationSet> {
        self.locations.get()
    }

    pub fn concert_dates(&self) -> Option<&DateSet> {
        self.concert_dates.get()
    }

    pub fn relations(&self) -> Option<&RelationMap> {
        self.relations.get()
    }

    /// Stores the location list unless one is already present.
    pub fn set_locations(&self, set: LocationSet) -> bool {
        self.locations.set(set).is_ok()
    }

    pub fn set_concert_dates(&self, set: DateSet) -> bool {
        self.concert_dates.set(set).is_ok()
    }

    pub fn set_relations(&self, map: RelationMap) -> bool {
        self.relations.set(map).is_ok()
    }

    /// Raw location tokens, empty when the sub-resource has not been fetched.
    pub fn location_tokens(&self) -> &[String] {
        self.locations()
            .map(|set| set.locations.as_slice())
            .unwrap_or_default()
    }

    pub fn concert_date_values(&self) -> &[String] {
        self.concert_dates()
            .map(|set| set.dates.as_slice())
            .unwrap_or_default()
    }
}

/// Facet bounds over the whole catalog, used to seed filter controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bounds {
    /// `1..=max` member count.
    pub member_counts: Vec<usize>,
    pub min_creation_date: Option<u32>,
    pub max_creation_date: Option<u32>,
    /// Year-first, e.g. `1967-08-05`.
    pub min_first_album: Option<String>,
    pub max_first_album: Option<String>,
}

/// Everything ingestion produced: the artists in catalog order and the two
/// global facets.
#[derive(Debug)]
pub struct Catalog {
    artists: Vec<Artist>,
    locations: SortedIndex<String>,
    dates: SortedIndex<String>,
}

impl Catalog {
    pub fn new(
        artists: Vec<Artist>,
        locations: SortedIndex<String>,
        dates: SortedIndex<String>,
    ) -> Self {
        Self {
            artists,
            locations,
            dates,
        }
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Looks up an artist by its 1-based identifier.
    pub fn artist(&self, id: u32) -> Option<&Artist> {
        let slot = (id as usize).checked_sub(1)?;
        match self.artists.get(slot) {
            Some(artist) if artist.id == id => Some(artist),
            _ => self.artists.iter().find(|artist| artist.id == id),
        }
    }

    pub fn location_index(&self) -> &[String] {
        self.locations.as_slice()
    }

    pub fn date_index(&self) -> &[String] {
        self.dates.as_slice()
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        let max_members = self
            .artists
            .iter()
            .map(Artist::member_count)
            .max()
            .unwrap_or(0);

        let first_albums: Vec<CalendarDate> = self
            .artists
            .iter()
            .filter_map(Artist::first_album_date)
            .collect();

        Bounds {
            member_counts: (1..=max_members).collect(),
            min_creation_date: self.artists.iter().map(|a| a.creation_date).min(),
            max_creation_date: self.artists.iter().map(|a| a.creation_date).max(),
            min_first_album: first_albums.iter().min().map(ToString::to_string),
            max_first_album: first_albums.iter().max().map(ToString::to_string),
        }
    }
}
