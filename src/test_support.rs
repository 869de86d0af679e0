//! Shared test doubles: an in-memory `Fetcher` and a small fixture catalog
//! shaped like the real API.

use crate::catalog::format::format_location;
use crate::catalog::{Artist, Catalog, DateSet, Fetcher, LocationSet, SortedIndex};
use crate::dates::{concert_date_key, strip_marker};
use crate::error::FetchError;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Value, json};
use std::time::Duration;

pub const API_URL: &str = "mock://api";

pub struct StaticFetcher {
    responses: DashMap<String, Value>,
    failures: DashMap<String, FetchError>,
    calls: DashMap<String, usize>,
    latency: Duration,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self {
            responses: DashMap::new(),
            failures: DashMap::new(),
            calls: DashMap::new(),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn respond(&self, url: &str, value: Value) {
        self.responses.insert(url.to_string(), value);
    }

    pub fn fail(&self, url: &str) {
        self.failures.insert(
            url.to_string(),
            FetchError::Status {
                url: url.to_string(),
                status: 500,
            },
        );
    }

    pub fn recover(&self, url: &str) {
        self.failures.remove(url);
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.get(url).map(|count| *count).unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        *self.calls.entry(url.to_string()).or_insert(0) += 1;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(err) = self.failures.get(url) {
            return Err(err.clone());
        }

        self.responses
            .get(url)
            .map(|value| value.clone())
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

struct FixtureArtist {
    id: u32,
    name: &'static str,
    members: &'static [&'static str],
    first_album: &'static str,
    creation_date: u32,
    concerts: &'static [(&'static str, &'static [&'static str])],
}

const FIXTURE: &[FixtureArtist] = &[
    FixtureArtist {
        id: 1,
        name: "Queen",
        members: &["Freddie Mercury", "Brian May", "John Deacon", "Roger Taylor"],
        first_album: "14-12-1973",
        creation_date: 1970,
        concerts: &[
            ("london-uk", &["*28-01-2020"]),
            ("los_angeles-usa", &["30-01-2019"]),
            ("osaka-japan", &["14-02-2020"]),
        ],
    },
    FixtureArtist {
        id: 2,
        name: "Pink Floyd",
        members: &[
            "Roger Waters",
            "Nick Mason",
            "Richard Wright",
            "David Gilmour",
            "Syd Barrett",
        ],
        first_album: "05-08-1967",
        creation_date: 1965,
        concerts: &[
            ("london-uk", &["*10-05-2019"]),
            ("paris-france", &["12-05-2019"]),
        ],
    },
    FixtureArtist {
        id: 3,
        name: "The Jimi Hendrix Experience",
        members: &["Jimi Hendrix", "Mitch Mitchell", "Noel Redding"],
        first_album: "12-05-1967",
        creation_date: 1966,
        concerts: &[
            ("willemstad-netherlands_antilles", &["*01-03-2020"]),
            ("new_york-usa", &["02-03-2020"]),
        ],
    },
    FixtureArtist {
        id: 4,
        name: "Scorpions",
        members: &["Klaus Meine", "Rudolf Schenker", "Matthias Jabs", "Mikkey Dee"],
        first_album: "01-01-1972",
        creation_date: 1965,
        concerts: &[
            ("berlin-germany", &["*05-09-2019"]),
            ("new_york-usa", &["07-09-2019", "08-09-2019"]),
        ],
    },
];

pub fn artists_url() -> String {
    format!("{}/artists", API_URL)
}

pub fn locations_url(id: u32) -> String {
    format!("{}/locations/{}", API_URL, id)
}

pub fn dates_url(id: u32) -> String {
    format!("{}/dates/{}", API_URL, id)
}

pub fn relation_url(id: u32) -> String {
    format!("{}/relation/{}", API_URL, id)
}

fn artist_json(fixture: &FixtureArtist) -> Value {
    json!({
        "id": fixture.id,
        "image": format!("{}/images/{}.jpeg", API_URL, fixture.id),
        "name": fixture.name,
        "members": fixture.members,
        "creationDate": fixture.creation_date,
        "firstAlbum": fixture.first_album,
        "locations": locations_url(fixture.id),
        "concertDates": dates_url(fixture.id),
        "relations": relation_url(fixture.id),
    })
}

fn locations_json(fixture: &FixtureArtist) -> Value {
    let tokens: Vec<&str> = fixture.concerts.iter().map(|(loc, _)| *loc).collect();
    json!({
        "id": fixture.id,
        "locations": tokens,
        "dates": dates_url(fixture.id),
    })
}

fn dates_json(fixture: &FixtureArtist) -> Value {
    let dates: Vec<&str> = fixture
        .concerts
        .iter()
        .flat_map(|(_, dates)| dates.iter().copied())
        .collect();
    json!({ "id": fixture.id, "dates": dates })
}

fn relation_json(fixture: &FixtureArtist) -> Value {
    let mut map = serde_json::Map::new();
    for (loc, dates) in fixture.concerts {
        let cleaned: Vec<String> = dates.iter().map(|d| strip_marker(d)).collect();
        map.insert(loc.to_string(), json!(cleaned));
    }
    json!({ "id": fixture.id, "datesLocations": map })
}

/// A fetcher that serves the whole fixture catalog.
pub fn fixture_fetcher() -> StaticFetcher {
    let fetcher = StaticFetcher::new();
    let artists: Vec<Value> = FIXTURE.iter().map(artist_json).collect();
    fetcher.respond(&artists_url(), Value::Array(artists));

    for fixture in FIXTURE {
        fetcher.respond(&locations_url(fixture.id), locations_json(fixture));
        fetcher.respond(&dates_url(fixture.id), dates_json(fixture));
        fetcher.respond(&relation_url(fixture.id), relation_json(fixture));
    }

    fetcher
}

/// Fixture artists as the root listing decodes them, no sub-resources.
pub fn fixture_artists() -> Vec<Artist> {
    FIXTURE
        .iter()
        .map(|fixture| serde_json::from_value(artist_json(fixture)).unwrap())
        .collect()
}

/// The catalog ingestion would build from `fixture_fetcher()`: locations and
/// concert dates present, relations not yet fetched.
pub fn fixture_catalog() -> Catalog {
    let artists = fixture_artists();
    let mut locations = SortedIndex::new();
    let mut dates = SortedIndex::new();

    for (artist, fixture) in artists.iter().zip(FIXTURE) {
        let location_set: LocationSet = serde_json::from_value(locations_json(fixture)).unwrap();
        let date_set: DateSet = serde_json::from_value(dates_json(fixture)).unwrap();

        for token in &location_set.locations {
            locations.insert_unique(format_location(token));
        }
        for date in &date_set.dates {
            dates.insert_unique(concert_date_key(date));
        }

        artist.set_locations(location_set);
        artist.set_concert_dates(date_set);
    }

    Catalog::new(artists, locations, dates)
}
