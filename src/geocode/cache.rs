use super::geocoder::Geocoder;
use super::types::{CacheFile, Coordinates};
use crate::error::CatalogError;

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Location name -> coordinates, backed by a JSON file.
///
/// Readers may query it at any time; until `load_or_build` finishes it is
/// simply empty.
pub struct GeocodeCache {
    path: PathBuf,
    entries: DashMap<String, Coordinates>,
    ready: AtomicBool,
}

impl GeocodeCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: DashMap::new(),
            ready: AtomicBool::new(false),
        }
    }

    /// A cache that is already populated and marked ready.
    #[cfg(test)]
    pub(crate) fn preloaded(
        path: impl Into<PathBuf>,
        entries: impl IntoIterator<Item = (String, Coordinates)>,
    ) -> Self {
        let cache = Self::new(path);
        for (name, coordinates) in entries {
            cache.entries.insert(name, coordinates);
        }
        cache.ready.store(true, Ordering::Release);
        cache
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, location: &str) -> Option<Coordinates> {
        self.entries.get(location).map(|entry| *entry.value())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once `load_or_build` has completed successfully.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Loads the cache file, geocodes every index entry it lacks and writes the
    /// file back when anything changed. Returns how many locations were geocoded.
    ///
    /// # Errors
    /// `CatalogError::GeocodeFatal` when a location cannot be resolved. The
    /// locations resolved before the failure are still persisted.
    pub async fn load_or_build(
        &self,
        index: &[String],
        geocoder: &dyn Geocoder,
    ) -> Result<usize, CatalogError> {
        let (mut known, mut dirty) = self.read_file(index).await?;

        let missing: Vec<&String> = index
            .iter()
            .filter(|location| !known.contains_key(location.as_str()))
            .collect();

        if !missing.is_empty() {
            tracing::info!(
                "Geocoding {} locations missing from {}",
                missing.len(),
                self.path.display()
            );
        }

        let mut resolved = 0;
        for location in missing {
            match geocoder.locate(location).await {
                Ok(coordinates) => {
                    known.insert(location.clone(), coordinates);
                    resolved += 1;
                    dirty = true;
                }
                Err(err) => {
                    tracing::error!("Geocoding stopped at '{}': {}", location, err);
                    if dirty {
                        self.persist(&known).await?;
                    }
                    return Err(err);
                }
            }
        }

        if dirty {
            self.persist(&known).await?;
        }

        for (name, coordinates) in known {
            self.entries.insert(name, coordinates);
        }
        self.ready.store(true, Ordering::Release);

        tracing::info!(
            "Coordinate cache ready: {} locations ({} newly geocoded)",
            self.entries.len(),
            resolved
        );

        Ok(resolved)
    }

    /// Reads whatever the cache file holds. The flag is set when the file has
    /// to be rewritten in the keyed layout.
    async fn read_file(
        &self,
        index: &[String],
    ) -> Result<(BTreeMap<String, Coordinates>, bool), CatalogError> {
        let input = match tokio::fs::read(&self.path).await {
            Ok(input) => input,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!("No coordinate cache at {}", self.path.display());
                return Ok((BTreeMap::new(), false));
            }
            Err(err) => return Err(err.into()),
        };

        if input.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!("Coordinate cache {} is empty", self.path.display());
            return Ok((BTreeMap::new(), false));
        }

        match serde_json::from_slice::<CacheFile>(&input) {
            Ok(CacheFile::Keyed(map)) => Ok((map, false)),
            Ok(CacheFile::Positional(places)) => {
                if places.len() != index.len() {
                    tracing::warn!(
                        "Positional coordinate cache has {} entries for {} locations",
                        places.len(),
                        index.len()
                    );
                }
                let map = index
                    .iter()
                    .zip(places.iter())
                    .filter_map(|(name, place)| Some((name.clone(), place.coordinates()?)))
                    .collect();
                Ok((map, true))
            }
            Err(err) => {
                tracing::warn!(
                    "Ignoring unreadable coordinate cache {}: {}",
                    self.path.display(),
                    err
                );
                Ok((BTreeMap::new(), false))
            }
        }
    }

    async fn persist(&self, entries: &BTreeMap<String, Coordinates>) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(entries)?;
        let staging = self.path.with_extension("tmp");
        tokio::fs::write(&staging, json).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        tracing::debug!(
            "Wrote {} coordinates to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}
