//! Persistence of the last successfully searched city.
//!
//! A convenience feature, not correctness-critical: read and write failures
//! are logged and otherwise swallowed, and callers fall back to the
//! configured default city.

use std::{fs, path::PathBuf};

use crate::config::project_dirs;

const LAST_CITY_FILE: &str = "last_city";

#[derive(Debug, Clone)]
pub struct LastCityStore {
    path: PathBuf,
}

impl LastCityStore {
    /// Store under the platform data directory. Returns `None` when no data
    /// directory can be determined; the app then simply runs without recall.
    pub fn open() -> Option<Self> {
        match project_dirs() {
            Ok(dirs) => Some(Self {
                path: dirs.data_dir().join(LAST_CITY_FILE),
            }),
            Err(err) => {
                tracing::debug!("No data directory for last-city store: {err}");
                None
            }
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Last persisted city, if any. Never fails; a corrupt or unreadable
    /// file reads as empty.
    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(city) => {
                let city = city.trim().to_string();
                (!city.is_empty()).then_some(city)
            }
            Err(err) => {
                tracing::debug!("Could not read last city from {}: {err}", self.path.display());
                None
            }
        }
    }

    /// Persist `city`; failure is logged and ignored.
    pub fn save(&self, city: &str) {
        if let Some(parent) = self.path.parent()
            && let Err(err) = fs::create_dir_all(parent)
        {
            tracing::debug!("Could not create data directory {}: {err}", parent.display());
            return;
        }

        if let Err(err) = fs::write(&self.path, city) {
            tracing::debug!("Could not persist last city to {}: {err}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = LastCityStore::at(dir.path().join("last_city"));

        assert_eq!(store.load(), None);
        store.save("Paris");
        assert_eq!(store.load(), Some("Paris".to_string()));
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = LastCityStore::at(dir.path().join("nested/last_city"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = LastCityStore::at(dir.path().join("a/b/last_city"));
        store.save("Oslo");
        assert_eq!(store.load(), Some("Oslo".to_string()));
    }

    #[test]
    fn whitespace_only_value_reads_as_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("last_city");
        fs::write(&path, "  \n").expect("write");
        let store = LastCityStore::at(path);
        assert_eq!(store.load(), None);
    }
}
