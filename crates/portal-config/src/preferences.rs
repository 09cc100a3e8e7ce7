//! Persisted view preferences
//!
//! Only the page size and the view mode of each list view survive between
//! sessions. Filters and the current page never do.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Fixed storage name; the file is `<data dir>/portal-preferences.toml`
pub const STORAGE_NAME: &str = "portal-preferences";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Grid,
            ViewMode::Grid => ViewMode::List,
        }
    }
}

impl FromStr for ViewMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(ViewMode::List),
            "grid" => Ok(ViewMode::Grid),
            other => anyhow::bail!("unknown view mode: {other} (expected list or grid)"),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::List => "list",
            ViewMode::Grid => "grid",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewPreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    #[serde(default)]
    pub view_mode: ViewMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Keyed by view name (`tickets`, `contents`, `users`)
    #[serde(default)]
    pub views: BTreeMap<String, ViewPreference>,
}

/// Explicit owner of the preferences file.
///
/// Opened once at startup and handed to whoever needs it; changes are
/// written by [`PreferenceStore::save`] or [`PreferenceStore::close`].
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    prefs: Preferences,
    dirty: bool,
}

impl PreferenceStore {
    /// Opens the store at `path`. A missing file yields defaults; an
    /// unreadable one is logged and replaced by defaults on the next save.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let prefs = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            match toml::from_str(&content) {
                Ok(prefs) => prefs,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt preferences file");
                    Preferences::default()
                }
            }
        } else {
            Preferences::default()
        };

        Ok(Self {
            path,
            prefs,
            dirty: false,
        })
    }

    pub fn open_default() -> anyhow::Result<Self> {
        Self::open(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        let file = format!("{STORAGE_NAME}.toml");
        if let Some(dirs) = directories::ProjectDirs::from("com", "portal", "portal") {
            dirs.data_dir().join(file)
        } else {
            PathBuf::from("~/.portal").join(file)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn page_size(&self, view: &str) -> Option<usize> {
        self.prefs.views.get(view).and_then(|v| v.page_size)
    }

    pub fn set_page_size(&mut self, view: &str, page_size: usize) -> anyhow::Result<()> {
        if page_size == 0 {
            anyhow::bail!("page size must be greater than zero");
        }
        self.entry(view).page_size = Some(page_size);
        Ok(())
    }

    pub fn view_mode(&self, view: &str) -> ViewMode {
        self.prefs
            .views
            .get(view)
            .map(|v| v.view_mode)
            .unwrap_or_default()
    }

    pub fn set_view_mode(&mut self, view: &str, mode: ViewMode) {
        self.entry(view).view_mode = mode;
    }

    fn entry(&mut self, view: &str) -> &mut ViewPreference {
        self.dirty = true;
        self.prefs.views.entry(view.to_string()).or_default()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn save(&mut self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.prefs)?;
        std::fs::write(&self.path, content)?;
        self.dirty = false;
        Ok(())
    }

    /// Teardown: persists pending changes
    pub fn close(mut self) -> anyhow::Result<()> {
        if self.dirty {
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("prefs.toml")).unwrap();
        assert_eq!(store.page_size("tickets"), None);
        assert_eq!(store.view_mode("contents"), ViewMode::List);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");

        let mut store = PreferenceStore::open(&path).unwrap();
        store.set_page_size("tickets", 25).unwrap();
        store.set_view_mode("contents", ViewMode::Grid);
        assert!(store.is_dirty());
        store.close().unwrap();

        let store = PreferenceStore::open(&path).unwrap();
        assert_eq!(store.page_size("tickets"), Some(25));
        assert_eq!(store.view_mode("contents"), ViewMode::Grid);
        assert_eq!(store.view_mode("tickets"), ViewMode::List);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = PreferenceStore::open(dir.path().join("prefs.toml")).unwrap();
        assert!(store.set_page_size("users", 0).is_err());
        assert_eq!(store.page_size("users"), None);
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "views = 12").unwrap();
        let store = PreferenceStore::open(&path).unwrap();
        assert_eq!(store.preferences(), &Preferences::default());
    }

    #[test]
    fn test_view_mode_parse_and_toggle() {
        assert_eq!("GRID".parse::<ViewMode>().unwrap(), ViewMode::Grid);
        assert!("table".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::List.toggle(), ViewMode::Grid);
    }
}
