// THEORY:
// Persistence is an injected capability, not an ambient global. A session is handed
// something that implements `KeyValueStore` (string keys to string values, whole
// values replaced on every write) and `Records` layers the three logical records on
// top of it:
//
//   firstRun        presence sentinel; absent means this is the first run
//   selectedColors  JSON array of "r,g,b" keys
//   customColors    JSON array of "#rrggbb" strings
//
// A record that exists but cannot be decoded is logged and treated as absent, so a
// damaged store degrades to defaults instead of locking the user out. The same holds
// for a whole store file: one that does not parse is set aside as `<file>.corrupt`
// and the store starts empty. Writes go to a temporary file in the same directory
// that is then renamed over the target, so a crash never leaves a half-written store.

use crate::core_modules::active_set::ActiveKeySet;
use crate::core_modules::custom_colors::CustomColorList;
use crate::error::Result;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const FIRST_RUN_KEY: &str = "firstRun";
pub const SELECTED_COLORS_KEY: &str = "selectedColors";
pub const CUSTOM_COLORS_KEY: &str = "customColors";

/// Suffix given to a store file that could not be parsed.
pub const CORRUPT_SUFFIX: &str = "corrupt";

/// A string key-value store with whole-record replacement.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Volatile store, for tests and one-shot runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store backed by one JSON object file, rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens `path`, starting empty if the file does not exist yet or cannot be parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(err) => {
                    let aside = set_aside(&path)?;
                    tracing::warn!(
                        path = %path.display(),
                        moved_to = %aside.display(),
                        %err,
                        "store is unreadable, starting empty"
                    );
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(path = %path.display(), records = entries.len(), "opened store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let text = serde_json::to_string_pretty(&self.entries)?;
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(text.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

/// Renames an unreadable store file to `<file>.corrupt`, replacing an older one.
fn set_aside(path: &Path) -> Result<PathBuf> {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(CORRUPT_SUFFIX);
    let aside = path.with_file_name(name);
    std::fs::rename(path, &aside)?;
    Ok(aside)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Typed access to the session's records.
pub struct Records<'a, S: KeyValueStore> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore> Records<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Returns `true` the first time it is called against a store, writing the
    /// marker so later calls return `false`.
    pub fn claim_first_run(&mut self) -> Result<bool> {
        if self.store.get(FIRST_RUN_KEY)?.is_some() {
            return Ok(false);
        }
        self.store.set(FIRST_RUN_KEY, "false")?;
        Ok(true)
    }

    pub fn load_selected(&self) -> Result<ActiveKeySet> {
        Ok(self.load_json(SELECTED_COLORS_KEY)?.unwrap_or_default())
    }

    pub fn save_selected(&mut self, active: &ActiveKeySet) -> Result<()> {
        let text = serde_json::to_string(&active.sorted())?;
        self.store.set(SELECTED_COLORS_KEY, &text)
    }

    pub fn load_custom(&self) -> Result<CustomColorList> {
        let stored: Option<Vec<String>> = self.load_json(CUSTOM_COLORS_KEY)?;
        Ok(CustomColorList::from_stored(stored.unwrap_or_default()))
    }

    pub fn save_custom(&mut self, custom: &CustomColorList) -> Result<()> {
        let text = serde_json::to_string(custom)?;
        self.store.set(CUSTOM_COLORS_KEY, &text)
    }

    fn load_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(text) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(key, %err, "ignoring unreadable record");
                Ok(None)
            }
        }
    }
}
