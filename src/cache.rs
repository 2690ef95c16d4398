use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::error::{AppError, Result};

pub struct ResponseCache {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl ResponseCache {
    /// Loads the cache file at `path`.
    ///
    /// A missing, unreadable or malformed file yields an empty cache.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    debug!("Ignoring malformed cache {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) => {
                debug!("No cache at {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        ResponseCache { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or replaces the body stored for `url`. Does not touch disk.
    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.entries.insert(url.into(), body.into());
    }

    pub fn remove(&mut self, url: &str) -> Option<String> {
        self.entries.remove(url)
    }

    /// Writes the whole mapping to a sibling temp file, then renames it over
    /// the cache file.
    pub fn save(&self) -> Result<()> {
        self.write_atomically()
            .map_err(|e| AppError::CacheError(format!("{}: {}", self.path.display(), e)))?;

        debug!("Saved {} cache entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    fn write_atomically(&self) -> io::Result<()> {
        let tmp_path = self.path.with_extension("tmp");

        let mut buf = BufWriter::new(File::create(&tmp_path)?);
        serde_json::to_writer(&mut buf, &self.entries).map_err(io::Error::other)?;
        buf.flush()?;
        let file = buf.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);

        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }
        Ok(())
    }
}
