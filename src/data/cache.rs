use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::LoadError;
use super::loader::load_file;
use super::model::SalesDataset;

// ---------------------------------------------------------------------------
// Source identity
// ---------------------------------------------------------------------------

/// What makes two loads "the same source": the canonical path plus the
/// file's size and modification time. Editing the file changes the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceId {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl SourceId {
    pub fn of(path: &Path) -> Result<Self, LoadError> {
        let io_err = |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };
        let canonical = path.canonicalize().map_err(io_err)?;
        let meta = std::fs::metadata(&canonical).map_err(io_err)?;
        Ok(SourceId {
            path: canonical,
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// DatasetCache
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct CacheEntry {
    /// Path as the caller spelled it, kept so a deleted file can still be
    /// invalidated when it no longer canonicalizes.
    requested: PathBuf,
    dataset: Arc<SalesDataset>,
}

/// Memoizes loaded datasets per source identity until invalidated.
///
/// Failed loads are never stored, so the next request retries the read.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<SourceId, CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on a miss.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<SalesDataset>, LoadError> {
        let id = SourceId::of(path)?;
        if let Some(entry) = self.entries.get(&id) {
            log::debug!("cache hit for {}", id.path.display());
            return Ok(Arc::clone(&entry.dataset));
        }

        let dataset = Arc::new(load_file(&id.path)?);
        // Older versions of the same file are unreachable now.
        self.entries.retain(|key, _| key.path != id.path);
        self.entries.insert(
            id,
            CacheEntry {
                requested: path.to_path_buf(),
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop every cached version of `path`, matching either the path as it
    /// was requested or its canonical form. Works after the file is deleted.
    pub fn invalidate(&mut self, path: &Path) {
        let canonical = path.canonicalize().ok();
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            entry.requested != path
                && key.path != path
                && canonical.as_ref() != Some(&key.path)
        });
        log::debug!(
            "invalidated {} cache entr(ies) for {}",
            before - self.entries.len(),
            path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "OrderDate,FSOrderNumber,RetailPrice,CakeName\n";

    #[test]
    fn unchanged_file_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(&path, format!("{HEADER}2024-01-01,1,10,A\n")).unwrap();

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.entries.len(), 1);
    }

    #[test]
    fn invalidate_forces_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(&path, format!("{HEADER}2024-01-01,1,10,A\n")).unwrap();

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        cache.invalidate(&path);
        assert!(cache.entries.is_empty());

        let second = cache.get_or_load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.records, second.records);
    }

    #[test]
    fn deleted_file_can_still_be_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(&path, format!("{HEADER}2024-01-01,1,10,A\n")).unwrap();

        // A non-canonical spelling of the same file.
        let spelled = dir.path().join("sub").join("..").join("sales.csv");
        let mut cache = DatasetCache::new();
        cache.get_or_load(&spelled).unwrap();
        fs::remove_file(&path).unwrap();

        cache.invalidate(&spelled);
        assert!(cache.entries.is_empty());
    }

    #[test]
    fn canonical_path_invalidates_any_spelling() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(&path, format!("{HEADER}2024-01-01,1,10,A\n")).unwrap();

        let mut cache = DatasetCache::new();
        cache
            .get_or_load(&dir.path().join("sub").join("..").join("sales.csv"))
            .unwrap();
        cache.invalidate(&path);
        assert!(cache.entries.is_empty());
    }

    #[test]
    fn changed_file_is_reread() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(&path, format!("{HEADER}2024-01-01,1,10,A\n")).unwrap();

        let mut cache = DatasetCache::new();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);

        // Different length guarantees a different key even on coarse mtimes.
        fs::write(&path, format!("{HEADER}2024-01-01,1,10,A\n2024-01-02,2,5,B\n")).unwrap();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 2);
        assert_eq!(cache.entries.len(), 1);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(&path, "OrderDate,CakeName\n").unwrap();

        let mut cache = DatasetCache::new();
        assert!(matches!(
            cache.get_or_load(&path),
            Err(LoadError::MissingColumns(_))
        ));
        assert!(cache.entries.is_empty());

        assert!(matches!(
            cache.get_or_load(&dir.path().join("missing.csv")),
            Err(LoadError::Io { .. })
        ));
    }
}
