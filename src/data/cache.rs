use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::{load_file, LoadError};
use super::model::Dataset;

/// Identity of a source file at the moment it was read. A rewrite changes
/// the modification time or length, so stale entries are never hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceKey {
    pub fn of(path: &Path) -> Result<Self, LoadError> {
        let access = |source| LoadError::FileAccess {
            path: path.to_path_buf(),
            source,
        };
        let path = path.canonicalize().map_err(access)?;
        let meta = std::fs::metadata(&path).map_err(access)?;
        Ok(SourceKey {
            modified: meta.modified().ok(),
            len: meta.len(),
            path,
        })
    }
}

/// Small LRU of loaded datasets. Most recently used entry is last.
#[derive(Debug)]
pub struct DatasetCache {
    capacity: usize,
    entries: Vec<(SourceKey, Arc<Dataset>)>,
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new(2)
    }
}

impl DatasetCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached dataset for the file's current state, loading it
    /// on a miss.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        self.get_or_load_with(path, load_file)
    }

    fn get_or_load_with(
        &mut self,
        path: &Path,
        load: impl FnOnce(&Path) -> Result<Dataset, LoadError>,
    ) -> Result<Arc<Dataset>, LoadError> {
        let key = SourceKey::of(path)?;

        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            let entry = self.entries.remove(pos);
            let dataset = Arc::clone(&entry.1);
            self.entries.push(entry);
            log::debug!("Cache hit for {}", key.path.display());
            return Ok(dataset);
        }

        let dataset = Arc::new(load(&key.path)?);
        self.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    fn insert(&mut self, key: SourceKey, dataset: Arc<Dataset>) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push((key, dataset));
        while self.entries.len() > self.capacity {
            let (evicted, _) = self.entries.remove(0);
            log::debug!("Evicted cached dataset for {}", evicted.path.display());
        }
        log::debug!("{} of {} cache slots in use", self.len(), self.capacity);
    }

    /// Drop every cached variant of `path`, whatever its file state.
    pub fn invalidate(&mut self, path: &Path) {
        let target = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.entries.retain(|(k, _)| k.path != target);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn counting_loader(calls: &Cell<usize>) -> impl FnOnce(&Path) -> Result<Dataset, LoadError> + '_ {
        move |_| {
            calls.set(calls.get() + 1);
            Ok(Dataset::default())
        }
    }

    fn touch(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let dir = TempDir::new().unwrap();
        let path = touch(&dir, "a.csv", "x");
        let calls = Cell::new(0);
        let mut cache = DatasetCache::new(2);

        let first = cache.get_or_load_with(&path, counting_loader(&calls)).unwrap();
        let second = cache.get_or_load_with(&path, counting_loader(&calls)).unwrap();

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn changed_file_misses() {
        let dir = TempDir::new().unwrap();
        let path = touch(&dir, "a.csv", "x");
        let calls = Cell::new(0);
        let mut cache = DatasetCache::new(2);

        cache.get_or_load_with(&path, counting_loader(&calls)).unwrap();
        fs::write(&path, "a longer body").unwrap();
        cache.get_or_load_with(&path, counting_loader(&calls)).unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.csv", "a");
        let b = touch(&dir, "b.csv", "b");
        let c = touch(&dir, "c.csv", "c");
        let calls = Cell::new(0);
        let mut cache = DatasetCache::new(2);

        cache.get_or_load_with(&a, counting_loader(&calls)).unwrap();
        cache.get_or_load_with(&b, counting_loader(&calls)).unwrap();
        // a becomes most recent, so c evicts b
        cache.get_or_load_with(&a, counting_loader(&calls)).unwrap();
        cache.get_or_load_with(&c, counting_loader(&calls)).unwrap();
        assert_eq!(calls.get(), 3);
        assert_eq!(cache.len(), 2);

        cache.get_or_load_with(&a, counting_loader(&calls)).unwrap();
        assert_eq!(calls.get(), 3);
        cache.get_or_load_with(&b, counting_loader(&calls)).unwrap();
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn invalidate_forces_reload() {
        let dir = TempDir::new().unwrap();
        let path = touch(&dir, "a.csv", "x");
        let calls = Cell::new(0);
        let mut cache = DatasetCache::default();

        cache.get_or_load_with(&path, counting_loader(&calls)).unwrap();
        cache.invalidate(&path);
        assert!(cache.is_empty());
        cache.get_or_load_with(&path, counting_loader(&calls)).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = touch(&dir, "a.xlsx", "x");
        let mut cache = DatasetCache::default();

        assert!(matches!(
            cache.get_or_load(&path),
            Err(LoadError::UnsupportedFormat(_))
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_file_is_file_access_error() {
        let dir = TempDir::new().unwrap();
        let mut cache = DatasetCache::default();
        let err = cache.get_or_load(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::FileAccess { .. }));
    }
}
