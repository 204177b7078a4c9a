use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::Thumbnail;

/// Thumbnails kept in memory unless configured otherwise.
pub const DEFAULT_CACHE_ENTRIES: usize = 5;

/// Identifies one version of a file on disk.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ThumbnailKey {
    path: PathBuf,
    file_size: u64,
    modified: Option<SystemTime>,
}

impl ThumbnailKey {
    /// Key built from filesystem metadata; `None` when the file can't be stat'ed.
    pub fn for_path(path: &Path) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        Some(Self {
            path: path.to_path_buf(),
            file_size: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

/// Least-recently-used store of built thumbnails.
pub struct ThumbnailCache {
    entries: HashMap<ThumbnailKey, Arc<Thumbnail>>,
    order: VecDeque<ThumbnailKey>,
    max_entries: usize,
}

impl ThumbnailCache {
    /// Cache holding at most `max_entries` thumbnails (minimum 1).
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Number of cached thumbnails.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached thumbnail for `key`, marking it most recently used.
    pub fn get(&mut self, key: &ThumbnailKey) -> Option<Arc<Thumbnail>> {
        let value = self.entries.get(key).cloned();
        if value.is_some() {
            self.touch(key);
        }
        value
    }

    /// Return the cached thumbnail or build, store and return a new one.
    pub fn get_or_build(
        &mut self,
        key: ThumbnailKey,
        build: impl FnOnce() -> Thumbnail,
    ) -> Arc<Thumbnail> {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let thumbnail = Arc::new(build());
        self.insert(key, thumbnail.clone());
        thumbnail
    }

    fn insert(&mut self, key: ThumbnailKey, value: Arc<Thumbnail>) {
        self.touch(&key);
        self.entries.insert(key, value);
        while self.order.len() > self.max_entries {
            if let Some(evicted) = self.order.pop_back() {
                self.entries.remove(&evicted);
            }
        }
    }

    fn touch(&mut self, key: &ThumbnailKey) {
        self.order.retain(|existing| existing != key);
        self.order.push_front(key.clone());
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_ENTRIES)
    }
}
