//! Layout cache for reusing the last computed mosaics.
//!
//! The cache stores (container width, photo content hash) -> MosaicLayout.
//! Resize observers fire far more often than the width actually changes, so
//! the caller keeps one of these and asks it instead of the engine.

use std::collections::HashMap;
use std::collections::hash_map::{DefaultHasher, Entry};
use std::hash::{Hash, Hasher};

use tiles_api::Photo;

use crate::config::LayoutConfig;
use crate::{LayoutError, MosaicLayout, compute_layout_with};

/// A cache of layout results, retained across frames.
///
/// The cache uses content-based keys: if the photo sequence and container
/// width are identical, the layout is reused without re-computation.
#[derive(Debug, Default)]
pub struct LayoutCache {
    /// Config every cached layout was computed with.
    config: LayoutConfig,

    /// Cache entries: (width, content_hash) -> cached layout
    entries: HashMap<LayoutCacheKey, CachedLayout>,

    /// Current frame generation (for expiry tracking)
    generation: u64,

    /// Stats for debugging
    #[cfg(debug_assertions)]
    pub hits: u64,
    #[cfg(debug_assertions)]
    pub misses: u64,
}

/// The key for a cached layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutCacheKey {
    /// Bit pattern of the container width
    pub width_bits: u64,
    /// Hash of the ordered photo sequence
    pub content_hash: u64,
}

#[derive(Debug, Clone)]
struct CachedLayout {
    layout: MosaicLayout,
    generation: u64,
}

impl LayoutCache {
    /// Create a new empty cache using the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty cache for a custom config.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Start a new frame.
    ///
    /// This increments the generation counter but doesn't clear old entries
    /// (they expire when `gc` runs and they have not been touched).
    pub fn begin_frame(&mut self) {
        self.generation += 1;
    }

    /// Look up a cached layout.
    pub fn get(&mut self, key: LayoutCacheKey) -> Option<&MosaicLayout> {
        if let Some(entry) = self.entries.get_mut(&key) {
            // Update generation to mark as recently used
            entry.generation = self.generation;
            #[cfg(debug_assertions)]
            {
                self.hits += 1;
            }
            Some(&entry.layout)
        } else {
            #[cfg(debug_assertions)]
            {
                self.misses += 1;
            }
            None
        }
    }

    /// Store a layout.
    pub fn insert(&mut self, key: LayoutCacheKey, layout: MosaicLayout) {
        self.entries.insert(key, CachedLayout {
            layout,
            generation: self.generation,
        });
    }

    /// Return the cached layout for these inputs, computing and storing it on
    /// a miss. Errors are returned as-is and never cached.
    pub fn get_or_compute(
        &mut self,
        photos: &[Photo],
        container_width: f64,
    ) -> Result<&MosaicLayout, LayoutError> {
        let key = LayoutCacheKey::new(container_width, photos);
        let generation = self.generation;

        match self.entries.entry(key) {
            Entry::Occupied(occupied) => {
                #[cfg(debug_assertions)]
                {
                    self.hits += 1;
                }
                let entry = occupied.into_mut();
                entry.generation = generation;
                Ok(&entry.layout)
            }
            Entry::Vacant(vacant) => {
                #[cfg(debug_assertions)]
                {
                    self.misses += 1;
                }
                tracing::debug!("Layout cache miss for width {}", container_width);
                let layout = compute_layout_with(photos, container_width, &self.config)?;
                Ok(&vacant.insert(CachedLayout { layout, generation }).layout)
            }
        }
    }

    /// Remove stale entries (not accessed in the last N frames).
    pub fn gc(&mut self, max_age: u64) {
        let cutoff = self.generation.saturating_sub(max_age);
        self.entries.retain(|_, entry| entry.generation >= cutoff);
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all cached entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get cache stats (debug builds only).
    #[cfg(debug_assertions)]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Reset stats (debug builds only).
    #[cfg(debug_assertions)]
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }
}

impl LayoutCacheKey {
    /// Create a key for a photo sequence at a container width.
    pub fn new(container_width: f64, photos: &[Photo]) -> Self {
        Self {
            width_bits: container_width.to_bits(),
            content_hash: hash_photos(photos),
        }
    }
}

/// Hash the fields the layout depends on: order, ids and dimensions.
fn hash_photos(photos: &[Photo]) -> u64 {
    let mut hasher = DefaultHasher::new();
    photos.len().hash(&mut hasher);
    for photo in photos {
        photo.id.hash(&mut hasher);
        photo.width.to_bits().hash(&mut hasher);
        photo.height.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

// =========================================================================
// Tests
// =========================================================================
