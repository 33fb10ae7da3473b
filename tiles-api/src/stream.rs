//! Photo stream - merged, de-duplicated and shuffled search results.
//!
//! Each subtopic (a search term) contributes one result set. Whenever a set
//! is added or removed the stream is rebuilt: sets are flattened in subtopic
//! insertion order, duplicates are dropped by photo id (first wins) and the
//! result is shuffled. The stream owns its RNG, so a fixed seed and a fixed
//! sequence of calls always give the same order.

use std::collections::HashSet;

use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::{Photo, PhotoId};

/// The ordered photo sequence fed to the layout engine, plus the current
/// selection.
#[derive(Debug, Clone)]
pub struct PhotoStream {
    /// Result sets keyed by subtopic, in insertion order.
    results: IndexMap<String, Vec<Photo>>,
    /// Flattened, unique, shuffled photos.
    photos: Vec<Photo>,
    /// Index into `photos` of the selected photo.
    selected: Option<usize>,
    rng: StdRng,
}

impl PhotoStream {
    /// Create an empty stream with a random shuffle seed.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create an empty stream whose shuffles are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            results: IndexMap::new(),
            photos: Vec::new(),
            selected: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replace the result set for `subtopic` and rebuild the stream.
    pub fn add_photos(&mut self, subtopic: impl Into<String>, photos: Vec<Photo>) {
        let subtopic = subtopic.into();
        tracing::debug!("Adding {} photos for subtopic {:?}", photos.len(), subtopic);
        self.results.insert(subtopic, photos);
        self.rebuild();
    }

    /// Drop the result set for `subtopic` and rebuild the stream.
    ///
    /// Returns the removed photos, or `None` if the subtopic was unknown
    /// (in which case the stream is left untouched).
    pub fn remove_photos(&mut self, subtopic: &str) -> Option<Vec<Photo>> {
        let removed = self.results.shift_remove(subtopic)?;
        self.rebuild();
        Some(removed)
    }

    /// Clear every result set and the selection.
    pub fn remove_all(&mut self) {
        self.results.clear();
        self.photos.clear();
        self.selected = None;
    }

    /// The current photo sequence.
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Subtopics in insertion order.
    pub fn subtopics(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(String::as_str)
    }

    /// Select the photo at `index`. Out-of-range indices clear the selection.
    pub fn select(&mut self, index: usize) -> Option<&Photo> {
        self.selected = (index < self.photos.len()).then_some(index);
        self.selected_photo()
    }

    /// Select a photo by id, returning its index.
    pub fn select_photo(&mut self, id: PhotoId) -> Option<usize> {
        self.selected = self.index_of(id);
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected index and photo.
    pub fn selected(&self) -> Option<(usize, &Photo)> {
        let index = self.selected?;
        self.photos.get(index).map(|photo| (index, photo))
    }

    fn selected_photo(&self) -> Option<&Photo> {
        self.selected().map(|(_, photo)| photo)
    }

    /// Move the selection forward, wrapping to the first photo.
    pub fn select_next(&mut self) -> Option<&Photo> {
        let index = self.selected?;
        let next = if index + 1 >= self.photos.len() { 0 } else { index + 1 };
        self.select(next)
    }

    /// Move the selection backward, wrapping to the last photo.
    pub fn select_previous(&mut self) -> Option<&Photo> {
        let index = self.selected?;
        let previous = if index == 0 { self.photos.len().saturating_sub(1) } else { index - 1 };
        self.select(previous)
    }

    fn index_of(&self, id: PhotoId) -> Option<usize> {
        self.photos.iter().position(|photo| photo.id == id)
    }

    fn rebuild(&mut self) {
        let selected_id = self.selected().map(|(_, photo)| photo.id);

        let mut seen = HashSet::new();
        let mut photos: Vec<Photo> = self
            .results
            .values()
            .flatten()
            .filter(|photo| seen.insert(photo.id))
            .cloned()
            .collect();
        photos.shuffle(&mut self.rng);
        self.photos = photos;

        // The selection follows its photo, or is dropped with it.
        self.selected = selected_id.and_then(|id| self.index_of(id));

        tracing::debug!(
            "Rebuilt photo stream: {} photos from {} subtopics",
            self.photos.len(),
            self.results.len()
        );
    }
}

impl Default for PhotoStream {
    fn default() -> Self {
        Self::new()
    }
}
