use super::episode::Episode;
use im::Vector;
use rand::Rng;

/// Ordered playback queue plus the cursor into it.
///
/// The cursor is stored exactly as given: callers that load a list are
/// trusted to pass an index inside it, and readers go through
/// [`EpisodeQueue::current`] which never indexes out of range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeQueue {
    episodes: Vector<Episode>,
    current_index: usize,
}

impl EpisodeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, episodes: Vector<Episode>, index: usize) {
        self.episodes = episodes;
        self.current_index = index;
    }

    pub fn clear(&mut self) {
        self.episodes.clear();
        self.current_index = 0;
    }

    pub fn episodes(&self) -> &Vector<Episode> {
        &self.episodes
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&Episode> {
        self.episodes.get(self.current_index)
    }

    pub fn is_in_range(&self) -> bool {
        self.current_index < self.episodes.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    /// Whether a sequential successor exists.
    pub fn has_following(&self) -> bool {
        self.current_index + 1 < self.episodes.len()
    }

    pub fn advance(&mut self) -> bool {
        if !self.has_following() {
            return false;
        }
        self.current_index += 1;
        true
    }

    pub fn retreat(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Moves the cursor to a uniformly random position. The current position
    /// may be picked again; an empty queue parks the cursor at 0.
    pub fn jump_random<R: Rng>(&mut self, rng: &mut R) -> usize {
        self.current_index = if self.episodes.is_empty() {
            0
        } else {
            rng.random_range(0..self.episodes.len())
        };
        self.current_index
    }
}
