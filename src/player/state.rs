use super::{episode::Episode, queue::EpisodeQueue};
use im::Vector;

/// Everything a consumer needs to render the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub(crate) queue: EpisodeQueue,
    pub(crate) is_playing: bool,
    pub(crate) is_looping: bool,
    pub(crate) is_shuffling: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episode_list(&self) -> &Vector<Episode> {
        self.queue.episodes()
    }

    /// Only meaningful while the queue is non-empty; use
    /// [`PlayerState::current_episode`] to read the episode itself.
    pub fn current_episode_index(&self) -> usize {
        self.queue.current_index()
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.queue.current()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    pub fn has_previous(&self) -> bool {
        self.queue.has_previous()
    }

    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.queue.has_following()
    }
}
