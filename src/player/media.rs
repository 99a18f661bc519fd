use super::state::PlayerState;
use std::{sync::Arc, time::Duration};
use tracing::debug;

/// What the media element reports back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Started,
    Paused,
    Ended,
}

/// What the media element is asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaDirective {
    Load { url: String, duration: u64 },
    Unload,
    Play,
    Pause,
    SetLoop(bool),
    Restart,
}

/// Turns successive player snapshots into media element directives.
#[derive(Debug, Default)]
pub struct MediaBridge {
    observed: Option<Arc<PlayerState>>,
}

impl MediaBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reconcile(&mut self, state: &Arc<PlayerState>) -> Vec<MediaDirective> {
        let previous = self.observed.replace(Arc::clone(state));
        let before = previous.as_deref();
        let mut directives = Vec::new();

        let was_looping = before.is_some_and(PlayerState::is_looping);
        if state.is_looping() != was_looping {
            directives.push(MediaDirective::SetLoop(state.is_looping()));
        }

        let had_episode = before.and_then(PlayerState::current_episode).is_some();

        let Some(episode) = state.current_episode() else {
            if had_episode {
                directives.push(MediaDirective::Unload);
            }
            return directives;
        };

        // Entries are identified by position in the queue, not by URL: the
        // same episode may be queued twice.
        let same_entry = had_episode
            && before.is_some_and(|before| {
                before.current_episode_index() == state.current_episode_index()
                    && before.episode_list() == state.episode_list()
            });

        let was_playing = before.is_some_and(PlayerState::is_playing);
        if !same_entry {
            directives.push(MediaDirective::Load {
                url: episode.url.clone(),
                duration: episode.duration,
            });
            if state.is_playing() {
                directives.push(MediaDirective::Play);
            }
        } else if state.is_playing() != was_playing {
            directives.push(if state.is_playing() {
                MediaDirective::Play
            } else {
                MediaDirective::Pause
            });
        }

        directives
    }
}

#[derive(Debug)]
struct LoadedMedia {
    url: String,
    duration: Duration,
    position: Duration,
}

/// Stand-in for a real media element: keeps a playback clock and reports
/// back the same events a browser audio element would.
#[derive(Debug, Default)]
pub struct SimulatedMedia {
    loaded: Option<LoadedMedia>,
    playing: bool,
    looping: bool,
}

impl SimulatedMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, directive: MediaDirective) -> Option<MediaEvent> {
        debug!(?directive, "media_directive");
        match directive {
            MediaDirective::Load { url, duration } => {
                self.loaded = Some(LoadedMedia {
                    url,
                    duration: Duration::from_secs(duration),
                    position: Duration::ZERO,
                });
                // A fresh source waits for an explicit play.
                self.playing = false;
                None
            }
            MediaDirective::Unload => {
                self.loaded = None;
                self.playing = false;
                None
            }
            MediaDirective::Play => {
                if self.loaded.is_none() || self.playing {
                    return None;
                }
                self.playing = true;
                Some(MediaEvent::Started)
            }
            MediaDirective::Pause => {
                if !self.playing {
                    return None;
                }
                self.playing = false;
                Some(MediaEvent::Paused)
            }
            MediaDirective::SetLoop(looping) => {
                self.looping = looping;
                None
            }
            MediaDirective::Restart => {
                let media = self.loaded.as_mut()?;
                media.position = Duration::ZERO;
                if self.playing {
                    return None;
                }
                self.playing = true;
                Some(MediaEvent::Started)
            }
        }
    }

    /// Advances the playback clock. Reaching the end either rewinds (when
    /// looping) or stops and reports [`MediaEvent::Ended`].
    pub fn advance(&mut self, elapsed: Duration) -> Option<MediaEvent> {
        if !self.playing {
            return None;
        }
        let media = self.loaded.as_mut()?;

        media.position += elapsed;
        if media.position < media.duration {
            return None;
        }

        if self.looping {
            media.position = Duration::ZERO;
            debug!(url = media.url.as_str(), "media_looped");
            return None;
        }

        media.position = media.duration;
        self.playing = false;
        debug!(url = media.url.as_str(), "media_ended");
        Some(MediaEvent::Ended)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn url(&self) -> Option<&str> {
        self.loaded.as_ref().map(|media| media.url.as_str())
    }

    /// `(position, duration)` of the loaded media.
    pub fn progress(&self) -> (Duration, Duration) {
        self.loaded
            .as_ref()
            .map(|media| (media.position, media.duration))
            .unwrap_or_default()
    }
}
