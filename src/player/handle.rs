use super::{commands::PlayerCommand, episode::Episode, state::PlayerState};
use arc_swap::ArcSwap;
use flume::{Receiver, Sender, r#async::RecvStream};
use std::sync::Arc;
use tracing::warn;

/// Consumer-side access to a [`super::store::PlayerStore`].
///
/// Reads see the latest published snapshot without locking. Operations are
/// queued and take effect once the store owner processes them.
#[derive(Clone)]
pub struct PlayerHandle {
    snapshot: Arc<ArcSwap<PlayerState>>,
    command_tx: Sender<PlayerCommand>,
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlayerHandle")
    }
}

impl PlayerHandle {
    pub(crate) fn new(
        snapshot: Arc<ArcSwap<PlayerState>>,
        command_tx: Sender<PlayerCommand>,
    ) -> Self {
        Self {
            snapshot,
            command_tx,
        }
    }

    pub fn state(&self) -> Arc<PlayerState> {
        self.snapshot.load_full()
    }

    pub fn send(&self, command: PlayerCommand) {
        if self.command_tx.send(command).is_err() {
            warn!("player_store_gone");
        }
    }

    pub fn play(&self, episode: Episode) {
        self.send(PlayerCommand::Play(episode));
    }

    pub fn play_list(&self, list: Vec<Episode>, index: usize) {
        self.send(PlayerCommand::PlayList(list, index));
    }

    pub fn toggle_play(&self) {
        self.send(PlayerCommand::TogglePlay);
    }

    pub fn toggle_loop(&self) {
        self.send(PlayerCommand::ToggleLoop);
    }

    pub fn toggle_shuffle(&self) {
        self.send(PlayerCommand::ToggleShuffle);
    }

    pub fn set_playing_state(&self, state: bool) {
        self.send(PlayerCommand::SetPlayingState(state));
    }

    pub fn clear_player_state(&self) {
        self.send(PlayerCommand::ClearPlayerState);
    }

    pub fn play_next(&self) {
        self.send(PlayerCommand::PlayNext);
    }

    pub fn play_previous(&self) {
        self.send(PlayerCommand::PlayPrevious);
    }
}

/// Receives every published snapshot, in mutation order.
pub struct PlayerSubscription {
    rx: Receiver<Arc<PlayerState>>,
}

impl std::fmt::Debug for PlayerSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlayerSubscription({} pending)", self.rx.len())
    }
}

impl PlayerSubscription {
    pub(crate) fn new(rx: Receiver<Arc<PlayerState>>) -> Self {
        Self { rx }
    }

    /// Waits for the next change. `None` once the store is dropped.
    pub async fn changed(&self) -> Option<Arc<PlayerState>> {
        self.rx.recv_async().await.ok()
    }

    pub fn try_next(&self) -> Option<Arc<PlayerState>> {
        self.rx.try_recv().ok()
    }

    /// Drains pending snapshots and keeps only the newest.
    pub fn latest(&self) -> Option<Arc<PlayerState>> {
        self.rx.try_iter().last()
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    pub fn into_stream(self) -> RecvStream<'static, Arc<PlayerState>> {
        self.rx.into_stream()
    }
}
