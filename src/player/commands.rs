use super::episode::Episode;

/// One store operation, as queued by a [`super::handle::PlayerHandle`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Play(Episode),
    PlayList(Vec<Episode>, usize),
    TogglePlay,
    ToggleLoop,
    ToggleShuffle,
    SetPlayingState(bool),
    ClearPlayerState,
    PlayNext,
    PlayPrevious,
}
