#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMessage {
    Quit,
    TogglePlayPause,
    NextEpisode,
    PreviousEpisode,
    ToggleLoop,
    ToggleShuffle,
    ClearQueue,

    // Catalog
    SelectNext,
    SelectPrevious,
    PlaySelected,
    PlayAllFromSelected,
}
