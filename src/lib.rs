//! Shared playback state for a podcast episode player.
//!
//! [`player::PlayerStore`] owns the queue and the play/loop/shuffle flags and
//! publishes a snapshot to every subscriber after each change. The `ui`
//! module is one such consumer: a terminal front-end that drives a simulated
//! media element from the published state.

pub mod player;
pub mod ui;
pub mod util;
