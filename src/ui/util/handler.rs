use tracing::debug;

use crate::{
    player::MediaEvent,
    ui::{app::App, input::InputHandler, message::AppMessage, tui::TerminalEvent},
};

pub struct EventHandler;

impl EventHandler {
    pub fn handle_event(app: &mut App, evt: TerminalEvent) {
        match evt {
            TerminalEvent::Init | TerminalEvent::Resize(..) => {}
            TerminalEvent::FocusGained => app.has_focus = true,
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Tick => {
                if let Some(event) = app.media.advance(app.tick_rate) {
                    Self::on_media_event(app, event);
                }
            }
            TerminalEvent::Key(key) => {
                if let Some(message) = InputHandler::handle_key(key) {
                    Self::handle_message(app, message);
                }
            }
        }

        Self::sync(app);
    }

    pub fn handle_message(app: &mut App, message: AppMessage) {
        debug!(?message, "app_message");
        match message {
            AppMessage::Quit => app.should_quit = true,
            AppMessage::TogglePlayPause => app.handle.toggle_play(),
            AppMessage::NextEpisode => app.handle.play_next(),
            AppMessage::PreviousEpisode => app.handle.play_previous(),
            AppMessage::ToggleLoop => app.handle.toggle_loop(),
            AppMessage::ToggleShuffle => app.handle.toggle_shuffle(),
            AppMessage::ClearQueue => app.handle.clear_player_state(),
            AppMessage::SelectNext => {
                if let Some(last) = app.catalog.len().checked_sub(1) {
                    let next = app.catalog_state.selected().map_or(0, |i| (i + 1).min(last));
                    app.catalog_state.select(Some(next));
                }
            }
            AppMessage::SelectPrevious => {
                if !app.catalog.is_empty() {
                    let previous = app
                        .catalog_state
                        .selected()
                        .map_or(0, |i| i.saturating_sub(1));
                    app.catalog_state.select(Some(previous));
                }
            }
            AppMessage::PlaySelected => {
                if let Some((_, episode)) = app.selected_episode() {
                    app.handle.play(episode.clone());
                }
            }
            AppMessage::PlayAllFromSelected => {
                if let Some((index, _)) = app.selected_episode() {
                    app.handle.play_list(app.catalog.clone(), index);
                }
            }
        }
    }

    /// Applies queued commands, then lets the media element react to every
    /// resulting snapshot until nothing changes any more.
    pub fn sync(app: &mut App) {
        loop {
            app.store.process_pending();

            let mut events = Vec::new();
            while let Some(state) = app.subscription.try_next() {
                for directive in app.bridge.reconcile(&state) {
                    events.extend(app.media.apply(directive));
                }
                app.view = state;
            }

            if events.is_empty() {
                break;
            }
            for event in events {
                Self::on_media_event(app, event);
            }
        }
    }

    fn on_media_event(app: &mut App, event: MediaEvent) {
        if let Some(directive) = app.store.on_media_event(event)
            && let Some(event) = app.media.apply(directive)
        {
            app.store.on_media_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Episode, PlayerConfig};
    use std::time::Duration;

    fn app(len: usize) -> App {
        let config = PlayerConfig {
            shuffle_seed: Some(5),
            tick_rate_ms: 500,
            ..PlayerConfig::default()
        };
        let catalog = (0..len)
            .map(|i| {
                Episode::new(
                    format!("Episode {i}"),
                    "Diego",
                    "",
                    1,
                    format!("https://example.com/{i}.mp3"),
                )
            })
            .collect();
        App::new(&config, catalog)
    }

    fn send(app: &mut App, message: AppMessage) {
        EventHandler::handle_message(app, message);
        EventHandler::sync(app);
    }

    #[test]
    fn play_all_from_selection() {
        let mut app = app(3);
        send(&mut app, AppMessage::SelectNext);
        send(&mut app, AppMessage::PlayAllFromSelected);

        assert_eq!(app.view.episode_list().len(), 3);
        assert_eq!(app.view.current_episode_index(), 1);
        assert!(app.view.is_playing());
        assert_eq!(app.media.url(), Some("https://example.com/1.mp3"));
        assert!(app.media.is_playing());
    }

    #[test]
    fn selection_is_clamped() {
        let mut app = app(2);
        for _ in 0..5 {
            send(&mut app, AppMessage::SelectNext);
        }
        assert_eq!(app.catalog_state.selected(), Some(1));
        for _ in 0..5 {
            send(&mut app, AppMessage::SelectPrevious);
        }
        assert_eq!(app.catalog_state.selected(), Some(0));
    }

    #[test]
    fn pause_reaches_media() {
        let mut app = app(1);
        send(&mut app, AppMessage::PlaySelected);
        send(&mut app, AppMessage::TogglePlayPause);

        assert!(!app.view.is_playing());
        assert!(!app.media.is_playing());
    }

    #[test]
    fn ticks_play_through_queue() {
        let mut app = app(2);
        send(&mut app, AppMessage::PlayAllFromSelected);

        EventHandler::handle_event(&mut app, TerminalEvent::Tick);
        EventHandler::handle_event(&mut app, TerminalEvent::Tick);
        assert_eq!(app.view.current_episode_index(), 1);
        assert!(app.media.is_playing());

        EventHandler::handle_event(&mut app, TerminalEvent::Tick);
        EventHandler::handle_event(&mut app, TerminalEvent::Tick);
        assert!(app.view.episode_list().is_empty());
        assert!(!app.view.is_playing());
        assert_eq!(app.media.url(), None);
    }

    #[test]
    fn duplicate_episode_plays_twice() {
        let mut app = app(1);
        let episode = app.catalog[0].clone();
        app.handle.play_list(vec![episode.clone(), episode], 0);
        EventHandler::sync(&mut app);

        EventHandler::handle_event(&mut app, TerminalEvent::Tick);
        EventHandler::handle_event(&mut app, TerminalEvent::Tick);
        assert_eq!(app.view.current_episode_index(), 1);
        assert!(app.view.is_playing());
        assert!(app.media.is_playing());
        assert_eq!(app.media.progress().0, Duration::ZERO);

        EventHandler::handle_event(&mut app, TerminalEvent::Tick);
        EventHandler::handle_event(&mut app, TerminalEvent::Tick);
        assert!(app.view.episode_list().is_empty());
        assert!(!app.view.is_playing());
        assert!(!app.media.is_playing());
    }

    #[test]
    fn next_on_duplicate_entry_restarts_media() {
        let mut app = app(1);
        let episode = app.catalog[0].clone();
        app.handle.play_list(vec![episode.clone(), episode], 0);
        EventHandler::sync(&mut app);
        EventHandler::handle_event(&mut app, TerminalEvent::Tick);
        assert_eq!(app.media.progress().0, Duration::from_millis(500));

        send(&mut app, AppMessage::NextEpisode);
        assert_eq!(app.view.current_episode_index(), 1);
        assert_eq!(app.media.progress().0, Duration::ZERO);
        assert!(app.media.is_playing());
    }

    #[test]
    fn looping_keeps_replaying() {
        let mut app = app(2);
        send(&mut app, AppMessage::PlayAllFromSelected);
        send(&mut app, AppMessage::ToggleLoop);

        for _ in 0..6 {
            EventHandler::handle_event(&mut app, TerminalEvent::Tick);
        }
        assert_eq!(app.view.current_episode_index(), 0);
        assert!(app.media.is_playing());
        assert!(app.media.is_looping());
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = app(0);
        send(&mut app, AppMessage::Quit);
        assert!(app.should_quit);
        send(&mut app, AppMessage::PlaySelected);
        assert!(app.view.current_episode().is_none());
    }
}
