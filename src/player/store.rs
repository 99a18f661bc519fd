use super::{
    commands::PlayerCommand,
    config::PlayerConfig,
    episode::Episode,
    handle::{PlayerHandle, PlayerSubscription},
    media::{MediaDirective, MediaEvent},
    state::PlayerState,
};
use arc_swap::ArcSwap;
use flume::{Receiver, Sender};
use im::Vector;
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;
use tracing::{debug, warn};

/// Owner of the player state and the only place it is mutated.
///
/// Every operation runs to completion before its result is published, so
/// subscribers and handles only ever observe whole transitions.
pub struct PlayerStore {
    state: PlayerState,
    published: Arc<ArcSwap<PlayerState>>,
    subscribers: Vec<Sender<Arc<PlayerState>>>,
    command_tx: Sender<PlayerCommand>,
    command_rx: Receiver<PlayerCommand>,
    rng: StdRng,
}

impl std::fmt::Debug for PlayerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}

impl PlayerStore {
    pub fn new(config: &PlayerConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(rng)
    }

    pub fn with_rng(rng: StdRng) -> Self {
        let (command_tx, command_rx) = flume::unbounded();
        let state = PlayerState::new();

        Self {
            published: Arc::new(ArcSwap::from_pointee(state.clone())),
            state,
            subscribers: Vec::new(),
            command_tx,
            command_rx,
            rng,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn snapshot(&self) -> Arc<PlayerState> {
        self.published.load_full()
    }

    pub fn subscribe(&mut self) -> PlayerSubscription {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        PlayerSubscription::new(rx)
    }

    pub fn handle(&self) -> PlayerHandle {
        PlayerHandle::new(Arc::clone(&self.published), self.command_tx.clone())
    }

    /// Queue fed by every [`PlayerHandle`]; lets an async owner wait for work.
    pub fn commands(&self) -> Receiver<PlayerCommand> {
        self.command_rx.clone()
    }

    /// Applies every queued command in arrival order.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(command) = self.command_rx.try_recv() {
            self.apply(command);
            processed += 1;
        }
        processed
    }

    pub fn apply(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Play(episode) => self.play(episode),
            PlayerCommand::PlayList(list, index) => self.play_list(list, index),
            PlayerCommand::TogglePlay => self.toggle_play(),
            PlayerCommand::ToggleLoop => self.toggle_loop(),
            PlayerCommand::ToggleShuffle => self.toggle_shuffle(),
            PlayerCommand::SetPlayingState(state) => self.set_playing_state(state),
            PlayerCommand::ClearPlayerState => self.clear_player_state(),
            PlayerCommand::PlayNext => self.play_next(),
            PlayerCommand::PlayPrevious => self.play_previous(),
        }
    }

    pub fn play(&mut self, episode: Episode) {
        self.state.queue.replace(Vector::unit(episode), 0);
        self.state.is_playing = true;
        self.commit("play");
    }

    pub fn play_list(&mut self, list: impl IntoIterator<Item = Episode>, index: usize) {
        self.state.queue.replace(list.into_iter().collect(), index);
        if !self.state.queue.is_in_range() {
            warn!(
                index,
                len = self.state.queue.len(),
                "play_list_index_out_of_range"
            );
        }
        self.state.is_playing = true;
        self.commit("play_list");
    }

    pub fn toggle_play(&mut self) {
        self.state.is_playing = !self.state.is_playing;
        self.commit("toggle_play");
    }

    pub fn toggle_loop(&mut self) {
        self.state.is_looping = !self.state.is_looping;
        self.commit("toggle_loop");
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffling = !self.state.is_shuffling;
        self.commit("toggle_shuffle");
    }

    pub fn set_playing_state(&mut self, state: bool) {
        self.state.is_playing = state;
        self.commit("set_playing_state");
    }

    pub fn clear_player_state(&mut self) {
        self.state.queue.clear();
        self.commit("clear_player_state");
    }

    pub fn play_next(&mut self) {
        if self.state.is_shuffling {
            let index = self.state.queue.jump_random(&mut self.rng);
            debug!(index, "shuffle_pick");
        } else {
            self.state.queue.advance();
        }
        self.commit("play_next");
    }

    pub fn play_previous(&mut self) {
        self.state.queue.retreat();
        self.commit("play_previous");
    }

    /// Feeds a report from the media element back into the state.
    ///
    /// Returns a directive when the element has to act on its own, which
    /// happens when a shuffle pick after a natural end lands on the episode
    /// that just finished.
    pub fn on_media_event(&mut self, event: MediaEvent) -> Option<MediaDirective> {
        match event {
            MediaEvent::Started => self.set_playing_state(true),
            MediaEvent::Paused => self.set_playing_state(false),
            MediaEvent::Ended => {
                if self.state.is_looping {
                    // The element restarts the episode by itself.
                    return None;
                }
                if !self.state.has_next() {
                    self.clear_player_state();
                    self.set_playing_state(false);
                    return None;
                }

                let before = self.state.current_episode_index();
                self.play_next();
                if self.state.is_playing && self.state.current_episode_index() == before {
                    return Some(MediaDirective::Restart);
                }
            }
        }
        None
    }

    fn commit(&mut self, operation: &'static str) {
        let unchanged = {
            let current = self.published.load();
            **current == self.state
        };
        if unchanged {
            debug!(operation, "player_state_unchanged");
            return;
        }

        let snapshot = Arc::new(self.state.clone());
        self.published.store(Arc::clone(&snapshot));
        self.subscribers
            .retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());

        debug!(
            operation,
            index = snapshot.current_episode_index(),
            len = snapshot.episode_list().len(),
            playing = snapshot.is_playing(),
            looping = snapshot.is_looping(),
            shuffling = snapshot.is_shuffling(),
            subscribers = self.subscribers.len(),
            "player_state_changed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn episode(i: usize) -> Episode {
        Episode::new(
            format!("Episode {i}"),
            "Diego, Tiago",
            format!("https://example.com/{i}.jpg"),
            (i as u64 + 1) * 60,
            format!("https://example.com/{i}.m4a"),
        )
    }

    fn episodes(len: usize) -> Vec<Episode> {
        (0..len).map(episode).collect()
    }

    fn seeded() -> PlayerStore {
        PlayerStore::with_rng(StdRng::seed_from_u64(1234))
    }

    fn assert_derived(state: &PlayerState) {
        assert_eq!(state.has_previous(), state.current_episode_index() > 0);
        assert_eq!(
            state.has_next(),
            state.is_shuffling()
                || state.current_episode_index() + 1 < state.episode_list().len()
        );
    }

    #[test]
    fn play_replaces_queue_with_single_episode() {
        let mut store = seeded();
        store.play_list(episodes(4), 3);
        store.play(episode(9));

        let state = store.state();
        assert_eq!(state.episode_list().len(), 1);
        assert_eq!(state.episode_list()[0], episode(9));
        assert_eq!(state.current_episode_index(), 0);
        assert!(state.is_playing());
    }

    #[test]
    fn sequential_next_then_previous() {
        let mut store = seeded();
        store.play_list(episodes(5), 2);

        store.play_next();
        assert_eq!(store.state().current_episode_index(), 3);

        store.play_previous();
        assert_eq!(store.state().current_episode_index(), 2);
    }

    #[test]
    fn next_at_last_episode_is_noop() {
        let mut store = seeded();
        store.play_list(episodes(3), 2);
        let sub = store.subscribe();

        store.play_next();
        assert_eq!(store.state().current_episode_index(), 2);
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn previous_at_first_episode_is_noop() {
        let mut store = seeded();
        store.play_list(episodes(3), 0);
        store.play_previous();
        assert_eq!(store.state().current_episode_index(), 0);
    }

    #[test]
    fn navigation_on_empty_queue_is_noop() {
        let mut store = seeded();
        store.play_next();
        store.play_previous();
        assert_eq!(store.state().current_episode_index(), 0);
        assert!(store.state().current_episode().is_none());
    }

    #[test]
    fn shuffle_on_empty_queue_stays_at_zero() {
        let mut store = seeded();
        store.toggle_shuffle();
        store.play_next();
        assert_eq!(store.state().current_episode_index(), 0);
    }

    #[test]
    fn shuffle_reaches_every_index() {
        let mut store = seeded();
        store.play_list(episodes(5), 0);
        store.toggle_shuffle();

        let mut seen = [false; 5];
        for _ in 0..500 {
            store.play_next();
            let index = store.state().current_episode_index();
            assert!(index < 5);
            seen[index] = true;
        }
        assert!(seen.iter().all(|hit| *hit), "unreached indices: {seen:?}");
    }

    #[test]
    fn same_seed_same_shuffle_sequence() {
        let config = PlayerConfig {
            shuffle_seed: Some(99),
            ..PlayerConfig::default()
        };
        let picks = |mut store: PlayerStore| {
            store.play_list(episodes(8), 0);
            store.toggle_shuffle();
            (0..20)
                .map(|_| {
                    store.play_next();
                    store.state().current_episode_index()
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(
            picks(PlayerStore::new(&config)),
            picks(PlayerStore::new(&config))
        );
    }

    #[test]
    fn clear_keeps_flags() {
        let mut store = seeded();
        store.play_list(episodes(3), 1);
        store.toggle_loop();
        store.toggle_shuffle();

        store.clear_player_state();

        let state = store.state();
        assert!(state.episode_list().is_empty());
        assert_eq!(state.current_episode_index(), 0);
        assert!(state.is_playing());
        assert!(state.is_looping());
        assert!(state.is_shuffling());
    }

    #[test]
    fn out_of_range_index_is_stored_as_given() {
        let mut store = seeded();
        store.play_list(episodes(2), 7);

        let state = store.state();
        assert_eq!(state.current_episode_index(), 7);
        assert!(state.current_episode().is_none());
        assert!(!state.has_next());
        assert!(state.has_previous());
    }

    #[test]
    fn set_playing_state_overrides_directly() {
        let mut store = seeded();
        store.set_playing_state(true);
        assert!(store.state().is_playing());
        store.set_playing_state(false);
        assert!(!store.state().is_playing());
    }

    #[test]
    fn subscribers_see_each_change_in_order() {
        let mut store = seeded();
        let sub = store.subscribe();

        store.play_list(episodes(3), 0);
        store.play_next();
        store.toggle_play();

        let first = sub.try_next().unwrap();
        assert_eq!(first.current_episode_index(), 0);
        assert!(first.is_playing());

        let second = sub.try_next().unwrap();
        assert_eq!(second.current_episode_index(), 1);

        let third = sub.try_next().unwrap();
        assert!(!third.is_playing());

        assert!(sub.try_next().is_none());
        assert_eq!(*store.snapshot(), *third);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut store = seeded();
        let kept = store.subscribe();
        drop(store.subscribe());

        store.toggle_loop();

        assert_eq!(store.subscribers.len(), 1);
        assert_eq!(kept.pending(), 1);
    }

    #[test]
    fn handle_commands_apply_on_process() {
        let mut store = seeded();
        let handle = store.handle();

        handle.play_list(episodes(4), 1);
        handle.play_next();
        handle.toggle_shuffle();

        assert!(handle.state().episode_list().is_empty());
        assert_eq!(store.process_pending(), 3);

        let state = handle.state();
        assert_eq!(state.episode_list().len(), 4);
        assert_eq!(state.current_episode_index(), 2);
        assert!(state.is_shuffling());
        assert_eq!(store.process_pending(), 0);
    }

    #[test]
    fn ended_advances_when_next_exists() {
        let mut store = seeded();
        store.play_list(episodes(3), 0);

        assert_eq!(store.on_media_event(MediaEvent::Ended), None);
        assert_eq!(store.state().current_episode_index(), 1);
        assert!(store.state().is_playing());
    }

    #[test]
    fn ended_clears_at_end_of_queue() {
        let mut store = seeded();
        store.play_list(episodes(2), 1);

        store.on_media_event(MediaEvent::Ended);

        assert!(store.state().episode_list().is_empty());
        assert!(!store.state().is_playing());
    }

    #[test]
    fn ended_while_looping_keeps_episode() {
        let mut store = seeded();
        store.play_list(episodes(3), 1);
        store.toggle_loop();

        assert_eq!(store.on_media_event(MediaEvent::Ended), None);
        assert_eq!(store.state().current_episode_index(), 1);
        assert!(store.state().is_playing());
    }

    #[test]
    fn ended_with_single_episode_shuffle_restarts() {
        let mut store = seeded();
        store.play(episode(0));
        store.toggle_shuffle();

        assert_eq!(
            store.on_media_event(MediaEvent::Ended),
            Some(MediaDirective::Restart)
        );
        assert_eq!(store.state().current_episode_index(), 0);
    }

    #[test]
    fn media_reports_drive_playing_flag() {
        let mut store = seeded();
        store.play(episode(0));
        store.on_media_event(MediaEvent::Paused);
        assert!(!store.state().is_playing());
        store.on_media_event(MediaEvent::Started);
        assert!(store.state().is_playing());
    }

    fn command_strategy() -> impl Strategy<Value = PlayerCommand> {
        prop_oneof![
            (0usize..6).prop_map(|i| PlayerCommand::Play(episode(i))),
            (1usize..6)
                .prop_flat_map(|len| (Just(len), 0..len))
                .prop_map(|(len, index)| PlayerCommand::PlayList(episodes(len), index)),
            Just(PlayerCommand::TogglePlay),
            Just(PlayerCommand::ToggleLoop),
            Just(PlayerCommand::ToggleShuffle),
            any::<bool>().prop_map(PlayerCommand::SetPlayingState),
            Just(PlayerCommand::ClearPlayerState),
            Just(PlayerCommand::PlayNext),
            Just(PlayerCommand::PlayPrevious),
        ]
    }

    proptest! {
        #[test]
        fn derived_flags_hold_after_every_operation(
            seed in any::<u64>(),
            commands in proptest::collection::vec(command_strategy(), 0..40),
        ) {
            let mut store = PlayerStore::with_rng(StdRng::seed_from_u64(seed));
            for command in commands {
                store.apply(command);
                assert_derived(store.state());
                let state = store.state();
                prop_assert!(
                    state.episode_list().is_empty()
                        || state.current_episode_index() < state.episode_list().len()
                );
            }
        }

        #[test]
        fn play_list_loads_queue_at_index(
            (len, index) in (1usize..10).prop_flat_map(|len| (Just(len), 0..len)),
        ) {
            let mut store = seeded();
            store.play_list(episodes(len), index);
            let state = store.state();
            prop_assert_eq!(state.episode_list().len(), len);
            prop_assert_eq!(state.current_episode_index(), index);
            let expected = episode(index);
            prop_assert_eq!(state.current_episode(), Some(&expected));
            prop_assert!(state.is_playing());
        }

        #[test]
        fn toggles_are_involutions(
            prefix in proptest::collection::vec(command_strategy(), 0..10),
            which in 0usize..3,
        ) {
            let mut store = seeded();
            for command in prefix {
                store.apply(command);
            }
            let before = store.state().clone();
            let toggle = match which {
                0 => PlayerCommand::TogglePlay,
                1 => PlayerCommand::ToggleLoop,
                _ => PlayerCommand::ToggleShuffle,
            };
            store.apply(toggle.clone());
            prop_assert_ne!(store.state(), &before);
            store.apply(toggle);
            prop_assert_eq!(store.state(), &before);
        }

        #[test]
        fn clear_always_empties_queue(
            prefix in proptest::collection::vec(command_strategy(), 0..10),
        ) {
            let mut store = seeded();
            for command in prefix {
                store.apply(command);
            }
            let (playing, looping, shuffling) = {
                let state = store.state();
                (state.is_playing(), state.is_looping(), state.is_shuffling())
            };
            store.clear_player_state();
            let state = store.state();
            prop_assert!(state.episode_list().is_empty());
            prop_assert_eq!(state.current_episode_index(), 0);
            prop_assert_eq!(state.is_playing(), playing);
            prop_assert_eq!(state.is_looping(), looping);
            prop_assert_eq!(state.is_shuffling(), shuffling);
        }
    }
}
