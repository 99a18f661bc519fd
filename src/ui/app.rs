use std::{sync::Arc, time::Duration};

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::ListState,
};
use tracing::info;

use crate::{
    player::{
        Episode, MediaBridge, PlayerConfig, PlayerHandle, PlayerState, PlayerStore,
        PlayerSubscription, SimulatedMedia,
    },
    util::colors,
};

use super::{
    components::{
        episode_list::{catalog_list, queue_list},
        player::PlayerWidget,
    },
    tui::Tui,
    util::handler::EventHandler,
};

pub struct App {
    pub store: PlayerStore,
    pub handle: PlayerHandle,
    pub subscription: PlayerSubscription,
    pub bridge: MediaBridge,
    pub media: SimulatedMedia,
    pub catalog: Vec<Episode>,
    pub catalog_state: ListState,
    /// Last snapshot received from the store; what gets drawn.
    pub view: Arc<PlayerState>,
    pub tick_rate: Duration,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &PlayerConfig, catalog: Vec<Episode>) -> Self {
        let mut store = PlayerStore::new(config);
        let subscription = store.subscribe();
        let handle = store.handle();
        let view = store.snapshot();

        let mut catalog_state = ListState::default();
        if !catalog.is_empty() {
            catalog_state.select(Some(0));
        }

        Self {
            store,
            handle,
            subscription,
            bridge: MediaBridge::new(),
            media: SimulatedMedia::new(),
            catalog,
            catalog_state,
            view,
            tick_rate: Duration::from_millis(config.tick_rate_ms),
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(self.tick_rate)?;
        tui.enter()?;
        info!(episodes = self.catalog.len(), "app_started");

        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            match tui.next().await {
                Some(evt) => EventHandler::handle_event(self, evt),
                None => break,
            }
        }

        tui.exit()?;
        info!("app_stopped");
        Ok(())
    }

    pub fn selected_episode(&self) -> Option<(usize, &Episode)> {
        let index = self.catalog_state.selected()?;
        self.catalog.get(index).map(|episode| (index, episode))
    }

    fn ui(&mut self, frame: &mut Frame) {
        if !self.has_focus {
            return;
        }

        let area = frame.area();
        frame
            .buffer_mut()
            .set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(4)]).split(area);
        let body = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[0]);

        frame.render_stateful_widget(
            catalog_list(&self.catalog, &self.view),
            body[0],
            &mut self.catalog_state,
        );
        frame.render_widget(queue_list(&self.view), body[1]);
        frame.render_widget(
            PlayerWidget::new(&self.view, self.media.progress()),
            chunks[1],
        );
    }
}
