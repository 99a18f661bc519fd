use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use crate::{
    player::{PlayerState, episode::format_seconds},
    util::colors,
};

/// Bottom bar: current episode, progress and the mode indicators.
pub struct PlayerWidget<'a> {
    state: &'a PlayerState,
    progress: (Duration, Duration),
}

impl<'a> PlayerWidget<'a> {
    pub fn new(state: &'a PlayerState, progress: (Duration, Duration)) -> Self {
        Self { state, progress }
    }

    fn indicator(label: &'static str, active: bool) -> Span<'static> {
        if active {
            label.fg(colors::PRIMARY).bold()
        } else {
            label.fg(colors::NEUTRAL)
        }
    }
}

impl Widget for PlayerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title_bottom(Line::from(
                " space play · n/p next/prev · l loop · s shuffle · enter play · a play all · c clear · q quit ",
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let Some(episode) = self.state.current_episode() else {
            Paragraph::new("Select an episode to listen".fg(colors::NEUTRAL))
                .centered()
                .render(rows[0], buf);
            return;
        };

        let play_icon = if self.state.is_playing() { "⏸" } else { "▶" };
        let mut line = Line::default();
        line.push_span(play_icon.fg(colors::SECONDARY).bold());
        line.push_span("  ");
        line.push_span(episode.title.as_str().bold());
        line.push_span(" · ");
        line.push_span(episode.members.as_str().fg(colors::NEUTRAL));
        line.push_span("   ");
        line.push_span(Self::indicator("⏮", self.state.has_previous()));
        line.push_span(" ");
        line.push_span(Self::indicator("⏭", self.state.has_next()));
        line.push_span(" ");
        line.push_span(Self::indicator("loop", self.state.is_looping()));
        line.push_span(" ");
        line.push_span(Self::indicator("shuffle", self.state.is_shuffling()));
        Paragraph::new(line).render(rows[0], buf);

        let (position, duration) = self.progress;
        let duration = if duration.is_zero() {
            Duration::from_secs(episode.duration)
        } else {
            duration
        };
        let ratio = if duration.is_zero() {
            0.0
        } else {
            (position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
        };

        Gauge::default()
            .gauge_style(Style::new().fg(colors::PRIMARY).bg(colors::NEUTRAL))
            .ratio(ratio)
            .label(format!(
                "{} / {}",
                format_seconds(position.as_secs()),
                format_seconds(duration.as_secs())
            ))
            .render(rows[1], buf);
    }
}
