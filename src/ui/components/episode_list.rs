use ratatui::{
    style::{Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::{
    player::{Episode, PlayerState},
    util::colors,
};

fn episode_line<'a>(prefix: Span<'a>, episode: &'a Episode) -> Line<'a> {
    Line::from(vec![
        prefix,
        episode.title.as_str().into(),
        " · ".fg(colors::NEUTRAL),
        episode.members.as_str().fg(colors::NEUTRAL),
        "  ".into(),
        Span::raw(episode.duration_label()).fg(colors::NEUTRAL),
    ])
}

/// Every episode the data source offered.
pub fn catalog_list<'a>(catalog: &'a [Episode], state: &PlayerState) -> List<'a> {
    let current_url = state.current_episode().map(|episode| episode.url.as_str());

    let items: Vec<ListItem> = if catalog.is_empty() {
        vec![ListItem::new("No episodes")]
    } else {
        catalog
            .iter()
            .map(|episode| {
                let prefix = if current_url == Some(episode.url.as_str()) {
                    "♪ ".fg(colors::SECONDARY)
                } else {
                    "  ".into()
                };
                ListItem::new(episode_line(prefix, episode))
            })
            .collect()
    };

    List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .title(" Episodes "),
        )
        .highlight_style(
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ")
}

/// The loaded queue with the cursor marked.
pub fn queue_list(state: &PlayerState) -> List<'_> {
    let current = state.current_episode_index();
    let icon = if state.is_playing() { "▶ " } else { "⏸ " };

    let items: Vec<ListItem> = state
        .episode_list()
        .iter()
        .enumerate()
        .map(|(i, episode)| {
            if i == current {
                ListItem::new(episode_line(icon.fg(colors::SECONDARY), episode))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(episode_line(
                    Span::raw(format!("{:>2} ", i + 1)).fg(colors::NEUTRAL),
                    episode,
                ))
            }
        })
        .collect();

    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(format!(" Queue ({}) ", state.episode_list().len())),
    )
}
