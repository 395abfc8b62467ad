use crate::models::volume::ColorTier;
use crate::ui::theme::Theme;
use crate::watchlist::WatchedVolume;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn render_volume_list(
    f: &mut Frame,
    area: Rect,
    volumes: &[WatchedVolume],
    state: &mut ListState,
    theme: &Theme,
) {
    let items: Vec<ListItem> = volumes
        .iter()
        .map(|v| {
            let (dot, dot_style) = match v.state.tier() {
                ColorTier::Normal     => ("●", theme.ok),
                ColorTier::Warning    => ("●", theme.crit),
                ColorTier::Unreadable => ("·", theme.text_dim),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", dot), dot_style),
                Span::styled(v.id.clone(), theme.text),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(format!("Volumes ({})", volumes.len()), theme.title));

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected)
        .highlight_symbol("▶ ");

    f.render_stateful_widget(list, area, state);
}
