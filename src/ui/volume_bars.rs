use crate::models::volume::VolumeState;
use crate::ui::theme::Theme;
use crate::util::human::{fmt_pct, volume_label};
use crate::watchlist::WatchedVolume;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub fn render_volume_bars(
    f: &mut Frame,
    area: Rect,
    volumes: &[WatchedVolume],
    selected: Option<usize>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled("Usage", theme.title));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 { return; }
    if volumes.is_empty() {
        let hint = Line::from(Span::styled("No volumes watched. Press a to add one.", theme.text_dim));
        f.render_widget(Paragraph::new(hint), inner);
        return;
    }

    // Each volume takes 3 rows: label, gauge, spacer
    let rows_per_vol = 3usize;
    let visible = (inner.height as usize / rows_per_vol).max(1);
    let sel = selected.unwrap_or(0).min(volumes.len() - 1);
    let start = (sel + 1).saturating_sub(visible);
    let end   = (start + visible).min(volumes.len());
    let shown = &volumes[start..end];

    let constraints: Vec<Constraint> = shown
        .iter()
        .flat_map(|_| [Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, vol) in shown.iter().enumerate() {
        let label_row = rows[i * rows_per_vol];
        let gauge_row = rows[i * rows_per_vol + 1];
        let style = theme.tier_style(vol.state.tier());
        let label_style = if start + i == sel { theme.title } else { theme.text };

        let label = Line::from(Span::styled(volume_label(&vol.id, &vol.state), label_style));
        f.render_widget(Paragraph::new(label), label_row);

        let (ratio, text) = match &vol.state {
            VolumeState::Ready(u)   => ((u.used_pct / 100.0).clamp(0.0, 1.0), fmt_pct(u.used_pct)),
            VolumeState::Unreadable => (0.0, "unreadable".to_string()),
        };
        let gauge = Gauge::default()
            .gauge_style(style)
            .ratio(ratio)
            .label(text);
        f.render_widget(gauge, gauge_row);
    }
}
