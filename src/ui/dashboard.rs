use crate::app::App;
use crate::collectors::VolumeInfoProvider;
use crate::models::volume::ColorTier;
use crate::ui::{
    add_prompt, footer::render_footer, help, volume_bars::render_volume_bars,
    volume_list::render_volume_list,
};
use crate::watchlist::WatchStore;
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render<S: WatchStore, P: VolumeInfoProvider>(f: &mut Frame, app: &mut App<S, P>) {
    let area  = f.area();
    let theme = app.theme.clone();

    // ── Root: header | body | footer ───────────────────────────────
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header: title + tier counts / status + clock ───────────────
    let vols = app.watch.volumes();
    let warn_n = vols.iter().filter(|v| v.state.tier() == ColorTier::Warning).count();
    let bad_n  = vols.iter().filter(|v| !v.state.is_readable()).count();

    let left = format!(" volwatch, {} ", app.theme_variant.name());
    let (middle, middle_style) = match app.live_status() {
        Some(s) if s.is_error => (format!("  {}  ", s.text), theme.crit),
        Some(s)               => (format!("  {}  ", s.text), theme.ok),
        None => {
            let mut m = format!("  {} watched", vols.len());
            if warn_n > 0 { m.push_str(&format!("  {} nearly full", warn_n)); }
            if bad_n > 0  { m.push_str(&format!("  {} unreadable", bad_n)); }
            m.push_str("  ");
            let style = if warn_n > 0 { theme.crit } else { theme.header };
            (m, style)
        }
    };
    let right = format!(" {} ", Local::now().format("%H:%M:%S"));

    let used = left.chars().count() + middle.chars().count() + right.chars().count();
    let pad  = (area.width as usize).saturating_sub(used);

    let header = Line::from(vec![
        Span::styled(left, theme.title),
        Span::styled(middle, middle_style),
        Span::styled(" ".repeat(pad), theme.header),
        Span::styled(right, theme.text_dim),
    ]);
    f.render_widget(Paragraph::new(header).style(theme.header), root[0]);

    // ── Body: watch list | usage bars ──────────────────────────────
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(root[1]);

    let selected = app.list_state.selected();
    render_volume_list(f, cols[0], app.watch.volumes(), &mut app.list_state, &theme);
    render_volume_bars(f, cols[1], app.watch.volumes(), selected, &theme);

    // ── Footer + overlays ──────────────────────────────────────────
    render_footer(f, root[2], app.prompt.is_some(), &theme);

    if app.show_help {
        help::render(f, &theme, app.refresh_interval().as_secs_f64());
    }
    if let Some(input) = &app.prompt {
        add_prompt::render(f, input, &theme);
    }
}
