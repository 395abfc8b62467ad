use crate::ui::centered_rect;
use crate::ui::theme::Theme;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, theme: &Theme, refresh_secs: f64) {
    let area = centered_rect(56, 22, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(" volwatch: keys (? or Esc to close) ", theme.title));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let refresh = format!("Volumes are re-read every {:.1} s", refresh_secs);
    let lines = vec![
        key_line(theme, "Global", ""),
        key_line(theme, "  q / Ctrl-C",  "Quit"),
        key_line(theme, "  ↑↓ / j k",    "Select volume"),
        key_line(theme, "  g / G",        "Jump first / last"),
        key_line(theme, "  t",            "Cycle color theme"),
        key_line(theme, "  ? / F1",       "Toggle this help"),
        Line::from(""),
        key_line(theme, "Watch list", ""),
        key_line(theme, "  a / Insert",   "Add the volume holding a path"),
        key_line(theme, "  d / Delete",   "Stop watching selected volume"),
        key_line(theme, "  r",            "Refresh now"),
        Line::from(""),
        key_line(theme, "Bars", ""),
        key_line(theme, "  blue",         "Under 90% used"),
        key_line(theme, "  red",          "90% used or more"),
        key_line(theme, "  gray",         "Volume not readable"),
        Line::from(""),
        Line::from(Span::styled(refresh, theme.text_dim)),
        Line::from(Span::styled("Config  ~/.config/volwatch/volwatch.toml", theme.text_dim)),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

fn key_line<'a>(theme: &Theme, key: &'a str, desc: &'a str) -> Line<'a> {
    if desc.is_empty() {
        // Section header
        Line::from(Span::styled(key, theme.title))
    } else {
        Line::from(vec![
            Span::styled(format!("{:<16}", key), theme.footer_key),
            Span::styled(desc, theme.text_dim),
        ])
    }
}
