use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_footer(f: &mut Frame, area: Rect, prompt_open: bool, theme: &Theme) {
    let keys: &[(&str, &str)] = if prompt_open {
        &[("Enter", "Add"), ("Esc", "Cancel"), ("Bksp", "Delete char")]
    } else {
        &[
            ("q", "Quit"), ("↑↓/jk", "Select"), ("a", "Add"), ("d", "Remove"),
            ("r", "Refresh"), ("t", "Theme"), ("?", "Help"),
        ]
    };

    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_bg)];
    for (key, desc) in keys {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.footer_bg), area);
}
