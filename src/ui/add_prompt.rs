use crate::ui::centered_rect;
use crate::ui::theme::Theme;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Path entry popup standing in for a folder picker. The volume holding
/// the entered path is what gets watched.
pub fn render(f: &mut Frame, input: &str, theme: &Theme) {
    let area = centered_rect(64, 5, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(" Add volume: type any path on it ", theme.title));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("> ", theme.footer_key),
            Span::styled(input.to_string(), theme.text),
            Span::styled("█", theme.text_dim),
        ]),
        Line::from(Span::styled("Enter to add, Esc to cancel", theme.text_dim)),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}
