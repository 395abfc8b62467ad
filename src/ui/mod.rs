pub mod add_prompt;
pub mod dashboard;
pub mod footer;
pub mod help;
pub mod theme;
pub mod volume_bars;
pub mod volume_list;

use ratatui::layout::Rect;

/// A `width` x `height` rect centred in `r`, capped at the available area.
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
