use crate::models::volume::ColorTier;
use ratatui::style::{Color, Modifier, Style};

// ── Helper: build an Rgb Color from a hex literal ──────────────────────

const fn rgb(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >>  8) & 0xFF) as u8,
        ( hex        & 0xFF) as u8,
    )
}

// ── Theme variant selector ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeVariant {
    Default,
    Dracula,
    Gruvbox,
    Nord,
}

impl ThemeVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Dracula => "Dracula",
            Self::Gruvbox => "Gruvbox",
            Self::Nord    => "Nord",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Default => Self::Dracula,
            Self::Dracula => Self::Gruvbox,
            Self::Gruvbox => Self::Nord,
            Self::Nord    => Self::Default,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::Dracula,
            "gruvbox" => Self::Gruvbox,
            "nord"    => Self::Nord,
            _         => Self::Default,
        }
    }
}

// ── Theme struct ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Theme {
    pub border:         Style,
    pub border_focused: Style,
    pub title:          Style,
    pub text:           Style,
    pub text_dim:       Style,
    pub selected:       Style,
    pub header:         Style,
    pub ok:             Style,
    pub crit:           Style,
    pub bar_normal:     Style,
    pub bar_warn:       Style,
    pub bar_unreadable: Style,
    pub footer_bg:      Style,
    pub footer_key:     Style,
    pub footer_text:    Style,
}

impl Theme {
    pub fn for_variant(v: ThemeVariant) -> Self {
        match v {
            ThemeVariant::Default => Self::default(),
            ThemeVariant::Dracula => Self::dracula(),
            ThemeVariant::Gruvbox => Self::gruvbox(),
            ThemeVariant::Nord    => Self::nord(),
        }
    }

    pub fn default() -> Self {
        Self {
            border:         Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            title:          Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            text:           Style::default().fg(Color::White),
            text_dim:       Style::default().fg(Color::DarkGray),
            selected:       Style::default().fg(Color::Black).bg(Color::Cyan),
            header:         Style::default().fg(Color::Black).bg(Color::Blue).add_modifier(Modifier::BOLD),
            ok:             Style::default().fg(Color::Green),
            crit:           Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            // DodgerBlue / red / gray
            bar_normal:     Style::default().fg(rgb(0x1e90ff)).bg(Color::Black),
            bar_warn:       Style::default().fg(Color::Red).bg(Color::Black),
            bar_unreadable: Style::default().fg(Color::Gray).bg(Color::Black),
            footer_bg:      Style::default().bg(Color::DarkGray).fg(Color::White),
            footer_key:     Style::default().bg(Color::DarkGray).fg(Color::Cyan).add_modifier(Modifier::BOLD),
            footer_text:    Style::default().bg(Color::DarkGray).fg(Color::Gray),
        }
    }

    fn dracula() -> Self {
        // https://draculatheme.com/
        // bg: #282a36  current-line: #44475a  comment: #6272a4
        // fg: #f8f8f2  cyan: #8be9fd  green: #50fa7b  red: #ff5555  purple: #bd93f9
        Self {
            border:         Style::default().fg(rgb(0x6272a4)),
            border_focused: Style::default().fg(rgb(0xbd93f9)),
            title:          Style::default().fg(rgb(0xf8f8f2)).add_modifier(Modifier::BOLD),
            text:           Style::default().fg(rgb(0xf8f8f2)),
            text_dim:       Style::default().fg(rgb(0x6272a4)),
            selected:       Style::default().fg(rgb(0x282a36)).bg(rgb(0xff79c6)),
            header:         Style::default().fg(rgb(0xf8f8f2)).bg(rgb(0x44475a)).add_modifier(Modifier::BOLD),
            ok:             Style::default().fg(rgb(0x50fa7b)),
            crit:           Style::default().fg(rgb(0xff5555)).add_modifier(Modifier::BOLD),
            bar_normal:     Style::default().fg(rgb(0x8be9fd)).bg(rgb(0x282a36)),
            bar_warn:       Style::default().fg(rgb(0xff5555)).bg(rgb(0x282a36)),
            bar_unreadable: Style::default().fg(rgb(0x6272a4)).bg(rgb(0x282a36)),
            footer_bg:      Style::default().bg(rgb(0x44475a)).fg(rgb(0xf8f8f2)),
            footer_key:     Style::default().bg(rgb(0x44475a)).fg(rgb(0xbd93f9)).add_modifier(Modifier::BOLD),
            footer_text:    Style::default().bg(rgb(0x44475a)).fg(rgb(0x6272a4)),
        }
    }

    fn gruvbox() -> Self {
        // https://github.com/morhetz/gruvbox
        // bg0: #282828  bg1: #3c3836  fg1: #ebdbb2  fg4: #a89984
        // red: #fb4934  green: #b8bb26  blue/aqua: #83a598
        Self {
            border:         Style::default().fg(rgb(0x504945)),
            border_focused: Style::default().fg(rgb(0x83a598)),
            title:          Style::default().fg(rgb(0xebdbb2)).add_modifier(Modifier::BOLD),
            text:           Style::default().fg(rgb(0xebdbb2)),
            text_dim:       Style::default().fg(rgb(0xa89984)),
            selected:       Style::default().fg(rgb(0x282828)).bg(rgb(0xd79921)),
            header:         Style::default().fg(rgb(0xebdbb2)).bg(rgb(0x504945)).add_modifier(Modifier::BOLD),
            ok:             Style::default().fg(rgb(0xb8bb26)),
            crit:           Style::default().fg(rgb(0xfb4934)).add_modifier(Modifier::BOLD),
            bar_normal:     Style::default().fg(rgb(0x83a598)).bg(rgb(0x282828)),
            bar_warn:       Style::default().fg(rgb(0xfb4934)).bg(rgb(0x282828)),
            bar_unreadable: Style::default().fg(rgb(0x665c54)).bg(rgb(0x282828)),
            footer_bg:      Style::default().bg(rgb(0x3c3836)).fg(rgb(0xebdbb2)),
            footer_key:     Style::default().bg(rgb(0x3c3836)).fg(rgb(0x83a598)).add_modifier(Modifier::BOLD),
            footer_text:    Style::default().bg(rgb(0x3c3836)).fg(rgb(0xa89984)),
        }
    }

    fn nord() -> Self {
        // https://www.nordtheme.com/
        // Polar Night: #2e3440 #3b4252 #4c566a   Snow Storm: #d8dee9 #e5e9f0 #eceff4
        // Frost: #88c0d0 #81a1c1   Aurora: #bf616a #a3be8c
        Self {
            border:         Style::default().fg(rgb(0x4c566a)),
            border_focused: Style::default().fg(rgb(0x88c0d0)),
            title:          Style::default().fg(rgb(0xeceff4)).add_modifier(Modifier::BOLD),
            text:           Style::default().fg(rgb(0xe5e9f0)),
            text_dim:       Style::default().fg(rgb(0x4c566a)),
            selected:       Style::default().fg(rgb(0x2e3440)).bg(rgb(0x88c0d0)),
            header:         Style::default().fg(rgb(0xeceff4)).bg(rgb(0x3b4252)).add_modifier(Modifier::BOLD),
            ok:             Style::default().fg(rgb(0xa3be8c)),
            crit:           Style::default().fg(rgb(0xbf616a)).add_modifier(Modifier::BOLD),
            bar_normal:     Style::default().fg(rgb(0x81a1c1)).bg(rgb(0x2e3440)),
            bar_warn:       Style::default().fg(rgb(0xbf616a)).bg(rgb(0x2e3440)),
            bar_unreadable: Style::default().fg(rgb(0x4c566a)).bg(rgb(0x2e3440)),
            footer_bg:      Style::default().bg(rgb(0x3b4252)).fg(rgb(0xd8dee9)),
            footer_key:     Style::default().bg(rgb(0x3b4252)).fg(rgb(0x88c0d0)).add_modifier(Modifier::BOLD),
            footer_text:    Style::default().bg(rgb(0x3b4252)).fg(rgb(0x4c566a)),
        }
    }

    /// Bar style for a volume's colour tier.
    pub fn tier_style(&self, tier: ColorTier) -> Style {
        match tier {
            ColorTier::Normal     => self.bar_normal,
            ColorTier::Warning    => self.bar_warn,
            ColorTier::Unreadable => self.bar_unreadable,
        }
    }
}
