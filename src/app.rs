use crate::collectors::statvfs::{volume_root, StatvfsProvider};
use crate::collectors::VolumeInfoProvider;
use crate::input::{handle_key, handle_prompt_key, Action, PromptAction};
use crate::poller::Poller;
use crate::ui::dashboard;
use crate::ui::theme::{Theme, ThemeVariant};
use crate::util::watch_store::FileStore;
use crate::watchlist::{WatchList, WatchStore};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

// Upper bound on how long the loop waits for input, so the clock and
// status line keep moving between polls.
const MAX_POLL_TIMEOUT: Duration = Duration::from_millis(250);
const STATUS_TTL:       Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct Status {
    pub text:     String,
    pub is_error: bool,
    pub at:       Instant,
}

pub struct App<S: WatchStore = FileStore, P: VolumeInfoProvider = StatvfsProvider> {
    pub theme:         Theme,
    pub theme_variant: ThemeVariant,

    pub watch:      WatchList<S>,
    pub list_state: ListState,

    /// Path being typed into the add prompt; `None` when closed.
    pub prompt:    Option<String>,
    pub show_help: bool,
    pub status:    Option<Status>,

    provider: P,
    poller:   Poller,

    pub should_quit: bool,
}

impl<S: WatchStore, P: VolumeInfoProvider> App<S, P> {
    pub fn new(store: S, provider: P, theme: ThemeVariant, interval: Duration) -> Result<Self> {
        let watch = WatchList::load(store, &provider)?;
        let mut list_state = ListState::default();
        if !watch.is_empty() {
            list_state.select(Some(0));
        }
        Ok(Self {
            theme:         Theme::for_variant(theme),
            theme_variant: theme,
            watch,
            list_state,
            prompt:        None,
            show_help:     false,
            status:        None,
            provider,
            poller:        Poller::new(interval),
            should_quit:   false,
        })
    }

    pub fn refresh_interval(&self) -> Duration {
        self.poller.interval()
    }

    // ── Main event loop ───────────────────────────────────────────────

    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| dashboard::render(f, self))?;

            let timeout = self.poller.until_next().min(MAX_POLL_TIMEOUT);
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit { break; }

            if self.poller.due() {
                self.poller.tick(&mut self.watch, &self.provider);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.prompt.is_some() {
            self.handle_prompt(handle_prompt_key(key));
        } else {
            self.handle_action(handle_key(key));
        }
    }

    /// Current status message, if it hasn't expired yet.
    pub fn live_status(&self) -> Option<&Status> {
        self.status.as_ref().filter(|s| s.at.elapsed() < STATUS_TTL)
    }

    // ── Input dispatch ────────────────────────────────────────────────

    fn handle_action(&mut self, action: Action) {
        if self.show_help {
            match action {
                Action::Quit => self.should_quit = true,
                Action::ShowHelp | Action::Back => self.show_help = false,
                _ => {}
            }
            return;
        }

        match action {
            Action::Quit       => self.should_quit = true,
            Action::ShowHelp   => self.show_help = true,
            Action::SelectUp   => self.select_delta(-1),
            Action::SelectDown => self.select_delta(1),
            Action::JumpTop => {
                if !self.watch.is_empty() { self.list_state.select(Some(0)); }
            }
            Action::JumpBottom => {
                if !self.watch.is_empty() { self.list_state.select(Some(self.watch.len() - 1)); }
            }
            Action::AddVolume    => self.prompt = Some(String::new()),
            Action::RemoveVolume => self.remove_selected(),
            Action::Refresh      => self.poller.tick(&mut self.watch, &self.provider),
            Action::CycleTheme => {
                self.theme_variant = self.theme_variant.next();
                self.theme = Theme::for_variant(self.theme_variant);
            }
            Action::Back | Action::None => {}
        }
    }

    fn handle_prompt(&mut self, action: PromptAction) {
        match action {
            PromptAction::Insert(c) => {
                if let Some(buf) = self.prompt.as_mut() { buf.push(c); }
            }
            PromptAction::Backspace => {
                if let Some(buf) = self.prompt.as_mut() { buf.pop(); }
            }
            PromptAction::Cancel => self.prompt = None,
            PromptAction::Submit => {
                let path = self.prompt.take().unwrap_or_default();
                if !path.trim().is_empty() {
                    self.add_path(&path);
                }
            }
            PromptAction::None => {}
        }
    }

    /// Watch the volume that holds `path`. Re-adding a watched volume only
    /// moves the selection to it.
    fn add_path(&mut self, path: &str) {
        let root = match volume_root(path) {
            Ok(r)  => r,
            Err(e) => return self.set_status(format!("{e:#}"), true),
        };
        match self.watch.add(&root, &self.provider) {
            Ok(true) => self.set_status(format!("Watching {}", root), false),
            Ok(false) => {}
            Err(e) => {
                log::warn!("could not save watch list: {e:#}");
                self.set_status(format!("Not added: {e:#}"), true);
                return;
            }
        }
        let idx = self.watch.volumes().iter().position(|v| v.id == root);
        self.list_state.select(idx);
    }

    fn remove_selected(&mut self) {
        let Some(idx) = self.list_state.selected() else { return };
        let Some(id) = self.watch.volumes().get(idx).map(|v| v.id.clone()) else { return };

        match self.watch.remove(&id) {
            Ok(_) => {
                let sel = if self.watch.is_empty() {
                    None
                } else {
                    Some(idx.min(self.watch.len() - 1))
                };
                self.list_state.select(sel);
                self.set_status(format!("Stopped watching {}", id), false);
            }
            Err(e) => {
                log::warn!("could not save watch list: {e:#}");
                self.set_status(format!("Not removed: {e:#}"), true);
            }
        }
    }

    fn select_delta(&mut self, delta: i32) {
        if self.watch.is_empty() { return; }
        let max = self.watch.len() as i32 - 1;
        let cur = self.list_state.selected().unwrap_or(0) as i32;
        self.list_state.select(Some((cur + delta).clamp(0, max) as usize));
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some(Status { text, is_error, at: Instant::now() });
    }
}
