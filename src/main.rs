mod app;
mod collectors;
mod config;
mod input;
mod models;
mod poller;
mod ui;
mod util;
mod watchlist;

use anyhow::{Context, Result};
use app::App;
use clap::{CommandFactory, Parser};
use collectors::statvfs::{volume_root, StatvfsProvider};
use config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Duration;
use util::watch_store::FileStore;
use watchlist::WatchList;

#[derive(Parser, Debug)]
#[command(name = "volwatch", about = "Live free space for the volumes you pick", version)]
struct Cli {
    /// Refresh interval in milliseconds (default from config, 3000)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Color theme: default, dracula, gruvbox, nord
    #[arg(short = 't', long)]
    theme: Option<String>,

    /// Watch list file to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    watch_file: Option<PathBuf>,

    /// Print every watched volume once and exit
    #[arg(long)]
    list: bool,

    /// Print a one-shot JSON snapshot of every watched volume and exit
    #[arg(long)]
    json: bool,

    /// Watch the volume that holds PATH, then exit
    #[arg(long, value_name = "PATH")]
    add: Option<String>,

    /// Stop watching the volume ID, then exit
    #[arg(long, value_name = "ID")]
    remove: Option<String>,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn is_one_shot(&self) -> bool {
        self.list || self.json || self.add.is_some() || self.remove.is_some() || self.config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "volwatch", &mut io::stdout());
        return Ok(());
    }

    init_logging(&cli);

    let cfg = Config::load();
    let store = open_store(&cli, &cfg)?;

    if cli.config {
        return run_print_config(&cfg, &store);
    }
    if let Some(path) = &cli.add {
        return run_add(store, path);
    }
    if let Some(id) = &cli.remove {
        return run_remove(store, id);
    }
    if cli.json {
        return run_json_snapshot(store);
    }
    if cli.list {
        return run_list(store);
    }

    let theme = ui::theme::ThemeVariant::from_name(cli.theme.as_deref().unwrap_or(&cfg.general.theme));
    let interval = Duration::from_millis(cli.interval.unwrap_or(cfg.general.refresh_interval_ms));

    // Load before touching the terminal so a bad store is reported plainly.
    let mut app = App::new(store, StatvfsProvider, theme, interval)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let result = run(&mut app);
    restore_terminal()?;
    result
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    // The TUI owns the terminal; send its logs to a file instead of stderr.
    if !cli.is_one_shot() {
        if let Some(file) = open_log_file() {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    builder.init();
}

fn open_log_file() -> Option<std::fs::File> {
    let path = dirs::data_local_dir()?.join("volwatch").join("volwatch.log");
    std::fs::create_dir_all(path.parent()?).ok()?;
    std::fs::OpenOptions::new().create(true).append(true).open(path).ok()
}

fn open_store(cli: &Cli, cfg: &Config) -> Result<FileStore> {
    let path = match &cli.watch_file {
        Some(p) => p.clone(),
        None    => cfg.watch_file().context("no data directory for the watch list; pass --watch-file")?,
    };
    Ok(FileStore::new(path))
}

fn run_print_config(cfg: &Config, store: &FileStore) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  refresh_interval_ms = {}", cfg.general.refresh_interval_ms);
    println!("  theme               = {}", cfg.general.theme);
    println!();
    println!("[storage]");
    println!("  watch_file          = {}", store.path().display());
    Ok(())
}

fn run_add(store: FileStore, path: &str) -> Result<()> {
    let root = volume_root(path)?;
    let mut list = WatchList::load(store, &StatvfsProvider)?;
    if list.add(&root, &StatvfsProvider)? {
        println!("Watching {}", root);
    } else {
        println!("{} is already watched", root);
    }
    Ok(())
}

fn run_remove(store: FileStore, id: &str) -> Result<()> {
    let mut list = WatchList::load(store, &StatvfsProvider)?;
    if list.remove(id)? {
        println!("Stopped watching {}", id);
    } else {
        println!("{} was not watched (watching: {})", id, list.members().join(", "));
    }
    Ok(())
}

fn run_list(store: FileStore) -> Result<()> {
    use util::human::volume_label;

    let list = WatchList::load(store, &StatvfsProvider)?;
    if list.is_empty() {
        println!("No volumes watched.");
        return Ok(());
    }
    for vol in list.volumes() {
        let flag = match vol.state.tier() {
            models::volume::ColorTier::Warning => " !!",
            _ => "",
        };
        println!("{}{}", volume_label(&vol.id, &vol.state), flag);
    }
    Ok(())
}

fn run_json_snapshot(store: FileStore) -> Result<()> {
    use serde_json::{json, Value};
    use util::human::format_size;

    let list = WatchList::load(store, &StatvfsProvider)?;
    let volumes: Vec<Value> = list.volumes().iter().map(|vol| {
        match vol.state.usage() {
            Some(u) => json!({
                "id":          vol.id,
                "readable":    true,
                "tier":        vol.state.tier().label(),
                "used_pct":    (u.used_pct * 10.0).round() / 10.0,
                "total":       u.total_bytes,
                "free":        u.free_bytes,
                "avail":       u.avail_bytes,
                "total_hr":    format_size(u.total_bytes),
                "avail_hr":    format_size(u.avail_bytes),
            }),
            None => json!({
                "id":       vol.id,
                "readable": false,
                "tier":     vol.state.tier().label(),
            }),
        }
    }).collect();

    let snapshot = json!({
        "volwatch_version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Local::now().to_rfc3339(),
        "volumes":   volumes,
    });

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    app.run(&mut term)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
