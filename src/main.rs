//! Cliniboard CLI
//!
//! Terminal front end for the clinic administration core: drives the
//! navigation shell from typed commands and renders views as plain
//! text. Every mutation goes through the view modules, so the terminal
//! sees the same validation, confirmation, and flash behavior the
//! screens define.

use clap::Parser;
use cliniboard::config::LoggingConfig;
use cliniboard::{
    generate_default_config, ChromeSurface, ClinicData, Config, ConfirmSurface, DirMarkupSource,
    FileStore, FlashSurface, KeyValueStore, NavState, Route, Shell, ViewContext, ViewId, Views,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cliniboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Clinic administration from the terminal")]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Markup fragments directory override
    #[arg(long)]
    markup_dir: Option<PathBuf>,

    /// View to open when no saved page exists
    #[arg(long)]
    default_view: Option<String>,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

/// Chrome rendered as plain terminal output.
struct TerminalChrome;

impl ChromeSurface for TerminalChrome {
    fn set_content(&self, markup: &str) {
        println!("\n{}", markup.trim_end());
    }

    fn fill(&self, _slot: &str, body: &str) {
        println!("\n{}", body);
    }

    fn set_active_nav(&self, view: ViewId) {
        let nav: Vec<String> = ViewId::all()
            .iter()
            .map(|v| {
                if *v == view {
                    format!("[{}]", v)
                } else {
                    v.to_string()
                }
            })
            .collect();
        println!("\n{}", nav.join("  "));
    }

    fn set_title(&self, title: &str) {
        println!("=== {} ===", title);
    }

    fn render_error(&self, fragment: &str, message: &str) {
        println!("\nCould not load \"{}\": {}", fragment, message);
        println!("Type \"retry\" to try again.");
    }
}

/// Flash messages as prefixed terminal lines.
struct TerminalFlash;

impl FlashSurface for TerminalFlash {
    fn flash(&self, message: &str) {
        println!("» {}", message);
    }
}

/// Blocking confirmation over stdin. An empty prompt answer cancels.
struct StdinConfirm;

impl ConfirmSurface for StdinConfirm {
    fn confirm(&self, question: &str) -> bool {
        print!("{} [y/N] ", question);
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn prompt(&self, question: &str) -> Option<String> {
        print!("{} ", question);
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return None;
        }
        let answer = answer.trim();
        if answer.is_empty() {
            None
        } else {
            Some(answer.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data.data_dir = dir.to_string_lossy().to_string();
    }
    if let Some(dir) = &cli.markup_dir {
        config.shell.markup_dir = dir.to_string_lossy().to_string();
    }
    if let Some(view) = &cli.default_view {
        config.shell.default_view = view.clone();
    }

    init_logging(&config.logging);
    tracing::info!("Cliniboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", config.data.data_dir);

    let backend: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.data.data_dir)?);
    let data = Arc::new(ClinicData::open(backend)?);

    let markup_root = PathBuf::from(&config.shell.markup_dir);
    ensure_default_markup(&markup_root)?;

    let chrome: Arc<dyn ChromeSurface> = Arc::new(TerminalChrome);
    let flash: Arc<dyn FlashSurface> = Arc::new(TerminalFlash);
    let ctx = Arc::new(ViewContext {
        data: data.clone(),
        chrome: chrome.clone(),
        flash: flash.clone(),
        confirm: Arc::new(StdinConfirm),
    });
    let views = Views::new(ctx);

    let default_view = Route::parse(&config.shell.default_view)
        .map(|r| r.view)
        .unwrap_or(ViewId::Specialties);
    let shell = Shell::new(
        views.registry(),
        Arc::new(DirMarkupSource::new(&markup_root)),
        chrome,
        flash,
        data.backend().clone(),
        default_view,
    );

    shell.start().await;
    run_commands(&shell, &views).await?;
    shell.shutdown().await;

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("cliniboard={}", config.level)),
    );
    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Write a minimal static fragment for any view missing one, so a
/// fresh checkout starts navigable. Existing fragments are kept.
fn ensure_default_markup(root: &Path) -> std::io::Result<()> {
    for view in ViewId::all() {
        let path = root.join(view.markup_path());
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, format!("{}\n{}\n", view.title(), "-".repeat(view.title().len())))?;
    }
    Ok(())
}

async fn run_commands(shell: &Shell, views: &Views) -> anyhow::Result<()> {
    print_help();
    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("\n> ");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "go" => shell.on_fragment_changed(rest).await,
            "retry" => shell.retry().await,
            "find" => find(shell, views, rest).await,
            "add-specialty" => views.specialties.add(rest).await,
            "add-place" => views.places.add(rest).await,
            "add-patient" => views.patients.add(rest).await,
            "add-clinician" => match rest.split_once(' ') {
                Some((id, name)) => {
                    if let Some(specialty_id) = parse_id(id) {
                        views.clinicians.add(name.trim(), specialty_id).await;
                    }
                }
                None => println!("Usage: add-clinician <specialty-id> <name>"),
            },
            "rename-patient" => {
                if let Some(id) = parse_id(rest) {
                    views.patients.rename(id).await;
                }
            }
            "delete-specialty" => {
                if let Some(id) = parse_id(rest) {
                    views.specialties.remove(id).await;
                }
            }
            "delete-place" => {
                if let Some(id) = parse_id(rest) {
                    views.places.remove(id).await;
                }
            }
            "delete-patient" => {
                if let Some(id) = parse_id(rest) {
                    views.patients.remove(id).await;
                }
            }
            "clinicians-for" => {
                if let Some(specialty_id) = parse_id(rest) {
                    let choices = views.patients.clinician_choices(specialty_id).await;
                    if choices.is_empty() {
                        println!("No clinicians available for this specialty");
                    }
                    for clinician in choices {
                        println!("#{}  {}", clinician.id, clinician.name);
                    }
                }
            }
            "schedule" => schedule(views, rest).await,
            _ => println!("Unknown command \"{}\". Type \"help\" for the list.", command),
        }
    }

    Ok(())
}

/// Filter the active view's list. Only list/search views react.
async fn find(shell: &Shell, views: &Views, text: &str) {
    match shell.state().await {
        NavState::Active(route) => match route.view {
            ViewId::Specialties => views.specialties.set_filter(text).await,
            ViewId::Places => views.places.set_filter(text).await,
            _ => println!("The active view is not searchable"),
        },
        _ => println!("No active view"),
    }
}

/// `schedule` with five args targets a patient by id; with four it
/// targets the patient shown in the detail view.
async fn schedule(views: &Views, rest: &str) {
    let args: Vec<&str> = rest.split_whitespace().collect();
    match args.as_slice() {
        [patient, specialty, clinician, datetime, duration] => {
            let (Some(patient_id), Some(specialty_id), Some(clinician_id), Some(duration)) = (
                parse_id(patient),
                parse_id(specialty),
                parse_id(clinician),
                parse_id(duration),
            ) else {
                return;
            };
            views
                .patients
                .schedule(patient_id, specialty_id, clinician_id, datetime, duration)
                .await;
        }
        [specialty, clinician, datetime, duration] => {
            let (Some(specialty_id), Some(clinician_id), Some(duration)) =
                (parse_id(specialty), parse_id(clinician), parse_id(duration))
            else {
                return;
            };
            views
                .patient_detail
                .schedule(specialty_id, clinician_id, datetime, duration)
                .await;
        }
        _ => println!(
            "Usage: schedule [<patient-id>] <specialty-id> <clinician-id> <datetime> <minutes>"
        ),
    }
}

fn parse_id(raw: &str) -> Option<u32> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            println!("Expected a number, got \"{}\"", raw);
            None
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  go <view[/id]>                      navigate (e.g. go patients, go patient-detail/1)");
    println!("  retry                               retry a failed navigation");
    println!("  find <text>                         filter the active list view");
    println!("  add-specialty <name>");
    println!("  add-place <name>");
    println!("  add-patient <name>");
    println!("  add-clinician <specialty-id> <name>");
    println!("  rename-patient <id>");
    println!("  delete-specialty <id> | delete-place <id> | delete-patient <id>");
    println!("  clinicians-for <specialty-id>       clinicians offering a specialty");
    println!("  schedule [<patient-id>] <specialty-id> <clinician-id> <datetime> <minutes>");
    println!("  help | quit");
}
