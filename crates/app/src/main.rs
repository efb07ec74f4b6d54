use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, AudioBackend, Clock};
use ui::platform::{ClipboardRef, SelectionCopy, SystemClipboard, WebAudio};
use ui::{App, UiApp, build_app_context};
use url::Url;

const DEFAULT_DB_URL: &str = "sqlite://memo.sqlite3";
const DEFAULT_CATALOG: &str = "prompts.json";
const DEFAULT_BASE_URL: &str = "https://memo.local/";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidUrl { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidUrl { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    location: Url,
    clipboard: ClipboardRef,
}

impl UiApp for DesktopApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn start_location(&self) -> Url {
        self.location.clone()
    }

    fn audio(&self) -> Arc<dyn AudioBackend> {
        Arc::new(WebAudio)
    }

    fn clipboard(&self) -> ClipboardRef {
        Arc::clone(&self.clipboard)
    }

    fn fallback_clipboard(&self) -> ClipboardRef {
        Arc::new(SelectionCopy)
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    catalog: PathBuf,
    location: Url,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [ui] [--db <sqlite_url>] [--catalog <path>] [--link <url>] [--base-url <url>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --catalog {DEFAULT_CATALOG}");
    eprintln!("  --base-url {DEFAULT_BASE_URL}");
    eprintln!();
    eprintln!("--link may be a full URL or a query such as ?q=42.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MEMO_DB_URL, MEMO_CATALOG, MEMO_LINK, MEMO_BASE_URL, RUST_LOG");
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env("MEMO_DB_URL").map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut catalog = env("MEMO_CATALOG").map_or_else(|| PathBuf::from(DEFAULT_CATALOG), PathBuf::from);
        let mut link = env("MEMO_LINK");
        let mut base_url = env("MEMO_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--catalog" => catalog = PathBuf::from(require_value(args, "--catalog")?),
                "--link" => link = Some(require_value(args, "--link")?),
                "--base-url" => base_url = require_value(args, "--base-url")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let location = resolve_location(&base_url, link.as_deref())?;
        Ok(Self {
            db_url,
            catalog,
            location,
        })
    }
}

/// The base URL, or the link resolved against it.
fn resolve_location(base_url: &str, link: Option<&str>) -> Result<Url, ArgsError> {
    let base = Url::parse(base_url).map_err(|_| ArgsError::InvalidUrl {
        flag: "--base-url",
        raw: base_url.to_string(),
    })?;
    match link {
        None => Ok(base),
        Some(raw) => base.join(raw.trim()).map_err(|_| ArgsError::InvalidUrl {
            flag: "--link",
            raw: raw.to_string(),
        }),
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // `ui` is the only subcommand and also the default.
    match argv.first().map(String::as_str) {
        Some("ui") => {
            argv.remove(0);
        }
        Some(first) if !first.starts_with('-') => {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            return Err(ArgsError::UnknownArg(first.to_string()).into());
        }
        _ => {}
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    tracing::debug!(?parsed, "arguments parsed");

    prepare_sqlite_file(&parsed.db_url)?;
    let services =
        AppServices::new_sqlite(&parsed.db_url, &parsed.catalog, Clock::default_clock()).await?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        location: parsed.location,
        clipboard: Arc::new(SystemClipboard::new()),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Memo Writing")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        tracing::error!(error = %err, "startup failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
