use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use edx_core::model::CourseId;
use services::{ApiConfig, AppServices, Clock};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, EnglishResources, ResourceManager, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidCourseId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidCourseId { raw } => write!(f, "invalid --course value: {raw}"),
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
    course: Option<CourseId>,
}

impl UiApp for DesktopApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn resources(&self) -> Arc<dyn ResourceManager> {
        Arc::new(EnglishResources)
    }

    fn default_course(&self) -> Option<CourseId> {
        self.course.clone()
    }
}

struct Args {
    db_url: String,
    base_url: Option<String>,
    username: Option<String>,
    course: Option<CourseId>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--db <sqlite_url>] [--base-url <url>] [--username <name>] [--course <course_id>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://edx-cache.sqlite3");
    eprintln!("  --base-url https://courses.edx.org");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EDX_DB_URL, EDX_BASE_URL, EDX_USERNAME, EDX_ACCESS_TOKEN, EDX_CLIENT_ID,");
    eprintln!("  EDX_TIMEOUT_SECS, EDX_COURSE_ID, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("EDX_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://edx-cache.sqlite3".into(), normalize_sqlite_url);
        let mut base_url = None;
        let mut username = None;
        let mut course = std::env::var("EDX_COURSE_ID")
            .ok()
            .and_then(|value| CourseId::new(value).ok());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--base-url" => base_url = Some(require_value(args, "--base-url")?),
                "--username" => username = Some(require_value(args, "--username")?),
                "--course" => {
                    let value = require_value(args, "--course")?;
                    let parsed = CourseId::new(value.clone())
                        .map_err(|_| ArgsError::InvalidCourseId { raw: value })?;
                    course = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            base_url,
            username,
            course,
        })
    }

    /// Environment settings with command-line values taking precedence.
    fn api_config(&self) -> Result<ApiConfig, services::ConfigError> {
        let username = self.username.clone();
        let config = ApiConfig::from_lookup(|key| match key {
            "EDX_USERNAME" if username.is_some() => username.clone(),
            _ => std::env::var(key).ok(),
        })?;
        match self.base_url.as_deref() {
            Some(raw) => config.with_base_url(raw),
            None => Ok(config),
        }
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
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let config = parsed.api_config()?;
    info!(
        base_url = %config.base_url,
        username = %config.username,
        db = %parsed.db_url,
        "starting"
    );

    // The cache lives in the binary glue so services never touch the filesystem directly.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, config, Clock::default()).await?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        course: parsed.course,
    });
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Open edX")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
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

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        tracing::error!(%err, "startup failed");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter)
    }

    #[test]
    fn relative_db_path_becomes_absolute_url() {
        let url = normalize_sqlite_url("sqlite:cache/profile.db".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("cache/profile.db"), "{url}");
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }

    #[test]
    fn flags_are_parsed() {
        let args = parse(&[
            "--db",
            "sqlite::memory:",
            "--username",
            "learner",
            "--course",
            "course-v1:edX+DemoX+Demo",
        ])
        .unwrap();
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.username.as_deref(), Some("learner"));
        assert_eq!(args.course.unwrap().as_str(), "course-v1:edX+DemoX+Demo");
    }

    #[test]
    fn bad_flags_are_rejected() {
        assert!(matches!(
            parse(&["--course", "demo"]),
            Err(ArgsError::InvalidCourseId { .. })
        ));
        assert!(matches!(parse(&["--db"]), Err(ArgsError::MissingValue { flag: "--db" })));
        assert!(matches!(parse(&["--verbose"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn username_flag_overrides_environment() {
        let args = parse(&["--username", "cli-user", "--base-url", "http://localhost:8000"]).unwrap();
        let config = args.api_config().unwrap();
        assert_eq!(config.username.as_str(), "cli-user");
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
    }
}
