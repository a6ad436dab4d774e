#![forbid(unsafe_code)]

pub mod analytics;
pub mod api;
pub mod app_services;
pub mod config;
pub mod downloads;
pub mod error;
pub mod interactor;
pub mod notifier;
pub mod session;

pub use edx_core::Clock;

pub use analytics::{ProfileAnalytics, TracingAnalytics};
pub use api::HttpEdxApi;
pub use app_services::AppServices;
pub use config::ApiConfig;
pub use downloads::{DownloadQueue, DownloadWorkerController};
pub use error::{AppServicesError, ConfigError, FailureKind, ProfileServiceError};
pub use interactor::{CourseInteractor, ProfileInteractor};
pub use notifier::{ProfileEvent, ProfileNotifier};
pub use session::{CookieManager, SessionCookieStore};
