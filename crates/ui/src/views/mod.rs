mod chapter_end;
mod profile;
mod progress;
mod watch;

pub use chapter_end::ChapterEndDialog;
pub use profile::{ProfileContent, ProfileView};
pub use progress::{CourseProgressView, ProgressContent};
pub use watch::use_watch;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
