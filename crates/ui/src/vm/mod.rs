mod account_vm;
mod profile_vm;
mod progress_vm;
mod state;
mod time_fmt;

#[cfg(test)]
pub(crate) mod test_support;

pub use account_vm::{ProfileCardVm, map_profile_card};
pub use profile_vm::{ProfileDeps, ProfileViewModel};
pub use progress_vm::{
    CourseProgressViewModel, ProgressVm, SectionVm, SubsectionVm, map_progress,
};
pub use state::{UiMessage, UiState};
pub use time_fmt::format_date;
