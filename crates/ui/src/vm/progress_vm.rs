use std::sync::Arc;

use edx_core::model::{CourseId, CourseProgress, Section, Subsection};
use services::{CourseInteractor, FailureKind};
use tokio::sync::watch;
use tracing::warn;

use crate::resources::{ResourceManager, StringKey};
use crate::vm::profile_vm::publish;
use crate::vm::{UiMessage, UiState};

/// Coordinator for a single course's progress screen.
///
/// There is no local cache for progress: a failed first load ends in
/// [`UiState::Error`], while a failed refresh keeps what is already shown.
pub struct CourseProgressViewModel {
    course_id: CourseId,
    interactor: Arc<dyn CourseInteractor>,
    resources: Arc<dyn ResourceManager>,
    state: watch::Sender<UiState<CourseProgress>>,
    message: watch::Sender<Option<UiMessage>>,
}

impl CourseProgressViewModel {
    #[must_use]
    pub fn new(
        course_id: CourseId,
        interactor: Arc<dyn CourseInteractor>,
        resources: Arc<dyn ResourceManager>,
    ) -> Self {
        Self {
            course_id,
            interactor,
            resources,
            state: watch::Sender::new(UiState::Loading),
            message: watch::Sender::new(None),
        }
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn ui_state(&self) -> UiState<CourseProgress> {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<UiState<CourseProgress>> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn ui_message(&self) -> Option<UiMessage> {
        self.message.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_message(&self) -> watch::Receiver<Option<UiMessage>> {
        self.message.subscribe()
    }

    /// Consume the pending message, if any.
    pub fn take_message(&self) -> Option<UiMessage> {
        let mut taken = None;
        self.message.send_if_modified(|current| {
            taken = current.take();
            taken.is_some()
        });
        taken
    }

    /// First load: show a spinner, then the progress or an error.
    pub async fn load_progress(&self) {
        publish(&self.state, UiState::Loading);
        self.fetch().await;
    }

    /// Reload while keeping the current data on screen.
    pub async fn refresh(&self) {
        self.fetch().await;
    }

    async fn fetch(&self) {
        match self.interactor.get_course_progress(&self.course_id).await {
            Ok(progress) => {
                publish(&self.state, UiState::Data(progress));
                publish(&self.message, None);
            }
            Err(err) => {
                warn!(%err, course_id = %self.course_id, "course progress fetch failed");
                let key = match err.kind() {
                    FailureKind::Connectivity => StringKey::ErrorNoConnection,
                    FailureKind::Generic => StringKey::ErrorUnknown,
                };
                publish(
                    &self.message,
                    Some(UiMessage::SnackBar(self.resources.string(key))),
                );
                if self.state.borrow().data().is_none() {
                    publish(&self.state, UiState::Error);
                }
            }
        }
    }
}

/// Display rows for the progress screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub overall_percent: u32,
    pub sections: Vec<SectionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionVm {
    pub name: String,
    pub completed: bool,
    pub subsections: Vec<SubsectionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubsectionVm {
    pub name: String,
    pub grade_type: String,
    pub score_label: String,
    pub percentage: String,
    pub graded: bool,
    pub completion_percent: u32,
}

#[must_use]
pub fn map_progress(progress: &CourseProgress) -> ProgressVm {
    ProgressVm {
        overall_percent: progress.progress.min(100),
        sections: progress.sections.iter().map(map_section).collect(),
    }
}

fn map_section(section: &Section) -> SectionVm {
    let completed = !section.subsections.is_empty()
        && section
            .subsections
            .iter()
            .all(|subsection| subsection.completion() >= 1.0);
    SectionVm {
        name: section.display_name.clone(),
        completed,
        subsections: section.subsections.iter().map(map_subsection).collect(),
    }
}

fn map_subsection(subsection: &Subsection) -> SubsectionVm {
    let score_label = if subsection.show_grades {
        format!("{} / {}", subsection.earned, subsection.total)
    } else {
        String::new()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let completion_percent = (subsection.completion() * 100.0).round() as u32;

    SubsectionVm {
        name: subsection.display_name.clone(),
        grade_type: subsection.grade_type.clone(),
        score_label,
        percentage: subsection.percentage_string.clone(),
        graded: subsection.graded,
        completion_percent,
    }
}
