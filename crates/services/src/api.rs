use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use tracing::debug;

use edx_core::model::{
    Account, AccountDraft, AccountPrivacy, CourseId, CourseProgress, ProfileImage, Score, Section,
    Subsection, Username,
};

use crate::config::ApiConfig;
use crate::error::ProfileServiceError;
use crate::interactor::{CourseInteractor, ProfileInteractor};

/// HTTP client for the Open edX REST endpoints used by this app.
#[derive(Clone)]
pub struct HttpEdxApi {
    client: Client,
    config: ApiConfig,
}

impl HttpEdxApi {
    /// Build a client using the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the TLS backend cannot be initialized.
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProfileServiceError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProfileServiceError::Endpoint(self.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.access_token.as_deref() {
            Some(token) => request.header(AUTHORIZATION, format!("JWT {token}")),
            None => request,
        }
    }
}

#[async_trait]
impl ProfileInteractor for HttpEdxApi {
    async fn get_account(&self) -> Result<Account, ProfileServiceError> {
        let url = self.endpoint(&[
            "api",
            "user",
            "v1",
            "accounts",
            self.config.username.as_str(),
        ])?;
        debug!(%url, "fetching account");

        let response = self.authorized(self.client.get(url)).send().await?;
        if !response.status().is_success() {
            return Err(ProfileServiceError::HttpStatus(response.status()));
        }

        let body: AccountResponse = response.json().await?;
        Ok(body.into_draft().validate()?)
    }

    async fn logout(&self) -> Result<(), ProfileServiceError> {
        let Some(token) = self.config.access_token.as_deref() else {
            debug!("no access token configured; nothing to revoke");
            return Ok(());
        };

        let url = self.endpoint(&["oauth2", "revoke_token", ""])?;
        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("token", token),
            ("token_type_hint", "access_token"),
        ];

        let response = self.client.post(url).form(&form).send().await?;
        if !response.status().is_success() {
            return Err(ProfileServiceError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl CourseInteractor for HttpEdxApi {
    async fn get_course_progress(
        &self,
        course_id: &CourseId,
    ) -> Result<CourseProgress, ProfileServiceError> {
        let url = self.endpoint(&[
            "api",
            "course_home",
            "v1",
            "progress",
            course_id.as_str(),
        ])?;
        debug!(%url, "fetching course progress");

        let response = self.authorized(self.client.get(url)).send().await?;
        if !response.status().is_success() {
            return Err(ProfileServiceError::HttpStatus(response.status()));
        }

        let body: ProgressResponse = response.json().await?;
        Ok(body.into_progress())
    }
}

// ─── Wire Types ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AccountResponse {
    username: Username,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    year_of_birth: Option<i32>,
    #[serde(default)]
    level_of_education: Option<String>,
    #[serde(default)]
    goals: Option<String>,
    #[serde(default)]
    language_proficiencies: Vec<LanguageProficiency>,
    #[serde(default)]
    profile_image: Option<ProfileImage>,
    #[serde(default)]
    date_joined: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    account_privacy: Option<AccountPrivacy>,
    #[serde(default)]
    requires_parental_consent: bool,
    #[serde(default)]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
struct LanguageProficiency {
    code: String,
}

impl AccountResponse {
    fn into_draft(self) -> AccountDraft {
        AccountDraft {
            username: Some(self.username),
            name: self.name.unwrap_or_default(),
            email: self.email,
            bio: self.bio.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            year_of_birth: self.year_of_birth,
            level_of_education: self.level_of_education.unwrap_or_default(),
            goals: self.goals.unwrap_or_default(),
            language_proficiencies: self
                .language_proficiencies
                .into_iter()
                .map(|lang| lang.code)
                .collect(),
            profile_image: self.profile_image.unwrap_or_default(),
            date_joined: self.date_joined,
            account_privacy: self.account_privacy.unwrap_or_default(),
            requires_parental_consent: self.requires_parental_consent,
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProgressResponse {
    #[serde(default)]
    section_scores: Vec<SectionScores>,
    #[serde(default)]
    completion_summary: Option<CompletionSummary>,
}

#[derive(Debug, Deserialize)]
struct SectionScores {
    display_name: String,
    #[serde(default)]
    subsections: Vec<SubsectionScores>,
}

#[derive(Debug, Deserialize)]
struct SubsectionScores {
    display_name: String,
    #[serde(default)]
    num_points_earned: f32,
    #[serde(default)]
    num_points_possible: f32,
    #[serde(default)]
    percent_graded: f32,
    #[serde(default)]
    show_grades: bool,
    #[serde(default)]
    has_graded_assignment: bool,
    #[serde(default)]
    assignment_type: Option<String>,
    #[serde(default)]
    problem_scores: Vec<ProblemScore>,
}

#[derive(Debug, Deserialize)]
struct ProblemScore {
    earned: f32,
    possible: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionSummary {
    #[serde(default)]
    complete_count: u32,
    #[serde(default)]
    incomplete_count: u32,
    #[serde(default)]
    locked_count: u32,
}

impl CompletionSummary {
    fn percent(&self) -> u32 {
        let total = self.complete_count + self.incomplete_count + self.locked_count;
        if total == 0 {
            return 0;
        }
        self.complete_count * 100 / total
    }
}

impl ProgressResponse {
    fn into_progress(self) -> CourseProgress {
        let progress = self
            .completion_summary
            .as_ref()
            .map_or(0, CompletionSummary::percent);

        let sections = self
            .section_scores
            .into_iter()
            .map(|section| Section {
                display_name: section.display_name,
                subsections: section
                    .subsections
                    .into_iter()
                    .map(SubsectionScores::into_subsection)
                    .collect(),
            })
            .collect();

        CourseProgress { sections, progress }
    }
}

impl SubsectionScores {
    fn into_subsection(self) -> Subsection {
        Subsection {
            earned: self.num_points_earned,
            total: self.num_points_possible,
            percentage_string: format!("{:.0}%", self.percent_graded * 100.0),
            display_name: self.display_name,
            score: self
                .problem_scores
                .into_iter()
                .map(|score| Score {
                    earned: score.earned,
                    possible: score.possible,
                })
                .collect(),
            show_grades: self.show_grades,
            graded: self.has_graded_assignment,
            grade_type: self.assignment_type.unwrap_or_default(),
        }
    }
}
