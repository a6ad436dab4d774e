use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::Username;

/// Learners younger than this (in calendar years) get a limited profile.
pub const USER_MIN_AGE: i32 = 13;

/// Visibility of a profile to other learners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountPrivacy {
    #[default]
    Private,
    AllUsers,
}

/// Profile picture variants served by the platform.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImage {
    pub has_image: bool,
    pub image_url_full: String,
    pub image_url_large: String,
    pub image_url_medium: String,
    pub image_url_small: String,
}

impl ProfileImage {
    fn urls(&self) -> [&str; 4] {
        [
            &self.image_url_full,
            &self.image_url_large,
            &self.image_url_medium,
            &self.image_url_small,
        ]
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccountError {
    #[error("account has no username")]
    MissingUsername,
    #[error("invalid profile image url: {0}")]
    InvalidImageUrl(String),
    #[error("year of birth {0} is out of range")]
    InvalidYearOfBirth(i32),
}

/// Unvalidated account fields, as read from the API or the local cache.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AccountDraft {
    pub username: Option<Username>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub year_of_birth: Option<i32>,
    #[serde(default)]
    pub level_of_education: String,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub language_proficiencies: Vec<String>,
    #[serde(default)]
    pub profile_image: ProfileImage,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default)]
    pub account_privacy: AccountPrivacy,
    #[serde(default)]
    pub requires_parental_consent: bool,
    #[serde(default)]
    pub is_active: bool,
}

impl AccountDraft {
    #[must_use]
    pub fn new(username: Username) -> Self {
        Self {
            username: Some(username),
            ..Self::default()
        }
    }

    /// Validate the draft into an `Account`.
    ///
    /// # Errors
    ///
    /// Returns `AccountError` when the username is missing, an image url is
    /// malformed, or the birth year is implausible.
    pub fn validate(self) -> Result<Account, AccountError> {
        let username = self
            .username
            .ok_or(AccountError::MissingUsername)?;

        for raw in self.profile_image.urls() {
            if !raw.is_empty() && Url::parse(raw).is_err() {
                return Err(AccountError::InvalidImageUrl(raw.to_owned()));
            }
        }

        if let Some(year) = self.year_of_birth {
            if !(1900..=9999).contains(&year) {
                return Err(AccountError::InvalidYearOfBirth(year));
            }
        }

        Ok(Account {
            username,
            name: self.name.trim().to_owned(),
            email: self.email.filter(|email| !email.trim().is_empty()),
            bio: self.bio,
            country: self.country,
            year_of_birth: self.year_of_birth,
            level_of_education: self.level_of_education,
            goals: self.goals,
            language_proficiencies: self.language_proficiencies,
            profile_image: self.profile_image,
            date_joined: self.date_joined,
            account_privacy: self.account_privacy,
            requires_parental_consent: self.requires_parental_consent,
            is_active: self.is_active,
        })
    }
}

impl TryFrom<AccountDraft> for Account {
    type Error = AccountError;

    fn try_from(draft: AccountDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

/// Snapshot of a learner's profile. Replaced wholesale on every fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccountDraft")]
pub struct Account {
    username: Username,
    name: String,
    email: Option<String>,
    bio: String,
    country: String,
    year_of_birth: Option<i32>,
    level_of_education: String,
    goals: String,
    language_proficiencies: Vec<String>,
    profile_image: ProfileImage,
    date_joined: Option<DateTime<Utc>>,
    account_privacy: AccountPrivacy,
    requires_parental_consent: bool,
    is_active: bool,
}

impl Account {
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Full name, falling back to the username when the learner left it blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.username.as_str()
        } else {
            &self.name
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn bio(&self) -> &str {
        &self.bio
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    #[must_use]
    pub fn year_of_birth(&self) -> Option<i32> {
        self.year_of_birth
    }

    #[must_use]
    pub fn level_of_education(&self) -> &str {
        &self.level_of_education
    }

    #[must_use]
    pub fn goals(&self) -> &str {
        &self.goals
    }

    #[must_use]
    pub fn language_proficiencies(&self) -> &[String] {
        &self.language_proficiencies
    }

    #[must_use]
    pub fn profile_image(&self) -> &ProfileImage {
        &self.profile_image
    }

    #[must_use]
    pub fn date_joined(&self) -> Option<DateTime<Utc>> {
        self.date_joined
    }

    #[must_use]
    pub fn account_privacy(&self) -> AccountPrivacy {
        self.account_privacy
    }

    #[must_use]
    pub fn requires_parental_consent(&self) -> bool {
        self.requires_parental_consent
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Limited profiles only expose the username and picture to other learners.
    #[must_use]
    pub fn is_limited_profile(&self) -> bool {
        self.requires_parental_consent || self.account_privacy == AccountPrivacy::Private
    }

    /// True when a birth year is known and the learner is older than [`USER_MIN_AGE`].
    #[must_use]
    pub fn is_older_than_min_age(&self, current_year: i32) -> bool {
        self.year_of_birth
            .is_some_and(|year| current_year - year > USER_MIN_AGE)
    }
}
