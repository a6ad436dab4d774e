use edx_core::Clock;
use edx_core::model::{Account, USER_MIN_AGE};

use crate::vm::time_fmt::format_date;

/// UI-ready representation of the learner's profile header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileCardVm {
    pub display_name: String,
    pub username: String,
    pub email: Option<String>,
    pub bio: String,
    pub country: String,
    pub languages: String,
    pub joined: Option<String>,
    pub image_url: Option<String>,
    pub limited: bool,
    pub can_edit: bool,
}

impl ProfileCardVm {
    #[must_use]
    pub fn edit_notice() -> String {
        format!("Profile editing requires being older than {USER_MIN_AGE}.")
    }
}

#[must_use]
pub fn map_profile_card(account: &Account, clock: Clock) -> ProfileCardVm {
    let image = account.profile_image();
    let image_url = (image.has_image && !image.image_url_large.is_empty())
        .then(|| image.image_url_large.clone());

    ProfileCardVm {
        display_name: account.display_name().to_owned(),
        username: account.username().to_string(),
        email: account.email().map(str::to_owned),
        bio: account.bio().to_owned(),
        country: account.country().to_owned(),
        languages: account.language_proficiencies().join(", "),
        joined: account.date_joined().map(format_date),
        image_url,
        limited: account.is_limited_profile(),
        can_edit: account.is_older_than_min_age(clock.current_year()),
    }
}
