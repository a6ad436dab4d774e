mod account;
mod ids;
mod progress;

pub use account::{
    Account, AccountDraft, AccountError, AccountPrivacy, ProfileImage, USER_MIN_AGE,
};
pub use ids::{CourseId, ParseIdError, Username};
pub use progress::{CourseProgress, Score, Section, Subsection};
