use async_trait::async_trait;
use edx_core::model::{Account, CourseId, CourseProgress};

use crate::error::ProfileServiceError;

/// Remote calls backing the profile screen.
#[async_trait]
pub trait ProfileInteractor: Send + Sync {
    /// Fetch the signed-in learner's account.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError`; use [`ProfileServiceError::kind`] to tell
    /// connectivity failures from everything else.
    async fn get_account(&self) -> Result<Account, ProfileServiceError>;

    /// Revoke the current session on the server.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` if the request fails.
    async fn logout(&self) -> Result<(), ProfileServiceError>;
}

/// Remote calls backing the course progress screen.
#[async_trait]
pub trait CourseInteractor: Send + Sync {
    /// Fetch the grade breakdown for a course.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` if the request fails or the payload is malformed.
    async fn get_course_progress(
        &self,
        course_id: &CourseId,
    ) -> Result<CourseProgress, ProfileServiceError>;
}
