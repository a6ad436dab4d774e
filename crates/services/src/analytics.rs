use tracing::info;

/// Telemetry fired from the profile screen.
pub trait ProfileAnalytics: Send + Sync {
    /// `force` is true when the server ended the session rather than the learner.
    fn logout_event(&self, force: bool);
}

/// Writes analytics events to the log instead of a remote sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAnalytics;

impl ProfileAnalytics for TracingAnalytics {
    fn logout_event(&self, force: bool) {
        info!(target: "analytics", event = "edx.bi.app.user.logout", force, "analytics event");
    }
}
