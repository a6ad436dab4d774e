/// Keys for user-facing strings looked up at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringKey {
    ErrorNoConnection,
    ErrorUnknown,
    LogoutSucceeded,
}

/// Localized string lookup.
pub trait ResourceManager: Send + Sync {
    fn string(&self, key: StringKey) -> String;
}

/// Built-in English strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishResources;

impl EnglishResources {
    pub const NO_CONNECTION: &'static str = "Slow or no internet connection";
    pub const UNKNOWN_ERROR: &'static str = "Something went wrong";
    pub const LOGOUT_SUCCEEDED: &'static str = "You have been signed out.";
}

impl ResourceManager for EnglishResources {
    fn string(&self, key: StringKey) -> String {
        match key {
            StringKey::ErrorNoConnection => Self::NO_CONNECTION,
            StringKey::ErrorUnknown => Self::UNKNOWN_ERROR,
            StringKey::LogoutSucceeded => Self::LOGOUT_SUCCEEDED,
        }
        .to_owned()
    }
}
