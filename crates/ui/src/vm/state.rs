/// What a screen is currently showing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum UiState<T> {
    #[default]
    Loading,
    Data(T),
    Error,
}

impl<T> UiState<T> {
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Loading | Self::Error => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Convert the payload, keeping `Loading` and `Error` as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> UiState<U> {
        match self {
            Self::Loading => UiState::Loading,
            Self::Data(data) => UiState::Data(f(data)),
            Self::Error => UiState::Error,
        }
    }
}

/// One-shot notification for the user. Shown once, then cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiMessage {
    SnackBar(String),
    Toast(String),
}

impl UiMessage {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::SnackBar(text) | Self::Toast(text) => text,
        }
    }
}
