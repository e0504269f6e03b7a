/// State of a screen's data loading
///
/// Exactly one variant is active at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T, E> {
    /// Nothing has been requested yet
    Idle,
    Loading,
    Loaded(T),
    /// Loading failed
    ///
    /// `cause` classifies the failure, `message` is what the user is shown.
    Error { cause: E, message: String },
}

impl<T, E> Default for ViewState<T, E> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T, E> ViewState<T, E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn content(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(content) => Some(content),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn cause(&self) -> Option<&E> {
        match self {
            ViewState::Error { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
