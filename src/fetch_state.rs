use std::fmt;

/// Lifecycle of a one-shot remote fetch.
///
/// A mounted component moves Idle → Loading → Ready or Failed exactly once;
/// the only way out of Failed is an explicit, user-invoked retry. Nothing
/// ever retries automatically.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> fmt::Display for FetchState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchState::Idle => write!(f, "idle"),
            FetchState::Loading => write!(f, "loading"),
            FetchState::Ready(_) => write!(f, "ready"),
            FetchState::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ready_exposes_the_fetched_value() {
        let state = FetchState::Ready(42);

        assert_eq!(state.ready(), Some(&42));
        assert!(!state.is_idle());
        assert!(!state.is_loading());
        assert!(!state.is_failed());
    }

    #[test]
    fn failed_carries_its_reason() {
        let state: FetchState<()> = FetchState::Failed("connection refused".to_string());

        assert!(state.is_failed());
        assert_eq!(state.to_string(), "failed: connection refused");
    }
}
