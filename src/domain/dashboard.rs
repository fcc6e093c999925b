// Dashboard domain model - per-channel fetch state
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Progress and outcome of one kind of asynchronous request (insights or plan).
///
/// Requests are not serialized: every `begin` must be paired with exactly one
/// `succeed` or `fail`, and whichever settles last decides what is displayed.
/// A failure keeps the last good value.
#[derive(Debug, Clone)]
pub struct ChannelState<T> {
    value: T,
    error: Option<String>,
    outcome: ChannelStatus,
    in_flight: usize,
}

impl<T: Default> Default for ChannelState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> ChannelState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            error: None,
            outcome: ChannelStatus::Idle,
            in_flight: 0,
        }
    }

    pub fn begin(&mut self) {
        self.in_flight += 1;
        self.error = None;
    }

    pub fn succeed(&mut self, value: T) {
        self.settle();
        self.value = value;
        self.error = None;
        self.outcome = ChannelStatus::Success;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.settle();
        self.error = Some(message.into());
        self.outcome = ChannelStatus::Error;
    }

    /// Release a request that will never settle, leaving the outcome as is.
    pub fn abandon(&mut self) {
        self.settle();
    }

    fn settle(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn status(&self) -> ChannelStatus {
        if self.is_loading() {
            ChannelStatus::Loading
        } else {
            self.outcome
        }
    }
}

impl<T: Clone> ChannelState<T> {
    pub fn view(&self) -> ChannelView<T> {
        ChannelView {
            status: self.status(),
            loading: self.is_loading(),
            error: self.error.clone(),
            value: self.value.clone(),
        }
    }
}

/// Serializable snapshot of a channel for the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelView<T> {
    pub status: ChannelStatus,
    pub loading: bool,
    pub error: Option<String>,
    pub value: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut state: ChannelState<Vec<u32>> = ChannelState::default();
        assert_eq!(state.status(), ChannelStatus::Idle);

        state.begin();
        assert_eq!(state.status(), ChannelStatus::Loading);

        state.succeed(vec![1, 2]);
        let view = state.view();
        assert_eq!(view.status, ChannelStatus::Success);
        assert!(!view.loading);
        assert_eq!(view.value, vec![1, 2]);
    }

    #[test]
    fn test_failure_retains_last_good_value() {
        let mut state = ChannelState::new(String::from("plan A"));
        state.begin();
        state.fail("quota");

        let view = state.view();
        assert_eq!(view.status, ChannelStatus::Error);
        assert_eq!(view.error.as_deref(), Some("quota"));
        assert_eq!(view.value, "plan A");

        state.begin();
        assert_eq!(state.view().error, None);
    }

    #[test]
    fn test_loading_until_all_requests_settle() {
        let mut state: ChannelState<u32> = ChannelState::default();
        state.begin();
        state.begin();

        state.succeed(1);
        assert!(state.is_loading());

        state.fail("late failure");
        assert!(!state.is_loading());
        assert_eq!(state.status(), ChannelStatus::Error);
        assert_eq!(state.view().value, 1);
    }

    #[test]
    fn test_abandoned_request_stops_loading() {
        let mut state = ChannelState::new(String::from("plan A"));
        state.begin();
        state.abandon();

        let view = state.view();
        assert!(!view.loading);
        assert_eq!(view.status, ChannelStatus::Idle);
        assert_eq!(view.value, "plan A");
    }
}
