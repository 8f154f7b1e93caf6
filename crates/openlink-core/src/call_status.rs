//! Call status: the set of calls reported to a user.

use crate::call::Call;
use crate::validate::{Build, ErrorSink};

/// A snapshot of the calls on a user's interests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStatus {
    busy: Option<bool>,
    calls: Vec<Call>,
}

impl CallStatus {
    pub fn builder() -> CallStatusBuilder {
        CallStatusBuilder::default()
    }

    /// Whether the user is busy; absent when the server did not say.
    pub fn is_busy(&self) -> Option<bool> {
        self.busy
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallStatusBuilder {
    busy: Option<bool>,
    calls: Vec<Call>,
}

impl CallStatusBuilder {
    pub fn set_busy(&mut self, busy: bool) -> &mut Self {
        self.busy = Some(busy);
        self
    }

    pub fn add_call(&mut self, call: Call) -> &mut Self {
        self.calls.push(call);
        self
    }

    pub fn add_calls(&mut self, calls: impl IntoIterator<Item = Call>) -> &mut Self {
        self.calls.extend(calls);
        self
    }
}

impl Build for CallStatusBuilder {
    type Output = CallStatus;

    fn validate<S: ErrorSink>(&self, _sink: &mut S) -> Result<(), S::Error> {
        Ok(())
    }

    fn assemble(&self) -> CallStatus {
        CallStatus {
            busy: self.busy,
            calls: self.calls.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_status_is_valid() {
        let status = CallStatus::builder().build().unwrap();
        assert_eq!(status.is_busy(), None);
        assert!(status.calls().is_empty());

        let mut diagnostics = Vec::new();
        CallStatus::builder().build_with_diagnostics(&mut diagnostics);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn calls_keep_order() {
        let mut diagnostics = Vec::new();
        let first = Call::builder().build_with_diagnostics(&mut diagnostics);
        let second = Call::builder()
            .set_caller_name("second")
            .build_with_diagnostics(&mut diagnostics);

        let status = CallStatus::builder()
            .set_busy(false)
            .add_call(first.clone())
            .add_calls([second.clone()])
            .build()
            .unwrap();

        assert_eq!(status.is_busy(), Some(false));
        assert_eq!(status.calls(), &[first, second]);
    }
}
