use std::fmt::{Display, Formatter};

use super::field::Message;

pub const FALLBACK_FAILURE_MESSAGE: &str = "An error occurred";

/// What a remote failure can expose for display. `detail` is the
/// message nested in the failure payload, `message` the failure's own.
pub trait FailureDetail {
    fn detail(&self) -> Option<&str> {
        None
    }

    fn message(&self) -> Option<&str> {
        None
    }
}

/// Resolves the user-facing text for a failure. The extractor table
/// fixes the precedence: nested detail, then top-level message, then
/// the generic fallback.
pub fn display_message<E: FailureDetail>(failure: &E) -> Message {
    let extractors: [fn(&E) -> Option<&str>; 2] =
        [FailureDetail::detail, FailureDetail::message];
    extractors
        .iter()
        .find_map(|extract| extract(failure))
        .map(|text| Message::Owned(text.to_owned()))
        .unwrap_or(Message::Borrowed(FALLBACK_FAILURE_MESSAGE))
}

/// Concrete failure carrier matching the `{ data: { message } }` and
/// `{ message }` shapes a remote endpoint rejects with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemoteFailure {
    pub message: Option<String>,
    pub data: Option<FailureData>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailureData {
    pub message: Option<String>,
}

impl RemoteFailure {
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn with_detail(mut self, message: impl Into<String>) -> Self {
        self.data = Some(FailureData {
            message: Some(message.into()),
        });
        self
    }
}

impl FailureDetail for RemoteFailure {
    fn detail(&self) -> Option<&str> {
        self.data.as_ref()?.message.as_deref()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Display for RemoteFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&display_message(self))
    }
}

impl std::error::Error for RemoteFailure {}
