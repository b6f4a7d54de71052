//! Outcome of a remote fetch.

/// Coarse classification of a failed fetch, kept alongside the message for
/// logging.  The message is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Could not reach the host (DNS, connect, timeout).
    Network,
    /// The host answered with a non-2xx status.
    UpstreamHttp(u16),
    /// The body was not the JSON we expected.
    Decode,
}

/// Either the fetched data or a failure message.  Never both.
///
/// Consumers match both arms explicitly; there is no "partial" state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<T> {
    Success(T),
    Failure { kind: FailureKind, message: String },
}

impl<T> Resource<T> {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Resource::Failure {
            kind,
            message: message.into(),
        }
    }
}
