/// Why a lookup attempt surfaced a failure to the user.
///
/// These are the only two user-visible failure classes; selection problems and
/// detection failures stay silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupFailure {
    /// Transport or service failure from either provider call
    #[error("provider request failed")]
    Provider,

    /// Provider answered but the payload failed required-field validation
    #[error("provider returned an unusable payload")]
    MalformedResponse,
}

impl LookupFailure {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Provider => "Lookup failed. Check your connection and try again.",
            Self::MalformedResponse => {
                "No usable entry came back. Try a shorter or simpler selection."
            }
        }
    }
}
