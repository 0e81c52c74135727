use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationState {
    Idle,
    AwaitingValidityCheck,
    AwaitingUniqueness,
    AwaitingCodeRequest,
    AwaitingCodeEntry,
    AwaitingCodeCheck,
    Verified,
    Failed(VerificationFailure),
}

/// The step an attempt failed at. `Display` is the alert text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationFailure {
    InvalidFormat,
    AlreadyInUse,
    UniquenessCheckFailed,
    CodeRequestFailed,
    /// Prompt dismissed or left empty.
    CodeRequired,
    CodeInvalid,
    CodeCheckFailed,
    /// The phone widget could not be loaded.
    Unavailable,
}

impl VerificationFailure {
    /// Whether a retry for the same number may skip straight to a new code.
    pub fn resumes_at_code_request(self) -> bool {
        matches!(
            self,
            Self::CodeRequestFailed | Self::CodeRequired | Self::CodeInvalid | Self::CodeCheckFailed
        )
    }
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::InvalidFormat => "This is not a valid phone number",
            Self::AlreadyInUse => "This phone number is already in use",
            Self::UniquenessCheckFailed => "Error checking phone number uniqueness",
            Self::CodeRequestFailed => "Failed to request verification code. Please try again.",
            Self::CodeRequired => "Verification code is required. Please try again.",
            Self::CodeInvalid => "Invalid verification code. Please try again.",
            Self::CodeCheckFailed => "Error checking the verification code. Please try again.",
            Self::Unavailable => "Phone verification is unavailable. Please reload the page.",
        };
        f.write_str(message)
    }
}
