/// What happens when an operation creates an object at an id that is
/// already in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverwritePolicy {
    /// Replace the existing object, erasing it first if its type differs
    #[default]
    Replace,
    /// Refuse; the caller must delete the object first
    Reject,
}

impl OverwritePolicy {
    pub fn allows_replace(self) -> bool {
        self == OverwritePolicy::Replace
    }
}

/// Outcome of a signature check performed by the element
///
/// A mismatch is a result, not an error: operational failures are reported
/// through `Se05xResult` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verification {
    Valid,
    Invalid,
}

impl Verification {
    pub fn is_valid(self) -> bool {
        self == Verification::Valid
    }
}

impl From<bool> for Verification {
    fn from(valid: bool) -> Self {
        if valid {
            Verification::Valid
        } else {
            Verification::Invalid
        }
    }
}
