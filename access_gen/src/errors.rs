use access_types::{ResolveError, ValueKind};
use thiserror::Error;

/// Result alias used across the synthesis crate.
pub type SynthResult<T> = Result<T, SynthError>;

/// Synthesis-time failures. Every variant is raised while building a
/// function, never while invoking one that was already synthesized;
/// stream failures inside synthesized codec functions surface as the
/// byte source's own `std::io::Error`, unwrapped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SynthError {
    /// The resolution collaborator could not find the member; passed
    /// through unchanged.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A getter or setter was requested but the descriptor lacks one.
    #[error("member '{member}' of type '{type_name}' has no {op}")]
    UnsupportedMemberAccess {
        type_name: String,
        member: String,
        op: &'static str,
    },

    /// The member's value type has no entry in the primitive codec
    /// table.
    #[error("not supported serialization type: {kind}")]
    UnsupportedSerializationType { kind: ValueKind },
}
