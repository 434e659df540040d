//! Allocation error types.
//!
//! Only malformed requests are errors. A request that is well-formed but has
//! no solution (zero total headcount, every candidate filtered out) is not an
//! error; it comes back as an infeasible [`AllocationResult`].
//!
//! [`AllocationResult`]: crate::model::AllocationResult

use thiserror::Error;

/// A request that was rejected before any search ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// The role name and headcount columns have different lengths.
    #[error("role/headcount length mismatch: {roles} role(s) but {headcounts} headcount(s)")]
    LengthMismatch { roles: usize, headcounts: usize },

    /// A role name is empty or only whitespace.
    #[error("role at position {position} has an empty name")]
    EmptyRoleName { position: usize },

    /// Two roles share the same name.
    #[error("duplicate role name: {0}")]
    DuplicateRoleName(String),

    /// The designated payer does not match any role.
    #[error("payer role '{0}' does not exist among roles")]
    UnknownPayer(String),

    /// The payer's role has no members, so nobody can absorb the residue.
    #[error("payer role '{0}' has no members")]
    EmptyPayerRole(String),

    /// The default tilt is above the maximum.
    #[error("default tilt {tilt} is out of range 0..={max}")]
    TiltOutOfRange { tilt: u8, max: u8 },

    /// The total amount is too large to allocate safely.
    #[error("total amount {amount} exceeds the supported magnitude {limit}")]
    AmountOutOfRange { amount: i64, limit: i64 },
}

impl AllocationError {
    /// Returns `true` if the error concerns a specific role name.
    pub fn is_role_error(&self) -> bool {
        matches!(
            self,
            AllocationError::EmptyRoleName { .. }
                | AllocationError::DuplicateRoleName(_)
                | AllocationError::UnknownPayer(_)
                | AllocationError::EmptyPayerRole(_)
        )
    }
}

/// The weighted headcount is not positive, so no share can be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("total weight {0} is not positive; no denominator for payment shares")]
pub struct DenominatorError(pub i128);
