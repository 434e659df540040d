//! Core data model types for warikan.
//!
//! A request is a ranked list of roles (highest rank first), the amount to
//! collect, and the search/settlement options. A result is the schedule the
//! engine settled on, or an infeasible result with every field unset.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AllocationError;

/// Tilt the search starts from when the caller does not choose one.
pub const DEFAULT_TILT: u8 = 50;

/// Upper bound of the tilt range. The lower bound is 0.
pub const MAX_TILT: u8 = 100;

/// Largest accepted `|total_amount|`.
pub const MAX_TOTAL_AMOUNT: i64 = 1_000_000_000_000_000;

/// A group of participants sharing one rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role name, unique within a request.
    pub name: String,
    /// Number of people in this role.
    pub headcount: u32,
}

impl Role {
    pub fn new(name: impl Into<String>, headcount: u32) -> Self {
        Self {
            name: name.into(),
            headcount,
        }
    }
}

/// Everything the engine needs for one allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Roles ordered from highest rank (index 0) to lowest.
    pub roles: Vec<Role>,
    /// Amount to collect in total.
    pub total_amount: i64,
    /// Tilt the search starts from, in `0..=MAX_TILT`.
    #[serde(default = "default_tilt")]
    pub default_tilt: u8,
    /// Role whose own payment absorbs the rounding residue.
    #[serde(default)]
    pub payer: Option<String>,
    /// Discard candidates that collect less than `total_amount`.
    #[serde(default)]
    pub shortfall_skip: bool,
}

fn default_tilt() -> u8 {
    DEFAULT_TILT
}

impl AllocationRequest {
    /// Create a request with the default tilt, no payer and no shortfall skip.
    pub fn new(roles: Vec<Role>, total_amount: i64) -> Self {
        Self {
            roles,
            total_amount,
            default_tilt: DEFAULT_TILT,
            payer: None,
            shortfall_skip: false,
        }
    }

    /// Build a request from parallel name and headcount columns.
    pub fn from_columns<S: AsRef<str>>(
        names: &[S],
        headcounts: &[u32],
        total_amount: i64,
    ) -> Result<Self, AllocationError> {
        if names.len() != headcounts.len() {
            return Err(AllocationError::LengthMismatch {
                roles: names.len(),
                headcounts: headcounts.len(),
            });
        }
        let roles = names
            .iter()
            .zip(headcounts)
            .map(|(name, &headcount)| Role::new(name.as_ref(), headcount))
            .collect();
        Ok(Self::new(roles, total_amount))
    }

    pub fn with_default_tilt(mut self, tilt: u8) -> Self {
        self.default_tilt = tilt;
        self
    }

    pub fn with_payer(mut self, payer: impl Into<String>) -> Self {
        self.payer = Some(payer.into());
        self
    }

    pub fn with_shortfall_skip(mut self, skip: bool) -> Self {
        self.shortfall_skip = skip;
        self
    }

    /// Sum of all headcounts.
    pub fn total_headcount(&self) -> u64 {
        self.roles.iter().map(|r| u64::from(r.headcount)).sum()
    }

    /// Position of the payer role, if one is designated and present.
    pub fn payer_index(&self) -> Option<usize> {
        let payer = self.payer.as_deref()?;
        self.roles.iter().position(|r| r.name == payer)
    }

    /// Check the request for malformed input.
    ///
    /// Zero headcounts are not an error here: they make the request
    /// infeasible, which the engine reports through the result.
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.default_tilt > MAX_TILT {
            return Err(AllocationError::TiltOutOfRange {
                tilt: self.default_tilt,
                max: MAX_TILT,
            });
        }

        if self.total_amount.unsigned_abs() > MAX_TOTAL_AMOUNT.unsigned_abs() {
            return Err(AllocationError::AmountOutOfRange {
                amount: self.total_amount,
                limit: MAX_TOTAL_AMOUNT,
            });
        }

        if let Some(position) = self.roles.iter().position(|r| r.name.trim().is_empty()) {
            return Err(AllocationError::EmptyRoleName { position });
        }

        let mut seen = HashSet::new();
        for role in &self.roles {
            if !seen.insert(role.name.as_str()) {
                return Err(AllocationError::DuplicateRoleName(role.name.clone()));
            }
        }

        if let Some(payer) = &self.payer {
            match self.roles.iter().find(|r| &r.name == payer) {
                None => return Err(AllocationError::UnknownPayer(payer.clone())),
                Some(role) if role.headcount == 0 => {
                    return Err(AllocationError::EmptyPayerRole(payer.clone()))
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// Outcome of one allocation.
///
/// Every field is `None` when no admissible tilt exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Tilt of the winning candidate.
    pub best_tilt: Option<u8>,
    /// Rounded per-person payment for each role, in role order.
    pub per_role_payment: Option<Vec<i64>>,
    /// The payer role, echoed back when a payer was designated.
    pub payer: Option<String>,
    /// Per-person payment of the payer after absorbing the residue.
    pub payer_payment: Option<i64>,
    /// What the schedule collects once settlement is applied.
    pub final_settled_total: Option<i64>,
    /// `summed_total - total_amount` of the winning candidate.
    pub raw_deviation: Option<i64>,
}

impl AllocationResult {
    /// The result returned when no candidate survived the search.
    pub fn infeasible() -> Self {
        Self::default()
    }

    /// Returns `true` if a winning tilt was found.
    pub fn is_feasible(&self) -> bool {
        self.best_tilt.is_some()
    }
}
