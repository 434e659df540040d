//! Tilt search.
//!
//! Candidates are visited starting at the default tilt and expanding outward,
//! lower before higher at each offset. A candidate replaces the running best
//! only when its deviation is strictly smaller, so ties go to the tilt closest
//! to the default.

use serde::{Deserialize, Serialize};

use crate::error::DenominatorError;
use crate::model::{AllocationRequest, Role, MAX_TILT};
use crate::rounding::{rounded_payment, saturate};
use crate::weight::{role_weights, total_weight};

/// One evaluated tilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiltCandidate {
    pub tilt: u8,
    /// Rounded per-person payment for each role, in role order.
    pub per_role_payment: Vec<i64>,
    /// `sum(payment_i * headcount_i)`.
    pub summed_total: i64,
    /// `|total_amount - summed_total|`.
    pub absolute_deviation: u64,
}

/// Iterator over every tilt in `0..=MAX_TILT`, in search priority order.
#[derive(Debug, Clone)]
pub struct TiltOrder {
    default_tilt: i16,
    offset: i16,
    pending_higher: Option<u8>,
}

/// Search order for the given default tilt.
pub fn tilt_order(default_tilt: u8) -> TiltOrder {
    TiltOrder {
        default_tilt: i16::from(default_tilt),
        offset: 0,
        pending_higher: None,
    }
}

impl Iterator for TiltOrder {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let max = i16::from(MAX_TILT);
        let in_range = |t: i16| (0..=max).contains(&t);

        if let Some(higher) = self.pending_higher.take() {
            return Some(higher);
        }
        while self.offset <= max {
            let lower = self.default_tilt - self.offset;
            let higher = self.default_tilt + self.offset;
            self.offset += 1;

            let higher = (in_range(higher) && higher != lower).then_some(higher as u8);
            if in_range(lower) {
                self.pending_higher = higher;
                return Some(lower as u8);
            }
            if higher.is_some() {
                return higher;
            }
        }
        None
    }
}

/// Evaluate a single tilt against the request.
pub fn evaluate(
    roles: &[Role],
    total_amount: i64,
    tilt: u8,
) -> Result<TiltCandidate, DenominatorError> {
    let weights = role_weights(roles.len(), tilt);
    let total = total_weight(&weights, roles);

    let per_role_payment = weights
        .iter()
        .map(|&w| rounded_payment(w, total, total_amount))
        .collect::<Result<Vec<_>, _>>()?;

    let summed: i128 = per_role_payment
        .iter()
        .zip(roles)
        .map(|(&p, r)| i128::from(p) * i128::from(r.headcount))
        .sum();
    let summed_total = saturate(summed);
    let absolute_deviation = (i128::from(total_amount) - summed).unsigned_abs();

    Ok(TiltCandidate {
        tilt,
        per_role_payment,
        summed_total,
        absolute_deviation: u64::try_from(absolute_deviation).unwrap_or(u64::MAX),
    })
}

/// Find the tilt whose rounded schedule lands closest to the target total.
///
/// Returns `None` when the weighted headcount is zero or when the shortfall
/// filter rejects every candidate.
pub fn search(request: &AllocationRequest) -> Option<TiltCandidate> {
    let mut best: Option<TiltCandidate> = None;

    for tilt in tilt_order(request.default_tilt) {
        let candidate = match evaluate(&request.roles, request.total_amount, tilt) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!("search infeasible: {e}");
                return None;
            }
        };

        if request.shortfall_skip && candidate.summed_total < request.total_amount {
            tracing::trace!(
                tilt,
                summed_total = candidate.summed_total,
                "candidate under-collects, skipped"
            );
            continue;
        }

        tracing::trace!(
            tilt,
            summed_total = candidate.summed_total,
            deviation = candidate.absolute_deviation,
            "candidate evaluated"
        );

        let improves = match &best {
            Some(b) => candidate.absolute_deviation < b.absolute_deviation,
            None => true,
        };
        if improves {
            best = Some(candidate);
        }

        // Nothing can beat an exact hit strictly.
        if best.as_ref().is_some_and(|b| b.absolute_deviation == 0) {
            break;
        }
    }

    best
}
