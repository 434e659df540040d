//! Settlement of the winning candidate.
//!
//! The rounded schedule rarely sums to the target exactly. When a payer role
//! is designated, the payer's own payment absorbs the whole residue: an
//! over-collection lowers it, an under-collection raises it. Every other
//! per-role payment is left as the search produced it.

use crate::model::{AllocationRequest, AllocationResult};
use crate::rounding::saturate;
use crate::search::TiltCandidate;

/// Turn the search winner into the final result.
///
/// A payer name that matches no role is ignored here; `allocate` rejects such
/// requests before searching.
pub fn settle(winner: Option<TiltCandidate>, request: &AllocationRequest) -> AllocationResult {
    let Some(winner) = winner else {
        return AllocationResult::infeasible();
    };

    let raw_deviation =
        saturate(i128::from(winner.summed_total) - i128::from(request.total_amount));

    let (payer, payer_payment, final_settled_total) = match request.payer_index() {
        Some(index) => {
            let base_cost = winner.per_role_payment[index];
            let adjusted = saturate(i128::from(base_cost) - i128::from(raw_deviation));
            let settled = if raw_deviation == 0 {
                winner.summed_total
            } else {
                request.total_amount
            };
            (request.payer.clone(), Some(adjusted), settled)
        }
        None => (None, None, winner.summed_total),
    };

    AllocationResult {
        best_tilt: Some(winner.tilt),
        per_role_payment: Some(winner.per_role_payment),
        payer,
        payer_payment,
        final_settled_total: Some(final_settled_total),
        raw_deviation: Some(raw_deviation),
    }
}
