//! Allocation entry point.
//!
//! Validates the request, searches for the best tilt and settles the residue
//! onto the payer. Pure and synchronous: the same request always produces the
//! same result.

use crate::error::AllocationError;
use crate::model::{AllocationRequest, AllocationResult};
use crate::search::search;
use crate::settlement::settle;

/// Allocate `request.total_amount` across the request's roles.
///
/// Malformed requests are rejected with an [`AllocationError`]. A well-formed
/// request without a solution returns `Ok` with an infeasible result; check
/// [`AllocationResult::is_feasible`].
pub fn allocate(request: &AllocationRequest) -> Result<AllocationResult, AllocationError> {
    request.validate()?;

    let winner = search(request);
    match &winner {
        Some(w) => tracing::debug!(
            tilt = w.tilt,
            summed_total = w.summed_total,
            deviation = w.absolute_deviation,
            "best tilt found"
        ),
        None => tracing::debug!(
            roles = request.roles.len(),
            headcount = request.total_headcount(),
            shortfall_skip = request.shortfall_skip,
            "no admissible tilt"
        ),
    }

    Ok(settle(winner, request))
}
