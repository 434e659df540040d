//! Allocation engine integration tests.
//!
//! Checks the engine's invariants over a grid of requests and pins a few
//! known schedules as regressions.

use warikan_core::engine::allocate;
use warikan_core::error::AllocationError;
use warikan_core::model::{AllocationRequest, AllocationResult, Role};
use warikan_core::report::AllocationReport;
use warikan_core::rounding::ROUNDING_UNIT;
use warikan_core::search::evaluate;

fn request(roles: &[(&str, u32)], total: i64) -> AllocationRequest {
    AllocationRequest::new(
        roles.iter().map(|&(n, h)| Role::new(n, h)).collect(),
        total,
    )
}

/// A spread of shapes and amounts to check invariants against.
fn grid() -> Vec<AllocationRequest> {
    let shapes: &[&[(&str, u32)]] = &[
        &[("A", 1)],
        &[("A", 2), ("B", 2)],
        &[("A", 2), ("B", 3)],
        &[("A", 1), ("B", 2), ("C", 3)],
        &[("A", 3), ("B", 0), ("C", 4)],
        &[("A", 7), ("B", 5), ("C", 7), ("D", 5)],
        &[("A", 1), ("B", 1), ("C", 1), ("D", 1), ("E", 10)],
    ];
    let amounts = [0, 999, 5_000, 10_000, 33_333, 97_560, 250_000];

    let mut requests = Vec::new();
    for shape in shapes {
        for &amount in &amounts {
            for tilt in [0, 25, 50, 100] {
                for skip in [false, true] {
                    let last = shape[shape.len() - 1].0;
                    requests.push(
                        request(shape, amount)
                            .with_default_tilt(tilt)
                            .with_shortfall_skip(skip),
                    );
                    requests.push(
                        request(shape, amount)
                            .with_default_tilt(tilt)
                            .with_shortfall_skip(skip)
                            .with_payer(last),
                    );
                }
            }
        }
    }
    requests
}

fn summed(req: &AllocationRequest, result: &AllocationResult) -> i64 {
    result
        .per_role_payment
        .as_ref()
        .unwrap()
        .iter()
        .zip(&req.roles)
        .map(|(p, r)| p * i64::from(r.headcount))
        .sum()
}

#[test]
fn regression_two_by_two() {
    let result = allocate(&request(&[("A", 2), ("B", 2)], 10_000)).unwrap();
    assert_eq!(
        result,
        AllocationResult {
            best_tilt: Some(50),
            per_role_payment: Some(vec![3_000, 2_000]),
            payer: None,
            payer_payment: None,
            final_settled_total: Some(10_000),
            raw_deviation: Some(0),
        }
    );
}

#[test]
fn regression_two_by_two_with_payer() {
    let result = allocate(&request(&[("A", 2), ("B", 2)], 10_000).with_payer("B")).unwrap();
    assert_eq!(result.best_tilt, Some(50));
    assert_eq!(result.payer.as_deref(), Some("B"));
    assert_eq!(result.payer_payment, Some(2_000));
    assert_eq!(result.final_settled_total, Some(10_000));
}

#[test]
fn regression_year_end_party() {
    let req = request(
        &[("Director", 7), ("Manager", 5), ("Deputy", 7), ("Staff", 5)],
        97_560,
    )
    .with_payer("Staff");
    let result = allocate(&req).unwrap();
    assert_eq!(result.best_tilt, Some(50));
    assert_eq!(result.per_role_payment, Some(vec![6_000, 5_000, 3_000, 2_000]));
    assert_eq!(result.raw_deviation, Some(440));
    assert_eq!(result.payer_payment, Some(1_560));
    assert_eq!(result.final_settled_total, Some(97_560));
}

#[test]
fn regression_lower_neighbour_wins() {
    let result = allocate(&request(&[("A", 2), ("B", 3)], 10_000)).unwrap();
    assert_eq!(result.best_tilt, Some(49));
    assert_eq!(result.per_role_payment, Some(vec![2_000, 2_000]));
}

#[test]
fn regression_shortfall_skip_with_negative_payer_payment() {
    let req = request(&[("A", 3), ("B", 3), ("C", 3)], 10_000)
        .with_default_tilt(0)
        .with_shortfall_skip(true)
        .with_payer("C");
    let result = allocate(&req).unwrap();
    assert_eq!(result.best_tilt, Some(54));
    assert_eq!(result.raw_deviation, Some(2_000));
    assert_eq!(result.payer_payment, Some(-1_000));
    assert_eq!(result.final_settled_total, Some(10_000));
}

#[test]
fn equal_headcounts_at_zero_tilt_pay_equally() {
    for count in 1..6u32 {
        for amount in [1_000, 9_999, 10_000, 48_000] {
            let roles: Vec<Role> = ["A", "B", "C", "D"]
                .iter()
                .map(|n| Role::new(*n, count))
                .collect();
            let flat = evaluate(&roles, amount, 0).unwrap();
            let payments = &flat.per_role_payment;
            assert_eq!(payments.len(), 4);
            assert!(
                payments.iter().all(|&p| p == payments[0]),
                "count={count} amount={amount}: {payments:?}"
            );
        }
    }
}

#[test]
fn zero_tilt_candidate_is_flat() {
    let req = request(&[("A", 3), ("B", 3), ("C", 3)], 10_000).with_default_tilt(0);
    let result = allocate(&req).unwrap();
    assert_eq!(result.best_tilt, Some(0));
    assert_eq!(result.per_role_payment, Some(vec![1_000, 1_000, 1_000]));
}

#[test]
fn payments_are_non_negative_multiples_of_unit() {
    for req in grid() {
        let result = allocate(&req).unwrap();
        let Some(payments) = &result.per_role_payment else {
            continue;
        };
        assert_eq!(payments.len(), req.roles.len());
        for &p in payments {
            assert!(p >= 0, "{req:?}");
            assert_eq!(p % ROUNDING_UNIT, 0, "{req:?}");
        }
    }
}

#[test]
fn higher_rank_never_pays_less_per_person() {
    for req in grid() {
        let result = allocate(&req).unwrap();
        if let Some(payments) = result.per_role_payment {
            assert!(payments.windows(2).all(|w| w[0] >= w[1]), "{req:?}");
        }
    }
}

#[test]
fn shortfall_skip_never_under_collects() {
    for req in grid().into_iter().filter(|r| r.shortfall_skip) {
        let result = allocate(&req).unwrap();
        if result.is_feasible() {
            assert!(summed(&req, &result) >= req.total_amount, "{req:?}");
        }
    }
}

#[test]
fn deviation_and_settlement_are_consistent() {
    for req in grid() {
        let result = allocate(&req).unwrap();
        if !result.is_feasible() {
            assert_eq!(result, AllocationResult::infeasible());
            continue;
        }
        let total = summed(&req, &result);
        let raw = result.raw_deviation.unwrap();
        assert_eq!(raw, total - req.total_amount, "{req:?}");
        assert!(result.best_tilt.unwrap() <= 100);

        match req.payer_index() {
            Some(i) => {
                let base = result.per_role_payment.as_ref().unwrap()[i];
                assert_eq!(result.payer_payment, Some(base - raw));
                assert_eq!(result.final_settled_total, Some(req.total_amount));
            }
            None => {
                assert!(result.payer_payment.is_none());
                assert_eq!(result.final_settled_total, Some(total));
            }
        }
    }
}

#[test]
fn report_lines_add_up_to_settled_total() {
    for req in grid() {
        let result = allocate(&req).unwrap();
        let settled = result.final_settled_total;
        let report = AllocationReport::new(None, req, result);
        if settled.is_none() {
            assert!(report.role_lines().is_empty());
            continue;
        }
        let collected: i64 = report.role_lines().iter().map(|l| l.line_total).sum();
        assert_eq!(Some(collected), settled, "{:?}", report.request);
    }
}

#[test]
fn identical_requests_give_identical_results() {
    for req in grid() {
        let copy = req.clone();
        assert_eq!(allocate(&req), allocate(&copy));
    }
}

#[test]
fn input_errors_are_distinct_from_infeasibility() {
    let err = allocate(&request(&[("A", 1), ("A", 1)], 1_000)).unwrap_err();
    assert_eq!(err, AllocationError::DuplicateRoleName("A".into()));

    let err = allocate(&request(&[("", 1)], 1_000)).unwrap_err();
    assert_eq!(err, AllocationError::EmptyRoleName { position: 0 });

    let err = allocate(&request(&[("A", 3), ("B", 0)], 1_000).with_payer("B")).unwrap_err();
    assert_eq!(err, AllocationError::EmptyPayerRole("B".into()));

    let infeasible = allocate(&request(&[("A", 0)], 1_000)).unwrap();
    assert!(!infeasible.is_feasible());

    let filtered = allocate(&request(&[("A", 3)], 1_000).with_shortfall_skip(true)).unwrap();
    assert!(!filtered.is_feasible());
}
