//! Orchestration and solution-mapping behavior with a scripted backend.

mod support;

use outlay::domain::solver::SolutionStatus;
use outlay::domain::{DomainError, Portfolio, Priority};
use outlay::error::{Error, OptimizeError};
use outlay::input::{build_input_data, RawInput};
use outlay::optimize::{run_optimization, OptimizationObjective, OptimizationParameters, Optimizer};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use support::solver::ScriptedSolver;
use support::{date, expense, monthly_budget, params, start_date};

fn single_expense_portfolio() -> Portfolio {
    Portfolio::new(
        vec![expense(
            "Item 01",
            date(2023, 1, 31),
            Priority::Low,
            (dec!(0), dec!(100), dec!(50)),
            false,
        )],
        monthly_budget(dec!(1000), dec!(0), 1),
    )
}

#[test]
fn mapper_rounds_and_attaches_scripted_values() {
    let mut portfolio = single_expense_portfolio();
    // Layout: spend[0][0], funded[0], deviation[0].
    let solver = ScriptedSolver::returning(
        SolutionStatus::Optimal,
        vec![dec!(49.996), Decimal::ONE, Decimal::ZERO],
    );
    let mut optimizer = Optimizer::with_solver(
        &mut portfolio,
        params(),
        start_date(),
        OptimizationObjective::Target,
        solver,
    );

    let status = optimizer.solve().unwrap();
    assert_eq!(status, SolutionStatus::Optimal);
    assert_eq!(portfolio.expenses[0].partial_spends(), &[dec!(50.00)]);
    assert_eq!(portfolio.expenses[0].cost(), dec!(50.00));
}

#[test]
fn feasible_status_is_mapped_like_optimal() {
    let mut portfolio = single_expense_portfolio();
    let solver = ScriptedSolver::returning(
        SolutionStatus::Feasible,
        vec![dec!(25), Decimal::ONE, dec!(0.5)],
    );
    let mut optimizer = Optimizer::with_solver(
        &mut portfolio,
        params(),
        start_date(),
        OptimizationObjective::Target,
        solver,
    );

    let status = optimizer.solve().unwrap();
    assert_eq!(status, SolutionStatus::Feasible);
    assert_eq!(portfolio.expenses[0].cost(), dec!(25));
}

#[test]
fn infeasible_verdict_leaves_portfolio_untouched() {
    let mut portfolio = single_expense_portfolio();
    let solver = ScriptedSolver::returning(SolutionStatus::Infeasible, vec![]);
    let mut optimizer = Optimizer::with_solver(
        &mut portfolio,
        params(),
        start_date(),
        OptimizationObjective::Target,
        solver,
    );

    let result = optimizer.solve();
    assert!(matches!(
        result,
        Err(Error::Optimize(OptimizeError::Infeasible(_)))
    ));
    assert!(portfolio.expenses[0].partial_spends().is_empty());
}

#[test]
fn abnormal_status_is_a_distinguishable_solver_error() {
    let mut portfolio = single_expense_portfolio();
    let solver = ScriptedSolver::returning(SolutionStatus::Error, vec![]);
    let mut optimizer = Optimizer::with_solver(
        &mut portfolio,
        params(),
        start_date(),
        OptimizationObjective::Target,
        solver,
    );

    let result = optimizer.solve();
    assert!(matches!(
        result,
        Err(Error::Optimize(OptimizeError::Solver(_)))
    ));
}

#[test]
fn overspending_schedule_is_a_domain_fault() {
    // A scripted value above the expense maximum must trip the defensive
    // boundary check, not silently pass through.
    let mut portfolio = single_expense_portfolio();
    let solver = ScriptedSolver::returning(
        SolutionStatus::Optimal,
        vec![dec!(150), Decimal::ONE, Decimal::ZERO],
    );
    let mut optimizer = Optimizer::with_solver(
        &mut portfolio,
        params(),
        start_date(),
        OptimizationObjective::Target,
        solver,
    );

    let result = optimizer.solve();
    assert!(matches!(
        result,
        Err(Error::Domain(DomainError::Overspend { .. }))
    ));
}

#[test]
fn oversized_time_budget_means_no_limit_not_a_crash() {
    // A time budget too large for a Duration must degrade to "no limit"
    // instead of aborting before the solver is consulted.
    for max_time in [1e300, f64::INFINITY] {
        let mut portfolio = single_expense_portfolio();
        let solver = ScriptedSolver::returning(
            SolutionStatus::Optimal,
            vec![dec!(50), Decimal::ONE, Decimal::ZERO],
        );
        let probe = solver.clone();
        let huge = OptimizationParameters::try_new(2.0, 0.0, max_time).unwrap();
        let mut optimizer = Optimizer::with_solver(
            &mut portfolio,
            huge,
            start_date(),
            OptimizationObjective::Target,
            solver,
        );

        let status = optimizer.solve().unwrap();
        assert_eq!(status, SolutionStatus::Optimal);
        // The solver was actually reached.
        assert!(probe.last_problem_shape().is_some());
    }
}

#[test]
fn builder_hands_solver_the_expected_problem_shape() {
    let mut portfolio = Portfolio::new(
        vec![
            expense(
                "A",
                date(2023, 1, 31),
                Priority::High,
                (dec!(0), dec!(100), dec!(50)),
                false,
            ),
            expense(
                "B",
                date(2023, 2, 25),
                Priority::Low,
                (dec!(0), dec!(100), dec!(50)),
                false,
            ),
        ],
        monthly_budget(dec!(500), dec!(500), 2),
    );
    let solver = ScriptedSolver::returning(SolutionStatus::Infeasible, vec![]);
    let probe = solver.clone();
    {
        let mut optimizer = Optimizer::with_solver(
            &mut portfolio,
            params(),
            start_date(),
            OptimizationObjective::Target,
            solver,
        );
        let _ = optimizer.solve();
    }

    // 2 expenses * 2 periods spends + 2 funded + 2 deviations = 8 variables.
    // Constraints: 2 max-cost + 2 min-cost + 2 period budgets + 4 deviation
    // + 2 mandatory floors; neither due date is blocked in either period.
    assert_eq!(probe.last_problem_shape(), Some((8, 12)));
}

#[test]
fn infeasible_run_yields_structured_failure_report() {
    // Pre-check passes (900 <= 1000) but every period is blocked for a
    // mandatory expense already past due, so the solver itself reports
    // infeasibility. The orchestrator must convert it, not crash.
    let raw: RawInput = serde_json::from_value(serde_json::json!({
        "start_date": "2023-01-01",
        "budget": {
            "initial": 1000,
            "recorrent": 0,
            "recurrence": 30,
            "last_recurrence": "2023-01-01",
            "iterations": 1
        },
        "expenses": [{
            "description": "Overdue",
            "due_date": "2022-12-01",
            "priority": 1,
            "mandatory": true,
            "range": { "minimum": 900, "maximum": 1200, "target": 1000 }
        }],
        "optimization_parameters": {
            "priority_exponent": 2.0,
            "deviation_weight": 0.0,
            "max_time": 1000.0
        }
    }))
    .unwrap();

    let report = run_optimization(build_input_data(raw).unwrap()).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.status, SolutionStatus::Infeasible.code());
    assert!(!report.error.is_empty());
    assert_eq!(report.expenses.len(), 1);
    assert_eq!(report.expenses[0].total_cost, Decimal::ZERO);
    assert!(report.expenses[0].partial_spends.is_empty());
}

#[test]
fn successful_run_report_round_trips_costs() {
    let raw: RawInput = serde_json::from_value(serde_json::json!({
        "start_date": "2023-01-01",
        "budget": {
            "initial": 1000,
            "recorrent": 1000,
            "recurrence": 30,
            "last_recurrence": "2023-01-01",
            "iterations": 1
        },
        "expenses": [{
            "description": "Item 01",
            "due_date": "2023-01-31",
            "priority": 3,
            "mandatory": false,
            "range": { "minimum": 900, "maximum": 1200, "target": 1000 }
        }],
        "optimization_parameters": {
            "priority_exponent": 2.0,
            "deviation_weight": 0.0,
            "max_time": 1000.0
        }
    }))
    .unwrap();

    let report = run_optimization(build_input_data(raw).unwrap()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.status, 0);
    assert_eq!(report.error, "");

    // Re-summing the cent-rounded spends reproduces the reported total.
    for entry in &report.expenses {
        let resummed: Decimal = entry.partial_spends.iter().sum();
        assert!((resummed - entry.total_cost).abs() <= dec!(0.01));
    }
    assert_eq!(report.expenses[0].total_cost, dec!(1000));
}
