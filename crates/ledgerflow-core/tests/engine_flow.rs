//! End-to-end flow over the state & derivation engine: seeded state,
//! bus-driven transitions, and the read-only projections on top.

use std::collections::HashSet;

use ledgerflow_core::{
    flatten, iter_transactions, restrict_to_accounts, sum_expenses, top_categories, BudgetService,
    BudgetStanding, EventBus, ForecastCache, ReportService,
};
use ledgerflow_domain::{
    Account, Budget, Category, Event, EventKind, State, Transaction, TransactionPatch,
};

fn seeded_state() -> State {
    State::new(
        vec![Account::new("a1", "Main", 1000, "EUR")],
        vec![Category::new("food", "Food"), Category::new("rent", "Rent")],
        vec![
            Transaction::new("t1", "a1", "food", -200, "2023-01-03", ""),
            Transaction::new("t2", "a1", "food", -150, "2023-01-12", ""),
            Transaction::new("t3", "a1", "rent", -500, "2023-01-01", ""),
        ],
        vec![Budget::new("b1", "food", 300)],
    )
}

#[test]
fn budget_report_then_event_then_alert() {
    let state = seeded_state();

    // Food spend is already 350 against a 300 limit.
    let report = BudgetService::new().monthly_report(state.budgets(), state.transactions());
    assert_eq!(report["b1"].spent, 350);
    assert_eq!(report["b1"].status, BudgetStanding::Over);

    // Publishing a new expense moves the balance and re-raises the alert.
    let bus = EventBus::with_defaults();
    let event = Event::with_id(
        "evt_1",
        "2023-01-15T09:00:00Z",
        EventKind::TransactionAdded {
            transaction: Transaction::new("t4", "a1", "food", -50, "2023-01-15", "lunch"),
        },
    );
    let next = bus.publish(&event, state.clone());

    assert_eq!(next.account("a1").map(|a| a.balance), Some(950));
    assert_eq!(next.transactions().len(), 4);
    assert_eq!(next.alerts().len(), 1);
    assert!(next.alerts()[0].contains("spent 400 of 300"));

    // The previous snapshot is untouched.
    assert_eq!(state.account("a1").map(|a| a.balance), Some(1000));
    assert!(state.alerts().is_empty());
}

#[test]
fn projections_agree_across_tree_pipeline_and_services() {
    let state = seeded_state();

    let food_tree = sum_expenses(state.categories(), state.transactions(), "food").expect("sum");
    let food_report = ReportService::new().category_report("food", state.transactions());
    assert_eq!(food_tree, food_report.total_expense);

    let top: Vec<_> =
        top_categories(iter_transactions(state.transactions()), state.categories(), 10).collect();
    assert_eq!(
        top,
        vec![("Rent".to_string(), 500), ("Food".to_string(), 350)]
    );

    let flat = flatten(state.categories(), "food").expect("flatten");
    assert_eq!(flat.len(), 1);
}

#[test]
fn forecast_survives_reducer_round_trips() {
    let state = seeded_state();
    let cache = ForecastCache::new();

    let before = cache.forecast("food", state.transactions(), 3);

    // An edit-then-revert produces a logically identical collection, which
    // must hit the same cache entry.
    let edited = ledgerflow_core::update_transaction(
        &state,
        "t1",
        &TransactionPatch::amount(-999),
    )
    .expect("edit");
    let reverted = ledgerflow_core::update_transaction(
        &edited,
        "t1",
        &TransactionPatch::amount(-200),
    )
    .expect("revert");

    let after = cache.forecast("food", reverted.transactions(), 3);
    assert_eq!(before, after);
    assert_eq!(cache.computations(), 1);

    // The edited snapshot is different content and computes separately.
    cache.forecast("food", edited.transactions(), 3);
    assert_eq!(cache.computations(), 2);
}

#[tokio::test]
async fn scoped_month_aggregation_sees_only_allowed_accounts() {
    let state = State::new(
        vec![
            Account::new("a1", "Alice", 1000, "EUR"),
            Account::new("a2", "Bob", 500, "EUR"),
        ],
        vec![Category::new("food", "Food")],
        vec![
            Transaction::new("t1", "a1", "food", -200, "2023-01-03", ""),
            Transaction::new("t2", "a2", "food", -400, "2023-01-04", ""),
            Transaction::new("t3", "a1", "food", -100, "2023-02-05", ""),
        ],
        vec![],
    );

    let allowed: HashSet<String> = ["a1".to_string()].into();
    let scoped = restrict_to_accounts(&state, Some(&allowed));

    let months = vec!["2023-01".to_string(), "2023-02".to_string(), "2023-03".to_string()];
    let totals = ReportService::new()
        .expenses_by_month(scoped.shared_transactions(), &months)
        .await
        .expect("aggregate");

    assert_eq!(totals["2023-01"], 200);
    assert_eq!(totals["2023-02"], 100);
    assert_eq!(totals["2023-03"], 0);
}
