//! End-to-end checks of the walkthrough through its public surface.

use app::{AppError, Config, DEMO_ITEMS};
use domain::ValidationError;

#[test]
fn configured_ids_flow_into_rebuilt_state() {
    let config = Config::from_lookup(|key| match key {
        "DEMO_ORDER_ID" => Some("order-777".to_string()),
        "DEMO_CUSTOMER_ID" => Some("customer-1".to_string()),
        _ => None,
    });

    let state = app::run(&config).unwrap();

    assert_eq!(state.order_id.as_str(), "order-777");
    assert_eq!(state.customer_id.as_str(), "customer-1");
    assert_eq!(state.item_count(), DEMO_ITEMS.len());
    assert_eq!(state.total_quantity(), 7);
}

#[test]
fn blank_customer_fails_the_run() {
    let config = Config {
        customer_id: String::new(),
        ..Config::default()
    };

    let error = app::run(&config).unwrap_err();
    assert!(matches!(
        error,
        AppError::Validation(ValidationError::MissingField {
            field: "customer_id"
        })
    ));
    assert_eq!(error.to_string(), "Invalid input: customer_id is required");
}

#[test]
fn each_run_starts_from_an_empty_log() {
    let first = app::run(&Config::default()).unwrap();
    let second = app::run(&Config::default()).unwrap();

    assert_eq!(first.items, second.items);
    assert_eq!(second.item_count(), 2);
}
