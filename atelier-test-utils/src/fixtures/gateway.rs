//! Mockito endpoints standing in for the payment gateway.

use mockito::{Mock, ServerGuard};

/// Mocks `POST /v1/charges` approving every charge with the given reference.
pub fn mock_charge_endpoint(
    server: &mut ServerGuard,
    reference: &str,
    expected_requests: usize,
) -> Mock {
    server
        .mock("POST", "/v1/charges")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"reference":"{}","approved":true,"decline_reason":null}}"#,
            reference
        ))
        .expect(expected_requests)
        .create()
}

/// Mocks `POST /v1/charges` declining every charge with the given reason.
pub fn mock_charge_declined(
    server: &mut ServerGuard,
    reason: &str,
    expected_requests: usize,
) -> Mock {
    server
        .mock("POST", "/v1/charges")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"reference":"txn_declined","approved":false,"decline_reason":"{}"}}"#,
            reason
        ))
        .expect(expected_requests)
        .create()
}

/// Mocks `POST /v1/charges` answering 502 to exercise retry behavior.
pub fn mock_charge_server_error(server: &mut ServerGuard, expected_requests: usize) -> Mock {
    server
        .mock("POST", "/v1/charges")
        .with_status(502)
        .with_body("bad gateway")
        .expect(expected_requests)
        .create()
}

/// Mocks `POST /v1/refunds` accepting every refund with the given reference.
pub fn mock_refund_endpoint(
    server: &mut ServerGuard,
    reference: &str,
    expected_requests: usize,
) -> Mock {
    server
        .mock("POST", "/v1/refunds")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"reference":"{}","refunded":true}}"#,
            reference
        ))
        .expect(expected_requests)
        .create()
}
