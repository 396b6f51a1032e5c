//! PayPal helpers
//!
//! Thin wrappers over [`PathwaveClient::invoke_tool`] for the `paypal.*` tools.

use serde_json::{Value as JsonValue, json};

use crate::client::PathwaveClient;
use crate::types::{PathwaveResponse, ToolArgs};

/// Remote tool that sends a PayPal payout
pub const PAYOUT_TOOL: &str = "paypal.payout";

/// Currency used when the caller does not specify one
pub const DEFAULT_CURRENCY: &str = "CHF";

/// `paypal.*` tool namespace, obtained via [`PathwaveClient::paypal`]
#[derive(Debug, Clone, Copy)]
pub struct PaypalTools<'a> {
    client: &'a PathwaveClient,
}

impl PathwaveClient {
    /// PayPal helpers bound to this client
    pub fn paypal(&self) -> PaypalTools<'_> {
        PaypalTools { client: self }
    }
}

impl PaypalTools<'_> {
    /// Send a payout to `email`
    ///
    /// `currency` defaults to [`DEFAULT_CURRENCY`]. Whole amounts are sent
    /// as JSON integers (`10`, not `10.0`). The response is passed through
    /// from the underlying invocation unchanged.
    pub async fn make_payment(
        &self,
        email: &str,
        amount: f64,
        currency: Option<&str>,
    ) -> PathwaveResponse {
        let args = payout_args(email, amount, currency);
        self.client.invoke_tool(PAYOUT_TOOL, &args).await
    }
}

fn payout_args(email: &str, amount: f64, currency: Option<&str>) -> ToolArgs {
    let mut args = ToolArgs::new();
    args.insert("email".to_string(), json!(email));
    args.insert("amount".to_string(), amount_value(amount));
    args.insert(
        "currency".to_string(),
        json!(currency.unwrap_or(DEFAULT_CURRENCY)),
    );
    args
}

/// Largest integer an `f64` represents exactly (2^53)
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

fn amount_value(amount: f64) -> JsonValue {
    if amount.is_finite() && amount.fract() == 0.0 && amount.abs() <= MAX_EXACT_INT {
        json!(amount as i64)
    } else {
        json!(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathwaveConfig;
    use wiremock::matchers::{body_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAYOUT_PATH: &str = "/users/test-user-sid/tools/paypal.payout/invoke";

    fn test_client(server: &MockServer) -> PathwaveClient {
        PathwaveClient::new(PathwaveConfig::new("test-user-sid").with_base_url(server.uri()))
            .unwrap()
    }

    #[test]
    fn test_payout_args_default_currency() {
        let args = payout_args("payee@example.com", 10.0, None);
        assert_eq!(
            serde_json::Value::Object(args),
            json!({"email": "payee@example.com", "amount": 10, "currency": "CHF"})
        );
    }

    #[test]
    fn test_amount_value() {
        assert_eq!(amount_value(10.0), json!(10));
        assert_eq!(amount_value(-5.0), json!(-5));
        assert_eq!(amount_value(0.0), json!(0));
        assert_eq!(amount_value(25.5), json!(25.5));
        assert_eq!(amount_value(1e300), json!(1e300));
        assert_eq!(amount_value(f64::NAN), JsonValue::Null);
    }

    #[test]
    fn test_payout_args_explicit_currency() {
        let args = payout_args("usd@example.com", 25.5, Some("USD"));
        assert_eq!(args["currency"], json!("USD"));
        assert_eq!(args["email"], json!("usd@example.com"));
        assert_eq!(args["amount"], json!(25.5));
        assert_eq!(args.len(), 3);
    }

    #[tokio::test]
    async fn test_make_payment_default_currency() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PAYOUT_PATH))
            .and(body_json(json!({
                "args": {"email": "payee@example.com", "amount": 10, "currency": "CHF"}
            })))
            .and(body_string_contains(r#""amount":10,"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"payoutId": "p-123"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let response = client
            .paypal()
            .make_payment("payee@example.com", 10.0, None)
            .await;

        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn test_make_payment_explicit_currency() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PAYOUT_PATH))
            .and(body_json(json!({
                "args": {"email": "usd@example.com", "amount": 25.5, "currency": "USD"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"payoutId": "p-456"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let response = client
            .paypal()
            .make_payment("usd@example.com", 25.5, Some("USD"))
            .await;

        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn test_make_payment_matches_invoke_tool() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PAYOUT_PATH))
            .and(body_json(json!({
                "args": {"email": "same@example.com", "amount": 7, "currency": "CHF"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"payoutId": "p-1"})))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let via_helper = client
            .paypal()
            .make_payment("same@example.com", 7.0, None)
            .await;

        let args = json!({"email": "same@example.com", "amount": 7, "currency": "CHF"});
        let via_invoke = client
            .invoke_tool(PAYOUT_TOOL, args.as_object().unwrap())
            .await;

        assert_eq!(via_helper, via_invoke);
    }

    #[tokio::test]
    async fn test_make_payment_passes_response_through() {
        let server = MockServer::start().await;
        let payload = json!({"payoutId": "p-789", "status": "COMPLETED"});
        Mock::given(method("POST"))
            .and(path(PAYOUT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let response = client
            .paypal()
            .make_payment("resp@example.com", 1.23, Some("EUR"))
            .await;

        assert_eq!(response, PathwaveResponse::Success(payload));
    }

    #[tokio::test]
    async fn test_make_payment_passes_failure_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PAYOUT_PATH))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid email"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let response = client.paypal().make_payment("bad", 1.0, None).await;

        assert_eq!(
            response,
            PathwaveResponse::Failure("HTTP error 422: invalid email".to_string())
        );
    }
}
