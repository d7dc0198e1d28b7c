use std::sync::Mutex;

use unbelievaboat_api_client::auth::Token;
use unbelievaboat_api_client::error::UnbError;
use unbelievaboat_api_client::rest::{
    BalanceClient, HealthVerdict, IncrementBalanceRequest, Method, RawResponse,
    SetBalanceRequest, Transport,
};

#[derive(Debug, Clone, PartialEq)]
struct Sent {
    method: Method,
    path: String,
    token: String,
    body: Option<serde_json::Value>,
}

/// Replies with a fixed response and records every request.
struct ScriptedTransport {
    status: u16,
    body: &'static str,
    sent: Mutex<Vec<Sent>>,
}

impl ScriptedTransport {
    fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        token: &Token,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, UnbError> {
        self.sent.lock().unwrap().push(Sent {
            method,
            path: path.to_string(),
            token: token.expose_secret().to_string(),
            body: body.map(|b| serde_json::from_slice(&b).unwrap()),
        });
        Ok(RawResponse::new(self.status, self.body.as_bytes().to_vec()))
    }
}

/// Never receives a response.
struct DeadTransport;

impl Transport for DeadTransport {
    async fn send(
        &self,
        _method: Method,
        _path: &str,
        _token: &Token,
        _body: Option<Vec<u8>>,
    ) -> Result<RawResponse, UnbError> {
        Err(UnbError::Timeout)
    }
}

const BALANCE: &str =
    r#"{"rank":"1","user_id":"5","cash":"0x10","bank":"-Infinity","total":"-Infinity"}"#;

#[tokio::test]
async fn test_get_balance_uses_session() {
    let client = BalanceClient::with_transport("session-token", ScriptedTransport::new(200, BALANCE));

    let balance = client.get_balance("g", "5").await.unwrap();
    assert_eq!(balance.cash, 16);
    assert!(balance.bank_neg_infinite);

    let sent = client.session().transport().sent();
    assert_eq!(
        sent,
        vec![Sent {
            method: Method::GET,
            path: "/guilds/g/users/5".to_string(),
            token: "session-token".to_string(),
            body: None,
        }]
    );
}

#[tokio::test]
async fn test_set_balance_payload_omits_unset_cash() {
    let client = BalanceClient::with_transport("t", ScriptedTransport::new(200, BALANCE));

    let request = SetBalanceRequest::new().bank(unbelievaboat_api_client::Amount::Infinity);
    client.set_balance("g", "5", &request).await.unwrap();

    let sent = client.session().transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::PUT);
    assert_eq!(
        sent[0].body,
        Some(serde_json::json!({ "bank": "Infinity", "reason": "No reason provided." }))
    );
}

#[tokio::test]
async fn test_increment_balance_uses_patch() {
    let client = BalanceClient::with_transport("t", ScriptedTransport::new(200, BALANCE));

    client
        .increment_balance("g", "5", &IncrementBalanceRequest::new(-1, 2))
        .await
        .unwrap();

    let sent = client.session().transport().sent();
    assert_eq!(sent[0].method, Method::PATCH);
    assert_eq!(
        sent[0].body,
        Some(serde_json::json!({ "cash": -1, "bank": 2, "reason": "No reason provided." }))
    );
}

#[tokio::test]
async fn test_transport_failure_surfaces_as_error() {
    let client = BalanceClient::with_transport("t", DeadTransport);

    let err = client.get_balance("g", "5").await.unwrap_err();
    assert!(matches!(err, UnbError::Timeout));
    assert!(err.is_transport());

    let check = client.check_health().await;
    assert!(!check.is_up());
    assert!(matches!(check.verdict, HealthVerdict::Unreachable(UnbError::Timeout)));
}

#[tokio::test]
async fn test_malformed_rate_limit_is_fatal() {
    let client = BalanceClient::with_transport("t", ScriptedTransport::new(429, "slow down"));

    let err = client.get_balance("g", "5").await.unwrap_err();
    assert!(matches!(err, UnbError::Protocol(_)));
    assert!(!err.is_retryable());

    let check = client.check_health().await;
    assert!(matches!(check.verdict, HealthVerdict::Unhealthy(UnbError::Protocol(_))));
}

#[tokio::test]
async fn test_health_check_success_root() {
    let client = BalanceClient::with_transport("t", ScriptedTransport::new(200, "{}"));

    let check = client.check_health().await;
    assert!(check.is_up());

    let sent = client.session().transport().sent();
    assert_eq!(sent[0].path, "");
    assert_eq!(sent[0].method, Method::GET);
}

#[tokio::test]
async fn test_health_check_api_error_is_unhealthy() {
    let client = BalanceClient::with_transport(
        "t",
        ScriptedTransport::new(500, r#"{"error":"500: Internal Server Error","message":""}"#),
    );

    let check = client.check_health().await;
    assert!(!check.is_up());
    match check.into_result() {
        Err(UnbError::Api(api)) => assert!(api.is_server_error()),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_ids_cannot_escape_their_path_segment() {
    let client = BalanceClient::with_transport("t", ScriptedTransport::new(200, BALANCE));

    client.get_balance("g/../x", "5?admin#top").await.unwrap();
    client.get_leaderboard("g/1").await.unwrap_err();

    let sent = client.session().transport().sent();
    assert_eq!(sent[0].path, "/guilds/g%2F..%2Fx/users/5%3Fadmin%23top");
    assert_eq!(sent[1].path, "/guilds/g%2F1/users");
}
