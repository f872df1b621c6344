use std::sync::Mutex;
use vault_transport_backend::consts::endpoint;
use vault_transport_backend::response::BackendResponse;
use vault_transport_backend::{BackendApi, BackendTransport};

mod multisig;

/// Keeps inserted metadata rows and answers the list/detail endpoints from them.
#[derive(Default)]
pub struct InMemoryBackend {
    rows: Mutex<Vec<serde_json::Value>>,
}

fn failure(code: &str, msg: &str) -> BackendResponse {
    BackendResponse {
        code: Some(code.to_string()),
        data: None,
        success: false,
        msg: Some(msg.to_string()),
    }
}

#[async_trait::async_trait]
impl BackendTransport for InMemoryBackend {
    async fn post(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<BackendResponse, vault_transport_backend::Error> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|e| vault_transport_backend::Error::Transport(e.to_string()))?;
        let res = match endpoint {
            endpoint::SUBMIT_METADATA => {
                if rows.iter().any(|r| r["callHash"] == body["callHash"]) {
                    return Ok(failure("600", "metadata exists"));
                }
                let mut row = body;
                row["created"] = serde_json::json!("2024-03-04T10:00:00Z");
                rows.push(row);
                BackendResponse::ok(serde_json::Value::Null)
            }
            endpoint::CONFIRMED_TRANSACTIONS => {
                let list: Vec<_> = rows
                    .iter()
                    .filter(|r| r["multisig"] == body["multisig"])
                    .cloned()
                    .collect();
                BackendResponse::ok(serde_json::Value::Array(list))
            }
            endpoint::TRANSACTION_METADATA => {
                let found = rows
                    .iter()
                    .find(|r| r["callHash"] == body["callHash"])
                    .cloned();
                BackendResponse::ok(found.unwrap_or(serde_json::Value::Null))
            }
            _ => failure("404", "no such endpoint"),
        };
        Ok(res)
    }
}

pub fn backend() -> BackendApi<InMemoryBackend> {
    BackendApi::new(InMemoryBackend::default())
}
