//! JSON-RPC client for the Odoo backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::instrument;

use crate::config::OdooConfig;

use super::BackendError;

/// JSON-RPC endpoint path on the backend.
const RPC_PATH: &str = "/jsonrpc";

/// Odoo backend client.
///
/// Authenticates once at construction and reuses the returned uid for all
/// subsequent calls. Cheap to clone; all clones share one HTTP client and
/// one credential set.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    url: String,
    db: String,
    password: SecretString,
    /// Uid returned by `common.authenticate`; read-only after connect.
    uid: i64,
    /// Monotonic JSON-RPC request id.
    request_id: AtomicU64,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("url", &self.inner.url)
            .field("db", &self.inner.db)
            .field("uid", &self.inner.uid)
            .finish_non_exhaustive()
    }
}

/// JSON-RPC request envelope.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: RpcParams<'a>,
    id: u64,
}

#[derive(Debug, Serialize)]
struct RpcParams<'a> {
    service: &'a str,
    method: &'a str,
    args: Value,
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcFault>,
}

#[derive(Debug, Deserialize)]
struct RpcFault {
    #[serde(default)]
    code: i64,
    message: String,
    data: Option<RpcFaultData>,
}

#[derive(Debug, Deserialize)]
struct RpcFaultData {
    message: Option<String>,
}

impl BackendClient {
    /// Connect to the backend and authenticate.
    ///
    /// Issues one `common.authenticate` call and keeps the returned uid for
    /// the lifetime of the client. Credentials are fixed at process start;
    /// a stale session surfaces later as an RPC fault.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Auth` if the backend rejects the credentials,
    /// or `BackendError::Http` / `BackendError::Protocol` on transport
    /// failures.
    #[instrument(skip(config), fields(url = %config.url, db = %config.db))]
    pub async fn connect(config: &OdooConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::new();

        let result = rpc_call(
            &client,
            &config.url,
            0,
            "common",
            "authenticate",
            json!([
                config.db,
                config.username,
                config.password.expose_secret(),
                {}
            ]),
        )
        .await?;

        // Odoo answers `false` (not a fault) on bad credentials
        let uid = result.as_i64().ok_or_else(|| {
            BackendError::Auth(format!(
                "backend rejected credentials for '{}'",
                config.username
            ))
        })?;

        tracing::info!(uid, "Authenticated against backend");

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                url: config.url.clone(),
                db: config.db.clone(),
                password: config.password.clone(),
                uid,
                request_id: AtomicU64::new(1),
            }),
        })
    }

    /// Returns the authenticated uid.
    #[must_use]
    pub fn uid(&self) -> i64 {
        self.inner.uid
    }

    /// Execute a method on a backend model.
    ///
    /// `args` are the method's positional arguments. One network round trip
    /// per call; RPC faults propagate unmodified.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rpc` on a backend fault, `BackendError::Http`
    /// on transport failure.
    #[instrument(skip(self, args), fields(model = %model, method = %method))]
    pub async fn execute(
        &self,
        model: &str,
        method: &str,
        args: Value,
    ) -> Result<Value, BackendError> {
        let id = self.inner.request_id.fetch_add(1, Ordering::Relaxed);

        rpc_call(
            &self.inner.client,
            &self.inner.url,
            id,
            "object",
            "execute_kw",
            json!([
                self.inner.db,
                self.inner.uid,
                self.inner.password.expose_secret(),
                model,
                method,
                args
            ]),
        )
        .await
    }

    /// Search a model and return matching record ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the result is not an id list.
    pub async fn search(&self, model: &str, conditions: Vec<Value>) -> Result<Vec<i64>, BackendError> {
        let result = self.execute(model, "search", json!([conditions])).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Search a model and read the given fields of matching records.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the result is not a record list.
    pub async fn search_read(
        &self,
        model: &str,
        conditions: Vec<Value>,
        fields: &[&str],
    ) -> Result<Vec<Map<String, Value>>, BackendError> {
        let result = self
            .execute(model, "search_read", json!([conditions, fields]))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Create a record and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the result is not an id.
    pub async fn create(&self, model: &str, values: Value) -> Result<i64, BackendError> {
        let result = self.execute(model, "create", json!([values])).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Write field values to one existing record.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn write(&self, model: &str, id: i64, values: Value) -> Result<(), BackendError> {
        self.execute(model, "write", json!([[id], values])).await?;
        Ok(())
    }
}

/// Issue one JSON-RPC call and unwrap the response envelope.
async fn rpc_call(
    client: &reqwest::Client,
    url: &str,
    id: u64,
    service: &str,
    method: &str,
    args: Value,
) -> Result<Value, BackendError> {
    let request = RpcRequest {
        jsonrpc: "2.0",
        method: "call",
        params: RpcParams {
            service,
            method,
            args,
        },
        id,
    };

    let response = client
        .post(format!("{url}{RPC_PATH}"))
        .json(&request)
        .send()
        .await?
        .error_for_status()?;

    let envelope: RpcResponse = response.json().await?;

    if let Some(fault) = envelope.error {
        // Odoo nests the useful message under error.data.message
        let message = fault
            .data
            .and_then(|d| d.message)
            .unwrap_or(fault.message);
        return Err(BackendError::Rpc {
            code: fault.code,
            message,
        });
    }

    envelope
        .result
        .ok_or_else(|| BackendError::Protocol("neither result nor error present".to_string()))
}
