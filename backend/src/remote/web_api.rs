//! Blocking client for the central site's Web API.
//!
//! Every call is a signed `POST` to `{base_url}/{route}` with the payload as a
//! JSON array. The remote site wraps its answer in an envelope,
//! `{"status": 201, "response": ...}`, whose status is checked in addition
//! to the HTTP status.

use super::signature::sign;
use super::{RemoteApi, RemoteConnector};
use crate::error::RemoteError;
use chrono::Utc;
use common::model::entry::Entry;
use common::model::form::Form;
use common::model::settings::RemoteEndpoint;
use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};

const FORMS_ROUTE: &str = "forms";
const ENTRIES_ROUTE: &str = "entries";

/// How long a request signature stays valid.
const SIGNATURE_TTL_SECS: i64 = 3600;

#[derive(Debug, Deserialize)]
struct Envelope {
    status: u16,
    #[serde(default)]
    response: Value,
}

/// Hands out clients that share one connection pool.
pub struct WebApiConnector {
    agent: ureq::Agent,
}

impl WebApiConnector {
    pub fn new() -> Self {
        WebApiConnector {
            agent: ureq::Agent::new(),
        }
    }
}

impl Default for WebApiConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteConnector for WebApiConnector {
    fn connect(&self, endpoint: &RemoteEndpoint) -> Box<dyn RemoteApi> {
        Box::new(WebApiClient::new(self.agent.clone(), endpoint))
    }
}

pub struct WebApiClient {
    agent: ureq::Agent,
    base_url: String,
    public_key: String,
    private_key: String,
}

impl WebApiClient {
    pub fn new(agent: ureq::Agent, endpoint: &RemoteEndpoint) -> Self {
        WebApiClient {
            agent,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            public_key: endpoint.public_key.clone(),
            private_key: endpoint.private_key.clone(),
        }
    }

    fn post(&self, route: &str, body: &Value) -> Result<Value, RemoteError> {
        let expires = Utc::now().timestamp() + SIGNATURE_TTL_SECS;
        let signature = sign(&self.public_key, &self.private_key, "POST", route, expires)?;
        let url = format!("{}/{}", self.base_url, route);
        debug!("POST {}", url);

        let response = match self
            .agent
            .post(&url)
            .query("api_key", &self.public_key)
            .query("signature", &signature)
            .query("expires", &expires.to_string())
            .send_json(body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let message = response.into_string().unwrap_or_default();
                return Err(RemoteError::Status { status, message });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(RemoteError::Transport(transport.to_string()));
            }
        };

        let envelope: Envelope = response
            .into_json()
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;

        if envelope.status > 202 {
            return Err(RemoteError::Rejected {
                status: envelope.status,
                message: error_message(&envelope.response),
            });
        }

        Ok(envelope.response)
    }
}

impl RemoteApi for WebApiClient {
    fn create_form(&self, form: &Form) -> Result<String, RemoteError> {
        let mut payload = form.clone();
        payload.id = None;

        let response = self.post(FORMS_ROUTE, &json!([payload]))?;
        response
            .as_array()
            .and_then(|ids| ids.first())
            .and_then(id_to_string)
            .ok_or_else(|| RemoteError::InvalidResponse(format!("no form id in {}", response)))
    }

    fn create_entry(&self, entry: &Entry) -> Result<(), RemoteError> {
        self.post(ENTRIES_ROUTE, &json!([entry]))?;
        Ok(())
    }
}

fn id_to_string(id: &Value) -> Option<String> {
    match id {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn error_message(response: &Value) -> String {
    response
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| response.to_string())
}
