//! The `EZMessage` response envelope
//!
//! ```json
//! {"EZMessage":{"action":"auth.login","alert":"","errors":{..},"data":{..}}}
//! ```
//!
//! Alerts are informational. Anything in `errors` means the server
//! rejected the request, and [`ResponseStatus::check`] turns it into
//! [`ClientError::Api`].

use super::de;
use crate::errors::{ClientError, Result};
use crate::traits::ApiResponse;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct ResponseDocument<D> {
    #[serde(rename = "EZMessage")]
    pub message: ResponseMessage<D>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage<D> {
    #[serde(default, deserialize_with = "de::string")]
    pub action: String,
    #[serde(default, deserialize_with = "de::string")]
    pub alert: String,
    #[serde(default, deserialize_with = "error_map")]
    pub errors: BTreeMap<String, String>,
    /// Use `Option<T>` when the payload may be missing
    pub data: D,
}

impl<D> ResponseMessage<D> {
    pub fn status(&self) -> ResponseStatus {
        ResponseStatus {
            action: self.action.clone(),
            alert: self.alert.clone(),
            errors: self.errors.clone(),
        }
    }
}

/// Decode `errors` whatever form it takes: an object of code/message
/// pairs, a bare string, a list, or nothing.
fn error_map<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BTreeMap<String, String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => BTreeMap::new(),
        Value::Object(map) => map.into_iter().map(|(k, v)| (k, de::value_text(v))).collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), de::value_text(v)))
            .collect(),
        Value::String(s) if s.trim().is_empty() => BTreeMap::new(),
        other => BTreeMap::from([("error".to_string(), de::value_text(other))]),
    })
}

/// Action, alert and errors of a response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseStatus {
    action: String,
    alert: String,
    errors: BTreeMap<String, String>,
}

impl ResponseStatus {
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn alert(&self) -> &str {
        &self.alert
    }

    pub fn has_alert(&self) -> bool {
        !self.alert.trim().is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn check(&self) -> Result<()> {
        if self.has_errors() {
            return Err(ClientError::Api {
                action: self.action.clone(),
                errors: self.errors.clone(),
            });
        }
        Ok(())
    }
}

/// Typed response: envelope status, the `data` payload, and the raw text.
///
/// A missing or `null` payload decodes to `D::default()`; callers who
/// need to tell the difference should look at `status()` first.
#[derive(Debug, Clone)]
pub struct Reply<D> {
    status: ResponseStatus,
    data: D,
    raw: String,
}

impl<D> Reply<D> {
    pub fn new(status: ResponseStatus, data: D, raw: String) -> Self {
        Self { status, data, raw }
    }

    pub fn status(&self) -> &ResponseStatus {
        &self.status
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn into_data(self) -> D {
        self.data
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl<D> std::ops::Deref for Reply<D> {
    type Target = D;

    fn deref(&self) -> &D {
        &self.data
    }
}

impl<D: DeserializeOwned + Default> ApiResponse for Reply<D> {
    fn from_json(raw: &str) -> Result<Self> {
        let doc: ResponseDocument<Option<D>> = serde_json::from_str(raw)?;
        let status = doc.message.status();
        Ok(Reply::new(status, doc.message.data.unwrap_or_default(), raw.to_string()))
    }

    fn status(&self) -> &ResponseStatus {
        &self.status
    }
}

/// Reply with no payload of interest
pub type StatusReply = Reply<Value>;
