//! Seams between messages, the client and the wire

use crate::errors::Result;
use crate::optionshouse::envelope::ResponseStatus;
use crate::types::Page;
use async_trait::async_trait;
use serde::Serialize;

/// Moves one request body to the server and returns the response body.
///
/// The HTTPS implementation lives in `optionshouse::transport`; tests
/// substitute canned responses.
#[async_trait(?Send)]
pub trait Transport {
    async fn exchange(&self, page: Page, body: &str) -> Result<String>;
}

/// A typed OptionsHouse request
pub trait ApiRequest: Serialize {
    /// Value of `EZMessage.action`
    const ACTION: &'static str;
    const PAGE: Page;

    type Response: ApiResponse;

    /// Full request body: `{"EZMessage":{"action":..,"data":{..}}}`
    fn body(&self) -> Result<String> {
        let envelope = RequestEnvelope {
            message: RequestMessage {
                action: Self::ACTION,
                data: self,
            },
        };
        Ok(serde_json::to_string(&envelope)?)
    }
}

/// A typed OptionsHouse response, built from the raw body text
pub trait ApiResponse: Sized {
    fn from_json(raw: &str) -> Result<Self>;

    fn status(&self) -> &ResponseStatus;
}

#[derive(Serialize)]
struct RequestEnvelope<'a, D: ?Sized> {
    #[serde(rename = "EZMessage")]
    message: RequestMessage<'a, D>,
}

#[derive(Serialize)]
struct RequestMessage<'a, D: ?Sized> {
    action: &'static str,
    data: &'a D,
}
