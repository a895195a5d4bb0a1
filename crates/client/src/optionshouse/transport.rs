//! HTTPS transport to the OptionsHouse endpoints

use crate::errors::{ClientError, Result};
use crate::http::MonoioHttpsClient;
use crate::trace;
use crate::traits::Transport;
use crate::types::Page;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// The API expects `text/xml` even though the body is JSON
const CONTENT_TYPE: &str = "text/xml";

pub struct HttpsTransport {
    base_url: Url,
    https_client: MonoioHttpsClient,
    trace_messages: bool,
}

impl HttpsTransport {
    pub fn new(base_url: &str, trace_messages: bool) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.scheme() != "https" {
            return Err(ClientError::ConfigurationError(format!(
                "base URL must be https, got {base_url}"
            )));
        }

        Ok(Self {
            base_url,
            https_client: MonoioHttpsClient::new()?,
            trace_messages,
        })
    }

    pub fn endpoint(&self, page: Page) -> Result<Url> {
        Ok(self.base_url.join(page.path())?)
    }

    fn dump(&self, label: &str, body: &str) {
        debug!("{label}: {body}");
        match trace::flatten_json(body) {
            Ok(lines) => {
                for line in lines {
                    debug!("{label} {line}");
                }
            }
            Err(e) => debug!("{label} is not JSON: {e}"),
        }
    }
}

#[async_trait(?Send)]
impl Transport for HttpsTransport {
    async fn exchange(&self, page: Page, body: &str) -> Result<String> {
        let url = self.endpoint(page)?;

        if self.trace_messages {
            self.dump("request", body);
        }

        let response = self
            .https_client
            .post(url.as_str(), body, &[("Content-Type", CONTENT_TYPE)])
            .await?;

        if response.status != 200 {
            return Err(ClientError::HttpError(response.status, response.body));
        }

        if self.trace_messages {
            self.dump("response", &response.body);
        }

        Ok(response.body)
    }
}
