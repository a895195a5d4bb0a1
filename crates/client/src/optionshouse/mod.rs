//! OptionsHouse API client
//!
//! Every vendor action is a typed request implementing [`ApiRequest`];
//! [`OptionsHouseClient::execute`] sends any of them. The convenience
//! methods below fill in the session token for you.

pub mod account;
pub mod auth;
pub mod config;
pub mod de;
pub mod envelope;
pub mod order;
pub mod positions;
pub mod quote;
pub mod transport;

use crate::errors::{ClientError, Result};
use crate::traits::{ApiRequest, ApiResponse, Transport};
use crate::types::{PositionType, Side, TimeInForce};
use opthouse_core::{log_error, log_order, Fixed, PerfTimer};
use std::cell::RefCell;
use tracing::{debug, info, warn};

pub use account::{
    Account, AccountActivity, AccountActivityRequest, AccountCash, AccountCashRequest, AccountInfoData,
    AccountInfoRequest, ActivityEvent, LoginProfile,
};
pub use auth::{KeepAliveRequest, LoginData, LoginRequest, LogoutData, LogoutRequest};
pub use config::OptionsHouseConfig;
pub use envelope::{Reply, ResponseStatus, StatusReply};
pub use order::{
    AllOrderStatus, AllOrderStatusRequest, CancelOrderRequest, DetailLeg, HistoryEvent, OrderCanceled, OrderCreated,
    OrderDetails, OrderDetailsData, OrderDetailsRequest, OrderHistory, OrderHistoryRequest, OrderRecord,
    SimpleOrderRequest,
};
pub use positions::{AccountPositions, AccountPositionsRequest, Position};
pub use quote::{Expiration, Quote, QuoteList, QuoteListRequest, SeriesData, ViewSeriesRequest};
pub use transport::HttpsTransport;

/// Session-holding OptionsHouse client
///
/// Single-threaded: one request at a time per call, no retries, no pacing.
pub struct OptionsHouseClient<T: Transport = HttpsTransport> {
    config: OptionsHouseConfig,
    transport: T,
    auth_token: RefCell<Option<String>>,
}

impl OptionsHouseClient<HttpsTransport> {
    /// Client over HTTPS to `config.base_url`
    pub async fn new(config: OptionsHouseConfig) -> Result<Self> {
        info!("🚀 Initializing OptionsHouse client");
        info!("   Base URL: {}", config.base_url);
        info!("   Timing: {}", config.enable_timing);
        info!("   Message tracing: {}", config.trace_messages);

        let transport = HttpsTransport::new(&config.base_url, config.trace_messages)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> OptionsHouseClient<T> {
    pub fn with_transport(config: OptionsHouseConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            auth_token: RefCell::new(None),
        }
    }

    pub fn config(&self) -> &OptionsHouseConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn auth_token(&self) -> Option<String> {
        self.auth_token.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth_token.borrow().is_some()
    }

    /// Adopt a token from an earlier session
    pub fn set_auth_token(&self, token: impl Into<String>) {
        *self.auth_token.borrow_mut() = Some(token.into());
    }

    fn token(&self) -> Result<String> {
        self.auth_token().ok_or(ClientError::NotLoggedIn)
    }

    /// Send one request and parse its reply.
    ///
    /// Envelope errors come back as [`ClientError::Api`]; alerts are
    /// logged and otherwise ignored.
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> Result<R::Response> {
        let _timer = self
            .config
            .enable_timing
            .then(|| PerfTimer::start(format!("optionshouse_{}", R::ACTION)));

        debug!("➡️ {} via {}", R::ACTION, R::PAGE);
        let body = request.body()?;
        let raw = self.transport.exchange(R::PAGE, &body).await?;
        let response = R::Response::from_json(&raw)?;

        let status = response.status();
        if status.has_alert() {
            warn!("⚠️ {}: {}", R::ACTION, status.alert());
        }
        if let Err(e) = status.check() {
            log_error!(R::ACTION, e);
            return Err(e);
        }
        Ok(response)
    }

    /// `auth.login` with the configured credentials. The token is kept
    /// for later calls when the server accepts them.
    pub async fn login(&self) -> Result<Reply<LoginData>> {
        if !self.config.has_credentials() {
            return Err(ClientError::MissingCredentials("username/password".to_string()));
        }

        let request = LoginRequest::new(self.config.username.clone(), self.config.password.clone());
        let reply = self.execute(&request).await?;
        if reply.login_success() {
            info!("✅ Logged in as {} {}", reply.first_name, reply.last_name);
            self.set_auth_token(reply.auth_token.clone());
        } else {
            warn!("Login returned no auth token");
        }
        Ok(reply)
    }

    /// `auth.logout`; forgets the token once the server confirms
    pub async fn logout(&self) -> Result<Reply<LogoutData>> {
        let token = self.token()?;
        let reply = self.execute(&LogoutRequest::new(token.as_str())).await?;
        if reply.logged_out(&token) {
            info!("👋 Logged out");
            self.auth_token.borrow_mut().take();
        }
        Ok(reply)
    }

    pub async fn keep_alive(&self, account: &str) -> Result<StatusReply> {
        self.execute(&KeepAliveRequest::new(self.token()?, account)).await
    }

    pub async fn account_list(&self) -> Result<Reply<AccountInfoData>> {
        self.execute(&AccountInfoRequest::new(self.token()?)).await
    }

    pub async fn account_details(&self, account: &str) -> Result<Reply<AccountCash>> {
        self.execute(&AccountCashRequest::new(self.token()?, account)).await
    }

    pub async fn account_activity(&self, account: &str) -> Result<Reply<AccountActivity>> {
        self.execute(&AccountActivityRequest::new(self.token()?, account)).await
    }

    pub async fn account_positions(&self, account: &str) -> Result<AccountPositions> {
        self.execute(&AccountPositionsRequest::new(self.token()?, account)).await
    }

    pub async fn quotes<I, S>(&self, symbols: I) -> Result<Reply<QuoteList>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.execute(&QuoteListRequest::new(self.token()?, symbols)).await
    }

    pub async fn view_series(&self, symbol: &str) -> Result<Reply<SeriesData>> {
        self.execute(&ViewSeriesRequest::new(self.token()?, symbol)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn place_simple_order(
        &self,
        account: &str,
        symbol: &str,
        side: Side,
        position_type: PositionType,
        quantity: u64,
        limit_price: Fixed,
        time_in_force: TimeInForce,
    ) -> Result<Reply<OrderCreated>> {
        let request = SimpleOrderRequest::new(self.token()?, account, symbol, side, position_type, quantity, limit_price)
            .with_time_in_force(time_in_force);
        let reply = self.execute(&request).await?;
        log_order!(
            format!("{side} {quantity} @ {limit_price}"),
            reply.id,
            request.key()
        );
        Ok(reply)
    }

    pub async fn cancel_order(&self, account: &str, order_id: &str) -> Result<Reply<OrderCanceled>> {
        let reply = self.execute(&CancelOrderRequest::new(self.token()?, account, order_id)).await?;
        log_order!("cancel", order_id, if reply.canceled { "canceled" } else { "not canceled" });
        Ok(reply)
    }

    pub async fn order_details(&self, account_id: &str, master_order_id: &str) -> Result<Reply<OrderDetailsData>> {
        self.execute(&OrderDetailsRequest::new(self.token()?, account_id, master_order_id))
            .await
    }

    pub async fn order_history(&self, account_id: &str, master_order_id: &str) -> Result<Reply<OrderHistory>> {
        self.execute(&OrderHistoryRequest::new(self.token()?, account_id, master_order_id))
            .await
    }

    pub async fn all_order_status(&self, account_id: &str) -> Result<Reply<AllOrderStatus>> {
        self.execute(&AllOrderStatusRequest::new(self.token()?, account_id)).await
    }
}
