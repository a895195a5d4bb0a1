//! Order messages: `order.create.json`, `order.cancel.json`,
//! `order.details`, `order.history`, `master.account.orders`

use super::de;
use super::envelope::Reply;
use crate::traits::ApiRequest;
use crate::types::{Page, PositionType, SecurityType, Side, TimeInForce};
use opthouse_core::security_key;
use opthouse_core::{Fixed, FixedError};
use serde::{Deserialize, Serialize};

/// Order view the detail, history and status messages ask for
const CURRENT_VIEW: &str = "current";

// ============================================================================
// order.create.json
// ============================================================================

/// Single-leg limit order
#[derive(Debug, Clone, Serialize)]
pub struct SimpleOrderRequest {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    pub account: String,
    pub order: OrderTicket,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderTicket {
    pub order_type: &'static str,
    pub order_id: bool,
    pub m_order_id: u32,
    pub order_subtype: &'static str,
    pub price_type: &'static str,
    pub time_in_force: TimeInForce,
    pub alias: String,
    pub price: String,
    pub underlying_stock_symbol: String,
    #[serde(rename = "allOrNone")]
    pub all_or_none: bool,
    pub source: &'static str,
    pub client_id: u64,
    pub preferred_destination: &'static str,
    pub legs: Vec<OrderLeg>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderLeg {
    pub index: u32,
    pub side: Side,
    pub security_type: SecurityType,
    pub quantity: u64,
    pub key: String,
    pub multiplier: u32,
    pub position_type: PositionType,
}

impl SimpleOrderRequest {
    /// `symbol` may be a ticker or a full key.
    pub fn new(
        auth_token: impl Into<String>,
        account: impl Into<String>,
        symbol: &str,
        side: Side,
        position_type: PositionType,
        quantity: u64,
        limit_price: Fixed,
    ) -> Self {
        let key = security_key::to_key(symbol);

        Self {
            auth_token: auth_token.into(),
            account: account.into(),
            order: OrderTicket {
                order_type: "regular",
                order_id: false,
                m_order_id: 1,
                order_subtype: "single",
                price_type: "limit",
                time_in_force: TimeInForce::Day,
                alias: "(A) Order 1".to_string(),
                price: limit_price.to_string(),
                underlying_stock_symbol: security_key::underlying_of(&key),
                all_or_none: false,
                source: "API",
                client_id: opthouse_core::millis(),
                preferred_destination: "BEST",
                legs: vec![OrderLeg {
                    index: 0,
                    side,
                    security_type: SecurityType::of(&key),
                    quantity,
                    key,
                    multiplier: 1,
                    position_type,
                }],
            },
        }
    }

    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.order.time_in_force = tif;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.order.alias = alias.into();
        self
    }

    pub fn key(&self) -> &str {
        self.order.legs.first().map(|l| l.key.as_str()).unwrap_or_default()
    }
}

impl ApiRequest for SimpleOrderRequest {
    const ACTION: &'static str = "order.create.json";
    const PAGE: Page = Page::J;
    type Response = Reply<OrderCreated>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderCreated {
    #[serde(deserialize_with = "de::bool")]
    pub created: bool,
    #[serde(deserialize_with = "de::string")]
    pub id: String,
}

// ============================================================================
// order.cancel.json
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderRequest {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    pub account: String,
    pub order_id: String,
}

impl CancelOrderRequest {
    pub fn new(auth_token: impl Into<String>, account: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            account: account.into(),
            order_id: order_id.into(),
        }
    }
}

impl ApiRequest for CancelOrderRequest {
    const ACTION: &'static str = "order.cancel.json";
    const PAGE: Page = Page::J;
    type Response = Reply<OrderCanceled>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderCanceled {
    #[serde(deserialize_with = "de::bool")]
    pub canceled: bool,
    #[serde(deserialize_with = "de::string")]
    pub id: String,
}

// ============================================================================
// order.details / order.history
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct OrderSelector {
    pub master_order_view: &'static str,
    pub master_order_id: String,
}

impl OrderSelector {
    fn current(master_order_id: impl Into<String>) -> Self {
        Self {
            master_order_view: CURRENT_VIEW,
            master_order_id: master_order_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDetailsRequest {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    pub account_id: String,
    pub order_details: OrderSelector,
}

impl OrderDetailsRequest {
    pub fn new(auth_token: impl Into<String>, account_id: impl Into<String>, master_order_id: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            account_id: account_id.into(),
            order_details: OrderSelector::current(master_order_id),
        }
    }
}

impl ApiRequest for OrderDetailsRequest {
    const ACTION: &'static str = "order.details";
    const PAGE: Page = Page::J;
    type Response = Reply<OrderDetailsData>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransactionTime {
    #[serde(deserialize_with = "de::string")]
    pub raw: String,
    #[serde(deserialize_with = "de::string")]
    pub pretty: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClearingFirm {
    #[serde(deserialize_with = "de::string")]
    pub name: String,
    #[serde(deserialize_with = "de::string")]
    pub account: String,
    #[serde(deserialize_with = "de::string")]
    pub mpid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(deserialize_with = "de::string")]
    pub account: String,
    #[serde(deserialize_with = "de::string")]
    pub org: String,
    #[serde(deserialize_with = "de::nullable")]
    pub stock_clearing_firm: ClearingFirm,
    #[serde(deserialize_with = "de::nullable")]
    pub option_clearing_firm: ClearingFirm,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetailLeg {
    #[serde(deserialize_with = "de::i64")]
    pub index: i64,
    #[serde(deserialize_with = "de::string")]
    pub side: String,
    #[serde(deserialize_with = "de::string")]
    pub security_type: String,
    #[serde(deserialize_with = "de::string")]
    pub key: String,
    #[serde(deserialize_with = "de::i64")]
    pub multiplier: i64,
    #[serde(deserialize_with = "de::i64")]
    pub ratio_quantity: i64,
    #[serde(deserialize_with = "de::string")]
    pub position_type: String,
    #[serde(deserialize_with = "de::string")]
    pub leg_description: String,
    #[serde(deserialize_with = "de::i64")]
    pub quantity: i64,
    #[serde(deserialize_with = "de::i64")]
    pub quantity_filled: i64,
    #[serde(deserialize_with = "de::string")]
    pub transaction: String,
    #[serde(deserialize_with = "de::string")]
    pub last_updated: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderDetails {
    #[serde(deserialize_with = "de::string")]
    pub order_id: String,
    #[serde(deserialize_with = "de::string")]
    pub order_subtype: String,
    #[serde(deserialize_with = "de::string")]
    pub order_type: String,
    #[serde(deserialize_with = "de::nullable")]
    pub transaction_time: TransactionTime,
    #[serde(deserialize_with = "de::nullable")]
    pub customer: Customer,
    #[serde(deserialize_with = "de::string")]
    pub order_creator_id: String,
    #[serde(deserialize_with = "de::string")]
    pub preferred_destination: String,
    #[serde(deserialize_with = "de::string")]
    pub fix_symbol: String,
    #[serde(deserialize_with = "de::i64")]
    pub quantity: i64,
    #[serde(deserialize_with = "de::string")]
    pub price_type: String,
    #[serde(deserialize_with = "de::f64")]
    pub price: f64,
    #[serde(deserialize_with = "de::string")]
    pub time_in_force: String,
    #[serde(rename = "allOrNone", deserialize_with = "de::bool")]
    pub all_or_none: bool,
    #[serde(deserialize_with = "de::nullable")]
    pub legs: Vec<DetailLeg>,
    #[serde(deserialize_with = "de::string")]
    pub order_title: String,
    #[serde(deserialize_with = "de::string")]
    pub status: String,
    #[serde(deserialize_with = "de::string")]
    pub date_created: String,
    #[serde(deserialize_with = "de::string")]
    pub date_modified: String,
    #[serde(deserialize_with = "de::i64")]
    pub master_order_id: i64,
    #[serde(deserialize_with = "de::string")]
    pub time_in_force_desc: String,
}

impl OrderDetails {
    pub fn is_fully_filled(&self) -> bool {
        self.status == "Filled"
    }

    /// Filled quantity across legs; zero if the sum overflows
    pub fn total_fill_quantity(&self) -> i64 {
        self.legs
            .iter()
            .try_fold(0i64, |acc, leg| acc.checked_add(leg.quantity_filled))
            .unwrap_or(0)
    }

    /// Position of the leg trading `symbol`, compared as canonical keys
    pub fn leg_index(&self, symbol: &str) -> Option<usize> {
        let key = security_key::to_key(symbol);
        self.legs
            .iter()
            .position(|l| security_key::keys_equal(&key, &l.key))
    }

    pub fn leg(&self, symbol: &str) -> Option<&DetailLeg> {
        self.leg_index(symbol).map(|i| &self.legs[i])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderDetailsData {
    #[serde(deserialize_with = "de::nullable")]
    pub order_details: OrderDetails,
    #[serde(deserialize_with = "de::string")]
    pub master_order_view: String,
    #[serde(deserialize_with = "de::string")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderHistoryRequest {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    pub account_id: String,
    pub order_history: OrderSelector,
}

impl OrderHistoryRequest {
    pub fn new(auth_token: impl Into<String>, account_id: impl Into<String>, master_order_id: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            account_id: account_id.into(),
            order_history: OrderSelector::current(master_order_id),
        }
    }
}

impl ApiRequest for OrderHistoryRequest {
    const ACTION: &'static str = "order.history";
    const PAGE: Page = Page::J;
    type Response = Reply<OrderHistory>;
}

/// One fill, cancel or status change. Quantity and price arrive as text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryEvent {
    #[serde(deserialize_with = "de::string")]
    pub transaction: String,
    #[serde(deserialize_with = "de::string")]
    pub activity_date: String,
    #[serde(deserialize_with = "de::string")]
    pub description: String,
    #[serde(deserialize_with = "de::string")]
    pub quantity: String,
    #[serde(deserialize_with = "de::string")]
    pub price: String,
    #[serde(deserialize_with = "de::string")]
    pub underlying_stock_symbol: String,
    #[serde(deserialize_with = "de::string")]
    pub event: String,
}

impl HistoryEvent {
    /// Zero when the text is not a whole number
    pub fn quantity(&self) -> i64 {
        self.quantity.trim().parse().unwrap_or(0)
    }

    /// Zero when the text is not a decimal
    pub fn price(&self) -> Fixed {
        Fixed::parse_or_zero(&self.price)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderHistory {
    #[serde(deserialize_with = "de::string")]
    pub master_order_id: String,
    #[serde(deserialize_with = "de::string")]
    pub timestamp: String,
    #[serde(rename = "order_history", deserialize_with = "de::nullable")]
    pub events: Vec<HistoryEvent>,
}

impl OrderHistory {
    /// Quantity across events; zero if the sum overflows
    pub fn total_quantity(&self) -> i64 {
        self.events
            .iter()
            .try_fold(0i64, |acc, event| acc.checked_add(event.quantity()))
            .unwrap_or(0)
    }

    /// Quantity-weighted average price; zero when nothing has a quantity
    /// or the figures overflow
    pub fn average_price(&self) -> Fixed {
        self.weighted_average().unwrap_or(Fixed::ZERO)
    }

    fn weighted_average(&self) -> Result<Fixed, FixedError> {
        let mut notional = Fixed::ZERO;
        let mut quantity = Fixed::ZERO;
        for event in &self.events {
            let qty = Fixed::from_i64(event.quantity());
            notional = notional.checked_add(event.price().checked_mul(qty)?)?;
            quantity = quantity.checked_add(qty)?;
        }
        notional.checked_div(quantity)
    }
}

// ============================================================================
// master.account.orders
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct OrderPage {
    pub page: u32,
    pub page_count: u32,
    pub page_size: u32,
    pub master_order_view: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllOrderStatusRequest {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    pub account_id: String,
    pub master_order: OrderPage,
}

impl AllOrderStatusRequest {
    pub fn new(auth_token: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            account_id: account_id.into(),
            master_order: OrderPage {
                page: 0,
                page_count: 1,
                page_size: 50,
                master_order_view: CURRENT_VIEW,
            },
        }
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.master_order.page = page;
        self.master_order.page_size = page_size;
        self
    }
}

impl ApiRequest for AllOrderStatusRequest {
    const ACTION: &'static str = "master.account.orders";
    const PAGE: Page = Page::J;
    type Response = Reply<AllOrderStatus>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderRecord {
    #[serde(deserialize_with = "de::i64")]
    pub order_id: i64,
    #[serde(deserialize_with = "de::string")]
    pub message: String,
    #[serde(deserialize_with = "de::string")]
    pub time_in_force: String,
    #[serde(deserialize_with = "de::i64")]
    pub quantity: i64,
    #[serde(deserialize_with = "de::string")]
    pub fill_quantity: String,
    #[serde(deserialize_with = "de::string")]
    pub transaction: String,
    #[serde(deserialize_with = "de::string")]
    pub short_description: String,
    #[serde(deserialize_with = "de::string")]
    pub long_description: String,
    #[serde(deserialize_with = "de::string")]
    pub status: String,
    #[serde(deserialize_with = "de::i64")]
    pub date_created_ms: i64,
    #[serde(deserialize_with = "de::i64")]
    pub last_updated_ms: i64,
    #[serde(deserialize_with = "de::string")]
    pub date_created: String,
    #[serde(deserialize_with = "de::string")]
    pub last_updated: String,
    #[serde(deserialize_with = "de::i64")]
    pub master_order_id: i64,
    #[serde(deserialize_with = "de::string")]
    pub order_type: String,
    #[serde(deserialize_with = "de::string")]
    pub price_type: String,
    #[serde(deserialize_with = "de::f64")]
    pub price: f64,
    #[serde(deserialize_with = "de::bool")]
    pub trigger_order: bool,
    #[serde(deserialize_with = "de::bool")]
    pub trailing_stop_order: bool,
    #[serde(deserialize_with = "de::bool")]
    pub complex_order: bool,
    #[serde(deserialize_with = "de::bool")]
    pub modifiable: bool,
    #[serde(deserialize_with = "de::i64")]
    pub root_order_id: i64,
    #[serde(deserialize_with = "de::bool")]
    pub is_spread_order: bool,
    #[serde(deserialize_with = "de::bool")]
    pub is_mutual_fund_order: bool,
    #[serde(deserialize_with = "de::string")]
    pub underlying_stock_symbol: String,
    #[serde(deserialize_with = "de::string")]
    pub timestamp: String,
    #[serde(deserialize_with = "de::bool")]
    pub has_expired_keys: bool,
    #[serde(deserialize_with = "de::string")]
    pub security_keys: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderRecords {
    #[serde(deserialize_with = "de::i64")]
    pub page: i64,
    #[serde(deserialize_with = "de::i64")]
    pub page_size: i64,
    #[serde(deserialize_with = "de::i64")]
    pub total_records: i64,
    #[serde(deserialize_with = "de::nullable")]
    pub records: Vec<OrderRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AllOrderStatus {
    #[serde(deserialize_with = "de::string")]
    pub timestamp: String,
    #[serde(deserialize_with = "de::string")]
    pub response_type: String,
    #[serde(rename = "master_account_orders", deserialize_with = "de::nullable")]
    pub orders: OrderRecords,
}

impl AllOrderStatus {
    pub fn records(&self) -> &[OrderRecord] {
        &self.orders.records
    }

    pub fn by_order_id(&self, order_id: i64) -> Option<&OrderRecord> {
        self.orders.records.iter().find(|r| r.order_id == order_id)
    }
}
