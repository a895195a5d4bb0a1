//! Market data messages: `view.quote.list`, `view.series`

use super::de;
use super::envelope::Reply;
use crate::traits::ApiRequest;
use crate::types::Page;
use opthouse_core::security_key::{self, SecurityKey};
use serde::{Deserialize, Serialize};

// ============================================================================
// view.quote.list
// ============================================================================

/// Quote request for any mix of stocks and options.
///
/// Stocks get stock details and extended-hours data; options get greeks.
/// Keys that are neither are dropped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteListRequest {
    pub auth_token: String,
    pub key: Vec<String>,
    pub add_extended: Vec<String>,
    pub add_stock_details: Vec<String>,
    pub add_greeks: Vec<String>,
    pub add_company_name: bool,
}

impl QuoteListRequest {
    pub fn new<I, S>(auth_token: impl Into<String>, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stocks = Vec::new();
        let mut options = Vec::new();
        for symbol in symbols {
            let key = security_key::to_key(symbol.as_ref());
            if security_key::is_stock(&key) {
                stocks.push(key);
            } else if security_key::is_option(&key) {
                options.push(key);
            }
        }

        let mut key = stocks.clone();
        key.extend(options.iter().cloned());

        Self {
            auth_token: auth_token.into(),
            key,
            add_extended: stocks.clone(),
            add_stock_details: stocks,
            add_greeks: options,
            add_company_name: false,
        }
    }
}

impl ApiRequest for QuoteListRequest {
    const ACTION: &'static str = "view.quote.list";
    const PAGE: Page = Page::J;
    type Response = Reply<QuoteList>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Quote {
    #[serde(deserialize_with = "de::string")]
    pub key: String,
    #[serde(deserialize_with = "de::string")]
    pub symbol: String,
    #[serde(deserialize_with = "de::string")]
    pub exchange: String,
    #[serde(deserialize_with = "de::f64")]
    pub bid: f64,
    #[serde(deserialize_with = "de::i64")]
    pub bid_size: i64,
    #[serde(deserialize_with = "de::f64")]
    pub ask: f64,
    #[serde(deserialize_with = "de::i64")]
    pub ask_size: i64,
    #[serde(deserialize_with = "de::f64")]
    pub last: f64,
    #[serde(deserialize_with = "de::f64")]
    pub mark: f64,
    #[serde(deserialize_with = "de::f64")]
    pub open: f64,
    #[serde(deserialize_with = "de::f64")]
    pub high: f64,
    #[serde(deserialize_with = "de::f64")]
    pub low: f64,
    #[serde(deserialize_with = "de::f64")]
    pub prev_close: f64,
    #[serde(deserialize_with = "de::f64")]
    pub change: f64,
    #[serde(deserialize_with = "de::f64")]
    pub change_percent: f64,
    #[serde(deserialize_with = "de::f64")]
    pub daily_change: f64,
    #[serde(deserialize_with = "de::i64")]
    pub volume: i64,
    #[serde(deserialize_with = "de::f64")]
    pub stock_last: f64,
    #[serde(deserialize_with = "de::bool")]
    pub is_exchange_delayed: bool,
    // options
    #[serde(deserialize_with = "de::f64")]
    pub delta: f64,
    #[serde(deserialize_with = "de::f64")]
    pub gamma: f64,
    #[serde(deserialize_with = "de::f64")]
    pub theta: f64,
    #[serde(deserialize_with = "de::f64")]
    pub vega: f64,
    #[serde(deserialize_with = "de::f64")]
    pub ivol: f64,
    #[serde(rename = "oi", deserialize_with = "de::i64")]
    pub open_interest: i64,
    #[serde(deserialize_with = "de::i64")]
    pub opt_vol: i64,
    // extended hours
    #[serde(deserialize_with = "de::f64")]
    pub ext_last: f64,
    #[serde(deserialize_with = "de::f64")]
    pub ext_close: f64,
    #[serde(deserialize_with = "de::f64")]
    pub ext_change_amount: f64,
    #[serde(deserialize_with = "de::f64")]
    pub ext_change_percent: f64,
    #[serde(deserialize_with = "de::string")]
    pub ext_change_time: String,
    // stock details
    #[serde(deserialize_with = "de::bool")]
    pub has_dividends: bool,
    #[serde(deserialize_with = "de::bool")]
    pub div_confirm: bool,
    #[serde(deserialize_with = "de::bool")]
    pub has_earnings: bool,
    #[serde(deserialize_with = "de::bool")]
    pub earnings_confirm: bool,
}

impl Quote {
    pub fn security_key(&self) -> SecurityKey {
        SecurityKey::parse(&self.key)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuoteList {
    #[serde(deserialize_with = "de::string")]
    pub session: String,
    #[serde(rename = "quote", deserialize_with = "de::nullable")]
    pub quotes: Vec<Quote>,
}

impl QuoteList {
    /// Quote for a ticker or key, matched after canonicalization
    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        let key = security_key::to_key(symbol);
        self.quotes
            .iter()
            .find(|q| security_key::keys_equal(&key, &q.key))
    }
}

// ============================================================================
// view.series
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSeriesRequest {
    pub auth_token: String,
    pub symbol: String,
    pub quarterlies: bool,
    pub weeklies: bool,
}

impl ViewSeriesRequest {
    /// `symbol` may be a ticker or any key on the underlying
    pub fn new(auth_token: impl Into<String>, symbol: &str) -> Self {
        Self {
            auth_token: auth_token.into(),
            symbol: security_key::underlying_of(symbol),
            quarterlies: false,
            weeklies: false,
        }
    }

    pub fn with_quarterlies(mut self, enable: bool) -> Self {
        self.quarterlies = enable;
        self
    }

    pub fn with_weeklies(mut self, enable: bool) -> Self {
        self.weeklies = enable;
        self
    }
}

impl ApiRequest for ViewSeriesRequest {
    const ACTION: &'static str = "view.series";
    const PAGE: Page = Page::M;
    type Response = Reply<SeriesData>;
}

/// One expiration and its contract keys
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Expiration {
    #[serde(rename = "e", deserialize_with = "de::string")]
    pub date: String,
    #[serde(rename = "k", deserialize_with = "de::strings")]
    pub contracts: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeriesData {
    #[serde(rename = "s", deserialize_with = "de::nullable")]
    pub expirations: Vec<Expiration>,
    #[serde(deserialize_with = "de::string")]
    pub q: String,
}

impl SeriesData {
    pub fn expiration_dates(&self) -> Vec<&str> {
        self.expirations.iter().map(|e| e.date.as_str()).collect()
    }

    pub fn contracts_for(&self, date: &str) -> Option<&[String]> {
        self.expirations
            .iter()
            .find(|e| e.date == date)
            .map(|e| e.contracts.as_slice())
    }
}
