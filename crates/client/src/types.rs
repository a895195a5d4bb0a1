//! Wire-level enums shared by the OptionsHouse messages

use opthouse_core::security_key;
use serde::{Deserialize, Serialize};

/// Endpoint path a message is posted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// `/j`, trading and quote messages
    J,
    /// `/m`, session and account messages
    M,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::J => "/j",
            Page::M => "/m",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Whether an order opens or closes a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionType {
    #[serde(rename = "opening")]
    Open,
    #[serde(rename = "closing")]
    Close,
}

impl std::fmt::Display for PositionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionType::Open => write!(f, "opening"),
            PositionType::Close => write!(f, "closing"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeInForce {
    #[default]
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "good_till_cancel")]
    Gtc,
    /// Extended-hours session
    #[serde(rename = "ext_trading")]
    Ext,
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeInForce::Day => write!(f, "day"),
            TimeInForce::Gtc => write!(f, "good_till_cancel"),
            TimeInForce::Ext => write!(f, "ext_trading"),
        }
    }
}

/// Leg security type. The server accepts an empty string when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityType {
    #[serde(rename = "stock")]
    Stock,
    #[serde(rename = "option")]
    Option,
    #[serde(rename = "")]
    Unknown,
}

impl SecurityType {
    /// Classify a ticker or key
    pub fn of(key: &str) -> Self {
        if security_key::is_stock(key) {
            SecurityType::Stock
        } else if security_key::is_option(key) {
            SecurityType::Option
        } else {
            SecurityType::Unknown
        }
    }
}
