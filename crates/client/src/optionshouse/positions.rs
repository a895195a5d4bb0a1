//! `account.positions`
//!
//! `data.unified` is a list of positions, except when the account holds
//! exactly one position, in which case the server sends the bare object.
//! Both forms go through the shape normalizer.

use super::de;
use super::envelope::{ResponseDocument, ResponseStatus};
use crate::errors::Result;
use crate::traits::{ApiRequest, ApiResponse};
use crate::types::Page;
use opthouse_core::security_key::{self, SecurityKey};
use opthouse_core::shape::{self, CollectionShape, NormalizedCollection, ParsePath, SingleShape};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct AccountPositionsRequest {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    pub account: String,
}

impl AccountPositionsRequest {
    pub fn new(auth_token: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            account: account.into(),
        }
    }
}

impl ApiRequest for AccountPositionsRequest {
    const ACTION: &'static str = "account.positions";
    const PAGE: Page = Page::M;
    type Response = AccountPositions;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Position {
    #[serde(deserialize_with = "de::string")]
    pub account_id: String,
    #[serde(deserialize_with = "de::string")]
    pub security_key: String,
    #[serde(deserialize_with = "de::string")]
    pub underlying: String,
    #[serde(deserialize_with = "de::string")]
    pub description: String,
    #[serde(deserialize_with = "de::string")]
    pub exp_string: String,
    #[serde(deserialize_with = "de::string")]
    pub strike_string: String,
    #[serde(rename = "qty", deserialize_with = "de::i64")]
    pub quantity: i64,
    #[serde(deserialize_with = "de::f64")]
    pub stock: f64,
    #[serde(deserialize_with = "de::f64")]
    pub multiplier: f64,
    #[serde(deserialize_with = "de::f64")]
    pub spc: f64,
    #[serde(deserialize_with = "de::f64")]
    pub bid: f64,
    #[serde(deserialize_with = "de::f64")]
    pub ask: f64,
    #[serde(deserialize_with = "de::f64")]
    pub price: f64,
    #[serde(deserialize_with = "de::f64")]
    pub mkt_val: f64,
    #[serde(deserialize_with = "de::f64")]
    pub cost_basis: f64,
    #[serde(deserialize_with = "de::f64")]
    pub share_cost_basis: f64,
    #[serde(deserialize_with = "de::f64")]
    pub default_cost_basis: f64,
    #[serde(deserialize_with = "de::bool")]
    pub is_custom_cost_basis: bool,
    #[serde(deserialize_with = "de::f64")]
    pub gain: f64,
    #[serde(deserialize_with = "de::f64")]
    pub daily_change: f64,
    #[serde(deserialize_with = "de::f64")]
    pub pos_val_change: f64,
    #[serde(deserialize_with = "de::bool")]
    pub is_exchange_delayed: bool,
    #[serde(deserialize_with = "de::bool")]
    pub can_exercise: bool,
    #[serde(deserialize_with = "de::bool")]
    pub position_new_today: bool,
    #[serde(deserialize_with = "de::strings")]
    pub sort_hint: Vec<String>,
}

impl Position {
    pub fn key(&self) -> SecurityKey {
        SecurityKey::parse(&self.security_key)
    }

    pub fn is_option(&self) -> bool {
        security_key::is_option(&self.security_key)
    }
}

/// Payload with `unified` as a list, possibly absent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionList {
    #[serde(default, deserialize_with = "de::string")]
    time_stamp: String,
    #[serde(default)]
    unified: Option<Vec<Position>>,
}

/// Payload with `unified` as one bare object
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinglePosition {
    #[serde(default, deserialize_with = "de::string")]
    time_stamp: String,
    unified: Position,
}

/// Everything in a positions reply except the positions themselves
#[derive(Debug, Clone, Default)]
pub struct PositionsHead {
    pub status: ResponseStatus,
    pub time_stamp: String,
}

impl CollectionShape for ResponseDocument<Option<PositionList>> {
    type Head = PositionsHead;
    type Item = Position;

    fn into_parts(self) -> (PositionsHead, Vec<Position>) {
        let status = self.message.status();
        match self.message.data {
            Some(data) => (
                PositionsHead {
                    status,
                    time_stamp: data.time_stamp,
                },
                data.unified.unwrap_or_default(),
            ),
            None => (
                PositionsHead {
                    status,
                    time_stamp: String::new(),
                },
                Vec::new(),
            ),
        }
    }
}

impl SingleShape for ResponseDocument<SinglePosition> {
    type Head = PositionsHead;
    type Item = Position;

    fn into_parts(self) -> (PositionsHead, Position) {
        let status = self.message.status();
        let data = self.message.data;
        (
            PositionsHead {
                status,
                time_stamp: data.time_stamp,
            },
            data.unified,
        )
    }
}

/// Positions of one account, in server order
#[derive(Debug, Clone)]
pub struct AccountPositions {
    head: PositionsHead,
    positions: NormalizedCollection<Position>,
    raw: String,
}

impl AccountPositions {
    pub fn status(&self) -> &ResponseStatus {
        &self.head.status
    }

    pub fn time_stamp(&self) -> &str {
        &self.head.time_stamp
    }

    pub fn positions(&self) -> &NormalizedCollection<Position> {
        &self.positions
    }

    /// Which schema matched; useful when diagnosing odd replies
    pub fn parse_path(&self) -> ParsePath {
        self.positions.path()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// First position whose key canonicalizes to the same key as `key`
    pub fn find(&self, key: &str) -> Option<&Position> {
        self.positions
            .iter()
            .find(|p| security_key::keys_equal(&p.security_key, key))
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl ApiResponse for AccountPositions {
    fn from_json(raw: &str) -> Result<Self> {
        let normalized =
            shape::normalize::<ResponseDocument<Option<PositionList>>, ResponseDocument<SinglePosition>>(raw)?;

        Ok(Self {
            head: normalized.head,
            positions: normalized.items,
            raw: normalized.raw,
        })
    }

    fn status(&self) -> &ResponseStatus {
        &self.head.status
    }
}
