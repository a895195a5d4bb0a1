//! Account messages: `account.info`, `account.cash`, `account.activity`

use super::de;
use super::envelope::Reply;
use crate::traits::ApiRequest;
use crate::types::Page;
use opthouse_core::{Fixed, Timestamp};
use serde::{Deserialize, Serialize};

// ============================================================================
// account.info
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AccountInfoRequest {
    #[serde(rename = "authToken")]
    pub auth_token: String,
}

impl AccountInfoRequest {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
        }
    }
}

impl ApiRequest for AccountInfoRequest {
    const ACTION: &'static str = "account.info";
    const PAGE: Page = Page::M;
    type Response = Reply<AccountInfoData>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Account {
    #[serde(deserialize_with = "de::string")]
    pub account_id: String,
    #[serde(deserialize_with = "de::string")]
    pub account_name: String,
    #[serde(deserialize_with = "de::string")]
    pub account_desc: String,
    #[serde(deserialize_with = "de::string")]
    pub account: String,
    #[serde(deserialize_with = "de::string")]
    pub account_type: String,
    #[serde(deserialize_with = "de::string")]
    pub account_type_id: String,
    #[serde(deserialize_with = "de::bool")]
    pub is_virtual: bool,
    #[serde(deserialize_with = "de::string")]
    pub year_account_opened: String,
    #[serde(deserialize_with = "de::string")]
    pub partner_code: String,
    #[serde(deserialize_with = "de::bool")]
    pub options_warning: bool,
    #[serde(rename = "canAccountACH", deserialize_with = "de::bool")]
    pub can_account_ach: bool,
    #[serde(deserialize_with = "de::bool")]
    pub can_change_commission_schedule: bool,
    #[serde(deserialize_with = "de::string")]
    pub current_commission_schedule: String,
    #[serde(deserialize_with = "de::string")]
    pub next_commission_schedule: String,
    #[serde(deserialize_with = "de::string")]
    pub risk_max_dollars_per_order: String,
    #[serde(deserialize_with = "de::string")]
    pub risk_max_shares_per_order: String,
    #[serde(deserialize_with = "de::string")]
    pub risk_max_contracts_per_order: String,
}

/// Profile settings returned alongside the account list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginProfile {
    #[serde(deserialize_with = "de::string")]
    pub first_name: String,
    #[serde(deserialize_with = "de::string")]
    pub last_name: String,
    #[serde(deserialize_with = "de::string")]
    pub account_mode: String,
    #[serde(deserialize_with = "de::string")]
    pub ui_mode: String,
    #[serde(deserialize_with = "de::string")]
    pub login_count: String,
    #[serde(deserialize_with = "de::string")]
    pub default_symbol: String,
    #[serde(deserialize_with = "de::bool")]
    pub rfq_warning: bool,
    #[serde(deserialize_with = "de::bool")]
    pub tools_warning: bool,
    #[serde(deserialize_with = "de::string")]
    pub tools_warning_version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountInfoData {
    #[serde(rename = "account", deserialize_with = "de::nullable")]
    pub accounts: Vec<Account>,
    #[serde(deserialize_with = "de::nullable")]
    pub login: LoginProfile,
    #[serde(deserialize_with = "de::string")]
    pub inactivity_timeout: String,
    #[serde(deserialize_with = "de::bool")]
    pub requires_account_creation: bool,
}

impl AccountInfoData {
    pub fn account_ids(&self) -> Vec<&str> {
        self.accounts.iter().map(|a| a.account_id.as_str()).collect()
    }

    pub fn account_names(&self) -> Vec<&str> {
        self.accounts.iter().map(|a| a.account_name.as_str()).collect()
    }

    pub fn by_id(&self, account_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.account_id == account_id)
    }

    pub fn by_name(&self, account_name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.account_name == account_name)
    }

    pub fn name_for_id(&self, account_id: &str) -> Option<&str> {
        self.by_id(account_id).map(|a| a.account_name.as_str())
    }

    pub fn id_for_name(&self, account_name: &str) -> Option<&str> {
        self.by_name(account_name).map(|a| a.account_id.as_str())
    }

    /// The account most callers want when they hold only one
    pub fn first_account_id(&self) -> Option<&str> {
        self.accounts.first().map(|a| a.account_id.as_str())
    }
}

// ============================================================================
// account.cash
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCashRequest {
    pub auth_token: String,
    pub account: String,
    pub portfolio: bool,
    pub historical: bool,
    pub fast_values: bool,
}

impl AccountCashRequest {
    pub fn new(auth_token: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            account: account.into(),
            portfolio: true,
            historical: true,
            fast_values: false,
        }
    }
}

impl ApiRequest for AccountCashRequest {
    const ACTION: &'static str = "account.cash";
    const PAGE: Page = Page::M;
    type Response = Reply<AccountCash>;
}

/// Balances and buying power. Values arrive as decimal strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountCash {
    #[serde(deserialize_with = "de::string")]
    pub account_value: String,
    #[serde(deserialize_with = "de::string")]
    pub account_value_daily_change: String,
    #[serde(deserialize_with = "de::string")]
    pub account_value_month_to_date: String,
    #[serde(deserialize_with = "de::string")]
    pub account_value_year_to_date: String,
    #[serde(deserialize_with = "de::string")]
    pub cash_balance: String,
    #[serde(deserialize_with = "de::string")]
    pub available_to_trade: String,
    #[serde(deserialize_with = "de::string")]
    pub available_to_withdraw: String,
    #[serde(deserialize_with = "de::string")]
    pub margin_equity: String,
    #[serde(deserialize_with = "de::string")]
    pub day_trading_buy_power: String,
    #[serde(deserialize_with = "de::string")]
    pub stock_buying_power: String,
    #[serde(deserialize_with = "de::string")]
    pub option_buying_power: String,
    #[serde(deserialize_with = "de::string")]
    pub pending_orders: String,
    #[serde(deserialize_with = "de::string")]
    pub portfolio_value: String,
}

impl AccountCash {
    pub fn account_value(&self) -> Fixed {
        Fixed::parse_or_zero(&self.account_value)
    }

    pub fn cash_balance(&self) -> Fixed {
        Fixed::parse_or_zero(&self.cash_balance)
    }

    pub fn available_to_trade(&self) -> Fixed {
        Fixed::parse_or_zero(&self.available_to_trade)
    }

    pub fn stock_buying_power(&self) -> Fixed {
        Fixed::parse_or_zero(&self.stock_buying_power)
    }

    pub fn option_buying_power(&self) -> Fixed {
        Fixed::parse_or_zero(&self.option_buying_power)
    }

    pub fn portfolio_value(&self) -> Fixed {
        Fixed::parse_or_zero(&self.portfolio_value)
    }
}

// ============================================================================
// account.activity
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AccountActivityRequest {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    pub account: String,
}

impl AccountActivityRequest {
    pub fn new(auth_token: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            account: account.into(),
        }
    }
}

impl ApiRequest for AccountActivityRequest {
    const ACTION: &'static str = "account.activity";
    const PAGE: Page = Page::M;
    type Response = Reply<AccountActivity>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityEvent {
    #[serde(rename = "activityDateStr", deserialize_with = "de::string")]
    pub activity_date: String,
    #[serde(deserialize_with = "de::string")]
    pub account_id: String,
    #[serde(deserialize_with = "de::string")]
    pub symbol: String,
    #[serde(deserialize_with = "de::string")]
    pub transaction: String,
    #[serde(deserialize_with = "de::string")]
    pub description: String,
    #[serde(rename = "qty", deserialize_with = "de::f64")]
    pub quantity: f64,
    #[serde(deserialize_with = "de::f64")]
    pub price: f64,
    #[serde(deserialize_with = "de::f64")]
    pub net_amount: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountActivity {
    #[serde(deserialize_with = "de::i64")]
    pub total: i64,
    #[serde(deserialize_with = "de::i64")]
    pub time_stamp: i64,
    #[serde(rename = "activity", deserialize_with = "de::nullable")]
    pub events: Vec<ActivityEvent>,
}

impl AccountActivity {
    pub fn timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.time_stamp.max(0) as u64)
    }
}
