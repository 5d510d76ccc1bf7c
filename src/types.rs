//! Core types for the wingpay client

use crate::error::{Result, WingPayError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Currency every transaction is denominated in
pub const CURRENCY_CODE: &str = "USD";

/// Payment channel selecting which payment options are mandatory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentCode {
    /// ABA bank transfer
    #[serde(rename = "ABA")]
    Aba,
    /// Account direct debit; requires account and accountType
    #[serde(rename = "ACD")]
    Acd,
    /// PayGo terminal; requires paygoId
    #[serde(rename = "PNG")]
    Png,
    /// Wing e-wallet
    #[serde(rename = "WIG")]
    Wig,
    /// Wing e-wallet over VPN; requires wingAccount and wingSecurityCode
    #[serde(rename = "WIG_VPN")]
    WigVpn,
}

impl PaymentCode {
    /// Gateway identifier string for this channel
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentCode::Aba => "ABA",
            PaymentCode::Acd => "ACD",
            PaymentCode::Png => "PNG",
            PaymentCode::Wig => "WIG",
            PaymentCode::WigVpn => "WIG_VPN",
        }
    }

    /// All channel identifiers accepted by the gateway
    pub const ALL: &'static [&'static str] = &["ABA", "ACD", "PNG", "WIG", "WIG_VPN"];
}

/// Channel-dependent payment options.
///
/// Which subfields are mandatory depends on the selected
/// [`PaymentCode`]; the create ruleset enforces the combinations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(rename = "accountType", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(rename = "paygoId", skip_serializing_if = "Option::is_none")]
    pub paygo_id: Option<String>,
    #[serde(rename = "wingAccount", skip_serializing_if = "Option::is_none")]
    pub wing_account: Option<String>,
    #[serde(rename = "wingSecurityCode", skip_serializing_if = "Option::is_none")]
    pub wing_security_code: Option<String>,
}

/// A single order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionItem {
    pub name: String,
    pub qty: u32,
    pub unit_price: String,
}

/// Caller-supplied inputs for creating a transaction.
///
/// Serialized field names match the gateway's validation vocabulary
/// (`UID`, `totalAmount`, ...) so rule messages reference the paths a
/// caller actually wrote.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTransactionOptions {
    #[serde(rename = "UID")]
    pub uid: String,
    #[serde(rename = "totalAmount")]
    pub total_amount: String,
    #[serde(rename = "totalQuantity")]
    pub total_quantity: u32,
    #[serde(rename = "paymentCode")]
    pub payment_code: PaymentCode,
    #[serde(rename = "paymentOptions")]
    pub payment_options: PaymentOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<String>,
    #[serde(rename = "deviceUDID", skip_serializing_if = "Option::is_none")]
    pub device_udid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<TransactionItem>>,
}

impl CreateTransactionOptions {
    /// Minimal options for one order on a payment channel
    pub fn new(
        uid: impl Into<String>,
        total_amount: impl Into<String>,
        total_quantity: u32,
        payment_code: PaymentCode,
        payment_options: PaymentOptions,
    ) -> Self {
        Self {
            uid: uid.into(),
            total_amount: total_amount.into(),
            total_quantity,
            payment_code,
            payment_options,
            description: None,
            ip: None,
            lat: None,
            lng: None,
            device_udid: None,
            items: None,
        }
    }
}

/// Caller-supplied inputs for completing (committing) a transaction
#[derive(Debug, Clone, Serialize)]
pub struct CompleteTransactionOptions {
    #[serde(rename = "UID")]
    pub uid: String,
    #[serde(rename = "totalAmount")]
    pub total_amount: String,
    #[serde(rename = "totalQuantity")]
    pub total_quantity: u32,
    pub txid: String,
    #[serde(rename = "securityCode")]
    pub security_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

/// Placeholder customer attributes substituted when the caller omits
/// them from [`CreateTransactionOptions`]
#[derive(Debug, Clone)]
pub struct CustomerDefaults {
    pub ip: String,
    pub latitude: String,
    pub longitude: String,
    pub device_udid: String,
}

impl Default for CustomerDefaults {
    fn default() -> Self {
        Self {
            ip: "Unknown IP".to_string(),
            latitude: "Unknown Latitude".to_string(),
            longitude: "Unknown Longitude".to_string(),
            device_udid: "Unknown Device UDID".to_string(),
        }
    }
}

/// Quantity assigned to the synthesized item when the caller supplies
/// no item list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemQtyStrategy {
    /// The single default item covers the whole order quantity
    #[default]
    TotalQuantity,
    /// The single default item is one unit
    SingleUnit,
}

impl ItemQtyStrategy {
    pub(crate) fn default_qty(&self, total_quantity: u32) -> u32 {
        match self {
            ItemQtyStrategy::TotalQuantity => total_quantity,
            ItemQtyStrategy::SingleUnit => 1,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the gateway API
    pub api_url: String,
    /// Client identifier used for token exchange and signing
    pub client_id: String,
    /// Shared client secret
    pub client_secret: String,
    /// Placeholders for omitted customer attributes
    pub defaults: CustomerDefaults,
    /// Default-item quantity strategy
    pub item_qty_strategy: ItemQtyStrategy,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(
        api_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            defaults: CustomerDefaults::default(),
            item_qty_strategy: ItemQtyStrategy::default(),
            timeout: None,
        }
    }

    /// Replace the customer placeholders
    pub fn with_defaults(mut self, defaults: CustomerDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set the default-item quantity strategy
    pub fn with_item_qty_strategy(mut self, strategy: ItemQtyStrategy) -> Self {
        self.item_qty_strategy = strategy;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration before any network use
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            return Err(WingPayError::config("apiURL cannot be empty"));
        }
        let parsed = Url::parse(&self.api_url)
            .map_err(|e| WingPayError::config(format!("apiURL is not a valid URL: {}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(WingPayError::config(
                "apiURL must start with http:// or https://",
            ));
        }
        if self.client_id.is_empty() {
            return Err(WingPayError::config("clientId cannot be empty"));
        }
        if self.client_secret.is_empty() {
            return Err(WingPayError::config("clientSecret cannot be empty"));
        }
        Ok(())
    }
}

/// Token endpoint request body
#[derive(Debug, Serialize)]
pub(crate) struct AccessTokenRequest<'a> {
    pub client_id: &'a str,
    pub permission: &'a str,
}

/// Token endpoint response; extra fields are ignored
#[derive(Debug, Deserialize)]
pub struct AccessTokenResponse {
    #[serde(default)]
    pub access_token: String,
}

/// Customer block of the create request body
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CustomerBody {
    pub ip: String,
    pub latitude: String,
    pub longitude: String,
    pub udid: String,
}

/// Channel options block of the create request body
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct PaymentOptionsBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wing_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wing_security_code: Option<String>,
}

impl From<PaymentOptions> for PaymentOptionsBody {
    fn from(options: PaymentOptions) -> Self {
        Self {
            account: options.account,
            account_type: options.account_type,
            point_id: options.paygo_id,
            wing_account: options.wing_account,
            wing_security_code: options.wing_security_code,
        }
    }
}

/// Create transaction request body
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateTransactionRequest {
    pub order_id: String,
    pub total_amt: String,
    pub total_qty: u32,
    pub currency_code: &'static str,
    pub payment_code: &'static str,
    pub description: String,
    pub signature: String,
    pub payment_options: PaymentOptionsBody,
    pub customer: CustomerBody,
    pub items: Vec<TransactionItem>,
}

/// Commit request body
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CompleteTransactionRequest {
    pub txid: String,
    pub signature: String,
    pub security_code: String,
    pub ip: String,
}

/// Transaction record returned by create
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    pub txid: String,
    pub state: String,
    #[serde(default)]
    pub expires_in_sec: Option<u64>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub total_qty: Option<u32>,
    #[serde(default)]
    pub total_amt: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub payment_transaction_id: Option<String>,
    #[serde(default)]
    pub payment_code: Option<String>,
    #[serde(default)]
    pub instructions: Option<Value>,
    #[serde(default)]
    pub payment_options: Option<Value>,
    #[serde(default)]
    pub customer: Option<Value>,
    #[serde(default)]
    pub items: Option<Value>,
}

/// Response returned by complete
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteTransactionResponse {
    pub uid: String,
    pub state: String,
}
