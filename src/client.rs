//! Transaction client orchestrating authenticate, validate, sign, and
//! submit

use crate::auth::Authenticator;
use crate::crypto;
use crate::error::{self, Result, WingPayError};
use crate::types::*;
use crate::validator::{is_money, Rule, RuleSet, ValueKind};
use reqwest::Client;
use tracing::info;

/// Create transaction endpoint path
pub const TRANSACTIONS_PATH: &str = "/v1/payments/transactions";

/// Commit transaction endpoint path
pub const TRANSACTIONS_COMMIT_PATH: &str = "/v1/payments/transactions/commit";

/// Client for the gateway's transaction API.
///
/// Each operation runs authenticate → validate → sign → build → submit
/// as an independent unit of work; the only state carried between
/// calls is the configuration and the most recently acquired token.
#[derive(Debug)]
pub struct WingPayClient {
    config: ClientConfig,
    client: Client,
    authenticator: Authenticator,
    access_token: Option<String>,
    create_rules: RuleSet,
    complete_rules: RuleSet,
}

impl WingPayClient {
    /// Create a new client.
    ///
    /// Fails with a configuration error before any network use when
    /// the api URL or either credential is missing.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| WingPayError::config(format!("Failed to create HTTP client: {}", e)))?;

        let authenticator = Authenticator::new(config.api_url.clone(), client.clone());

        Ok(Self {
            authenticator,
            client,
            access_token: None,
            create_rules: create_ruleset(),
            complete_rules: complete_ruleset(),
            config,
        })
    }

    /// Most recently acquired bearer token, if any
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a transaction.
    ///
    /// Defaults are substituted for omitted description, customer
    /// attributes, and items before the order is signed, so the
    /// signature always covers the values actually submitted.
    pub async fn create_transaction(
        &mut self,
        options: CreateTransactionOptions,
    ) -> Result<TransactionRecord> {
        let token = self.refresh_token().await?;

        let payload = serde_json::to_value(&options)?;
        self.create_rules.validate(&payload)?;

        let request = self.build_create_request(options);
        info!(order_id = %request.order_id, "submitting transaction");

        let response = self
            .client
            .post(format!("{}{}", self.config.api_url, TRANSACTIONS_PATH))
            .header("X-Auth", format!("Bearer {}", token))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error::error_from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// Complete (commit) a previously created transaction.
    pub async fn complete_transaction(
        &mut self,
        options: CompleteTransactionOptions,
    ) -> Result<CompleteTransactionResponse> {
        let token = self.refresh_token().await?;

        let payload = serde_json::to_value(&options)?;
        self.complete_rules.validate(&payload)?;

        let request = self.build_complete_request(options);
        info!(txid = %request.txid, "committing transaction");

        let response = self
            .client
            .post(format!(
                "{}{}",
                self.config.api_url, TRANSACTIONS_COMMIT_PATH
            ))
            .header("X-Auth", format!("Bearer {}", token))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error::error_from_response(response).await);
        }

        Ok(response.json().await?)
    }

    // No token expiry is modeled, so every operation re-authenticates
    // rather than trusting whatever a previous call cached.
    async fn refresh_token(&mut self) -> Result<String> {
        let token = self
            .authenticator
            .authenticate(&self.config.client_id, &self.config.client_secret)
            .await?;
        self.access_token = Some(token.clone());
        Ok(token)
    }

    fn build_create_request(&self, options: CreateTransactionOptions) -> CreateTransactionRequest {
        let description = options
            .description
            .unwrap_or_else(|| format!("Order #{}.", options.uid));
        let ip = options.ip.unwrap_or_else(|| self.config.defaults.ip.clone());
        let latitude = options
            .lat
            .unwrap_or_else(|| self.config.defaults.latitude.clone());
        let longitude = options
            .lng
            .unwrap_or_else(|| self.config.defaults.longitude.clone());
        let udid = options
            .device_udid
            .unwrap_or_else(|| self.config.defaults.device_udid.clone());

        let items = options.items.unwrap_or_else(|| {
            vec![TransactionItem {
                name: description.clone(),
                qty: self
                    .config
                    .item_qty_strategy
                    .default_qty(options.total_quantity),
                unit_price: options.total_amount.clone(),
            }]
        });

        let signature = crypto::transaction_signature(
            &options.uid,
            &options.total_amount,
            options.total_quantity,
            &ip,
            &self.config.client_id,
            &self.config.client_secret,
        );

        CreateTransactionRequest {
            order_id: options.uid,
            total_amt: options.total_amount,
            total_qty: options.total_quantity,
            currency_code: CURRENCY_CODE,
            payment_code: options.payment_code.as_str(),
            description,
            signature,
            payment_options: options.payment_options.into(),
            customer: CustomerBody {
                ip,
                latitude,
                longitude,
                udid,
            },
            items,
        }
    }

    fn build_complete_request(
        &self,
        options: CompleteTransactionOptions,
    ) -> CompleteTransactionRequest {
        let ip = options.ip.unwrap_or_else(|| self.config.defaults.ip.clone());

        let signature = crypto::transaction_signature(
            &options.uid,
            &options.total_amount,
            options.total_quantity,
            &ip,
            &self.config.client_id,
            &self.config.client_secret,
        );

        CompleteTransactionRequest {
            txid: options.txid,
            signature,
            security_code: options.security_code,
            ip,
        }
    }
}

/// Ruleset for [`WingPayClient::create_transaction`] payloads,
/// evaluated in declaration order.
fn create_ruleset() -> RuleSet {
    RuleSet::new()
        .field("UID", vec![Rule::Required, Rule::TypeOf(ValueKind::String)])
        .field("totalAmount", vec![Rule::Required, is_money()])
        .field(
            "totalQuantity",
            vec![Rule::Required, Rule::TypeOf(ValueKind::Integer)],
        )
        .field(
            "paymentCode",
            vec![Rule::Required, Rule::OneOf(PaymentCode::ALL)],
        )
        .field(
            "paymentOptions",
            vec![Rule::Required, Rule::TypeOf(ValueKind::Object)],
        )
        .field(
            "paymentOptions.account",
            vec![Rule::RequiredWhen {
                field: "paymentCode",
                value: "ACD",
            }],
        )
        .field(
            "paymentOptions.accountType",
            vec![Rule::RequiredWhen {
                field: "paymentCode",
                value: "ACD",
            }],
        )
        .field(
            "paymentOptions.paygoId",
            vec![Rule::RequiredWhen {
                field: "paymentCode",
                value: "PNG",
            }],
        )
        .field(
            "paymentOptions.wingAccount",
            vec![
                Rule::RequiredWhen {
                    field: "paymentCode",
                    value: "WIG_VPN",
                },
                Rule::TypeOf(ValueKind::String),
            ],
        )
        .field(
            "paymentOptions.wingSecurityCode",
            vec![
                Rule::RequiredWhen {
                    field: "paymentCode",
                    value: "WIG_VPN",
                },
                Rule::TypeOf(ValueKind::String),
            ],
        )
}

/// Ruleset for [`WingPayClient::complete_transaction`] payloads.
fn complete_ruleset() -> RuleSet {
    RuleSet::new()
        .field("UID", vec![Rule::Required])
        .field("totalAmount", vec![Rule::Required, is_money()])
        .field(
            "totalQuantity",
            vec![Rule::Required, Rule::TypeOf(ValueKind::Integer)],
        )
        .field("txid", vec![Rule::Required])
        .field("securityCode", vec![Rule::Required])
}
