mod aggregator;
pub mod ledger;

pub use aggregator::{PaymentAggregator, PaymentGroup, PaymentSummary};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[serde(alias = "credit")]
    CreditCard,
    #[serde(alias = "debit")]
    DebitCard,
    Pix,
    Cash,
    #[serde(alias = "boleto")]
    BankSlip,
}

impl PaymentMethod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit card",
            Self::DebitCard => "Debit card",
            Self::Pix => "Pix",
            Self::Cash => "Cash",
            Self::BankSlip => "Bank slip (boleto)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingType {
    Upfront,
    Installment,
}

impl BillingType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upfront => "Upfront",
            Self::Installment => "Installments",
        }
    }
}

/// Amount exactly as it arrived from the upstream record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl Default for RawAmount {
    fn default() -> Self {
        Self::Other(serde_json::Value::Null)
    }
}

impl RawAmount {
    pub fn parse(&self) -> Option<Decimal> {
        match self {
            RawAmount::Number(number) => Decimal::from_str(&number.to_string())
                .or_else(|_| Decimal::from_scientific(&number.to_string()))
                .ok(),
            RawAmount::Text(text) => parse_amount_text(text),
            RawAmount::Other(_) => None,
        }
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        RawAmount::Text(value.to_string())
    }
}

/// Payment line as captured on the enrollment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPaymentEntry {
    pub method: PaymentMethod,
    pub billing: BillingType,
    #[serde(default)]
    pub amount: RawAmount,
}

/// Normalized payment line with a numeric amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub method: PaymentMethod,
    pub billing: BillingType,
    pub amount: Decimal,
}

impl PaymentEntry {
    pub fn new(method: PaymentMethod, billing: BillingType, amount: Decimal) -> Self {
        Self {
            method,
            billing,
            amount,
        }
    }

    /// `None` when the raw amount is not a number.
    pub fn from_raw(raw: &RawPaymentEntry) -> Option<Self> {
        raw.amount
            .parse()
            .map(|amount| Self::new(raw.method, raw.billing, amount))
    }
}

/// Accepts `1234.56`, `1234,56`, `1.234,56` and an optional `R$` prefix.
pub(crate) fn parse_amount_text(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("R$")
        .map(str::trim_start)
        .unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }

    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized).ok()
}
