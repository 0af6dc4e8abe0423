use std::collections::HashMap;
use std::sync::OnceLock;

use crate::workflows::contract::payments::{BillingType, PaymentMethod};

static METHOD_LABELS: OnceLock<HashMap<String, PaymentMethod>> = OnceLock::new();
static BILLING_LABELS: OnceLock<HashMap<String, BillingType>> = OnceLock::new();

pub(crate) fn method_for_label(label: &str) -> Option<PaymentMethod> {
    method_labels().get(&normalize_label(label)).copied()
}

pub(crate) fn billing_for_label(label: &str) -> Option<BillingType> {
    billing_labels().get(&normalize_label(label)).copied()
}

fn method_labels() -> &'static HashMap<String, PaymentMethod> {
    METHOD_LABELS.get_or_init(|| {
        const LABELS: &[(&str, PaymentMethod)] = &[
            ("credit_card", PaymentMethod::CreditCard),
            ("credit card", PaymentMethod::CreditCard),
            ("credit", PaymentMethod::CreditCard),
            ("cartao de credito", PaymentMethod::CreditCard),
            ("cartao credito", PaymentMethod::CreditCard),
            ("credito", PaymentMethod::CreditCard),
            ("debit_card", PaymentMethod::DebitCard),
            ("debit card", PaymentMethod::DebitCard),
            ("debit", PaymentMethod::DebitCard),
            ("cartao de debito", PaymentMethod::DebitCard),
            ("debito", PaymentMethod::DebitCard),
            ("pix", PaymentMethod::Pix),
            ("cash", PaymentMethod::Cash),
            ("dinheiro", PaymentMethod::Cash),
            ("especie", PaymentMethod::Cash),
            ("bank_slip", PaymentMethod::BankSlip),
            ("bank slip", PaymentMethod::BankSlip),
            ("boleto", PaymentMethod::BankSlip),
            ("boleto bancario", PaymentMethod::BankSlip),
        ];

        LABELS
            .iter()
            .map(|(label, method)| (normalize_label(label), *method))
            .collect()
    })
}

fn billing_labels() -> &'static HashMap<String, BillingType> {
    BILLING_LABELS.get_or_init(|| {
        const LABELS: &[(&str, BillingType)] = &[
            ("upfront", BillingType::Upfront),
            ("a vista", BillingType::Upfront),
            ("avista", BillingType::Upfront),
            ("single", BillingType::Upfront),
            ("installment", BillingType::Installment),
            ("installments", BillingType::Installment),
            ("parcelado", BillingType::Installment),
            ("parcela", BillingType::Installment),
            ("recorrente", BillingType::Installment),
        ];

        LABELS
            .iter()
            .map(|(label, billing)| (normalize_label(label), *billing))
            .collect()
    })
}

/// Lowercases, folds Portuguese accents and collapses whitespace.
fn normalize_label(value: &str) -> String {
    let folded: String = value
        .replace(['\u{feff}', '\u{200b}'], "")
        .chars()
        .map(|ch| match ch {
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' | 'Ç' => 'c',
            other => other,
        })
        .collect();

    folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}
