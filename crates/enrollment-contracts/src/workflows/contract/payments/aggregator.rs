use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BillingType, PaymentEntry, PaymentMethod, RawPaymentEntry};

/// Totals for every entry sharing one (method, billing) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentGroup {
    pub method: PaymentMethod,
    pub method_label: String,
    pub billing: BillingType,
    pub billing_label: String,
    pub total_amount: Decimal,
    pub installment_count: u32,
    /// Only present for installment plans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_installment_amount: Option<Decimal>,
}

impl PaymentGroup {
    fn open(method: PaymentMethod, billing: BillingType) -> Self {
        Self {
            method,
            method_label: method.label().to_string(),
            billing,
            billing_label: billing.label().to_string(),
            total_amount: Decimal::ZERO,
            installment_count: 0,
            per_installment_amount: None,
        }
    }

    pub fn describe(&self) -> String {
        match (self.billing, self.per_installment_amount) {
            (BillingType::Installment, Some(each)) => format!(
                "{} - {} x {:.2} (total {:.2})",
                self.method_label,
                self.installment_count,
                each,
                self.total_amount
            ),
            _ => format!(
                "{} - {} {:.2}",
                self.method_label,
                self.billing_label.to_lowercase(),
                self.total_amount
            ),
        }
    }
}

/// Grouped payment plan plus the grand total printed on the cover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub groups: Vec<PaymentGroup>,
    pub grand_total: Decimal,
    pub skipped_entries: usize,
}

/// Stateless grouping of payment lines by (method, billing).
#[derive(Debug, Default, Clone, Copy)]
pub struct PaymentAggregator;

impl PaymentAggregator {
    /// Groups in first-seen order of their key; non-positive amounts are excluded.
    pub fn aggregate(&self, entries: &[PaymentEntry]) -> Vec<PaymentGroup> {
        self.group(entries).0
    }

    /// Normalizes raw record entries, dropping non-numeric amounts, then groups them.
    pub fn summarize(&self, raw_entries: &[RawPaymentEntry]) -> PaymentSummary {
        let entries: Vec<PaymentEntry> = raw_entries
            .iter()
            .filter_map(|raw| {
                let parsed = PaymentEntry::from_raw(raw);
                if parsed.is_none() {
                    debug!(method = ?raw.method, amount = ?raw.amount, "skipping non-numeric payment entry");
                }
                parsed
            })
            .collect();

        let (groups, grand_total) = self.group(&entries);
        let counted: usize = groups
            .iter()
            .map(|group| group.installment_count as usize)
            .sum();

        PaymentSummary {
            groups,
            grand_total,
            skipped_entries: raw_entries.len() - counted,
        }
    }

    /// Groups plus the running grand total. An entry is only accepted when both its
    /// group total and the grand total can absorb it without overflowing.
    fn group(&self, entries: &[PaymentEntry]) -> (Vec<PaymentGroup>, Decimal) {
        let mut index: HashMap<(PaymentMethod, BillingType), usize> = HashMap::new();
        let mut groups: Vec<PaymentGroup> = Vec::new();
        let mut grand_total = Decimal::ZERO;

        for entry in entries {
            if entry.amount <= Decimal::ZERO {
                debug!(method = ?entry.method, amount = %entry.amount, "skipping non-positive payment entry");
                continue;
            }

            let current = index
                .get(&(entry.method, entry.billing))
                .map_or(Decimal::ZERO, |slot| groups[*slot].total_amount);
            let (Some(group_total), Some(next_grand_total)) = (
                current.checked_add(entry.amount),
                grand_total.checked_add(entry.amount),
            ) else {
                debug!(method = ?entry.method, amount = %entry.amount, "skipping payment entry that overflows the total");
                continue;
            };

            let slot = *index.entry((entry.method, entry.billing)).or_insert_with(|| {
                groups.push(PaymentGroup::open(entry.method, entry.billing));
                groups.len() - 1
            });

            let group = &mut groups[slot];
            group.total_amount = group_total;
            group.installment_count += 1;
            grand_total = next_grand_total;
        }

        for group in &mut groups {
            if group.billing == BillingType::Installment {
                group.per_installment_amount =
                    Some(group.total_amount / Decimal::from(group.installment_count));
            }
        }

        (groups, grand_total)
    }
}
