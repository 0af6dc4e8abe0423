//! Ordered, named lookup chains for values that upstream systems store under several
//! aliases. Strategies run in declaration order and the first non-blank hit wins.

use super::record::VariableFields;

/// One named way of locating a value in a context `C`.
pub struct LookupStrategy<C: ?Sized> {
    pub name: &'static str,
    resolve: fn(&C) -> Option<String>,
}

impl<C: ?Sized> LookupStrategy<C> {
    pub const fn new(name: &'static str, resolve: fn(&C) -> Option<String>) -> Self {
        Self { name, resolve }
    }

    pub fn apply(&self, context: &C) -> Option<String> {
        (self.resolve)(context)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Value found by a lookup chain, tagged with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub strategy: &'static str,
}

pub struct FieldLookup<C: ?Sized + 'static> {
    pub field: &'static str,
    strategies: &'static [LookupStrategy<C>],
}

impl<C: ?Sized + 'static> FieldLookup<C> {
    pub const fn new(field: &'static str, strategies: &'static [LookupStrategy<C>]) -> Self {
        Self { field, strategies }
    }

    pub fn strategies(&self) -> &[LookupStrategy<C>] {
        self.strategies
    }

    pub fn resolve(&self, context: &C) -> Option<Resolved> {
        self.strategies.iter().find_map(|strategy| {
            strategy.apply(context).map(|value| Resolved {
                value,
                strategy: strategy.name,
            })
        })
    }
}

static BANK_SLIP_DUE_DATE_STRATEGIES: [LookupStrategy<VariableFields>; 6] = [
    LookupStrategy::new("fields.boleto_due_date", |fields| {
        fields.boleto_due_date.clone()
    }),
    LookupStrategy::new("extra.bank_slip_due_date", |fields| {
        fields.extra_text("bank_slip_due_date")
    }),
    LookupStrategy::new("extra.vencimento_boleto", |fields| {
        fields.extra_text("vencimento_boleto")
    }),
    LookupStrategy::new("extra.data_vencimento", |fields| {
        fields.extra_text("data_vencimento")
    }),
    LookupStrategy::new("extra.first_due_date", |fields| {
        fields.extra_text("first_due_date")
    }),
    LookupStrategy::new("extra.due_date", |fields| fields.extra_text("due_date")),
];

/// First due date of the bank-slip (boleto) plan.
pub static BANK_SLIP_DUE_DATE: FieldLookup<VariableFields> =
    FieldLookup::new("bank_slip_due_date", &BANK_SLIP_DUE_DATE_STRATEGIES);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> VariableFields {
        serde_json::from_value(value).expect("fields parse")
    }

    #[test]
    fn typed_field_wins_over_aliases() {
        let resolved = BANK_SLIP_DUE_DATE
            .resolve(&fields(json!({
                "boleto_due_date": "05/03/2026",
                "due_date": "01/01/2030",
            })))
            .expect("due date found");

        assert_eq!(resolved.value, "05/03/2026");
        assert_eq!(resolved.strategy, "fields.boleto_due_date");
    }

    #[test]
    fn blank_values_fall_through_to_the_next_alias() {
        let resolved = BANK_SLIP_DUE_DATE
            .resolve(&fields(json!({
                "boleto_due_date": "  ",
                "vencimento_boleto": "",
                "data_vencimento": "10/04/2026",
            })))
            .expect("due date found");

        assert_eq!(resolved.value, "10/04/2026");
        assert_eq!(resolved.strategy, "extra.data_vencimento");
    }

    #[test]
    fn each_strategy_is_checked_independently() {
        let only_due_date = fields(json!({ "due_date": "20/05/2026" }));
        let hits: Vec<&str> = BANK_SLIP_DUE_DATE
            .strategies()
            .iter()
            .filter(|strategy| strategy.apply(&only_due_date).is_some())
            .map(|strategy| strategy.name)
            .collect();

        assert_eq!(hits, vec!["extra.due_date"]);
    }

    #[test]
    fn missing_everywhere_resolves_to_none() {
        assert!(BANK_SLIP_DUE_DATE.resolve(&VariableFields::default()).is_none());
    }
}
