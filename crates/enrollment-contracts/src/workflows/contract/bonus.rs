use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::lookup::{FieldLookup, LookupStrategy};

const BLANK: &str = "____";
const DEFAULT_EXTENDED_ACCESS_MONTHS: u32 = 12;

/// Bonus codes ticked on the enrollment plus the free fields some bonuses need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusSelection {
    #[serde(default)]
    pub selected_codes: BTreeSet<String>,
    #[serde(default)]
    pub supplemental: BonusSupplement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusSupplement {
    #[serde(default)]
    pub immersion_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub enrollment_count: Option<u32>,
    #[serde(default)]
    pub other_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub extended_access_months: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Bonuses the contract template knows how to print, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownBonus {
    ExtendedAccess,
    Immersion,
    Other,
}

impl KnownBonus {
    pub const fn ordered() -> [Self; 3] {
        [Self::ExtendedAccess, Self::Immersion, Self::Other]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::ExtendedAccess => "extended_access",
            Self::Immersion => "immersion",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ExtendedAccess => "Extended platform access",
            Self::Immersion => "Immersion event",
            Self::Other => "Other bonus",
        }
    }

    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::ExtendedAccess => &["extended_access", "acesso_estendido"],
            Self::Immersion => &["immersion", "imersao"],
            Self::Other => &["other", "outro", "outros"],
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Self::ordered()
            .into_iter()
            .find(|bonus| bonus.aliases().contains(&code.as_str()))
    }
}

/// One checkbox line of the bonus section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusDisplay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<KnownBonus>,
    pub label: String,
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_text: Option<String>,
}

pub(crate) struct ImmersionDateSources {
    explicit: Option<String>,
    extra: Option<String>,
    event_start: Option<NaiveDate>,
}

static IMMERSION_DATE_STRATEGIES: [LookupStrategy<ImmersionDateSources>; 3] = [
    LookupStrategy::new("supplemental.immersion_date", |sources| {
        sources.explicit.clone()
    }),
    LookupStrategy::new("supplemental.data_imersao", |sources| sources.extra.clone()),
    LookupStrategy::new("program.immersion_event.start_date", |sources| {
        sources
            .event_start
            .map(|date| date.format("%d/%m/%Y").to_string())
    }),
];

pub(crate) static IMMERSION_DATE: FieldLookup<ImmersionDateSources> =
    FieldLookup::new("immersion_date", &IMMERSION_DATE_STRATEGIES);

/// Stateless mapping from a bonus selection to its printable checklist.
#[derive(Debug, Default, Clone, Copy)]
pub struct BonusResolver;

impl BonusResolver {
    /// `related_event_start` is the start date of the program's immersion event, used
    /// when the selection carries no explicit date.
    pub fn resolve(
        &self,
        selection: &BonusSelection,
        related_event_start: Option<NaiveDate>,
    ) -> Vec<BonusDisplay> {
        // Unrecognized codes drop out here.
        let selected: Vec<KnownBonus> = selection
            .selected_codes
            .iter()
            .filter_map(|code| KnownBonus::from_code(code))
            .collect();

        let mut entries = Vec::with_capacity(KnownBonus::ordered().len() + 1);
        entries.push(BonusDisplay {
            bonus: None,
            label: "Not applicable".to_string(),
            checked: selection.selected_codes.is_empty(),
            detail_text: None,
        });

        for bonus in KnownBonus::ordered() {
            let checked = selected.contains(&bonus);
            let detail_text = checked
                .then(|| detail_for(bonus, &selection.supplemental, related_event_start));
            entries.push(BonusDisplay {
                bonus: Some(bonus),
                label: bonus.label().to_string(),
                checked,
                detail_text,
            });
        }

        entries
    }
}

fn detail_for(
    bonus: KnownBonus,
    supplemental: &BonusSupplement,
    related_event_start: Option<NaiveDate>,
) -> String {
    match bonus {
        KnownBonus::ExtendedAccess => {
            let months = supplemental
                .extended_access_months
                .unwrap_or(DEFAULT_EXTENDED_ACCESS_MONTHS);
            format!("{months} additional months of access")
        }
        KnownBonus::Immersion => {
            let sources = ImmersionDateSources {
                explicit: supplemental.immersion_date.clone(),
                extra: supplemental
                    .extra
                    .get("data_imersao")
                    .and_then(|value| value.as_str())
                    .map(str::to_string),
                event_start: related_event_start,
            };
            let date = IMMERSION_DATE
                .resolve(&sources)
                .map(|resolved| resolved.value)
                .unwrap_or_else(|| BLANK.to_string());
            let count = supplemental
                .enrollment_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| BLANK.to_string());
            format!("{count} enrollment(s) for the immersion on {date}")
        }
        KnownBonus::Other => supplemental
            .other_description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(BLANK)
            .to_string(),
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => {
            number.as_u64().and_then(|count| u32::try_from(count).ok())
        }
        Some(serde_json::Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}
