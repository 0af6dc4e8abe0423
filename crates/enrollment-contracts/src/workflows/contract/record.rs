use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bonus::BonusSelection;
use super::payments::RawPaymentEntry;

/// Identifier wrapper for stored enrollments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrollmentId(pub String);

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Complete enrollment snapshot handed to the assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    #[serde(default)]
    pub enrollment_id: EnrollmentId,
    pub student: Student,
    pub program: TrainingProgram,
    #[serde(default)]
    pub contractor: Contractor,
    #[serde(default)]
    pub payments: Vec<RawPaymentEntry>,
    #[serde(default)]
    pub bonus: BonusSelection,
    #[serde(default)]
    pub witnesses: Witnesses,
    /// Free-form legal clause markup.
    #[serde(default)]
    pub clauses: String,
    #[serde(default)]
    pub signatures: SignatureImages,
    #[serde(default)]
    pub fields: VariableFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingProgram {
    pub name: String,
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub workload_hours: Option<u32>,
    #[serde(default)]
    pub immersion_event: Option<TrainingEvent>,
}

/// Event attached to a program (e.g. the in-person immersion weekend).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingEvent {
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

/// The party issuing the contract. Left blank on the printout when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contractor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub document: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witnesses {
    #[serde(default)]
    pub first: Option<Witness>,
    #[serde(default)]
    pub second: Option<Witness>,
}

impl Witnesses {
    pub fn pair(&self) -> [Option<&Witness>; 2] {
        [self.first.as_ref(), self.second.as_ref()]
    }
}

/// Opaque reference to an already-captured signature image (URI or storage key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef(pub String);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureImages {
    #[serde(default)]
    pub student: Option<ImageRef>,
    #[serde(default)]
    pub contractor: Option<ImageRef>,
    #[serde(default)]
    pub first_witness: Option<ImageRef>,
    #[serde(default)]
    pub second_witness: Option<ImageRef>,
}

/// Variable contract fields. Known keys are typed; anything else lands in `extra` so
/// newer upstream keys survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableFields {
    #[serde(default)]
    pub boleto_due_date: Option<String>,
    #[serde(default)]
    pub contract_city: Option<String>,
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl VariableFields {
    /// Text value of a residual key; numbers and booleans are stringified, blanks skipped.
    pub fn extra_text(&self, key: &str) -> Option<String> {
        let text = match self.extra.get(key)? {
            serde_json::Value::String(value) => value.trim().to_string(),
            serde_json::Value::Number(number) => number.to_string(),
            serde_json::Value::Bool(flag) => flag.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}
