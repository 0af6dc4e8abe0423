use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct LedgerRow {
    #[serde(
        rename = "Method",
        alias = "method",
        alias = "Forma de Pagamento",
        alias = "Forma"
    )]
    pub(crate) method: String,
    #[serde(rename = "Billing", alias = "billing", alias = "Tipo", alias = "Modalidade")]
    pub(crate) billing: String,
    #[serde(
        rename = "Amount",
        alias = "amount",
        alias = "Valor",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) amount: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<LedgerRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<LedgerRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
