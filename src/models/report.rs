use serde::{Deserialize, Serialize};

pub const COL_SOURCE: &str = "Fonte";
pub const COL_REPORT_DATE: &str = "Data da notícia";
pub const COL_FRAUD_TYPE: &str = "Tipo do golpe";
pub const COL_DESCRIPTION: &str = "Descrição breve do golpe";
pub const COL_CHANNEL: &str = "Canal utilizado";
pub const COL_TARGET_AUDIENCE: &str = "Público alvo";
pub const COL_IMPACT_ESTIMATE: &str = "Estimativa de impacto ou prejuízo";

/// Column order of the persisted report table.
pub const REPORT_COLUMNS: [&str; 7] = [
    COL_SOURCE,
    COL_REPORT_DATE,
    COL_FRAUD_TYPE,
    COL_DESCRIPTION,
    COL_CHANNEL,
    COL_TARGET_AUDIENCE,
    COL_IMPACT_ESTIMATE,
];

/// A single reported financial-fraud incident.
///
/// Serialized with the Portuguese column names so the JSON the generation
/// capability is asked for and the persisted table share one vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudReport {
    #[serde(rename = "Fonte")]
    pub source: String,
    /// Kept as supplied; parsed lazily by the aggregator.
    #[serde(rename = "Data da notícia")]
    pub report_date: String,
    #[serde(rename = "Tipo do golpe")]
    pub fraud_type: String,
    #[serde(rename = "Descrição breve do golpe")]
    pub description: String,
    #[serde(rename = "Canal utilizado")]
    pub channel: String,
    #[serde(rename = "Público alvo")]
    pub target_audience: String,
    #[serde(rename = "Estimativa de impacto ou prejuízo")]
    pub impact_estimate: String,
}

impl FraudReport {
    /// De-duplication key: (source, report date).
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.source, &self.report_date)
    }
}
