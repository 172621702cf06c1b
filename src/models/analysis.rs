use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Categories the aggregator produces. The keys are the ones the persisted
/// analysis table has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    TotalFraudCount,
    CountsByFraudType,
    CountsByChannel,
    CountsByAudience,
    CountsBySource,
    CountsByMonth,
}

impl Category {
    pub const GROUPED: [Category; 5] = [
        Category::CountsByFraudType,
        Category::CountsByChannel,
        Category::CountsByAudience,
        Category::CountsBySource,
        Category::CountsByMonth,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::TotalFraudCount => "total_golpes",
            Self::CountsByFraudType => "golpes_por_tipo",
            Self::CountsByChannel => "golpes_por_canal",
            Self::CountsByAudience => "golpes_por_publico",
            Self::CountsBySource => "golpes_por_fonte",
            Self::CountsByMonth => "tendencias_mensais",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TotalFraudCount => "Total de golpes registrados",
            Self::CountsByFraudType => "Tipos de golpes",
            Self::CountsByChannel => "Canais utilizados",
            Self::CountsByAudience => "Público alvo",
            Self::CountsBySource => "Fontes",
            Self::CountsByMonth => "Tendência mensal",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A single analysis entry: either a scalar count or counts per subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisValue {
    Scalar(u64),
    Grouped(BTreeMap<String, u64>),
}

/// One row of the flattened analysis table (`Categoria`, `Subcategoria`, `Valor`).
/// Scalar entries carry an empty subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRow {
    #[serde(rename = "Categoria")]
    pub category: String,
    #[serde(rename = "Subcategoria")]
    pub subcategory: String,
    #[serde(rename = "Valor")]
    pub value: u64,
}

/// Frequency and trend summary over every stored fraud report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedAnalysis {
    entries: BTreeMap<String, AnalysisValue>,
}

impl AggregatedAnalysis {
    /// Analysis of an empty report table: zero total, every grouping empty.
    pub fn empty() -> Self {
        let mut analysis = Self::skeleton();
        analysis.set_scalar(Category::TotalFraudCount, 0);
        analysis
    }

    /// Every grouped category present and empty, no scalars.
    fn skeleton() -> Self {
        let mut analysis = Self::default();
        for category in Category::GROUPED {
            analysis.entries.insert(category.key().to_string(), AnalysisValue::Grouped(BTreeMap::new()));
        }
        analysis
    }

    pub fn set_scalar(&mut self, category: Category, value: u64) {
        self.entries.insert(category.key().to_string(), AnalysisValue::Scalar(value));
    }

    pub fn set_grouped(&mut self, category: Category, counts: BTreeMap<String, u64>) {
        self.entries.insert(category.key().to_string(), AnalysisValue::Grouped(counts));
    }

    pub fn total(&self) -> u64 {
        match self.entries.get(Category::TotalFraudCount.key()) {
            Some(AnalysisValue::Scalar(n)) => *n,
            _ => 0,
        }
    }

    /// Counts for a grouped category; `None` when missing or stored as a scalar.
    pub fn grouped(&self, category: Category) -> Option<&BTreeMap<String, u64>> {
        match self.entries.get(category.key()) {
            Some(AnalysisValue::Grouped(map)) => Some(map),
            _ => None,
        }
    }

    pub fn fraud_type_counts(&self) -> Option<&BTreeMap<String, u64>> {
        self.grouped(Category::CountsByFraudType)
    }

    /// Subcategories of `category` ordered by descending count, ties broken lexically.
    pub fn ranked(&self, category: Category) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .grouped(category)
            .map(|m| m.iter().map(|(k, v)| (k.as_str(), *v)).collect())
            .unwrap_or_default();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub fn top_fraud_types(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked = self.ranked(Category::CountsByFraudType);
        ranked.truncate(n);
        ranked
    }

    /// True when there are no reports behind this analysis.
    pub fn has_no_data(&self) -> bool {
        self.total() == 0
    }

    pub fn flatten(&self) -> Vec<AnalysisRow> {
        let mut rows = Vec::new();
        for (category, value) in &self.entries {
            match value {
                AnalysisValue::Scalar(n) => rows.push(AnalysisRow {
                    category: category.clone(),
                    subcategory: String::new(),
                    value: *n,
                }),
                AnalysisValue::Grouped(map) => {
                    for (sub, n) in map {
                        rows.push(AnalysisRow {
                            category: category.clone(),
                            subcategory: sub.clone(),
                            value: *n,
                        });
                    }
                }
            }
        }
        rows
    }

    /// Rebuild the nested form from flattened rows. Grouped categories are
    /// always present (possibly empty) since an empty grouping leaves no rows.
    /// Only the total is scalar; an empty subcategory in any other category is
    /// a grouping key like any other.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = AnalysisRow>,
    {
        let mut analysis = Self::skeleton();
        for row in rows {
            if row.category == Category::TotalFraudCount.key() {
                analysis.entries.insert(row.category, AnalysisValue::Scalar(row.value));
                continue;
            }
            let entry = analysis
                .entries
                .entry(row.category)
                .or_insert_with(|| AnalysisValue::Grouped(BTreeMap::new()));
            if matches!(entry, AnalysisValue::Scalar(_)) {
                *entry = AnalysisValue::Grouped(BTreeMap::new());
            }
            if let AnalysisValue::Grouped(map) = entry {
                map.insert(row.subcategory, row.value);
            }
        }
        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AggregatedAnalysis {
        let mut analysis = AggregatedAnalysis::empty();
        analysis.set_scalar(Category::TotalFraudCount, 3);
        analysis.set_grouped(
            Category::CountsByFraudType,
            BTreeMap::from([("Phishing".to_string(), 2), ("Golpe do Pix".to_string(), 1)]),
        );
        analysis.set_grouped(
            Category::CountsByMonth,
            BTreeMap::from([("2025-01".to_string(), 3)]),
        );
        analysis
    }

    #[test]
    fn test_flatten_scalar_has_empty_subcategory() {
        let rows = sample().flatten();
        let total = rows.iter().find(|r| r.category == "total_golpes").unwrap();
        assert_eq!(total.subcategory, "");
        assert_eq!(total.value, 3);
    }

    #[test]
    fn test_flatten_then_rebuild_is_identity() {
        let analysis = sample();
        let rebuilt = AggregatedAnalysis::from_rows(analysis.flatten());
        assert_eq!(rebuilt, analysis);
    }

    #[test]
    fn test_rebuild_groups_rows_by_category() {
        let rows = vec![
            AnalysisRow { category: "golpes_por_canal".into(), subcategory: "WhatsApp".into(), value: 4 },
            AnalysisRow { category: "total_golpes".into(), subcategory: "".into(), value: 6 },
            AnalysisRow { category: "golpes_por_canal".into(), subcategory: "SMS / Mensagens".into(), value: 2 },
        ];
        let analysis = AggregatedAnalysis::from_rows(rows);
        assert_eq!(analysis.total(), 6);
        let channels = analysis.grouped(Category::CountsByChannel).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels["WhatsApp"], 4);
    }

    #[test]
    fn test_rebuild_keeps_empty_subcategory_in_group() {
        let mut analysis = sample();
        analysis.set_grouped(
            Category::CountsBySource,
            BTreeMap::from([("".to_string(), 1), ("G1".to_string(), 2)]),
        );
        let rebuilt = AggregatedAnalysis::from_rows(analysis.flatten());
        assert_eq!(rebuilt, analysis);

        let mut only_empty = sample();
        only_empty.set_grouped(Category::CountsBySource, BTreeMap::from([("".to_string(), 3)]));
        let rebuilt = AggregatedAnalysis::from_rows(only_empty.flatten());
        assert_eq!(rebuilt.grouped(Category::CountsBySource).unwrap().get(""), Some(&3));
    }

    #[test]
    fn test_empty_analysis_has_zero_total_and_empty_groups() {
        let analysis = AggregatedAnalysis::empty();
        assert_eq!(analysis.total(), 0);
        assert!(analysis.has_no_data());
        for category in Category::GROUPED {
            assert!(analysis.grouped(category).unwrap().is_empty());
        }
    }

    #[test]
    fn test_ranked_orders_by_count_then_name() {
        let mut analysis = AggregatedAnalysis::empty();
        analysis.set_grouped(
            Category::CountsByFraudType,
            BTreeMap::from([
                ("Phishing".to_string(), 2),
                ("Golpe do Pix".to_string(), 5),
                ("Deepfake / IA".to_string(), 2),
            ]),
        );
        let top = analysis.top_fraud_types(3);
        assert_eq!(top, vec![("Golpe do Pix", 5), ("Deepfake / IA", 2), ("Phishing", 2)]);
        assert_eq!(analysis.top_fraud_types(1).len(), 1);
    }

    #[test]
    fn test_json_shape_nests_grouped_values() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["total_golpes"], 3);
        assert_eq!(json["golpes_por_tipo"]["Phishing"], 2);
    }
}
