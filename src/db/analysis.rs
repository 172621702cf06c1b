use rusqlite::params;

use crate::errors::GuardiaoError;
use crate::models::{AggregatedAnalysis, AnalysisRow};
use super::Database;

impl Database {
    /// Replace the analysis table with `analysis`, flattened.
    pub fn save_analysis(&self, analysis: &AggregatedAnalysis) -> Result<usize, GuardiaoError> {
        let rows = analysis.flatten();
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| GuardiaoError::Database(format!("Failed to begin transaction: {}", e)))?;
        tx.execute("DELETE FROM analyst_data", [])
            .map_err(|e| GuardiaoError::Database(format!("Failed to clear analysis: {}", e)))?;
        {
            let mut stmt = tx
                .prepare(r#"INSERT INTO analyst_data ("Categoria", "Subcategoria", "Valor") VALUES (?1, ?2, ?3)"#)
                .map_err(|e| GuardiaoError::Database(format!("Insert prepare failed: {}", e)))?;
            for row in &rows {
                stmt.execute(params![row.category, row.subcategory, row.value as i64])
                    .map_err(|e| GuardiaoError::Database(format!("Failed to insert analysis row: {}", e)))?;
            }
        }
        tx.commit()
            .map_err(|e| GuardiaoError::Database(format!("Failed to commit analysis: {}", e)))?;
        Ok(rows.len())
    }

    pub fn load_analysis_rows(&self) -> Result<Vec<AnalysisRow>, GuardiaoError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(r#"SELECT "Categoria", "Subcategoria", "Valor" FROM analyst_data ORDER BY rowid"#)
            .map_err(|e| GuardiaoError::Database(format!("Query failed: {}", e)))?;
        let rows = stmt
            .query_map([], |row| {
                let value: i64 = row.get(2)?;
                Ok(AnalysisRow {
                    category: row.get(0)?,
                    subcategory: row.get(1)?,
                    value: value.max(0) as u64,
                })
            })
            .map_err(|e| GuardiaoError::Database(format!("Query failed: {}", e)))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| GuardiaoError::Database(format!("Row read failed: {}", e)))?);
        }
        Ok(result)
    }

    /// The stored analysis, or `None` when nothing has been aggregated yet.
    pub fn load_analysis(&self) -> Result<Option<AggregatedAnalysis>, GuardiaoError> {
        let rows = self.load_analysis_rows()?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(AggregatedAnalysis::from_rows(rows)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use super::*;
    use crate::models::Category;

    fn sample() -> AggregatedAnalysis {
        let mut analysis = AggregatedAnalysis::empty();
        analysis.set_scalar(Category::TotalFraudCount, 3);
        analysis.set_grouped(
            Category::CountsByFraudType,
            BTreeMap::from([("Phishing".to_string(), 2), ("Golpe do Pix".to_string(), 1)]),
        );
        analysis
    }

    #[test]
    fn test_load_analysis_absent() {
        let db = Database::in_memory().unwrap();
        assert!(db.load_analysis().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_restores_nested_form() {
        let db = Database::in_memory().unwrap();
        let written = db.save_analysis(&sample()).unwrap();
        assert_eq!(written, 3);
        assert_eq!(db.load_analysis().unwrap(), Some(sample()));
    }

    #[test]
    fn test_empty_source_key_survives_reload() {
        let db = Database::in_memory().unwrap();
        let mut analysis = sample();
        analysis.set_grouped(
            Category::CountsBySource,
            BTreeMap::from([("".to_string(), 1), ("G1".to_string(), 2)]),
        );
        db.save_analysis(&analysis).unwrap();
        assert_eq!(db.load_analysis().unwrap(), Some(analysis));
    }

    #[test]
    fn test_save_overwrites_previous_analysis() {
        let db = Database::in_memory().unwrap();
        db.save_analysis(&sample()).unwrap();
        db.save_analysis(&AggregatedAnalysis::empty()).unwrap();

        let rows = db.load_analysis_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "total_golpes");
        assert_eq!(rows[0].subcategory, "");
        assert_eq!(rows[0].value, 0);
    }
}
