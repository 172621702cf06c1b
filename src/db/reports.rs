use std::collections::HashMap;
use rusqlite::{params, Connection};
use tracing::debug;

use crate::errors::GuardiaoError;
use crate::models::FraudReport;
use super::Database;

const SELECT_REPORTS: &str = r#"SELECT "Fonte", "Data da notícia", "Tipo do golpe", "Descrição breve do golpe",
    "Canal utilizado", "Público alvo", "Estimativa de impacto ou prejuízo" FROM engineer_data"#;

fn row_to_report(row: &rusqlite::Row) -> rusqlite::Result<FraudReport> {
    Ok(FraudReport {
        source: row.get(0)?,
        report_date: row.get(1)?,
        fraud_type: row.get(2)?,
        description: row.get(3)?,
        channel: row.get(4)?,
        target_audience: row.get(5)?,
        impact_estimate: row.get(6)?,
    })
}

fn query_reports(conn: &Connection, sql: &str, limit: Option<usize>) -> Result<Vec<FraudReport>, GuardiaoError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| GuardiaoError::Database(format!("Query failed: {}", e)))?;
    let rows = match limit {
        Some(n) => stmt.query_map(params![n as i64], row_to_report),
        None => stmt.query_map([], row_to_report),
    }
    .map_err(|e| GuardiaoError::Database(format!("Query failed: {}", e)))?;

    let mut reports = Vec::new();
    for row in rows {
        reports.push(row.map_err(|e| GuardiaoError::Database(format!("Row read failed: {}", e)))?);
    }
    Ok(reports)
}

/// Keep one report per (source, date), the last occurrence winning and
/// holding its position.
pub fn dedup_keep_newest(reports: Vec<FraudReport>) -> Vec<FraudReport> {
    let mut last_index: HashMap<(String, String), usize> = HashMap::new();
    for (i, report) in reports.iter().enumerate() {
        let (source, date) = report.dedup_key();
        last_index.insert((source.to_string(), date.to_string()), i);
    }
    reports
        .into_iter()
        .enumerate()
        .filter(|(i, report)| {
            let (source, date) = report.dedup_key();
            last_index.get(&(source.to_string(), date.to_string())) == Some(i)
        })
        .map(|(_, report)| report)
        .collect()
}

impl Database {
    /// Every stored report in insertion order.
    pub fn load_reports(&self) -> Result<Vec<FraudReport>, GuardiaoError> {
        let conn = self.lock()?;
        query_reports(&conn, &format!("{} ORDER BY row_order", SELECT_REPORTS), None)
    }

    /// The `n` most recently stored reports, oldest first.
    pub fn recent_reports(&self, n: usize) -> Result<Vec<FraudReport>, GuardiaoError> {
        let conn = self.lock()?;
        let mut reports = query_reports(
            &conn,
            &format!("{} ORDER BY row_order DESC LIMIT ?1", SELECT_REPORTS),
            Some(n),
        )?;
        reports.reverse();
        Ok(reports)
    }

    pub fn count_reports(&self) -> Result<u64, GuardiaoError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM engineer_data", [], |row| row.get(0))
            .map_err(|e| GuardiaoError::Database(format!("Count failed: {}", e)))?;
        Ok(count.max(0) as u64)
    }

    /// Append `incoming` to the stored reports, de-duplicate and overwrite the
    /// table in one transaction. Returns the number of rows now stored.
    pub fn merge_reports(&self, incoming: &[FraudReport]) -> Result<usize, GuardiaoError> {
        let mut conn = self.lock()?;
        let mut combined = query_reports(&conn, &format!("{} ORDER BY row_order", SELECT_REPORTS), None)?;
        let existing = combined.len();
        combined.extend_from_slice(incoming);
        let merged = dedup_keep_newest(combined);

        let tx = conn
            .transaction()
            .map_err(|e| GuardiaoError::Database(format!("Failed to begin transaction: {}", e)))?;
        tx.execute("DELETE FROM engineer_data", [])
            .map_err(|e| GuardiaoError::Database(format!("Failed to clear reports: {}", e)))?;
        {
            let mut stmt = tx
                .prepare(
                    r#"INSERT INTO engineer_data (row_order, "Fonte", "Data da notícia", "Tipo do golpe",
                        "Descrição breve do golpe", "Canal utilizado", "Público alvo",
                        "Estimativa de impacto ou prejuízo") VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
                )
                .map_err(|e| GuardiaoError::Database(format!("Insert prepare failed: {}", e)))?;
            for (i, r) in merged.iter().enumerate() {
                stmt.execute(params![
                    i as i64,
                    r.source,
                    r.report_date,
                    r.fraud_type,
                    r.description,
                    r.channel,
                    r.target_audience,
                    r.impact_estimate,
                ])
                .map_err(|e| GuardiaoError::Database(format!("Failed to insert report: {}", e)))?;
            }
        }
        tx.commit()
            .map_err(|e| GuardiaoError::Database(format!("Failed to commit reports: {}", e)))?;

        debug!(existing, incoming = incoming.len(), stored = merged.len(), "Reports merged");
        Ok(merged.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(source: &str, date: &str, fraud_type: &str) -> FraudReport {
        FraudReport {
            source: source.into(),
            report_date: date.into(),
            fraud_type: fraud_type.into(),
            description: String::new(),
            channel: "WhatsApp".into(),
            target_audience: "Idosos".into(),
            impact_estimate: "Não informado".into(),
        }
    }

    #[test]
    fn test_empty_table_loads_nothing() {
        let db = Database::in_memory().unwrap();
        assert!(db.load_reports().unwrap().is_empty());
        assert_eq!(db.count_reports().unwrap(), 0);
    }

    #[test]
    fn test_merge_appends_in_order() {
        let db = Database::in_memory().unwrap();
        db.merge_reports(&[report("G1", "2025-01-01", "Phishing")]).unwrap();
        db.merge_reports(&[report("UOL", "2025-01-02", "Golpe do Pix")]).unwrap();
        let stored = db.load_reports().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].source, "G1");
        assert_eq!(stored[1].source, "UOL");
    }

    #[test]
    fn test_merge_replaces_duplicate_with_newest_values() {
        let db = Database::in_memory().unwrap();
        db.merge_reports(&[
            report("G1", "2025-01-01", "Phishing"),
            report("UOL", "2025-01-02", "Golpe do Pix"),
        ])
        .unwrap();
        let stored = db.merge_reports(&[report("G1", "2025-01-01", "Deepfake / IA")]).unwrap();
        assert_eq!(stored, 2);

        let reports = db.load_reports().unwrap();
        let g1: Vec<_> = reports.iter().filter(|r| r.source == "G1").collect();
        assert_eq!(g1.len(), 1);
        assert_eq!(g1[0].fraud_type, "Deepfake / IA");
    }

    #[test]
    fn test_dedup_within_single_batch() {
        let merged = dedup_keep_newest(vec![
            report("G1", "2025-01-01", "Phishing"),
            report("G1", "2025-01-01", "Golpe do Pix"),
            report("G1", "2025-01-02", "Phishing"),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].fraud_type, "Golpe do Pix");
        assert_eq!(merged[1].report_date, "2025-01-02");
    }

    #[test]
    fn test_recent_reports_returns_tail_oldest_first() {
        let db = Database::in_memory().unwrap();
        let batch: Vec<_> = (1..=7)
            .map(|d| report("G1", &format!("2025-01-0{}", d), "Phishing"))
            .collect();
        db.merge_reports(&batch).unwrap();

        let recent = db.recent_reports(3).unwrap();
        let dates: Vec<_> = recent.iter().map(|r| r.report_date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-05", "2025-01-06", "2025-01-07"]);
    }
}
