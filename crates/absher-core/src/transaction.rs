//! Append-only in-memory transaction log with CSV export.
//!
//! One record per completed workflow action. Nothing is persisted; the log
//! lives as long as its session.

use chrono::{DateTime, Utc};
use rand::Rng;

use absher_types::transaction::{TransactionRecord, TransactionStatus};

/// UTF-8 byte order mark prepended to CSV exports so spreadsheet tools pick
/// the right encoding for Arabic text.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const CSV_HEADER: [&str; 6] = [
    "transaction_id",
    "user_id",
    "action",
    "status",
    "timestamp",
    "details",
];

#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    records: Vec<TransactionRecord>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record stamped now and return it.
    pub fn append(
        &mut self,
        user_id: impl Into<String>,
        action: impl Into<String>,
        status: TransactionStatus,
        details: impl Into<String>,
    ) -> &TransactionRecord {
        let now = Utc::now();
        let record = TransactionRecord {
            transaction_id: transaction_id(now),
            user_id: user_id.into(),
            action: action.into(),
            status,
            timestamp: now.to_rfc3339(),
            details: details.into(),
        };
        tracing::debug!(
            txn = %record.transaction_id,
            action = %record.action,
            status = %record.status,
            "Transaction logged"
        );
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// All records in append order.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Export the full log as CSV: BOM, header row, one row per record in
    /// append order.
    pub fn export_csv(&self) -> Vec<u8> {
        let mut out = String::new();
        push_row(&mut out, CSV_HEADER.iter().copied());
        for r in &self.records {
            let status = r.status.to_string();
            push_row(
                &mut out,
                [
                    r.transaction_id.as_str(),
                    r.user_id.as_str(),
                    r.action.as_str(),
                    status.as_str(),
                    r.timestamp.as_str(),
                    r.details.as_str(),
                ],
            );
        }

        let mut bytes = Vec::with_capacity(UTF8_BOM.len() + out.len());
        bytes.extend_from_slice(UTF8_BOM);
        bytes.extend_from_slice(out.as_bytes());
        bytes
    }
}

/// `transactions_YYYYMMDD_HHMMSS.csv`.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("transactions_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// `TXN{YYYYMMDDHHMMSS}-{4 random digits}`.
fn transaction_id(now: DateTime<Utc>) -> String {
    let suffix: u16 = rand::rng().random_range(1000..=9999);
    format!("TXN{}-{suffix}", now.format("%Y%m%d%H%M%S"))
}

fn push_row<'a>(out: &mut String, cells: impl IntoIterator<Item = &'a str>) {
    let row: Vec<String> = cells.into_iter().map(escape_cell).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// Quote a cell when it contains a delimiter, quote, or line break.
fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn csv_lines(log: &TransactionLog) -> Vec<String> {
        let bytes = log.export_csv();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        text.split("\r\n")
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn append_assigns_id_and_timestamp() {
        let mut log = TransactionLog::new();
        let record = log
            .append("1122334455", "name_change", TransactionStatus::Completed, "a -> b")
            .clone();

        assert!(record.transaction_id.starts_with("TXN"));
        let (stamp, suffix) = record.transaction_id[3..].split_once('-').unwrap();
        assert_eq!(stamp.len(), 14);
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
        assert!(DateTime::parse_from_rfc3339(&record.timestamp).is_ok());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn export_contains_every_record_once_in_order() {
        let mut log = TransactionLog::new();
        log.append("u1", "name_change", TransactionStatus::Completed, "first");
        log.append("u2", "service_application", TransactionStatus::Pending, "second");
        log.append("u3", "name_change", TransactionStatus::Failed, "third");

        let lines = csv_lines(&log);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "transaction_id,user_id,action,status,timestamp,details");
        for (line, record) in lines[1..].iter().zip(log.records()) {
            assert!(line.starts_with(&record.transaction_id));
            assert!(line.ends_with(&record.details));
        }
        for id in ["u1", "u2", "u3"] {
            assert_eq!(lines.iter().filter(|l| l.contains(&format!(",{id},"))).count(), 1);
        }
    }

    #[test]
    fn export_quotes_special_cells() {
        let mut log = TransactionLog::new();
        log.append("u1", "name_change", TransactionStatus::Completed, "أحمد, \"Jr\"");
        let lines = csv_lines(&log);
        assert!(lines[1].ends_with("\"أحمد, \"\"Jr\"\"\""));
    }

    #[test]
    fn export_of_empty_log_is_header_only() {
        let log = TransactionLog::new();
        assert_eq!(csv_lines(&log).len(), 1);
    }

    #[test]
    fn filename_is_timestamped() {
        let now = Utc.with_ymd_and_hms(2026, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(export_filename(now), "transactions_20260305_140709.csv");
    }
}
