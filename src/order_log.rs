//! Order Log
//!
//! Completed orders are appended to one human-readable text file per calendar day,
//! `orders_<YYYY-MM-DD>.txt`, each record fenced by delimiter lines.

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};

use jiff::civil::Date;
use thiserror::Error;
use tracing::debug;

use crate::order::Order;

const DELIMITER: &str = "------------------------------";

/// Errors writing the order log.
#[derive(Debug, Error)]
pub enum OrderLogError {
    /// The log file couldn't be opened or appended to.
    #[error("Failed to write order log {}: {source}", path.display())]
    Write {
        /// Log file path
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

/// Appends completed orders to daily log files in a directory.
#[derive(Debug, Clone)]
pub struct OrderLog {
    dir: PathBuf,
}

impl OrderLog {
    /// Log to files in the given directory. The directory must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the log files are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the log file for a day.
    pub fn path_for(&self, date: Date) -> PathBuf {
        self.dir
            .join(format!("orders_{}.txt", date.strftime("%Y-%m-%d")))
    }

    /// Append a record of the order to the log file for the day it was placed.
    ///
    /// The file is created if needed, and closed before returning.
    ///
    /// # Errors
    ///
    /// Returns [`OrderLogError::Write`] if the file can't be opened or written.
    pub fn append(&self, order: &Order) -> Result<PathBuf, OrderLogError> {
        let path = self.path_for(order.placed_at().date());
        let record = format_record(order);

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| file.write_all(record.as_bytes()));

        match result {
            Ok(()) => {
                debug!(order_id = order.id(), path = %path.display(), "order logged");

                Ok(path)
            }
            Err(source) => Err(OrderLogError::Write { path, source }),
        }
    }
}

/// Format the log record for an order.
pub fn format_record(order: &Order) -> String {
    let mut lines = vec![
        DELIMITER.to_string(),
        format!("Date: {}", order.placed_at().strftime("%d-%m-%Y %I:%M %p")),
        "Items:".to_string(),
    ];

    lines.extend(order.lines().iter().map(|line| {
        format!(
            "- {} x {} : {}",
            line.name(),
            line.quantity(),
            line.line_total()
        )
    }));

    lines.push(format!("Total: {}", order.total()));
    lines.push(DELIMITER.to_string());
    lines.push(String::new());

    let mut record = lines.join("\n");
    record.push('\n');

    record
}

#[cfg(test)]
mod tests {
    use std::fs;

    use jiff::civil::date;
    use slotmap::SlotMap;
    use testresult::TestResult;

    use super::*;
    use crate::{bill::compute_bill, menu::MenuKey, order::OrderLine, prices::Price};

    fn test_order(id: u64, hour: i8) -> Order {
        let mut keys: SlotMap<MenuKey, ()> = SlotMap::with_key();
        let coke = keys.insert(());
        let tikka = keys.insert(());

        Order::new(
            id,
            date(2026, 10, 19).at(hour, 5, 0, 0),
            vec![
                OrderLine::new(coke, "Coke", 2, Price::rupees(50)),
                OrderLine::new(tikka, "Paneer Tikka", 1, Price::rupees(180)),
            ],
            compute_bill(Price::rupees(280)),
        )
    }

    #[test]
    fn path_for_uses_iso_date() {
        let log = OrderLog::new("logs");

        assert_eq!(
            log.path_for(date(2026, 3, 7)),
            Path::new("logs").join("orders_2026-03-07.txt")
        );
    }

    #[test]
    fn format_record_layout() {
        let record = format_record(&test_order(1, 13));

        assert_eq!(
            record,
            "------------------------------\n\
             Date: 19-10-2026 01:05 PM\n\
             Items:\n\
             - Coke x 2 : Rs. 100.00\n\
             - Paneer Tikka x 1 : Rs. 180.00\n\
             Total: Rs. 280.00\n\
             ------------------------------\n\
             \n"
        );
    }

    #[test]
    fn format_record_morning_time() {
        let record = format_record(&test_order(1, 9));

        assert!(record.contains("Date: 19-10-2026 09:05 AM\n"));
    }

    #[test]
    fn append_accumulates_records_in_daily_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let log = OrderLog::new(dir.path());

        let first = log.append(&test_order(1, 12))?;
        let second = log.append(&test_order(2, 18))?;

        assert_eq!(first, second);

        let contents = fs::read_to_string(&first)?;

        assert_eq!(contents.matches("Items:").count(), 2);
        assert!(contents.contains("Date: 19-10-2026 12:05 PM"));
        assert!(contents.contains("Date: 19-10-2026 06:05 PM"));

        Ok(())
    }

    #[test]
    fn append_reports_unwritable_directory() -> TestResult {
        let dir = tempfile::tempdir()?;
        let log = OrderLog::new(dir.path().join("missing"));

        let result = log.append(&test_order(1, 12));

        assert!(matches!(result, Err(OrderLogError::Write { .. })));

        Ok(())
    }
}
