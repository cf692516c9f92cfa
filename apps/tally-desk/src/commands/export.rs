//! # Export Commands
//!
//! Export hooks for the stock table. No file is encoded: the command
//! reports what would be exported.

use serde::{Deserialize, Serialize};
use tally_core::Feedback;
use tracing::info;
use ts_rs::TS;

use super::timed;
use crate::state::{DeskConfig, StockState};

/// Target format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ExportFormat {
    /// `.xlsx`
    Spreadsheet,
    /// `.pdf`
    Document,
}

impl ExportFormat {
    /// Parses `xlsx`/`excel` or `pdf`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" | "spreadsheet" => Some(ExportFormat::Spreadsheet),
            "pdf" | "document" => Some(ExportFormat::Document),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "Excel",
            ExportFormat::Document => "PDF",
        }
    }
}

/// Exports the current stock snapshot.
pub fn export_stock(config: &DeskConfig, stock: &StockState, format: ExportFormat) -> Feedback {
    let rows = stock.with_session(|s| s.ledger().len());
    info!(?format, rows, "export_stock command");

    timed(
        config,
        Feedback::info(format!(
            "{} export of {} product(s) is not available in this build.",
            format.label(),
            rows
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{Product, Severity, StockLedger};

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::from_name("XLSX"), Some(ExportFormat::Spreadsheet));
        assert_eq!(ExportFormat::from_name("pdf"), Some(ExportFormat::Document));
        assert_eq!(ExportFormat::from_name("csv"), None);
    }

    #[test]
    fn test_export_is_informational() {
        let stock = StockState::new(StockLedger::new(vec![Product::new(1, "Cabo", 2)]).unwrap());
        let feedback = export_stock(&DeskConfig::default(), &stock, ExportFormat::Document);
        assert_eq!(feedback.severity, Severity::Info);
        assert!(feedback.message.starts_with("PDF export of 1 product(s)"));
    }
}
