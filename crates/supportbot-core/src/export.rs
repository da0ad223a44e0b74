//! Ticket log and catalog export formats.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::catalog::{IssueCatalog, ProductCatalog, SupportData};
use crate::error::{Result, SupportError};
use crate::ticket::SupportTicket;

const CSV_HEADER: [&str; 6] = [
    "Ticket ID",
    "Product",
    "Status",
    "Timestamp",
    "Customer Info",
    "Issue",
];

/// Full catalog snapshot as written by [`snapshot_json`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSnapshot<'a> {
    pub products: &'a ProductCatalog,
    pub issues: &'a IssueCatalog,
    pub support_tickets: &'a [SupportTicket],
    pub export_date: String,
}

/// Renders the ticket log as CSV with every cell quoted.
///
/// Fails when the log is empty.
pub fn tickets_csv(tickets: &[SupportTicket]) -> Result<String> {
    if tickets.is_empty() {
        return Err(SupportError::validation("No tickets to export"));
    }

    let mut rows = Vec::with_capacity(tickets.len() + 1);
    rows.push(csv_row(CSV_HEADER));
    for ticket in tickets {
        let issue = ticket.issue.replace(['\r', '\n'], " ");
        rows.push(csv_row([
            ticket.id.as_str(),
            ticket.product_name.as_str(),
            ticket.status.as_ref(),
            ticket.timestamp.as_str(),
            ticket.customer_summary("; ").as_str(),
            issue.as_str(),
        ]));
    }
    Ok(rows.join("\n"))
}

fn csv_row<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
    cells
        .into_iter()
        .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders products, issues and tickets as pretty-printed JSON.
pub fn snapshot_json(data: &SupportData, exported_at: DateTime<Utc>) -> Result<String> {
    let snapshot = DataSnapshot {
        products: &data.products,
        issues: &data.issues,
        support_tickets: &data.tickets,
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// `support_tickets_YYYY-MM-DD.csv`
pub fn tickets_export_filename(date: DateTime<Utc>) -> String {
    format!("support_tickets_{}.csv", date.format("%Y-%m-%d"))
}

/// `chatbot_data_YYYY-MM-DD.json`
pub fn snapshot_export_filename(date: DateTime<Utc>) -> String {
    format!("chatbot_data_{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Issue, Product};
    use crate::ticket::TicketStatus;
    use chrono::TimeZone;
    use indexmap::IndexMap;

    fn ticket(issue: &str) -> SupportTicket {
        let mut customer_data = IndexMap::new();
        customer_data.insert("Email".to_string(), "a@b.c".to_string());
        customer_data.insert("Order ID".to_string(), "42".to_string());
        SupportTicket {
            id: "SUP123456".to_string(),
            timestamp: "3/7/2025, 2:05:09 PM".to_string(),
            product_name: "Router".to_string(),
            customer_data,
            issue: issue.to_string(),
            status: TicketStatus::Escalated,
        }
    }

    #[test]
    fn test_empty_log_is_rejected() {
        let err = tickets_csv(&[]).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("No tickets to export"));
    }

    #[test]
    fn test_csv_rows() {
        let csv = tickets_csv(&[ticket("screen \"flickers\"\nat night")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            r#""Ticket ID","Product","Status","Timestamp","Customer Info","Issue""#
        );
        assert_eq!(
            lines[1],
            r#""SUP123456","Router","escalated","3/7/2025, 2:05:09 PM","Email: a@b.c; Order ID: 42","screen ""flickers"" at night""#
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_snapshot_shape() {
        let mut data = SupportData::new();
        data.products.insert(
            "router".to_string(),
            Product::new("router", "Router", vec!["Email".to_string()]),
        );
        data.issues.insert(
            "router".to_string(),
            vec![Issue::new("No signal", vec!["Reboot".to_string()])],
        );
        data.tickets.push(ticket("x"));
        let exported_at = Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&snapshot_json(&data, exported_at).unwrap()).unwrap();

        assert_eq!(json["products"]["router"]["name"], "Router");
        assert!(json["products"]["router"].get("key").is_none());
        assert_eq!(json["issues"]["router"][0]["solution"][0], "Reboot");
        assert_eq!(json["supportTickets"][0]["id"], "SUP123456");
        assert_eq!(json["exportDate"], "2025-03-07T12:00:00.000Z");
    }

    #[test]
    fn test_filenames() {
        let date = Utc.with_ymd_and_hms(2025, 3, 7, 23, 59, 0).unwrap();
        assert_eq!(tickets_export_filename(date), "support_tickets_2025-03-07.csv");
        assert_eq!(snapshot_export_filename(date), "chatbot_data_2025-03-07.json");
    }
}
