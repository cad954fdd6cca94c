//! Audit record display formatting and pagination

use crate::audit::AuditRecord;
use crate::error::{CatalogError, CatalogResult};

/// One page of the audit trail
#[derive(Debug, Clone)]
pub struct LogPage {
    pub page_number: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub records: Vec<AuditRecord>,
}

impl LogPage {
    /// Number of pages needed for all records
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }
}

/// Select page `page_number` of `page_size` records
///
/// Pages are windows over record ids: page N holds ids in
/// `(size * (N - 1), size * N]`.
pub fn paginate_logs(
    records: Vec<AuditRecord>,
    page_number: usize,
    page_size: usize,
) -> CatalogResult<LogPage> {
    if page_number < 1 || page_size < 1 {
        return Err(CatalogError::Validation("Invalid page number.".into()));
    }

    let total_items = records.len();
    let start = page_size.saturating_mul(page_number - 1);
    let end = start.saturating_add(page_size);

    let records = records
        .into_iter()
        .filter(|r| {
            let id = usize::try_from(r.id.get()).unwrap_or(0);
            id > start && id <= end
        })
        .collect();

    Ok(LogPage {
        page_number,
        page_size,
        total_items,
        records,
    })
}

/// Format a page of records as a table
pub fn format_log_page(page: &LogPage) -> String {
    let mut output = format_log_list(&page.records);
    output.push_str(&format!(
        "\nPage {} of {} ({} records)\n",
        page.page_number,
        page.total_pages(),
        page.total_items
    ));
    output
}

/// Format records as a table, one line per record
pub fn format_log_list(records: &[AuditRecord]) -> String {
    if records.is_empty() {
        return "No audit records found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:>7}  {:<8}  {:<19}  {}\n",
        "ID", "User", "Action", "Time (UTC)", "Changes"
    ));
    output.push_str(&format!(
        "{:->5}  {:->7}  {:-<8}  {:-<19}  {:-<7}\n",
        "", "", "", "", ""
    ));

    for record in records {
        let subject = record
            .subject_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let summary = match record.changes.lines().count() {
            0 => String::new(),
            1 => record.changes.clone(),
            n => format!("{} (+{} more)", record.changes.lines().next().unwrap_or(""), n - 1),
        };

        output.push_str(&format!(
            "{:>5}  {:>7}  {:<8}  {:<19}  {}\n",
            record.id,
            subject,
            record.action,
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            summary
        ));
    }

    output
}

/// Format a single record in full
pub fn format_log_details(record: &AuditRecord) -> String {
    format!("{}\n", record.format_human_readable())
}
