//! Queries that feed the reports.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    report::{aggregation::ReportEntry, window::DateRange},
    transaction::get_amount,
    user::UserID,
};

/// Get the type, amount and category name of the user's transactions in `range`.
///
/// The entries are in chronological order, transactions on the same date are ordered by ID.
pub fn get_report_entries(
    user_id: UserID,
    range: DateRange,
    connection: &Connection,
) -> Result<Vec<ReportEntry>, Error> {
    connection
        .prepare(
            "SELECT \"transaction\".type, \"transaction\".amount, category.name \
            FROM \"transaction\" \
            LEFT JOIN category ON \"transaction\".category_id = category.id \
            WHERE \"transaction\".user_id = ?1 AND \"transaction\".date BETWEEN ?2 AND ?3 \
            ORDER BY \"transaction\".date ASC, \"transaction\".id ASC",
        )?
        .query_map((user_id.as_i64(), range.start, range.end), map_row)?
        .map(|entry| entry.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<ReportEntry, rusqlite::Error> {
    Ok(ReportEntry {
        transaction_type: row.get(0)?,
        amount: get_amount(row, 1)?,
        category_name: row.get(2)?,
    })
}
