//! Income and expense reports over a month or a year.

mod aggregation;
mod chart;
mod db;
mod summary;
mod window;

pub use aggregation::{
    ChartData, ReportEntry, Summary, UNCATEGORIZED_LABEL, group_expenses_by_category, summarize,
};
pub use chart::{ChartQuery, category_chart_endpoint, category_spending_chart};
pub use db::get_report_entries;
pub use summary::{SummaryQuery, monthly_summary, summary_endpoint, yearly_summary};
pub use window::{DateRange, month_range, year_range};

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

/// The state needed for the report endpoints.
#[derive(Debug, Clone)]
pub struct ReportState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
