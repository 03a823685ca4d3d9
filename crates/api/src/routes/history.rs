//! History Routes

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;
use storage::{HistoryRecord, HISTORY_COLUMNS};

use crate::html::{escape, page, trend_chart};
use crate::{ApiError, SharedState};

/// File name offered for the CSV download
pub const DOWNLOAD_FILE_NAME: &str = "visa_processing_history.csv";

/// Response for the history endpoint
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub data: Vec<HistoryRecord>,
    pub count: usize,
}

/// Saved predictions as JSON, oldest first
pub async fn list(State(state): State<SharedState>) -> Json<HistoryResponse> {
    let data = state.history.lock().await.records().to_vec();

    Json(HistoryResponse {
        count: data.len(),
        data,
    })
}

/// Saved predictions as a CSV attachment
pub async fn download(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let csv = state.history.lock().await.to_csv_bytes()?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME),
            ),
        ],
        csv,
    ))
}

/// Table of saved predictions with a trend line
pub async fn show(State(state): State<SharedState>) -> Html<String> {
    let body = {
        let history = state.history.lock().await;
        render(history.records(), &history.trend())
    };
    page("Prediction History", &body)
}

fn render(records: &[HistoryRecord], trend: &[i64]) -> String {
    if records.is_empty() {
        return "<h1>Past Visa Processing Predictions</h1>\n<p>No predictions saved yet.</p>"
            .to_string();
    }

    let header: String = HISTORY_COLUMNS
        .iter()
        .map(|c| format!("<th>{}</th>", c))
        .collect();
    let rows: String = records
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&r.country),
                escape(&r.visa_type),
                r.application_month,
                r.age,
                r.travel_history_count,
                r.predicted_processing_days,
            )
        })
        .collect();

    format!(
        "<h1>Past Visa Processing Predictions</h1>\n\
         <table><thead><tr>{header}</tr></thead><tbody>{rows}</tbody></table>\n\
         <h2>Processing Time Trend</h2>\n{chart}\n\
         <p><a href=\"/history.csv\" download=\"{file}\">Download Prediction History</a></p>",
        header = header,
        rows = rows,
        chart = trend_chart(trend),
        file = DOWNLOAD_FILE_NAME,
    )
}
