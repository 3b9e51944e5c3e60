use axum::{
    extract::State,
    routing::post,
    Router,
    Json,
    http::Method,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    models::{ColumnProfile, TimePoint},
    services::{file_processor, series},
};
use tower_http::cors::{CorsLayer, Any};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/series/clean", post(clean_series))
        .layer(cors)
}

#[derive(Debug, Deserialize)]
pub struct FileInfo {
    #[serde(rename = "type")]
    file_type: String,
    signed_url: String,
}

#[derive(Debug, Deserialize)]
pub struct CleanRequest {
    files: Vec<FileInfo>,
    /// Optional override of the automatic date-column pick.
    date_column: Option<usize>,
    /// Optional override of the automatic metric-column pick.
    metric_column: Option<usize>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ColumnAnalysis {
    index: usize,
    header: String,
    date_score: f64,
    numeric_score: f64,
    empty_count: usize,
    sample_values: Vec<String>,
    is_date_candidate: bool,
    is_numeric_candidate: bool,
}

impl From<ColumnProfile> for ColumnAnalysis {
    fn from(profile: ColumnProfile) -> Self {
        ColumnAnalysis {
            is_date_candidate: profile.is_date_candidate(),
            is_numeric_candidate: profile.is_numeric_candidate(),
            index: profile.index,
            header: profile.header,
            date_score: profile.date_score,
            numeric_score: profile.numeric_score,
            empty_count: profile.empty_count,
            sample_values: profile.sample_values.to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CleanResponse {
    date_column: usize,
    metric_column: usize,
    row_count: usize,
    column_count: usize,
    columns: Vec<ColumnAnalysis>,
    series: Vec<TimePoint>,
}

#[axum::debug_handler]
async fn clean_series(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CleanRequest>,
) -> Result<Json<CleanResponse>, AppError> {
    let start = std::time::Instant::now();

    // 1. Validate file info and get URL
    let file_info = request.files.first()
        .ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    tracing::info!(
        "Processing file type: {}, URL length: {}",
        file_info.file_type,
        file_info.signed_url.len()
    );

    // 2. Download file from URL (only once)
    tracing::info!("Downloading file from URL...");
    let download_start = std::time::Instant::now();
    let file_data = file_processor::load_file_from_url(&file_info.signed_url).await?;
    tracing::info!("File downloaded, size: {}KB, took: {:?}", file_data.len() / 1024, download_start.elapsed());

    if file_data.len() > state.config.max_file_size {
        return Err(AppError::InvalidInput(format!(
            "File too large: {} bytes (limit {})",
            file_data.len(),
            state.config.max_file_size
        )));
    }

    // 3. Decode into the raw string grid
    let decode_start = std::time::Instant::now();
    let table = file_processor::decode_raw_table(&file_info.file_type, file_data)?;
    tracing::info!(
        "Decoded {} rows x {} columns in {:?}",
        table.row_count(),
        table.column_count(),
        decode_start.elapsed()
    );

    // 4. Profile columns and resolve the selection (auto or overridden)
    let profile_start = std::time::Instant::now();
    let profiles = series::profile_columns(&table)?;
    let selection = series::resolve_selection(&profiles, request.date_column, request.metric_column)?;
    tracing::info!(
        "Selected date column {} and metric column {} in {:?}",
        selection.date_column,
        selection.metric_column,
        profile_start.elapsed()
    );

    // 5. Build the cleaned series
    let build_start = std::time::Instant::now();
    let series = series::build_series(&table, &selection)?;
    tracing::info!("Built series of {} points in {:?}", series.len(), build_start.elapsed());

    tracing::info!("Total processing completed in {:?}", start.elapsed());

    Ok(Json(CleanResponse {
        date_column: selection.date_column,
        metric_column: selection.metric_column,
        row_count: table.row_count(),
        column_count: table.column_count(),
        columns: profiles.into_iter().map(ColumnAnalysis::from).collect(),
        series,
    }))
}
