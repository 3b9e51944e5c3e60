use std::io::Cursor;

use bytes::Bytes;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate};
use reqwest::Client;

use crate::error::AppError;
use crate::models::RawTable;

pub async fn load_file_from_url(url: &str) -> Result<Bytes, AppError> {
    let client = Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::FileProcessingError(format!("Failed to fetch file: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::FileProcessingError(
            format!("Failed to fetch file. Status: {}", response.status())
        ));
    }

    response
        .bytes()
        .await
        .map_err(|e| AppError::FileProcessingError(format!("Failed to read response bytes: {}", e)))
}

/// Decode an upload into the string grid the pipeline consumes. The file
/// type string comes from the upload metadata, as sent by the client.
pub fn decode_raw_table(file_type: &str, file_data: Bytes) -> Result<RawTable, AppError> {
    let file_type = file_type.to_lowercase();
    if file_type.contains("csv") {
        raw_table_from_csv(file_data)
    } else if file_type.contains("xlsx") || file_type.contains("spreadsheet") {
        raw_table_from_xlsx(file_data)
    } else {
        Err(AppError::InvalidInput(format!(
            "Unsupported file type: {}. Only XLSX and CSV files are supported",
            file_type
        )))
    }
}

pub fn raw_table_from_xlsx(file_data: Bytes) -> Result<RawTable, AppError> {
    let cursor = Cursor::new(file_data);

    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)
        .map_err(|e| AppError::FileProcessingError(format!("Failed to open Excel file: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| AppError::FileProcessingError("No sheets found in workbook".to_string()))?;
    tracing::info!("Decoding sheet: {}", sheet_name);

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| AppError::FileProcessingError(format!("Failed to read worksheet: {}", e)))?;

    let mut rows = range.rows().map(|row| {
        row.iter().map(cell_to_string).collect::<Vec<String>>()
    });

    let headers = rows
        .next()
        .ok_or_else(|| AppError::FileProcessingError("Worksheet has no header row".to_string()))?;

    Ok(RawTable::new(headers, rows.collect()))
}

pub fn raw_table_from_csv(file_data: Bytes) -> Result<RawTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(file_data));

    let headers = reader
        .headers()
        .map_err(|e| AppError::FileProcessingError(format!("Failed to read CSV headers: {}", e)))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| AppError::FileProcessingError(format!("CSV parse error: {}", e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// Native date cells become ISO-8601 strings before they reach the core;
/// everything else keeps its display text.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(d) => excel_datetime_to_iso(d.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        other => other.to_string(),
    }
}

fn excel_datetime_to_iso(serial_days: f64) -> String {
    // Excel serial dates count days from the 1900 epoch (with the historical
    // off-by-two, hence 1899-12-30).
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    let seconds = (serial_days * 86400.0) as i64;
    (epoch + Duration::seconds(seconds))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}
