// Chart table domain models
use serde::Serialize;

/// Visual configuration handed to the plotting surface alongside a table.
/// Every chart shares the same base; only the title differs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub legend: String,
    pub point_size: u32,
    pub line_width: u32,
    pub title: String,
}

impl ChartOptions {
    pub fn with_title(title: &str) -> Self {
        Self {
            width: 600,
            height: 300,
            legend: "none".to_string(),
            point_size: 0,
            line_width: 1,
            title: title.to_string(),
        }
    }
}

/// One (time, value) row of a rendered metric series.
#[derive(Debug, Clone, Serialize)]
pub struct ChartRow {
    #[serde(rename = "time")]
    pub time_ms: i64,
    pub value: f64,
}

/// A rendered 2-column time series bound for a named drawing surface:
/// one row per input point, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct ChartTable {
    pub title: String,
    pub container: String,
    pub column: String,
    pub options: ChartOptions,
    pub rows: Vec<ChartRow>,
}
