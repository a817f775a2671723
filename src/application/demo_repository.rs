// Repository trait for demo data access
use crate::domain::data_point::DataPoint;
use crate::domain::page::{PageParameters, SimulatedClock};
use async_trait::async_trait;

/// Parameters of one data-endpoint request, per the provider contract:
/// `data?publisher&advertiser&adunit&lookbackHours&endTime`. Absent
/// fields are omitted from the request entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct DataQuery {
    pub publisher: Option<String>,
    pub advertiser: Option<String>,
    pub adunit: Option<String>,
    pub lookback_hours: i64,
    pub end_time_ms: Option<i64>,
}

impl DataQuery {
    /// Build the request for one polling cycle. `endTime` is only carried
    /// in playback mode; real-time mode leaves it to the provider to mean
    /// "now".
    pub fn from_params(params: &PageParameters, clock: Option<&SimulatedClock>) -> Self {
        Self {
            publisher: params.publisher.clone(),
            advertiser: params.advertiser.clone(),
            adunit: params.adunit.clone(),
            lookback_hours: params.lookback_hours,
            end_time_ms: clock.map(|c| c.end_time_ms()),
        }
    }
}

#[async_trait]
pub trait DemoDataRepository: Send + Sync {
    /// Fetch the dimension demo's typed measurement window.
    async fn fetch_data_points(&self, demo: &str, query: &DataQuery)
        -> anyhow::Result<Vec<DataPoint>>;

    /// Fetch an arbitrary demo endpoint as raw JSON (passthrough routes).
    async fn fetch_raw(
        &self,
        demo: &str,
        endpoint: &str,
        params: &[(String, String)],
    ) -> anyhow::Result<serde_json::Value>;
}
