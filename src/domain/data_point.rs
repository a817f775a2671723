// Measurement record domain model
use serde::{Deserialize, Serialize};

fn missing_metric() -> f64 {
    f64::NAN
}

/// One provider-supplied measurement for a given timestamp, in the
/// ads-dimensions shape.
///
/// `timestamp` is mandatory; a metric field absent from the payload
/// deserializes as NaN and flows through the renderers unchanged.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataPoint {
    pub timestamp: i64,
    #[serde(default = "missing_metric")]
    pub cost: f64,
    #[serde(default = "missing_metric")]
    pub revenue: f64,
    #[serde(default = "missing_metric")]
    pub clicks: f64,
    #[serde(default = "missing_metric")]
    pub impressions: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_point_deserializes() {
        let point: DataPoint = serde_json::from_str(
            r#"{"timestamp":1700000000000,"cost":1.5,"revenue":0.75,"clicks":10,"impressions":400}"#,
        )
        .unwrap();
        assert_eq!(point.timestamp, 1_700_000_000_000);
        assert_eq!(point.cost, 1.5);
        assert_eq!(point.impressions, 400.0);
    }

    #[test]
    fn test_missing_metric_becomes_nan() {
        let point: DataPoint =
            serde_json::from_str(r#"{"timestamp":1,"cost":2.0}"#).unwrap();
        assert!(point.revenue.is_nan());
        assert!(point.clicks.is_nan());
        assert!(point.impressions.is_nan());
    }

    #[test]
    fn test_missing_timestamp_is_rejected() {
        let result: Result<DataPoint, _> = serde_json::from_str(r#"{"cost":2.0}"#);
        assert!(result.is_err());
    }
}
