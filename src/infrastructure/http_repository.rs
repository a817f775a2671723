// HTTP data provider repository implementation
use crate::application::demo_repository::{DataQuery, DemoDataRepository};
use crate::domain::data_point::DataPoint;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Data provider adapter: the demos' data routes and pollers both read
/// from one upstream host that serves `/{demo}/{endpoint}` JSON.
#[derive(Debug, Clone)]
pub struct HttpDataRepository {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDataRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn build_url(&self, demo: &str, endpoint: &str, params: &[(String, String)]) -> String {
        let mut url = format!("{}/{}/{}", self.base_url, demo, endpoint);
        let mut separator = '?';
        for (key, value) in params {
            url.push(separator);
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            separator = '&';
        }
        url
    }

    /// Provider contract: absent filters are omitted, not sent empty.
    fn data_params(query: &DataQuery) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(publisher) = &query.publisher {
            params.push(("publisher".to_string(), publisher.clone()));
        }
        if let Some(advertiser) = &query.advertiser {
            params.push(("advertiser".to_string(), advertiser.clone()));
        }
        if let Some(adunit) = &query.adunit {
            params.push(("adunit".to_string(), adunit.clone()));
        }
        params.push(("lookbackHours".to_string(), query.lookback_hours.to_string()));
        if let Some(end_time) = query.end_time_ms {
            params.push(("endTime".to_string(), end_time.to_string()));
        }
        params
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl DemoDataRepository for HttpDataRepository {
    async fn fetch_data_points(
        &self,
        demo: &str,
        query: &DataQuery,
    ) -> Result<Vec<DataPoint>> {
        let url = self.build_url(demo, "data", &Self::data_params(query));
        tracing::debug!("fetching data window from {}", url);

        let points = self
            .get_json(&url)
            .await
            .with_context(|| format!("fetching {} data window", demo))?;
        Ok(points)
    }

    async fn fetch_raw(
        &self,
        demo: &str,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<serde_json::Value> {
        let url = self.build_url(demo, endpoint, params);
        let value = self
            .get_json(&url)
            .await
            .with_context(|| format!("fetching {}/{}", demo, endpoint))?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_values() {
        let repository = HttpDataRepository::new("http://localhost:9090/".to_string());
        let url = repository.build_url(
            "siteops",
            "topUrlData",
            &[("url".to_string(), "/a b".to_string())],
        );
        assert_eq!(url, "http://localhost:9090/siteops/topUrlData?url=%2Fa%20b");
    }

    #[test]
    fn test_data_params_omit_absent_fields() {
        let query = DataQuery {
            publisher: Some("3".to_string()),
            advertiser: None,
            adunit: None,
            lookback_hours: 2,
            end_time_ms: None,
        };
        assert_eq!(
            HttpDataRepository::data_params(&query),
            vec![
                ("publisher".to_string(), "3".to_string()),
                ("lookbackHours".to_string(), "2".to_string()),
            ]
        );

        let query = DataQuery {
            publisher: None,
            advertiser: None,
            adunit: None,
            lookback_hours: 2,
            end_time_ms: Some(12_000),
        };
        assert_eq!(
            HttpDataRepository::data_params(&query),
            vec![
                ("lookbackHours".to_string(), "2".to_string()),
                ("endTime".to_string(), "12000".to_string()),
            ]
        );
    }
}
