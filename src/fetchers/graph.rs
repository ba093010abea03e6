use crate::errors::{ChartFrameError, Result};
use crate::fetchers::base::SnapshotSource;
use crate::models::token::{PriceSnapshot, ResolvedSymbol};
use crate::util;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const HOURLY_SNAPSHOTS_QUERY: &str = "\
query HourlySnapshots($symbol: String!) {
  subjectTokens(where: { symbol: $symbol }) {
    hourlySnapshots(orderBy: endTimestamp, orderDirection: asc, first: 1000) {
      endTimestamp
      endPrice
    }
  }
}";

/// 价格历史抓取器，查询subject token的小时快照
pub struct SubgraphSnapshotFetcher {
    client: Client,
    endpoint: String,
}

impl SubgraphSnapshotFetcher {
    /// 创建新的快照抓取器
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(ChartFrameError::RequestError)?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl SnapshotSource for SubgraphSnapshotFetcher {
    async fn fetch_snapshots(&self, symbol: &ResolvedSymbol) -> Result<Vec<PriceSnapshot>> {
        let query_key = symbol.query_key();
        debug!("获取 {} 的小时快照", query_key);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "query": HOURLY_SNAPSHOTS_QUERY,
                "variables": { "symbol": query_key },
            }))
            .send()
            .await
            .map_err(ChartFrameError::RequestError)?;

        let body: Value = response.json().await?;
        let snapshots = parse_snapshots(&body)?;

        info!("获取到 {} 条快照记录: {}", snapshots.len(), query_key);
        Ok(snapshots)
    }
}

/// 解析GraphQL响应，时间戳和价格均为字符串编码
///
/// subjectTokens为空数组是合法结果（token尚未创建），返回空序列；
/// 字段缺失或数值解析失败按上游故障处理。
pub(crate) fn parse_snapshots(body: &Value) -> Result<Vec<PriceSnapshot>> {
    if let Some(errors) = body.get("errors") {
        return Err(ChartFrameError::GraphError(errors.to_string()));
    }

    let tokens = body
        .pointer("/data/subjectTokens")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ChartFrameError::DataError("Missing subjectTokens in response".to_string())
        })?;

    let mut snapshots = Vec::new();
    if let Some(raw_snapshots) = tokens
        .first()
        .and_then(|token| token.get("hourlySnapshots"))
        .and_then(Value::as_array)
    {
        for record in raw_snapshots {
            let timestamp_raw = record
                .get("endTimestamp")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ChartFrameError::DataError("Missing endTimestamp in snapshot".to_string())
                })?;
            let price_raw = record.get("endPrice").and_then(Value::as_str).ok_or_else(|| {
                ChartFrameError::DataError("Missing endPrice in snapshot".to_string())
            })?;

            snapshots.push(PriceSnapshot {
                timestamp: util::parse_epoch_seconds(timestamp_raw)?,
                price: util::parse_price(price_raw)?,
            });
        }
    }

    // 确保按时间升序
    snapshots.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_encoded_records() {
        let body: Value = serde_json::from_str(
            r#"{"data":{"subjectTokens":[{"hourlySnapshots":[
                {"endTimestamp":"1723766400","endPrice":"0.0421"},
                {"endTimestamp":"1723770000","endPrice":"0.0450"}
            ]}]}}"#,
        )
        .unwrap();

        let snapshots = parse_snapshots(&body).unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].timestamp, 1723766400);
        assert_eq!(snapshots[0].price, 0.0421);
        assert_eq!(snapshots[1].timestamp, 1723770000);
    }

    #[test]
    fn empty_subject_tokens_is_a_valid_empty_series() {
        let body: Value =
            serde_json::from_str(r#"{"data":{"subjectTokens":[]}}"#).unwrap();
        assert!(parse_snapshots(&body).unwrap().is_empty());
    }

    #[test]
    fn out_of_order_records_are_sorted_ascending() {
        let body: Value = serde_json::from_str(
            r#"{"data":{"subjectTokens":[{"hourlySnapshots":[
                {"endTimestamp":"200","endPrice":"2.0"},
                {"endTimestamp":"100","endPrice":"1.0"}
            ]}]}}"#,
        )
        .unwrap();

        let snapshots = parse_snapshots(&body).unwrap();
        assert_eq!(snapshots[0].timestamp, 100);
        assert_eq!(snapshots[1].timestamp, 200);
    }

    #[test]
    fn unparsable_price_is_an_upstream_failure() {
        let body: Value = serde_json::from_str(
            r#"{"data":{"subjectTokens":[{"hourlySnapshots":[
                {"endTimestamp":"100","endPrice":"not-a-price"}
            ]}]}}"#,
        )
        .unwrap();
        assert!(parse_snapshots(&body).is_err());
    }

    #[test]
    fn graphql_errors_are_reported() {
        let body: Value =
            serde_json::from_str(r#"{"errors":[{"message":"boom"}]}"#).unwrap();
        assert!(matches!(
            parse_snapshots(&body),
            Err(ChartFrameError::GraphError(_))
        ));
    }

    #[test]
    fn missing_data_section_is_an_error() {
        let body: Value = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert!(parse_snapshots(&body).is_err());
    }
}
