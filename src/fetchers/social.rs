use crate::errors::{ChartFrameError, Result};
use crate::fetchers::base::ProfileSource;
use crate::models::token::{ResolvedSymbol, UserProfile};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const SOCIAL_PROFILE_QUERY: &str = "\
query FanTokenHolder($symbol: String!) {
  Socials(input: { filter: { fanTokenSymbol: { _eq: $symbol } }, blockchain: ethereum }) {
    Social {
      profileName
      profileDisplayName
      profileImage
      profileImageContentValue {
        image {
          extraSmall
        }
      }
    }
  }
}";

/// 社交档案抓取器，按token symbol取展示信息
pub struct SocialProfileFetcher {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl SocialProfileFetcher {
    /// 创建新的档案抓取器
    pub fn new(endpoint: &str, api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(ChartFrameError::RequestError)?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl ProfileSource for SocialProfileFetcher {
    async fn fetch_profile(&self, symbol: &ResolvedSymbol) -> Result<Option<UserProfile>> {
        let query_key = symbol.query_key();
        debug!("获取 {} 的用户档案", query_key);

        let mut request = self.client.post(&self.endpoint).json(&json!({
            "query": SOCIAL_PROFILE_QUERY,
            "variables": { "symbol": query_key },
        }));

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", key);
        }

        let response = request.send().await.map_err(ChartFrameError::RequestError)?;
        let body: Value = response.json().await?;

        parse_profile(&body)
    }
}

/// 解析档案响应；无匹配档案返回None，属于合法结果
pub(crate) fn parse_profile(body: &Value) -> Result<Option<UserProfile>> {
    if let Some(errors) = body.get("errors") {
        return Err(ChartFrameError::GraphError(errors.to_string()));
    }

    let socials = match body.pointer("/data/Socials/Social").and_then(Value::as_array) {
        Some(list) => list,
        None => return Ok(None),
    };

    let social = match socials.first() {
        Some(social) => social,
        None => return Ok(None),
    };

    let handle = social
        .get("profileName")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let display_name = social
        .get("profileDisplayName")
        .and_then(Value::as_str)
        .unwrap_or(&handle)
        .to_string();

    // 优先用小尺寸变体，缺失时退回原始头像
    let avatar_url = social
        .pointer("/profileImageContentValue/image/extraSmall")
        .and_then(Value::as_str)
        .or_else(|| social.get("profileImage").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();

    Ok(Some(UserProfile {
        handle,
        display_name,
        avatar_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_profile_with_size_variant() {
        let body: Value = serde_json::from_str(
            r#"{"data":{"Socials":{"Social":[{
                "profileName":"alice",
                "profileDisplayName":"Alice",
                "profileImage":"https://img.example/full.png",
                "profileImageContentValue":{"image":{"extraSmall":"https://img.example/xs.png"}}
            }]}}}"#,
        )
        .unwrap();

        let profile = parse_profile(&body).unwrap().unwrap();
        assert_eq!(profile.handle, "alice");
        assert_eq!(profile.display_name, "Alice");
        assert_eq!(profile.avatar_url, "https://img.example/xs.png");
    }

    #[test]
    fn falls_back_to_plain_profile_image() {
        let body: Value = serde_json::from_str(
            r#"{"data":{"Socials":{"Social":[{
                "profileName":"bob",
                "profileDisplayName":"Bob",
                "profileImage":"https://img.example/full.png"
            }]}}}"#,
        )
        .unwrap();

        let profile = parse_profile(&body).unwrap().unwrap();
        assert_eq!(profile.avatar_url, "https://img.example/full.png");
    }

    #[test]
    fn missing_profile_is_none_not_error() {
        let body: Value =
            serde_json::from_str(r#"{"data":{"Socials":{"Social":[]}}}"#).unwrap();
        assert!(parse_profile(&body).unwrap().is_none());

        let body: Value = serde_json::from_str(r#"{"data":{"Socials":null}}"#).unwrap();
        assert!(parse_profile(&body).unwrap().is_none());
    }

    #[test]
    fn graphql_errors_are_reported() {
        let body: Value =
            serde_json::from_str(r#"{"errors":[{"message":"denied"}]}"#).unwrap();
        assert!(parse_profile(&body).is_err());
    }
}
