//! ChEMBL API 客户端
//!
//! 封装对 `activity.json` 分页接口的调用

use crate::clients::ActivitySource;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::ActivityPage;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::debug;

/// ChEMBL 客户端
pub struct ChemblClient {
    base_url: String,
    client: Client,
}

impl ChemblClient {
    /// 根据配置创建客户端（固定请求头和超时）
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| ApiError::ClientBuildFailed(format!("非法的 User-Agent: {}", e)))?;
        headers.insert(USER_AGENT, user_agent);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::ClientBuildFailed(e.to_string()))?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// activity 接口地址
    pub fn activity_url(&self) -> String {
        format!("{}/activity.json", self.base_url)
    }
}

#[async_trait]
impl ActivitySource for ChemblClient {
    async fn fetch_page(
        &self,
        target_chembl_id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<ActivityPage, ApiError> {
        let limit_param = limit.to_string();
        let offset_param = offset.to_string();

        debug!("请求 {} offset={} limit={}", self.activity_url(), offset, limit);

        let response = self
            .client
            .get(self.activity_url())
            .query(&[
                ("target_chembl_id", target_chembl_id),
                ("limit", limit_param.as_str()),
                ("offset", offset_param.as_str()),
            ])
            .send()
            .await
            .map_err(|source| ApiError::RequestFailed { offset, source })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::BadStatus {
                offset,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::RequestFailed { offset, source })?;

        let page: ActivityPage = serde_json::from_slice(&body)
            .map_err(|source| ApiError::JsonParseFailed { offset, source })?;

        debug!("offset={} 返回 {} 条记录", offset, page.activities.len());

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_url_trims_trailing_slash() {
        let config = Config {
            api_base_url: "https://www.ebi.ac.uk/chembl/api/data/".to_string(),
            ..Config::default()
        };
        let client = ChemblClient::new(&config).unwrap();
        assert_eq!(client.activity_url(), "https://www.ebi.ac.uk/chembl/api/data/activity.json");
    }

    #[test]
    fn test_invalid_user_agent_is_rejected() {
        let config = Config {
            user_agent: "bad\nagent".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            ChemblClient::new(&config),
            Err(ApiError::ClientBuildFailed(_))
        ));
    }
}
