/// 自动化流程 API 客户端
///
/// 封装所有与自动化流程接口相关的调用逻辑
use crate::config::Config;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// 提交接口的响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub ok: bool,
    pub status: u16,
    pub body: String,
}

impl SubmitResponse {
    /// 失败响应的错误描述
    ///
    /// 优先使用响应 JSON 中的 `message`，其次是整段 JSON，最后是状态码
    pub fn error_message(&self) -> String {
        match serde_json::from_str::<Value>(&self.body) {
            Ok(json) => match json.get("message").and_then(|m| m.as_str()) {
                Some(message) => message.to_string(),
                None => json.to_string(),
            },
            Err(_) => format!("Error en la respuesta del servidor: {}", self.status),
        }
    }
}

/// 提交通道
///
/// 核心流程只依赖这个接口，不关心目标地址的认证参数
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// 提交一个批次（JSON 数组）
    async fn submit(&self, endpoint: &str, batch: &Value) -> AppResult<SubmitResponse>;
}

/// 自动化流程客户端
pub struct AutomationClient {
    client: reqwest::Client,
    api_version: String,
    signature: String,
}

impl AutomationClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_version: config.automation_api_version.clone(),
            signature: config.automation_signature.clone(),
        }
    }

    /// 触发器地址需要的查询参数
    fn query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![
            ("api-version", self.api_version.as_str()),
            ("sp", "/triggers/manual/run"),
            ("sv", "1.0"),
        ];
        if !self.signature.is_empty() {
            params.push(("sig", self.signature.as_str()));
        }
        params
    }
}

#[async_trait]
impl SubmissionTransport for AutomationClient {
    async fn submit(&self, endpoint: &str, batch: &Value) -> AppResult<SubmitResponse> {
        debug!("提交 Payload: {}", batch);

        let response = self
            .client
            .post(endpoint)
            .query(&self.query_params())
            .header("Accept", "application/json")
            .json(batch)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        debug!("提交结果: {} {}", status, body);

        Ok(SubmitResponse {
            ok: status.is_success(),
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> SubmitResponse {
        SubmitResponse {
            ok: false,
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_error_message_prefers_json_message() {
        assert_eq!(
            response(400, r#"{"message": "Flujo deshabilitado"}"#).error_message(),
            "Flujo deshabilitado"
        );
        assert_eq!(
            response(400, r#"{"code": 7}"#).error_message(),
            r#"{"code":7}"#
        );
        assert_eq!(
            response(502, "Bad Gateway").error_message(),
            "Error en la respuesta del servidor: 502"
        );
    }

    #[test]
    fn test_signature_only_when_configured() {
        let mut config = Config::default();
        let client = AutomationClient::new(&config);
        assert!(client.query_params().iter().all(|(k, _)| *k != "sig"));

        config.automation_signature = "abc".to_string();
        let client = AutomationClient::new(&config);
        assert!(client.query_params().contains(&("sig", "abc")));
    }
}
