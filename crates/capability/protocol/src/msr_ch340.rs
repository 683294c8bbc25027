//! MSR-CH340 驱动（JSON over HTTP）
//!
//! 向 `http://{ip}:{port}/trigger` 发送 `{"relayNumber": <编号或 null>}`，
//! 读取完整响应体并按 JSON 解析：
//! - 200 → 返回解析后的响应体
//! - 非 200 → `HTTP {status}: {message}`
//! - 响应体非法 → 解析错误（任意状态码）
//!
//! 整个请求受超时约束（默认 30 秒），超时后请求被中止，不重试。

use crate::error::ProtocolError;
use crate::RelayDriver;
use async_trait::async_trait;
use domain::{RelayNumber, TriggerOutcome, TriggerRequest};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::net::Ipv6Addr;
use std::time::Duration;
use tracing::{debug, warn};

/// 设备触发接口路径
pub const ENDPOINT_PATH: &str = "/trigger";

/// 默认请求超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerBody<'a> {
    relay_number: Option<&'a RelayNumber>,
}

/// MSR-CH340 驱动
#[derive(Debug, Clone)]
pub struct MsrCh340Driver {
    client: Client,
    timeout: Duration,
}

impl MsrCh340Driver {
    /// 使用默认超时创建
    pub fn new() -> Result<Self, ProtocolError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// 指定超时创建
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProtocolError> {
        // 设备位于局域网内，直连不走系统代理
        let client = Client::builder().no_proxy().build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 编码请求体
    pub fn encode(relay_number: Option<&RelayNumber>) -> Result<Vec<u8>, ProtocolError> {
        let body = TriggerBody { relay_number };
        Ok(serde_json::to_vec(&body)?)
    }

    /// 设备触发地址；IPv6 字面量需加方括号
    pub fn endpoint(ip: &str, port: u16) -> String {
        if ip.parse::<Ipv6Addr>().is_ok() {
            format!("http://[{}]:{}{}", ip, port, ENDPOINT_PATH)
        } else {
            format!("http://{}:{}{}", ip, port, ENDPOINT_PATH)
        }
    }

    async fn exchange(&self, url: &str, body: Vec<u8>) -> Result<Value, ProtocolError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let value: Value = serde_json::from_slice(&bytes)?;
        debug!(target: "relay.protocol", url = %url, status = status.as_u16(), response = %value, "msr_response_received");

        if status == StatusCode::OK {
            Ok(value)
        } else {
            Err(ProtocolError::Status {
                status: status.as_u16(),
                message: response_message(&value),
            })
        }
    }
}

#[async_trait]
impl RelayDriver for MsrCh340Driver {
    async fn trigger(&self, request: &TriggerRequest) -> Result<TriggerOutcome, ProtocolError> {
        let body = Self::encode(request.relay_number.as_ref())?;
        let url = Self::endpoint(&request.ip, request.port);
        debug!(
            target: "relay.protocol",
            url = %url,
            payload = %String::from_utf8_lossy(&body),
            "msr_request_sending"
        );

        match tokio::time::timeout(self.timeout, self.exchange(&url, body)).await {
            Ok(Ok(value)) => Ok(TriggerOutcome::Response(value)),
            Ok(Err(e)) => {
                warn!(target: "relay.protocol", url = %url, error = %e, "msr_request_failed");
                Err(e)
            }
            Err(_) => {
                warn!(target: "relay.protocol", url = %url, timeout = ?self.timeout, "msr_request_timeout");
                Err(ProtocolError::Timeout(self.timeout))
            }
        }
    }
}

/// 提取错误响应中的 message 字段
fn response_message(value: &Value) -> Option<String> {
    match value.get("message")? {
        Value::String(message) => Some(message.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_relay_number_or_null() {
        let body = MsrCh340Driver::encode(Some(&RelayNumber::Index(3))).unwrap();
        assert_eq!(body, br#"{"relayNumber":3}"#);

        let body = MsrCh340Driver::encode(Some(&RelayNumber::from("2"))).unwrap();
        assert_eq!(body, br#"{"relayNumber":"2"}"#);

        let body = MsrCh340Driver::encode(None).unwrap();
        assert_eq!(body, br#"{"relayNumber":null}"#);
    }

    #[test]
    fn builds_endpoint() {
        assert_eq!(
            MsrCh340Driver::endpoint("10.0.0.7", 9747),
            "http://10.0.0.7:9747/trigger"
        );
        assert_eq!(MsrCh340Driver::endpoint("::1", 80), "http://[::1]:80/trigger");
        assert_eq!(
            MsrCh340Driver::endpoint("fe80::1", 9747),
            "http://[fe80::1]:9747/trigger"
        );
        assert_eq!(
            MsrCh340Driver::endpoint("relay.local", 8080),
            "http://relay.local:8080/trigger"
        );
    }

    #[test]
    fn extracts_message() {
        let value = serde_json::json!({ "message": "not found" });
        assert_eq!(response_message(&value).as_deref(), Some("not found"));
        assert_eq!(response_message(&serde_json::json!({ "status": "error" })), None);
        assert_eq!(response_message(&serde_json::json!([1, 2])), None);
    }
}
