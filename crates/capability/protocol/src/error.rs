//! 协议错误类型定义

use std::time::Duration;

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 入参校验失败，未发生任何网络 IO
    Validation,
    /// 连接被拒绝、重置或提前关闭
    Transport,
    /// 响应无法解析或设备返回错误状态
    Protocol,
    /// 请求超时（仅 HTTP）
    Timeout,
}

/// 协议驱动错误
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// 继电器编号不在命令表中
    #[error("Invalid relay number: {0}")]
    InvalidRelayNumber(String),

    /// 协议要求继电器编号但未提供
    #[error("No relay number provided")]
    MissingRelayNumber,

    /// 协议要求脉冲时长但未提供
    #[error("No duration provided")]
    MissingDuration,

    /// IO 错误
    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),

    /// 设备在回执前关闭连接
    #[error("connection closed before acknowledgement")]
    ConnectionClosed,

    /// HTTP 传输错误
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// 设备返回非 200 状态
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("undefined"))]
    Status { status: u16, message: Option<String> },

    /// 响应体不是合法 JSON
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// 超时错误
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),
}

impl ProtocolError {
    /// 错误分类
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProtocolError::InvalidRelayNumber(_)
            | ProtocolError::MissingRelayNumber
            | ProtocolError::MissingDuration => ErrorKind::Validation,
            ProtocolError::Io(_) | ProtocolError::ConnectionClosed | ProtocolError::Http(_) => {
                ErrorKind::Transport
            }
            ProtocolError::Status { .. } | ProtocolError::Parse(_) => ErrorKind::Protocol,
            ProtocolError::Timeout(_) => ErrorKind::Timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_embeds_code_and_message() {
        let err = ProtocolError::Status {
            status: 404,
            message: Some("not found".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 404: not found");
        assert_eq!(err.kind(), ErrorKind::Protocol);

        let err = ProtocolError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 500: undefined");
    }

    #[test]
    fn validation_errors_are_classified() {
        assert_eq!(
            ProtocolError::InvalidRelayNumber("9".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(ProtocolError::MissingRelayNumber.kind(), ErrorKind::Validation);
        assert_eq!(ProtocolError::MissingDuration.kind(), ErrorKind::Validation);
        assert_eq!(ProtocolError::ConnectionClosed.kind(), ErrorKind::Transport);
        assert_eq!(
            ProtocolError::Timeout(Duration::from_secs(30)).kind(),
            ErrorKind::Timeout
        );
    }
}
