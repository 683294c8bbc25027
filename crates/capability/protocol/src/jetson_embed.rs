//! Jetson 嵌入式控制板驱动（单字节，TCP）
//!
//! 指令为一个 ASCII 数字字符，没有帧头帧尾，也没有广播模式。

use crate::error::ProtocolError;
use crate::tcp_client::send_command;
use crate::RelayDriver;
use async_trait::async_trait;
use domain::{RelayNumber, TriggerOutcome, TriggerRequest};
use tracing::debug;

static RELAY_COMMANDS: [(&str, u8); 5] = [
    ("1", b'1'),
    ("2", b'2'),
    ("3", b'3'),
    ("4", b'4'),
    ("5", b'5'),
];

/// Jetson Embed 驱动
#[derive(Debug, Clone, Copy, Default)]
pub struct JetsonEmbedDriver;

impl JetsonEmbedDriver {
    pub fn new() -> Self {
        Self
    }

    /// 编码单字节指令；继电器编号必填
    pub fn encode(relay_number: Option<&RelayNumber>) -> Result<u8, ProtocolError> {
        let relay = relay_number.ok_or(ProtocolError::MissingRelayNumber)?;
        let key = relay.as_key();
        RELAY_COMMANDS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, command)| *command)
            .ok_or_else(|| ProtocolError::InvalidRelayNumber(relay.to_string()))
    }
}

#[async_trait]
impl RelayDriver for JetsonEmbedDriver {
    /// 时长参数对本协议无意义，忽略
    async fn trigger(&self, request: &TriggerRequest) -> Result<TriggerOutcome, ProtocolError> {
        let command = Self::encode(request.relay_number.as_ref())?;
        let addr = request.addr();
        debug!(
            target: "relay.protocol",
            addr = %addr,
            payload = %char::from(command),
            "jetson_command_sending"
        );

        let ack = send_command(&addr, &[command]).await?;
        debug!(
            target: "relay.protocol",
            addr = %addr,
            ack = %String::from_utf8_lossy(&ack),
            "jetson_ack_received"
        );
        Ok(TriggerOutcome::Acknowledged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_digit() {
        assert_eq!(JetsonEmbedDriver::encode(Some(&RelayNumber::from("3"))).unwrap(), b'3');
        assert_eq!(JetsonEmbedDriver::encode(Some(&RelayNumber::Index(5))).unwrap(), b'5');
    }

    #[test]
    fn missing_and_invalid_are_distinct() {
        let err = JetsonEmbedDriver::encode(None).unwrap_err();
        assert!(matches!(err, ProtocolError::MissingRelayNumber));
        assert_eq!(err.to_string(), "No relay number provided");

        let err = JetsonEmbedDriver::encode(Some(&RelayNumber::from("9"))).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidRelayNumber(_)));

        let err = JetsonEmbedDriver::encode(Some(&RelayNumber::Index(0))).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidRelayNumber(_)));
    }
}
