//! RN-62 驱动（定长二进制指令，TCP）
//!
//! 每路继电器对应一条 9 字节指令；未指定继电器时按表顺序拼接全部指令，无分隔符。

use crate::error::ProtocolError;
use crate::tcp_client::send_command;
use crate::{hex, RelayDriver};
use async_trait::async_trait;
use domain::{RelayNumber, TriggerOutcome, TriggerRequest};
use tracing::debug;

/// 继电器键 → 二进制指令
static BINARY_COMMANDS: [(&str, [u8; 9]); 2] = [
    ("1", [99, 3, 3, 7, 7, 9, 9, 1, 1]),
    ("2", [99, 3, 3, 7, 7, 9, 9, 2, 1]),
];

/// RN-62 驱动
#[derive(Debug, Clone, Copy, Default)]
pub struct Rn62Driver;

impl Rn62Driver {
    pub fn new() -> Self {
        Self
    }

    /// 编码二进制指令
    pub fn encode(relay_number: Option<&RelayNumber>) -> Result<Vec<u8>, ProtocolError> {
        match relay_number {
            Some(relay) => {
                let key = relay.as_key();
                BINARY_COMMANDS
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, command)| command.to_vec())
                    .ok_or_else(|| ProtocolError::InvalidRelayNumber(relay.to_string()))
            }
            None => Ok(BINARY_COMMANDS
                .iter()
                .flat_map(|(_, command)| command.iter().copied())
                .collect()),
        }
    }
}

#[async_trait]
impl RelayDriver for Rn62Driver {
    async fn trigger(&self, request: &TriggerRequest) -> Result<TriggerOutcome, ProtocolError> {
        let command = Self::encode(request.relay_number.as_ref())?;
        let addr = request.addr();
        debug!(target: "relay.protocol", addr = %addr, payload = %hex(&command), "rn62_command_sending");

        let ack = send_command(&addr, &command).await?;
        debug!(target: "relay.protocol", addr = %addr, ack = %hex(&ack), "rn62_ack_received");
        Ok(TriggerOutcome::Acknowledged)
    }
}
