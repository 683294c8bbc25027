//! RL-02 驱动（ASCII 标签帧，TCP）
//!
//! 帧格式：`<RL_BEGIN>` + (`<RLk>` + 时长 + `</RLk>`)* + `<RL_END>`。
//! 指定继电器时只发一个片段；未指定时按 0..15 升序广播全部继电器。

use crate::error::ProtocolError;
use crate::tcp_client::send_command;
use crate::RelayDriver;
use async_trait::async_trait;
use domain::{RelayNumber, TriggerOutcome, TriggerRequest};
use tracing::debug;

/// 继电器路数
pub const RELAY_COUNT: i64 = 16;

const RELAY_BEGIN_COMMAND: &str = "<RL_BEGIN>";
const RELAY_END_COMMAND: &str = "<RL_END>";

/// RL-02 驱动
#[derive(Debug, Clone, Copy, Default)]
pub struct Rl02Driver;

impl Rl02Driver {
    pub fn new() -> Self {
        Self
    }

    /// 编码 ASCII 指令
    pub fn encode(
        relay_number: Option<&RelayNumber>,
        duration: Option<u32>,
    ) -> Result<String, ProtocolError> {
        let indices = match relay_number {
            Some(relay) => {
                let index = relay
                    .as_index()
                    .filter(|index| (0..RELAY_COUNT).contains(index))
                    .ok_or_else(|| ProtocolError::InvalidRelayNumber(relay.to_string()))?;
                index..index + 1
            }
            None => 0..RELAY_COUNT,
        };
        let duration = duration.ok_or(ProtocolError::MissingDuration)?;

        let mut command = String::from(RELAY_BEGIN_COMMAND);
        for index in indices {
            command.push_str(&format!("<RL{index}>{duration}</RL{index}>"));
        }
        command.push_str(RELAY_END_COMMAND);
        Ok(command)
    }
}

#[async_trait]
impl RelayDriver for Rl02Driver {
    async fn trigger(&self, request: &TriggerRequest) -> Result<TriggerOutcome, ProtocolError> {
        let command = Self::encode(request.relay_number.as_ref(), request.duration)?;
        let addr = request.addr();
        debug!(target: "relay.protocol", addr = %addr, payload = %command, "rl02_command_sending");

        let ack = send_command(&addr, command.as_bytes()).await?;
        debug!(
            target: "relay.protocol",
            addr = %addr,
            ack = %String::from_utf8_lossy(&ack),
            "rl02_ack_received"
        );
        Ok(TriggerOutcome::Acknowledged)
    }
}
