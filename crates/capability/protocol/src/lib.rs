//! # 继电器协议驱动模块
//!
//! 将统一的触发指令（"触发第 N 路继电器 D 秒，或全部继电器"）编码为各品牌
//! 硬件要求的线协议，并把设备回执解释为成功或失败：
//! - **RL-02**：ASCII 标签帧，TCP
//! - **RN-62**：定长二进制指令，TCP
//! - **Jetson Embed**：单字节数字，TCP
//! - **MSR-CH340**：JSON over HTTP
//!
//! ## 架构设计
//!
//! ```text
//! TriggerRequest (ip, port, relay_number?, duration?)
//!       │
//!       ▼
//! RelayDriver::trigger
//!       │
//!       ├── Rl02Driver        ─┐
//!       ├── Rn62Driver         ├── tcp_client::send_command
//!       ├── JetsonEmbedDriver ─┘
//!       └── MsrCh340Driver ──── POST /trigger
//!       │
//!       ▼
//! TriggerOutcome / ProtocolError
//! ```
//!
//! ## 线协议格式
//!
//! ```text
//! RL-02         <RL_BEGIN><RL3>5</RL3><RL_END>
//! RN-62         63 03 03 07 07 09 09 01 01
//! Jetson Embed  3
//! MSR-CH340     POST /trigger {"relayNumber":3}
//! ```
//!
//! 每次触发独立建立并关闭连接，驱动本身不保存任何连接或继电器状态。

mod error;
mod jetson_embed;
mod msr_ch340;
mod rl02;
mod rn62;
mod tcp_client;

pub use error::{ErrorKind, ProtocolError};
pub use jetson_embed::JetsonEmbedDriver;
pub use msr_ch340::{DEFAULT_TIMEOUT, ENDPOINT_PATH, MsrCh340Driver};
pub use rl02::{RELAY_COUNT, Rl02Driver};
pub use rn62::Rn62Driver;

use async_trait::async_trait;
use domain::{TriggerOutcome, TriggerRequest};

/// 继电器驱动：所有品牌驱动共同实现的触发契约。
///
/// 校验失败时不发生任何网络 IO；否则每次调用恰好建立一个连接。
#[async_trait]
pub trait RelayDriver: Send + Sync {
    async fn trigger(&self, request: &TriggerRequest) -> Result<TriggerOutcome, ProtocolError>;
}

/// 十六进制展示（日志用）
pub(crate) fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
