//! 继电器控制领域模型：品牌、继电器编号、触发请求与结果。

use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// 继电器硬件品牌（决定使用哪种线协议）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brand {
    /// RL-02：ASCII 标签帧，TCP
    Rl02,
    /// RN-62：定长二进制指令，TCP
    Rn62,
    /// Jetson 嵌入式控制板：单字节数字，TCP
    JetsonEmbed,
    /// MSR-CH340：JSON over HTTP
    MsrCh340,
}

impl Brand {
    /// 全部受支持的品牌。
    pub const ALL: [Brand; 4] = [
        Brand::Rl02,
        Brand::Rn62,
        Brand::JetsonEmbed,
        Brand::MsrCh340,
    ];

    /// 品牌标识字符串（区分大小写）。
    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Rl02 => "rl-02",
            Brand::Rn62 => "rn-62",
            Brand::JetsonEmbed => "jetson-embed",
            Brand::MsrCh340 => "MSR-CH340",
        }
    }
}

impl FromStr for Brand {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Brand::ALL
            .into_iter()
            .find(|brand| brand.as_str() == value)
            .ok_or_else(|| DomainError::UnsupportedBrand(value.to_string()))
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 继电器编号：整数索引或字符串键。
///
/// 设备侧对两种写法都接受：整数 `1` 与键 `"1"` 指向同一个继电器，
/// 字符串 `"3"` 在按索引寻址的协议里按数值比较。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayNumber {
    Index(i64),
    Key(String),
}

impl RelayNumber {
    /// 按命令表键查找时使用的字符串形式。
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            RelayNumber::Index(index) => Cow::Owned(index.to_string()),
            RelayNumber::Key(key) => Cow::Borrowed(key.as_str()),
        }
    }

    /// 按索引寻址时使用的数值形式；非数字键返回 None。
    pub fn as_index(&self) -> Option<i64> {
        match self {
            RelayNumber::Index(index) => Some(*index),
            RelayNumber::Key(key) => key.trim().parse::<i64>().ok(),
        }
    }
}

impl From<i64> for RelayNumber {
    fn from(value: i64) -> Self {
        RelayNumber::Index(value)
    }
}

impl From<i32> for RelayNumber {
    fn from(value: i32) -> Self {
        RelayNumber::Index(i64::from(value))
    }
}

impl From<&str> for RelayNumber {
    fn from(value: &str) -> Self {
        RelayNumber::Key(value.to_string())
    }
}

impl From<String> for RelayNumber {
    fn from(value: String) -> Self {
        RelayNumber::Key(value)
    }
}

impl FromStr for RelayNumber {
    type Err = DomainError;

    /// 纯整数文本解析为索引，其余非空文本保留为键。
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRelayText(value.to_string()));
        }
        match trimmed.parse::<i64>() {
            Ok(index) => Ok(RelayNumber::Index(index)),
            Err(_) => Ok(RelayNumber::Key(trimmed.to_string())),
        }
    }
}

impl fmt::Display for RelayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayNumber::Index(index) => write!(f, "{}", index),
            RelayNumber::Key(key) => f.write_str(key),
        }
    }
}

/// 单次触发请求。
///
/// `relay_number` 为空表示广播到驱动已知的全部继电器；
/// `duration` 只对编码脉冲时长的协议有意义。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRequest {
    pub ip: String,
    pub port: u16,
    pub relay_number: Option<RelayNumber>,
    pub duration: Option<u32>,
}

impl TriggerRequest {
    pub fn new(ip: impl Into<String>, port: u16) -> Self {
        Self {
            ip: ip.into(),
            port,
            relay_number: None,
            duration: None,
        }
    }

    pub fn with_relay(mut self, relay_number: impl Into<RelayNumber>) -> Self {
        self.relay_number = Some(relay_number.into());
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    /// `host:port` 形式的目标地址。
    pub fn addr(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

/// 触发结果。
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// 设备已回执（TCP 协议收到首个数据块）
    Acknowledged,
    /// HTTP 设备返回的 JSON 响应体
    Response(serde_json::Value),
}

impl TriggerOutcome {
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, TriggerOutcome::Acknowledged)
    }

    /// 以 JSON 表示结果：回执为 `true`，HTTP 响应原样返回。
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            TriggerOutcome::Acknowledged => serde_json::Value::Bool(true),
            TriggerOutcome::Response(value) => value.clone(),
        }
    }
}
