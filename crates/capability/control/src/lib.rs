use async_trait::async_trait;
use domain::{Brand, RelayNumber, TriggerOutcome, TriggerRequest};
use relay_protocol::{
    DEFAULT_TIMEOUT, ErrorKind, JetsonEmbedDriver, MsrCh340Driver, ProtocolError, RelayDriver,
    Rl02Driver, Rn62Driver,
};
use relay_telemetry::{
    new_trigger_id, record_trigger_failure, record_trigger_issued, record_trigger_latency_ms,
    record_trigger_rejected, record_trigger_success,
};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// 继电器控制错误。
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("Unsupported brand for relay control: {0}")]
    UnsupportedBrand(String),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// 按品牌选定的驱动（构造时确定，之后不再变化）。
#[derive(Debug, Clone)]
pub enum RelayDriverKind {
    Rl02(Rl02Driver),
    Rn62(Rn62Driver),
    JetsonEmbed(JetsonEmbedDriver),
    MsrCh340(MsrCh340Driver),
}

impl RelayDriverKind {
    pub fn for_brand(brand: Brand, http_timeout: Duration) -> Result<Self, ProtocolError> {
        Ok(match brand {
            Brand::Rl02 => Self::Rl02(Rl02Driver::new()),
            Brand::Rn62 => Self::Rn62(Rn62Driver::new()),
            Brand::JetsonEmbed => Self::JetsonEmbed(JetsonEmbedDriver::new()),
            Brand::MsrCh340 => Self::MsrCh340(MsrCh340Driver::with_timeout(http_timeout)?),
        })
    }

    pub fn brand(&self) -> Brand {
        match self {
            Self::Rl02(_) => Brand::Rl02,
            Self::Rn62(_) => Brand::Rn62,
            Self::JetsonEmbed(_) => Brand::JetsonEmbed,
            Self::MsrCh340(_) => Brand::MsrCh340,
        }
    }
}

#[async_trait]
impl RelayDriver for RelayDriverKind {
    async fn trigger(&self, request: &TriggerRequest) -> Result<TriggerOutcome, ProtocolError> {
        match self {
            Self::Rl02(driver) => driver.trigger(request).await,
            Self::Rn62(driver) => driver.trigger(request).await,
            Self::JetsonEmbed(driver) => driver.trigger(request).await,
            Self::MsrCh340(driver) => driver.trigger(request).await,
        }
    }
}

/// 继电器控制入口：按品牌选择驱动并转发触发请求。
///
/// 不重试，也不在每次调用时重新校验品牌。
#[derive(Debug, Clone)]
pub struct RelayControl {
    driver: RelayDriverKind,
}

impl RelayControl {
    /// 按品牌标识创建；未知品牌立即失败。
    pub fn new(brand: &str) -> Result<Self, ControlError> {
        Self::with_http_timeout(brand, DEFAULT_TIMEOUT)
    }

    /// 指定 HTTP 驱动超时创建（TCP 驱动忽略该参数）。
    pub fn with_http_timeout(brand: &str, http_timeout: Duration) -> Result<Self, ControlError> {
        let brand = brand
            .parse::<Brand>()
            .map_err(|_| ControlError::UnsupportedBrand(brand.to_string()))?;
        let driver = RelayDriverKind::for_brand(brand, http_timeout)?;
        info!(target: "relay.control", brand = %brand, "relay_control_created");
        Ok(Self { driver })
    }

    pub fn brand(&self) -> Brand {
        self.driver.brand()
    }

    /// 触发继电器。`relay_number` 为空表示广播（仅部分协议支持）。
    pub async fn trigger_relays(
        &self,
        ip: &str,
        port: u16,
        relay_number: Option<RelayNumber>,
        duration: Option<u32>,
    ) -> Result<TriggerOutcome, ControlError> {
        let request = TriggerRequest {
            ip: ip.to_string(),
            port,
            relay_number,
            duration,
        };
        self.trigger(&request).await
    }

    pub async fn trigger(&self, request: &TriggerRequest) -> Result<TriggerOutcome, ControlError> {
        record_trigger_issued();
        let started_at = Instant::now();
        let trigger_id = new_trigger_id();
        let brand = self.brand();
        let relay = request
            .relay_number
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "all".to_string());
        info!(
            target: "relay.control",
            trigger_id = %trigger_id,
            brand = %brand,
            addr = %request.addr(),
            relay = %relay,
            duration = ?request.duration,
            "trigger_requested"
        );

        let result = self.driver.trigger(request).await;
        record_trigger_latency_ms(started_at.elapsed().as_millis() as u64);
        match &result {
            Ok(outcome) => {
                record_trigger_success();
                info!(
                    target: "relay.control",
                    trigger_id = %trigger_id,
                    brand = %brand,
                    outcome = %outcome.to_json(),
                    "trigger_succeeded"
                );
            }
            Err(err) => {
                record_trigger_failure();
                if err.kind() == ErrorKind::Validation {
                    record_trigger_rejected();
                }
                warn!(
                    target: "relay.control",
                    trigger_id = %trigger_id,
                    brand = %brand,
                    kind = ?err.kind(),
                    error = %err,
                    "trigger_failed"
                );
            }
        }
        result.map_err(ControlError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_brand_builds_its_driver() {
        for brand in Brand::ALL {
            let control = RelayControl::new(brand.as_str()).expect("control");
            assert_eq!(control.brand(), brand);
        }
    }

    #[test]
    fn unknown_brand_fails_at_construction() {
        for brand in ["acme-9000", "", "RL-02"] {
            let err = RelayControl::new(brand).unwrap_err();
            assert!(matches!(err, ControlError::UnsupportedBrand(ref b) if b == brand));
        }
        let err = RelayControl::new("acme-9000").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported brand for relay control: acme-9000"
        );
    }
}
