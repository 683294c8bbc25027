//! 单次继电器触发工具：从环境变量读取品牌与目标设备，触发一次后退出。

use relay_config::RelayConfig;
use relay_control::RelayControl;
use relay_telemetry::{init_tracing, metrics};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = RelayConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let control = RelayControl::with_http_timeout(
        &config.brand,
        Duration::from_secs(config.http_timeout_seconds),
    )?;
    let outcome = control
        .trigger_relays(
            &config.host,
            config.port,
            config.relay_number.clone(),
            config.duration,
        )
        .await?;

    let snapshot = metrics().snapshot();
    info!(
        target: "relay.trigger",
        latency_ms = snapshot.trigger_latency_ms_total,
        "trigger_finished"
    );
    println!("{}", serde_json::to_string(&outcome.to_json())?);
    Ok(())
}
