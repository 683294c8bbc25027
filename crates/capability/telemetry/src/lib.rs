//! 日志初始化、触发 ID 与基础指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub triggers_issued: u64,
    pub trigger_success: u64,
    pub trigger_failure: u64,
    pub trigger_rejected: u64,
    pub trigger_latency_ms_total: u64,
    pub trigger_latency_ms_count: u64,
}

/// 基础指标。
pub struct TelemetryMetrics {
    triggers_issued: AtomicU64,
    trigger_success: AtomicU64,
    trigger_failure: AtomicU64,
    trigger_rejected: AtomicU64,
    trigger_latency_ms_total: AtomicU64,
    trigger_latency_ms_count: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            triggers_issued: AtomicU64::new(0),
            trigger_success: AtomicU64::new(0),
            trigger_failure: AtomicU64::new(0),
            trigger_rejected: AtomicU64::new(0),
            trigger_latency_ms_total: AtomicU64::new(0),
            trigger_latency_ms_count: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            triggers_issued: self.triggers_issued.load(Ordering::Relaxed),
            trigger_success: self.trigger_success.load(Ordering::Relaxed),
            trigger_failure: self.trigger_failure.load(Ordering::Relaxed),
            trigger_rejected: self.trigger_rejected.load(Ordering::Relaxed),
            trigger_latency_ms_total: self.trigger_latency_ms_total.load(Ordering::Relaxed),
            trigger_latency_ms_count: self.trigger_latency_ms_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info，可用 RUST_LOG 覆盖）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 trigger_id，用于串联一次触发的日志。
pub fn new_trigger_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录触发请求次数。
pub fn record_trigger_issued() {
    metrics().triggers_issued.fetch_add(1, Ordering::Relaxed);
}

/// 记录设备回执成功次数。
pub fn record_trigger_success() {
    metrics().trigger_success.fetch_add(1, Ordering::Relaxed);
}

/// 记录触发失败次数（含校验拒绝）。
pub fn record_trigger_failure() {
    metrics().trigger_failure.fetch_add(1, Ordering::Relaxed);
}

/// 记录入参校验拒绝次数（未发生网络 IO，同时计入失败）。
pub fn record_trigger_rejected() {
    metrics().trigger_rejected.fetch_add(1, Ordering::Relaxed);
}

/// 记录触发耗时（毫秒）。
pub fn record_trigger_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .trigger_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .trigger_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}
