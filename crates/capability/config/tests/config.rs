use domain::RelayNumber;
use relay_config::{ConfigError, RelayConfig};

// 环境变量是进程级共享状态，所有场景放在同一个测试里顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("RELAY_BRAND", "rl-02");
        std::env::set_var("RELAY_HOST", "192.168.1.50");
        std::env::set_var("RELAY_PORT", "9747");
        std::env::set_var("RELAY_NUMBER", "3");
        std::env::set_var("RELAY_DURATION", "5");
        std::env::remove_var("RELAY_HTTP_TIMEOUT_SECONDS");
    }

    let config = RelayConfig::from_env().expect("config");
    assert_eq!(config.brand, "rl-02");
    assert_eq!(config.host, "192.168.1.50");
    assert_eq!(config.port, 9747);
    assert_eq!(config.relay_number, Some(RelayNumber::Index(3)));
    assert_eq!(config.duration, Some(5));
    assert_eq!(config.http_timeout_seconds, 30);

    // 可选项留空表示广播、无时长
    unsafe {
        std::env::set_var("RELAY_NUMBER", "");
        std::env::remove_var("RELAY_DURATION");
    }
    let config = RelayConfig::from_env().expect("config");
    assert!(config.relay_number.is_none());
    assert!(config.duration.is_none());

    unsafe {
        std::env::set_var("RELAY_PORT", "70000");
    }
    let err = RelayConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref key, _) if key == "RELAY_PORT"));

    unsafe {
        std::env::set_var("RELAY_PORT", "9747");
        std::env::set_var("RELAY_HTTP_TIMEOUT_SECONDS", "0");
    }
    let err = RelayConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref key, _) if key == "RELAY_HTTP_TIMEOUT_SECONDS"));

    unsafe {
        std::env::remove_var("RELAY_HTTP_TIMEOUT_SECONDS");
        std::env::remove_var("RELAY_HOST");
    }
    let err = RelayConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Missing(ref key) if key == "RELAY_HOST"));
}
