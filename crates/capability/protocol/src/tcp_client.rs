//! TCP 单次指令交换
//!
//! 每次触发独立建立连接：一次写入完整指令，把收到的首个数据块当作完整回执，
//! 随后关闭连接。连接只在本函数内持有，任何退出路径都会随 drop 释放。

use crate::error::ProtocolError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

const ACK_BUFFER_SIZE: usize = 1024;

/// 发送指令并返回设备回执（首个数据块）
pub(crate) async fn send_command(addr: &str, payload: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let mut stream = TcpStream::connect(addr).await.inspect_err(|e| {
        warn!(target: "relay.protocol", addr = %addr, error = %e, "tcp_connect_failed");
    })?;
    debug!(target: "relay.protocol", addr = %addr, "tcp_connected");

    stream.write_all(payload).await?;
    stream.flush().await?;

    let mut buf = vec![0u8; ACK_BUFFER_SIZE];
    let n = stream.read(&mut buf).await?;
    if n == 0 {
        warn!(target: "relay.protocol", addr = %addr, "tcp_closed_before_ack");
        return Err(ProtocolError::ConnectionClosed);
    }
    buf.truncate(n);

    // 回执已收到，关闭失败不影响结果
    if let Err(e) = stream.shutdown().await {
        debug!(target: "relay.protocol", addr = %addr, error = %e, "tcp_shutdown_failed");
    }
    Ok(buf)
}
