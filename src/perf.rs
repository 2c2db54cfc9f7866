use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

static PERF_HTTP_ENABLED: AtomicBool = AtomicBool::new(true);
static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(1_000);

static HTTP_REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static SLOW_REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 读取 HTTP 计数开关与慢请求阈值
///
/// 开关：
/// - 默认开启
/// - `RICE_MILL_PERF_HTTP=0` 关闭计数
/// - `RICE_MILL_SLOW_REQUEST_MS=500` 配置慢请求阈值（毫秒）
pub fn install_http_tracing() {
    let enabled = match std::env::var("RICE_MILL_PERF_HTTP") {
        Ok(v) => is_true(&v),
        Err(_) => true,
    };
    PERF_HTTP_ENABLED.store(enabled, Ordering::Relaxed);

    let slow_ms = std::env::var("RICE_MILL_SLOW_REQUEST_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(if cfg!(debug_assertions) { 500 } else { 1_000 });
    SLOW_REQUEST_THRESHOLD_MS.store(slow_ms, Ordering::Relaxed);
}

/// 记录一次已完成的 HTTP 请求（由传输层调用）
pub fn record_http_request(method: &str, path: &str, duration: Duration) {
    if !PERF_HTTP_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    HTTP_REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);

    let ms = duration.as_millis() as u64;
    let threshold = SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed);
    if threshold > 0 && ms >= threshold {
        SLOW_REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            target: "slow_http",
            duration_ms = ms,
            method,
            path,
            "slow request"
        );
    }
}

/// 进程内累计请求数
pub fn http_request_count() -> u64 {
    HTTP_REQUEST_COUNT.load(Ordering::Relaxed)
}

/// 性能统计 Guard：记录 elapsed_ms + HTTP 请求数 + 慢请求数
///
/// 并发任务共用计数器，guard 统计的是其存活期间进程内发出的全部请求
///
/// 使用方式：
/// ```ignore
/// let _perf = rice_mill_report::perf::PerfGuard::new("load_dashboard");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    http_start: u64,
    slow_http_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            http_start: HTTP_REQUEST_COUNT.load(Ordering::Relaxed),
            slow_http_start: SLOW_REQUEST_COUNT.load(Ordering::Relaxed),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let http_count = HTTP_REQUEST_COUNT
            .load(Ordering::Relaxed)
            .saturating_sub(self.http_start);
        let slow_http_count = SLOW_REQUEST_COUNT
            .load(Ordering::Relaxed)
            .saturating_sub(self.slow_http_start);

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            http_count,
            slow_http_count,
            "done"
        );
    }
}
