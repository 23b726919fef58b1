//! Per-IP rate limiting built on `tower_governor`.
//!
//! Clients are keyed with `SmartIpKeyExtractor`, which reads the usual proxy
//! headers (`X-Forwarded-For`, `X-Real-IP`, `Forwarded`) before falling back
//! to the peer address, so the server must be started with connect info.

/// Seconds after which one generation request is replenished
pub const GENERATE_REPLENISH_SECONDS: u64 = 2;

/// Generation requests a client can make in a burst
pub const GENERATE_BURST_SIZE: u32 = 10;

/// Build a `GovernorLayer` replenishing one request every `$replenish_seconds`
/// with a burst of `$burst_size`, keyed by client IP.
#[macro_export]
macro_rules! make_rate_limit_layer {
    ($replenish_seconds:expr, $burst_size:expr) => {{
        let config = ::tower_governor::governor::GovernorConfigBuilder::default()
            .per_second($replenish_seconds)
            .burst_size($burst_size)
            .key_extractor(::tower_governor::key_extractor::SmartIpKeyExtractor)
            .use_headers()
            .finish()
            .expect("rate limit period and burst size must be non-zero");

        ::tower_governor::GovernorLayer::new(config)
    }};
}
