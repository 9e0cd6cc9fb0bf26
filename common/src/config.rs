use std::time::Duration;

use crate::network::subnet::RangePolicy;

pub const DEFAULT_CONCURRENCY: usize = 512;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_PING_COUNT: u8 = 2;
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Config {
    pub no_banner: bool,
    /// 0 prints everything, 1 hides per-host negatives and headers, 2 prints only the summary.
    pub quiet: u8,
    /// Upper bound of probe tasks in flight at the same time.
    pub concurrency: usize,
    /// Dial timeout for a single TCP port.
    pub connect_timeout: Duration,
    /// Echo requests sent per address by the reachability probe.
    pub ping_count: u8,
    /// Wall-clock limit for one `ping` process.
    ///
    /// A process that runs past it is killed and the host counted as down.
    pub ping_timeout: Duration,
    pub range_policy: RangePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            concurrency: DEFAULT_CONCURRENCY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            ping_count: DEFAULT_PING_COUNT,
            ping_timeout: DEFAULT_PING_TIMEOUT,
            range_policy: RangePolicy::default(),
        }
    }
}
