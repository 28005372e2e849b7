// ── Page monitors ──
//
// One monitor per dashboard page. `mount` starts the page's pollers with
// fresh default state; `unmount` (or dropping the monitor) stops them.
// Each source publishes on its own channel, so no two pollers write the
// same state.

mod battery;
mod home;
mod network;

pub use battery::{BatteryMonitor, BatteryStatus, POWER_HISTORY_LEN};
pub use home::{DEFAULT_TEMPERATURE, HomeMonitor, SystemUsage};
pub use network::{NETWORK_FETCH_ERROR, NetworkMonitor, NetworkRefresher, bandwidth_points};
