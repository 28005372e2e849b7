// sysdash-api: Async Rust client for the system-monitoring backend

pub mod client;
pub mod error;
pub mod models;
mod network;
mod system;
pub mod transport;

pub use client::{DEFAULT_NETWORK_URL, DEFAULT_SYSTEM_URL, Endpoints, MonitorClient};
pub use error::Error;
pub use models::{
    BandwidthDataPoint, BatteryReading, ConnectedDevice, GamingModeStatus, IoData, NetworkData,
    NetworkOverview, PowerPlan, PowerPlanAck, SpeedTestResult, SpeedTestServer, TimeRange,
    UsageReading,
};
pub use transport::TransportConfig;
