// Wire types for the monitoring backend.
//
// System endpoints use snake_case field names; the network service
// (`/api/*`) uses camelCase. Every network type has a `Default` matching
// what the dashboard shows before the first response arrives. The
// network service sends `null` for fields it has no value for; those
// decode to the same defaults as a missing key.

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};

// ── System metrics ──────────────────────────────────────────────────

/// `GET /cpu-usage`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub(crate) struct CpuUsage {
    pub cpu_usage: f64,
}

/// `GET /memory-usage`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub(crate) struct MemoryUsage {
    pub memory_usage_percent: f64,
}

/// `GET /disk-usage`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub(crate) struct DiskUsage {
    pub disk_usage_percent: f64,
}

/// `GET /cpu-temperature`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub(crate) struct CpuTemperature {
    #[serde(default)]
    pub temperature: Option<f64>,
}

/// Combined result of the three usage endpoints, fetched together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageReading {
    pub cpu_usage: f64,
    pub memory_usage_percent: f64,
    pub disk_usage_percent: f64,
}

/// `GET /battery`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BatteryReading {
    pub battery_level: f64,
    pub is_charging: bool,
    #[serde(default)]
    pub time_left: Option<f64>,
    #[serde(default)]
    pub charging_status: Option<bool>,
    #[serde(default)]
    pub system_power_usage: Option<f64>,
    #[serde(default)]
    pub battery_discharge_rate: Option<f64>,
    #[serde(default)]
    pub system_uptime: Option<String>,
}

/// `GET /gaming-mode/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GamingModeStatus {
    pub gaming_mode: bool,
}

// ── Power plan ──────────────────────────────────────────────────────

/// Windows-style power plans accepted by `POST /set_power_plan`.
///
/// The wire value is the display label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Deserialize, Serialize,
)]
pub enum PowerPlan {
    #[strum(serialize = "High Performance")]
    #[serde(rename = "High Performance")]
    HighPerformance,
    #[strum(serialize = "Balanced")]
    #[serde(rename = "Balanced")]
    Balanced,
    #[strum(serialize = "Power Saver")]
    #[serde(rename = "Power Saver")]
    PowerSaver,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PowerPlanRequest {
    pub plan: PowerPlan,
}

/// Confirmation returned by `POST /set_power_plan`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PowerPlanAck {
    #[serde(default)]
    pub message: Option<String>,
}

// ── Network service ─────────────────────────────────────────────────

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "Not available";

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(|| UNKNOWN.to_owned()))
}

fn null_as_not_available<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(|| NOT_AVAILABLE.to_owned()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

/// Device ids arrive as strings or numbers depending on the collector.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(
        match Option::<StringOrNumber>::deserialize(deserializer)? {
            Some(StringOrNumber::String(s)) => s,
            Some(StringOrNumber::Integer(n)) => n.to_string(),
            Some(StringOrNumber::Float(f)) => f.to_string(),
            None => String::new(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkData {
    #[serde(deserialize_with = "null_as_unknown")]
    pub connection_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub signal_strength: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub download_speed: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub upload_speed: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub ping: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub jitter: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub packet_loss: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub stability: f64,
    #[serde(deserialize_with = "null_as_not_available")]
    pub ip_address: String,
    #[serde(deserialize_with = "null_as_not_available")]
    pub dns_server: String,
    #[serde(deserialize_with = "null_as_not_available")]
    pub mac_address: String,
}

impl Default for NetworkData {
    fn default() -> Self {
        Self {
            connection_type: UNKNOWN.into(),
            signal_strength: 0.0,
            download_speed: 0.0,
            upload_speed: 0.0,
            ping: 0.0,
            jitter: 0.0,
            packet_loss: 0.0,
            stability: 0.0,
            ip_address: NOT_AVAILABLE.into(),
            dns_server: NOT_AVAILABLE.into(),
            mac_address: NOT_AVAILABLE.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IoData {
    #[serde(deserialize_with = "null_as_default")]
    pub upload_speed: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub download_speed: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub upload_packets: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub download_packets: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub active_interfaces: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub bytes_sent: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub bytes_received: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectedDevice {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ip_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mac_address: String,
}

/// One sample of the bandwidth graph.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BandwidthDataPoint {
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub download: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub upload: f64,
}

/// `GET /api/all` -- everything the Network page shows, in one response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkOverview {
    #[serde(deserialize_with = "null_as_default")]
    pub network_data: NetworkData,
    #[serde(deserialize_with = "null_as_default")]
    pub io_data: IoData,
    #[serde(deserialize_with = "null_as_default")]
    pub connected_devices: Vec<ConnectedDevice>,
    #[serde(deserialize_with = "null_as_default")]
    pub bandwidth_history: Vec<BandwidthDataPoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub latency_history: Vec<f64>,
    pub last_updated: Option<String>,
}

/// Bandwidth graph window, passed as `?timeframe=`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Deserialize,
    Serialize,
)]
pub enum TimeRange {
    #[default]
    #[strum(serialize = "5min")]
    #[serde(rename = "5min")]
    FiveMinutes,
    #[strum(serialize = "1hour")]
    #[serde(rename = "1hour")]
    OneHour,
    #[strum(serialize = "1day")]
    #[serde(rename = "1day")]
    OneDay,
}

impl TimeRange {
    /// Button label on the bandwidth panel.
    pub fn label(self) -> &'static str {
        match self {
            Self::FiveMinutes => "5 Min",
            Self::OneHour => "1 Hour",
            Self::OneDay => "1 Day",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeedTestServer {
    pub name: String,
    pub location: String,
    pub sponsor: String,
    pub latency: f64,
    pub distance: String,
}

/// `GET /api/speedtest`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpeedTestResult {
    pub download: f64,
    pub upload: f64,
    pub ping: f64,
    #[serde(default)]
    pub server: Option<SpeedTestServer>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn power_plan_wire_value_is_label() {
        let body = serde_json::to_value(PowerPlanRequest {
            plan: PowerPlan::HighPerformance,
        })
        .unwrap();
        assert_eq!(body, json!({ "plan": "High Performance" }));
        assert_eq!(PowerPlan::PowerSaver.to_string(), "Power Saver");
        assert_eq!(PowerPlan::from_str("Balanced").unwrap(), PowerPlan::Balanced);
    }

    #[test]
    fn time_range_query_values() {
        assert_eq!(TimeRange::FiveMinutes.to_string(), "5min");
        assert_eq!(TimeRange::OneHour.to_string(), "1hour");
        assert_eq!(TimeRange::OneDay.to_string(), "1day");
        assert_eq!(TimeRange::default(), TimeRange::FiveMinutes);
    }

    #[test]
    fn overview_tolerates_missing_sections() {
        let overview: NetworkOverview =
            serde_json::from_value(json!({ "lastUpdated": "2024-05-01T10:00:00Z" })).unwrap();
        assert_eq!(overview.network_data.connection_type, "Unknown");
        assert_eq!(overview.network_data.ip_address, "Not available");
        assert!(overview.bandwidth_history.is_empty());
        assert_eq!(overview.last_updated.as_deref(), Some("2024-05-01T10:00:00Z"));
    }

    #[test]
    fn overview_treats_null_sections_as_empty() {
        let overview: NetworkOverview = serde_json::from_value(json!({
            "networkData": null,
            "ioData": { "activeInterfaces": null, "bytesSent": null },
            "connectedDevices": null,
            "bandwidthHistory": null,
            "latencyHistory": null
        }))
        .unwrap();
        assert_eq!(overview.network_data, NetworkData::default());
        assert!(overview.io_data.active_interfaces.is_empty());
        assert_eq!(overview.io_data.bytes_sent, 0);
        assert!(overview.connected_devices.is_empty());
        assert!(overview.bandwidth_history.is_empty());
        assert!(overview.latency_history.is_empty());
    }

    #[test]
    fn null_network_fields_show_placeholders() {
        let data: NetworkData = serde_json::from_value(json!({
            "connectionType": null,
            "ipAddress": null,
            "dnsServer": "1.1.1.1",
            "ping": null
        }))
        .unwrap();
        assert_eq!(data.connection_type, "Unknown");
        assert_eq!(data.ip_address, "Not available");
        assert_eq!(data.mac_address, "Not available");
        assert_eq!(data.dns_server, "1.1.1.1");
        assert!(data.ping.abs() < f64::EPSILON);
    }

    #[test]
    fn device_ids_accept_numbers() {
        let overview: NetworkOverview = serde_json::from_value(json!({
            "connectedDevices": [
                { "id": 1, "name": "Router", "status": "online", "ipAddress": null },
                { "id": "b2", "name": "Pixel Phone" },
                { "id": null, "name": "Printer" }
            ]
        }))
        .unwrap();
        let ids: Vec<&str> = overview.connected_devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["1", "b2", ""]);
        assert_eq!(overview.connected_devices[0].ip_address, "");
    }

    #[test]
    fn battery_optional_fields_default_to_none() {
        let reading: BatteryReading = serde_json::from_value(json!({
            "battery_level": 80,
            "is_charging": true
        }))
        .unwrap();
        assert!((reading.battery_level - 80.0).abs() < f64::EPSILON);
        assert!(reading.system_uptime.is_none());
        assert!(reading.time_left.is_none());
    }
}
