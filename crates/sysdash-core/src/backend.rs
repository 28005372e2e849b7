// ── Backend seam ──
//
// The monitors and the dispatcher talk to the backend through this trait
// so they can be driven by an in-memory fake under a paused clock.
// `MonitorClient` is the production implementation.

use std::future::Future;

use sysdash_api::{
    BandwidthDataPoint, BatteryReading, GamingModeStatus, MonitorClient, NetworkOverview,
    PowerPlan, PowerPlanAck, SpeedTestResult, TimeRange, UsageReading,
};

/// Result type for backend calls, still in transport-layer terms.
pub type ApiResult<T> = Result<T, sysdash_api::Error>;

/// Every backend operation the dashboard consumes.
pub trait Backend: Send + Sync + 'static {
    fn usage(&self) -> impl Future<Output = ApiResult<UsageReading>> + Send;
    fn cpu_temperature(&self) -> impl Future<Output = ApiResult<Option<f64>>> + Send;
    fn battery(&self) -> impl Future<Output = ApiResult<BatteryReading>> + Send;
    fn gaming_mode(&self) -> impl Future<Output = ApiResult<GamingModeStatus>> + Send;
    fn set_power_plan(&self, plan: PowerPlan)
    -> impl Future<Output = ApiResult<PowerPlanAck>> + Send;
    fn network_overview(&self) -> impl Future<Output = ApiResult<NetworkOverview>> + Send;
    fn bandwidth_history(
        &self,
        range: TimeRange,
    ) -> impl Future<Output = ApiResult<Vec<BandwidthDataPoint>>> + Send;
    fn speed_test(&self) -> impl Future<Output = ApiResult<SpeedTestResult>> + Send;
    fn clear_history(&self) -> impl Future<Output = ApiResult<()>> + Send;
}

impl Backend for MonitorClient {
    async fn usage(&self) -> ApiResult<UsageReading> {
        self.get_usage().await
    }

    async fn cpu_temperature(&self) -> ApiResult<Option<f64>> {
        self.get_cpu_temperature().await
    }

    async fn battery(&self) -> ApiResult<BatteryReading> {
        self.get_battery().await
    }

    async fn gaming_mode(&self) -> ApiResult<GamingModeStatus> {
        self.get_gaming_mode().await
    }

    async fn set_power_plan(&self, plan: PowerPlan) -> ApiResult<PowerPlanAck> {
        MonitorClient::set_power_plan(self, plan).await
    }

    async fn network_overview(&self) -> ApiResult<NetworkOverview> {
        self.get_network_overview().await
    }

    async fn bandwidth_history(&self, range: TimeRange) -> ApiResult<Vec<BandwidthDataPoint>> {
        self.get_bandwidth_history(range).await
    }

    async fn speed_test(&self) -> ApiResult<SpeedTestResult> {
        self.run_speed_test().await
    }

    async fn clear_history(&self) -> ApiResult<()> {
        MonitorClient::clear_history(self).await
    }
}
