// System metrics endpoints
//
// Usage, temperature, battery, gaming mode and power plan, all served
// from the system base URL.

use tracing::debug;

use crate::client::MonitorClient;
use crate::error::Error;
use crate::models::{
    BatteryReading, CpuTemperature, CpuUsage, DiskUsage, GamingModeStatus, MemoryUsage,
    PowerPlan, PowerPlanAck, PowerPlanRequest, UsageReading,
};

impl MonitorClient {
    /// `GET /cpu-usage`
    pub async fn get_cpu_usage(&self) -> Result<f64, Error> {
        let url = self.system_url("cpu-usage")?;
        let body: CpuUsage = self.get(url).await?;
        Ok(body.cpu_usage)
    }

    /// `GET /memory-usage`
    pub async fn get_memory_usage(&self) -> Result<f64, Error> {
        let url = self.system_url("memory-usage")?;
        let body: MemoryUsage = self.get(url).await?;
        Ok(body.memory_usage_percent)
    }

    /// `GET /disk-usage`
    pub async fn get_disk_usage(&self) -> Result<f64, Error> {
        let url = self.system_url("disk-usage")?;
        let body: DiskUsage = self.get(url).await?;
        Ok(body.disk_usage_percent)
    }

    /// Fetch CPU, memory and disk usage concurrently.
    ///
    /// Fails as a whole if any of the three requests fails.
    pub async fn get_usage(&self) -> Result<UsageReading, Error> {
        let (cpu_usage, memory_usage_percent, disk_usage_percent) = tokio::try_join!(
            self.get_cpu_usage(),
            self.get_memory_usage(),
            self.get_disk_usage(),
        )?;
        Ok(UsageReading {
            cpu_usage,
            memory_usage_percent,
            disk_usage_percent,
        })
    }

    /// `GET /cpu-temperature`
    ///
    /// Returns `Ok(None)` when the body carries neither `temperature` nor
    /// `error`; callers keep their previous value in that case.
    pub async fn get_cpu_temperature(&self) -> Result<Option<f64>, Error> {
        let url = self.system_url("cpu-temperature")?;
        let body: CpuTemperature = self.get(url).await?;
        if body.temperature.is_none() {
            debug!("temperature response carried no reading");
        }
        Ok(body.temperature)
    }

    /// `GET /battery`
    pub async fn get_battery(&self) -> Result<BatteryReading, Error> {
        let url = self.system_url("battery")?;
        self.get(url).await
    }

    /// `GET /gaming-mode/status`
    pub async fn get_gaming_mode(&self) -> Result<GamingModeStatus, Error> {
        let url = self.system_url("gaming-mode/status")?;
        self.get(url).await
    }

    /// `POST /set_power_plan` with `{ "plan": "<label>" }`.
    pub async fn set_power_plan(&self, plan: PowerPlan) -> Result<PowerPlanAck, Error> {
        let url = self.system_url("set_power_plan")?;
        self.post(url, &PowerPlanRequest { plan }).await
    }
}
