// Network service endpoints (`{network}/...`)

use std::time::Duration;

use crate::client::MonitorClient;
use crate::error::Error;
use crate::models::{BandwidthDataPoint, NetworkOverview, SpeedTestResult, TimeRange};

/// Speed tests routinely outlive the default transport timeout.
const SPEED_TEST_TIMEOUT: Duration = Duration::from_secs(120);

impl MonitorClient {
    /// `GET {network}/all` -- combined network snapshot.
    pub async fn get_network_overview(&self) -> Result<NetworkOverview, Error> {
        let url = self.network_url("all")?;
        self.get(url).await
    }

    /// `GET {network}/bandwidth-history?timeframe=<range>`
    pub async fn get_bandwidth_history(
        &self,
        range: TimeRange,
    ) -> Result<Vec<BandwidthDataPoint>, Error> {
        let url = self.network_url("bandwidth-history")?;
        self.get_with_params(url, &[("timeframe", range.to_string())])
            .await
    }

    /// `GET {network}/speedtest`
    ///
    /// Long-running on the backend side. A `{ "error": ... }` body maps to
    /// [`Error::Backend`] even when the status is 200.
    pub async fn run_speed_test(&self) -> Result<SpeedTestResult, Error> {
        let url = self.network_url("speedtest")?;
        self.get_with_timeout(url, SPEED_TEST_TIMEOUT).await
    }

    /// `GET {network}/clear-history` -- response body is ignored.
    pub async fn clear_history(&self) -> Result<(), Error> {
        let url = self.network_url("clear-history")?;
        self.get_empty(url).await
    }
}
