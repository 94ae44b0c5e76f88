//! Admin dashboard and analytics endpoints.

use crate::client::ApiClient;
use crate::error::ClientError;
use harvest_commerce::reporting::{Analytics, DashboardStats};

/// Read-only admin reporting.
pub struct ReportingService {
    client: ApiClient,
}

impl ReportingService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Headline numbers, low stock list and recent orders.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        self.client
            .send(self.client.get("/dashboard-stats/"))
            .await?
            .json()
    }

    /// Revenue metrics, monthly sales, category split and top sellers.
    pub async fn analytics(&self) -> Result<Analytics, ClientError> {
        self.client.send(self.client.get("/analytics/")).await?.json()
    }
}
