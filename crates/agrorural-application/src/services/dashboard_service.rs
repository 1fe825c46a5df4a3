//! Dashboard Application Service

use std::sync::Arc;

use agrorural_domain::dashboard::Dashboard;
use agrorural_domain::repositories::{AgroStore, DashboardRepository};

use crate::dto::DashboardDto;
use crate::errors::ApplicationResult;

/// Read-only aggregate figures over every property and cultivo
pub struct DashboardService {
    dashboard: Arc<dyn DashboardRepository>,
}

impl DashboardService {
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: AgroStore + 'static,
    {
        Self {
            dashboard: store as Arc<dyn DashboardRepository>,
        }
    }

    pub async fn summary(&self) -> ApplicationResult<DashboardDto> {
        let snapshot = self.dashboard.snapshot().await?;
        Ok(Dashboard::from_snapshot(snapshot).into())
    }
}
