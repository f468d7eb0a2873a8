//! Per-fleet cache of pricing insights.
//!
//! Entries are kept until [`PricingInsightsCache::invalidate`] or
//! [`PricingInsightsCache::clear`]. Concurrent loads of the same fleet are
//! not coalesced; the last one to finish wins.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;
use tourdesk_core::api_paths;
use tourdesk_core::types::DbId;

use crate::client::{ApiClient, ClientError};
use crate::models::PricingInsight;

/// Memoizes `GET /fleets/{id}/pricing-insights` by fleet id.
#[derive(Debug, Clone)]
pub struct PricingInsightsCache {
    client: ApiClient,
    entries: Arc<RwLock<HashMap<DbId, Vec<PricingInsight>>>>,
}

impl PricingInsightsCache {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Cached insights of a fleet, without touching the network.
    pub async fn get(&self, fleet_id: DbId) -> Option<Vec<PricingInsight>> {
        self.entries.read().await.get(&fleet_id).cloned()
    }

    /// Fetch a fleet's insights and replace the cached entry.
    ///
    /// On error the previous entry is left as it was.
    pub async fn load(&self, fleet_id: DbId) -> Result<Vec<PricingInsight>, ClientError> {
        let insights: Vec<PricingInsight> = self
            .client
            .get(&api_paths::pricing_insights(fleet_id))
            .await?;
        tracing::debug!(fleet_id, count = insights.len(), "Pricing insights loaded");
        self.entries
            .write()
            .await
            .insert(fleet_id, insights.clone());
        Ok(insights)
    }

    /// Cached insights, loading them first on a miss.
    pub async fn get_or_load(&self, fleet_id: DbId) -> Result<Vec<PricingInsight>, ClientError> {
        if let Some(cached) = self.get(fleet_id).await {
            return Ok(cached);
        }
        self.load(fleet_id).await
    }

    pub async fn invalidate(&self, fleet_id: DbId) {
        self.entries.write().await.remove(&fleet_id);
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

/// Group insights by vehicle, keeping vehicles in first-seen order and
/// insights in input order.
pub fn group_by_vehicle(insights: &[PricingInsight]) -> IndexMap<DbId, Vec<PricingInsight>> {
    let mut groups: IndexMap<DbId, Vec<PricingInsight>> = IndexMap::new();
    for insight in insights {
        groups
            .entry(insight.vehicle_id)
            .or_default()
            .push(insight.clone());
    }
    groups
}
