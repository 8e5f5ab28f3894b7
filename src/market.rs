//! Client for the MarketHunt marketplace API.
//!
//! Two endpoints are used: a name search returning current listings, and a
//! per-item history. Listings may lack market data entirely (items that have
//! never traded), so that field is optional end to end.

use serde::Deserialize;
use std::time::Duration;

use crate::config::MarketConfig;
use crate::error::MarketError;

/// One element of the search response array.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemListing {
    pub item_info: ItemInfo,
    /// Absent for items with no recorded trades.
    #[serde(default)]
    pub latest_market_data: Option<MarketSnapshot>,
}

/// Identity portion of a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemInfo {
    pub item_id: u32,
    pub name: String,
}

/// One observed price record for an item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketSnapshot {
    pub date: chrono::NaiveDate,
    /// Gold price, whole units.
    pub price: i64,
    /// Price in SB, the secondary currency.
    pub sb_price: f64,
}

/// Response body of `GET /items/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemHistory {
    /// Snapshots ordered oldest to newest.
    #[serde(default)]
    pub market_data: Vec<MarketSnapshot>,
}

impl ItemHistory {
    /// The snapshot immediately preceding the latest one, used as the
    /// comparison baseline. `None` with fewer than two snapshots.
    pub fn baseline(&self) -> Option<&MarketSnapshot> {
        let len = self.market_data.len();
        if len < 2 {
            return None;
        }
        self.market_data.get(len - 2)
    }
}

/// HTTP client for the MarketHunt API.
#[derive(Debug, Clone)]
pub struct MarketClient {
    client: reqwest::Client,
    base_url: String,
}

impl MarketClient {
    pub fn new(config: &MarketConfig) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MarketError::ClientBuild { source: e })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search listings by item name. An empty result is a valid outcome.
    pub async fn search(&self, query: &str) -> Result<Vec<ItemListing>, MarketError> {
        let url = format!("{}/items/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| MarketError::RequestFailed {
                url: url.clone(),
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(MarketError::BadStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| MarketError::InvalidResponse { url, source: e })
    }

    /// Fetch the snapshot history for a matched item.
    pub async fn history(&self, item_id: u32) -> Result<ItemHistory, MarketError> {
        let url = format!("{}/items/{}", self.base_url, item_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MarketError::RequestFailed {
                url: url.clone(),
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(MarketError::BadStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| MarketError::InvalidResponse { url, source: e })
    }
}
