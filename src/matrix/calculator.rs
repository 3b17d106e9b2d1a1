//! Travel matrix calculator
//!
//! Every landmark gets two independent directed lookups. All lookups for all
//! landmarks run concurrently on the caller's task and the matrix is only
//! assembled once every one of them has settled; a failed leg never cancels
//! or hides another.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{join, join_all};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheStats, TtlCache};
use crate::error::Result;
use crate::models::{Coordinates, DistancePoint, Landmark, TravelLegResult, TravelMode};
use crate::provider::DistanceProvider;

/// Separator between per-direction causes in a row's error message.
pub const ERROR_DELIMITER: &str = " | ";

/// Which way a leg runs relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TargetToLandmark,
    LandmarkToTarget,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TargetToLandmark => f.write_str("target -> landmark"),
            Direction::LandmarkToTarget => f.write_str("landmark -> target"),
        }
    }
}

// == Travel Matrix Calculator ==
pub struct TravelMatrixCalculator {
    provider: Arc<dyn DistanceProvider>,
    /// Keyed by `origin|destination|mode` with six-decimal coordinates
    cache: Mutex<TtlCache<DistancePoint>>,
}

impl TravelMatrixCalculator {
    pub fn new(provider: Arc<dyn DistanceProvider>, cache_ttl: Duration) -> Self {
        Self {
            provider,
            cache: Mutex::new(TtlCache::new(cache_ttl)),
        }
    }

    // == Compute Matrix ==
    /// Computes one row per landmark, in landmark order.
    pub async fn compute_matrix(
        &self,
        target: Coordinates,
        landmarks: &[Landmark],
        mode: TravelMode,
    ) -> Vec<TravelLegResult> {
        let rows = join_all(
            landmarks
                .iter()
                .map(|landmark| self.compute_row(target, landmark, mode)),
        )
        .await;

        let failed = rows.iter().filter(|row| row.error_message.is_some()).count();
        debug!(landmarks = rows.len(), failed, %mode, "Travel matrix computed");
        rows
    }

    async fn compute_row(
        &self,
        target: Coordinates,
        landmark: &Landmark,
        mode: TravelMode,
    ) -> TravelLegResult {
        let (outbound, inbound) = join(
            self.leg(target, landmark.location, mode),
            self.leg(landmark.location, target, mode),
        )
        .await;

        let mut causes = Vec::new();
        let to_landmark = settle(outbound, Direction::TargetToLandmark, landmark, &mut causes);
        let to_target = settle(inbound, Direction::LandmarkToTarget, landmark, &mut causes);

        TravelLegResult {
            landmark_id: landmark.id.clone(),
            landmark_name: landmark.name.clone(),
            to_landmark,
            to_target,
            error_message: (!causes.is_empty()).then(|| causes.join(ERROR_DELIMITER)),
        }
    }

    /// One directed lookup through the cache.
    async fn leg(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<DistancePoint> {
        let key = format!("{}|{}|{}", origin.cache_key(), destination.cache_key(), mode);

        if let Some(point) = self.cache.lock().await.get(&key) {
            debug!(key = %key, "Distance cache hit");
            return Ok(point);
        }

        let measurement = self.provider.distance(origin, destination, mode).await?;
        let point = DistancePoint::from_measurement(&measurement);
        self.cache.lock().await.set(key, point, None);
        Ok(point)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }
}

/// Keeps a successful leg, or records a direction-labelled cause.
fn settle(
    outcome: Result<DistancePoint>,
    direction: Direction,
    landmark: &Landmark,
    causes: &mut Vec<String>,
) -> Option<DistancePoint> {
    match outcome {
        Ok(point) => Some(point),
        Err(e) => {
            warn!(landmark = %landmark.name, %direction, error = %e, "Travel leg failed");
            causes.push(format!("{direction}: {e}"));
            None
        }
    }
}
