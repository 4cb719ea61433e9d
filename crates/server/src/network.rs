//! Road network store
//!
//! Loads the network document produced by the map fetcher, projects it into
//! a UTM frame chosen from the network's own location, and hands the engine a
//! ready [`RoadNetwork`]. Failure to load is fatal for a run — there is no
//! silent fallback for missing map data.
//!
//! The projected network is cached behind an async `RwLock` keyed on the
//! file's modification time. The cache is an optimization only: every load
//! revalidates the timestamp first, so correctness never depends on it.

use airshed_core::emission::DEFAULT_ROAD_CLASS;
use airshed_core::network::{RoadClassTag, RoadNetwork, RoadSegment};
use airshed_core::projection::{CoordinateProjector, ProjectionError, UtmProjector};
use airshed_core::{BoundingBox, GeoPoint, Meters, PlanarPoint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// On-disk road network document: WGS84 nodes plus ways referencing them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub nodes: Vec<NetworkNode>,
    pub ways: Vec<NetworkWay>,
}

/// One map node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

/// One way: an ordered node chain with a road-class tag (possibly
/// multi-valued in source data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkWay {
    pub id: i64,
    pub nodes: Vec<i64>,
    pub highway: RoadClassTag,
}

/// Errors loading or projecting the network. All of them are fatal for the
/// requesting run.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("network file {path:?} unreadable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("network file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("network contains no usable nodes")]
    Empty,

    #[error("node projection failed: {0}")]
    Projection(#[from] ProjectionError),
}

/// A projected network plus the projector that produced it. The projector is
/// kept with the data so interventions and results round-trip through the
/// same frame.
#[derive(Debug, Clone)]
pub struct NetworkSnapshot {
    pub network: Arc<RoadNetwork>,
    pub projector: Arc<UtmProjector>,
}

struct CachedNetwork {
    modified: Option<SystemTime>,
    snapshot: NetworkSnapshot,
}

/// File-backed network store with modification-time caching.
pub struct NetworkStore {
    path: PathBuf,
    cache: RwLock<Option<CachedNetwork>>,
}

impl NetworkStore {
    /// Create a store reading from the given network file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        NetworkStore {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Load the projected network, reusing the cache while the file is
    /// unchanged.
    pub async fn load(&self) -> Result<NetworkSnapshot, NetworkError> {
        let modified = tokio::fs::metadata(&self.path)
            .await
            .map_err(|source| NetworkError::Io {
                path: self.path.clone(),
                source,
            })?
            .modified()
            .ok();

        if let Some(cached) = self.cache.read().await.as_ref() {
            if modified.is_some() && cached.modified == modified {
                debug!(path = ?self.path, "serving cached road network");
                return Ok(cached.snapshot.clone());
            }
        }

        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| NetworkError::Io {
                path: self.path.clone(),
                source,
            })?;
        let document: NetworkDocument = serde_json::from_slice(&raw)?;
        let snapshot = project_document(&document)?;
        info!(
            path = ?self.path,
            nodes = document.nodes.len(),
            segments = snapshot.network.segments.len(),
            zone = snapshot.projector.zone(),
            "road network loaded"
        );

        *self.cache.write().await = Some(CachedNetwork {
            modified,
            snapshot: snapshot.clone(),
        });
        Ok(snapshot)
    }
}

/// Project a network document into a planar [`RoadNetwork`].
///
/// The UTM zone is chosen from the mean node position, so the whole network
/// shares one frame. Ways referencing unknown nodes are skipped (map data is
/// taken as-is; topology validation is out of scope); a document with no
/// nodes is an error.
pub fn project_document(document: &NetworkDocument) -> Result<NetworkSnapshot, NetworkError> {
    if document.nodes.is_empty() {
        return Err(NetworkError::Empty);
    }

    let count = document.nodes.len() as f64;
    let mean_lat = document.nodes.iter().map(|n| n.lat).sum::<f64>() / count;
    let mean_lon = document.nodes.iter().map(|n| n.lon).sum::<f64>() / count;
    let projector = UtmProjector::for_location(GeoPoint::new(mean_lat, mean_lon));

    let mut positions: HashMap<i64, PlanarPoint> = HashMap::with_capacity(document.nodes.len());
    for node in &document.nodes {
        let planar = projector.to_planar(GeoPoint::new(node.lat, node.lon))?;
        positions.insert(node.id, planar);
    }

    let bounds =
        BoundingBox::from_points(positions.values().copied()).ok_or(NetworkError::Empty)?;

    let mut segments = Vec::new();
    for way in &document.ways {
        let road_class = way.highway.primary().unwrap_or(DEFAULT_ROAD_CLASS);
        for pair in way.nodes.windows(2) {
            let (Some(a), Some(b)) = (positions.get(&pair[0]), positions.get(&pair[1])) else {
                debug!(way = way.id, "skipping segment with unknown node reference");
                continue;
            };
            segments.push(RoadSegment::new(
                road_class,
                Meters::new(a.distance_to(*b)),
                a.midpoint(*b),
            ));
        }
    }

    Ok(NetworkSnapshot {
        network: Arc::new(RoadNetwork::new(segments, bounds)),
        projector: Arc::new(projector),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_document() -> NetworkDocument {
        NetworkDocument {
            nodes: vec![
                NetworkNode {
                    id: 1,
                    lat: 23.2405,
                    lon: 72.5035,
                },
                NetworkNode {
                    id: 2,
                    lat: 23.2415,
                    lon: 72.5035,
                },
            ],
            ways: vec![NetworkWay {
                id: 10,
                nodes: vec![1, 2],
                highway: RoadClassTag::Multi(vec![
                    "primary".to_string(),
                    "primary_link".to_string(),
                ]),
            }],
        }
    }

    #[test]
    fn test_projects_segments_with_normalized_class() {
        let snapshot = project_document(&two_node_document()).unwrap();
        let network = &snapshot.network;
        assert_eq!(network.segments.len(), 1);

        let segment = &network.segments[0];
        assert_eq!(segment.road_class, "primary");
        // 0.001° of latitude is ~110.6 m on the ground
        assert!((*segment.length - 110.6).abs() < 1.5, "got {}", *segment.length);
        assert!(network.bounds.height() > 0.0);
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let document = NetworkDocument {
            nodes: Vec::new(),
            ways: Vec::new(),
        };
        assert!(matches!(
            project_document(&document),
            Err(NetworkError::Empty)
        ));
    }

    #[test]
    fn test_way_with_unknown_node_is_skipped() {
        let mut document = two_node_document();
        document.ways.push(NetworkWay {
            id: 11,
            nodes: vec![1, 999],
            highway: RoadClassTag::Single("residential".to_string()),
        });
        let snapshot = project_document(&document).unwrap();
        assert_eq!(snapshot.network.segments.len(), 1);
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let document = two_node_document();
        let raw = serde_json::to_string(&document).unwrap();
        let back: NetworkDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.nodes.len(), 2);
        assert_eq!(back.ways[0].highway.primary(), Some("primary"));
    }

    #[tokio::test]
    async fn test_store_loads_and_caches_from_disk() {
        let dir = std::env::temp_dir().join("airshed-network-store-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("network.json");
        std::fs::write(&path, serde_json::to_vec(&two_node_document()).unwrap()).unwrap();

        let store = NetworkStore::new(&path);
        let first = store.load().await.unwrap();
        let second = store.load().await.unwrap();
        assert_eq!(first.network.segments.len(), 1);
        // Unchanged file: the cached Arc is reused
        assert!(Arc::ptr_eq(&first.network, &second.network));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let store = NetworkStore::new("/nonexistent/airshed/network.json");
        assert!(matches!(store.load().await, Err(NetworkError::Io { .. })));
    }
}
