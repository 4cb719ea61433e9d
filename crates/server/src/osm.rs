//! Overpass API map fetcher
//!
//! Offline tool behind the `fetch-map` subcommand: downloads the drivable
//! road network inside a bounding box and writes the network document the
//! server loads at request time. This is tooling, not the serving path, so
//! failures surface as plain errors.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::network::{NetworkDocument, NetworkNode, NetworkWay};
use airshed_core::network::RoadClassTag;

/// Public Overpass API endpoint.
pub const OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Highway classes that make up the drivable network.
const DRIVE_CLASSES: &str = "motorway|motorway_link|trunk|trunk_link|primary|primary_link|\
                             secondary|secondary_link|tertiary|tertiary_link|unclassified|\
                             residential|living_street|service";

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OverpassElement {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
    },
    Way {
        id: i64,
        nodes: Vec<i64>,
        #[serde(default)]
        tags: std::collections::HashMap<String, String>,
    },
}

/// Download the drivable network inside `bounds` and write it to `output`.
pub async fn fetch_map(bounds: GeoBounds, output: &Path) -> anyhow::Result<()> {
    let query = format!(
        "[out:json][timeout:60];\
         way[\"highway\"~\"^({DRIVE_CLASSES})$\"]({south},{west},{north},{east});\
         (._;>;);out body;",
        south = bounds.south,
        west = bounds.west,
        north = bounds.north,
        east = bounds.east,
    );

    info!(?bounds, "querying Overpass API");
    let response: OverpassResponse = reqwest::Client::new()
        .post(OVERPASS_ENDPOINT)
        .body(query)
        .send()
        .await
        .context("Overpass request failed")?
        .error_for_status()
        .context("Overpass returned an error status")?
        .json()
        .await
        .context("Overpass response is not valid JSON")?;

    let document = document_from_elements(response.elements);
    anyhow::ensure!(
        !document.nodes.is_empty(),
        "no road network found inside the bounding box"
    );

    let raw = serde_json::to_vec_pretty(&document).context("serializing network document")?;
    tokio::fs::write(output, raw)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    info!(
        nodes = document.nodes.len(),
        ways = document.ways.len(),
        output = %output.display(),
        "network document written"
    );
    Ok(())
}

/// Convert Overpass elements into a network document, keeping only nodes the
/// ways actually reference.
fn document_from_elements(elements: Vec<OverpassElement>) -> NetworkDocument {
    let mut nodes = Vec::new();
    let mut ways = Vec::new();

    for element in elements {
        match element {
            OverpassElement::Node { id, lat, lon } => nodes.push(NetworkNode { id, lat, lon }),
            OverpassElement::Way {
                id,
                nodes: node_ids,
                mut tags,
            } => {
                let Some(highway) = tags.remove("highway") else {
                    continue;
                };
                ways.push(NetworkWay {
                    id,
                    nodes: node_ids,
                    highway: RoadClassTag::Single(highway),
                });
            }
        }
    }

    let referenced: HashSet<i64> = ways.iter().flat_map(|w| w.nodes.iter().copied()).collect();
    nodes.retain(|node| referenced.contains(&node.id));

    NetworkDocument { nodes, ways }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overpass_payload_becomes_document() {
        let payload = r#"{
            "elements": [
                {"type": "node", "id": 1, "lat": 23.2405, "lon": 72.5035},
                {"type": "node", "id": 2, "lat": 23.2415, "lon": 72.5045},
                {"type": "node", "id": 3, "lat": 23.0, "lon": 72.0},
                {"type": "way", "id": 7, "nodes": [1, 2],
                 "tags": {"highway": "residential", "name": "Test Street"}},
                {"type": "way", "id": 8, "nodes": [1, 2], "tags": {"name": "untagged"}}
            ]
        }"#;
        let response: OverpassResponse = serde_json::from_str(payload).unwrap();
        let document = document_from_elements(response.elements);

        // The untagged way is dropped, as is the unreferenced node.
        assert_eq!(document.ways.len(), 1);
        assert_eq!(document.ways[0].highway.primary(), Some("residential"));
        assert_eq!(document.nodes.len(), 2);
    }
}
