//! GeoJSON renderings of planned routes for map layers.

use serde_json::{json, Value};

use crate::network::Coordinate;
use crate::provider::ProviderComparison;
use crate::routing::MultiRoute;

fn multi_line_string(polylines: &[Vec<Coordinate>]) -> Value {
    json!({
        "type": "MultiLineString",
        "coordinates": polylines,
    })
}

/// Render a route as a GeoJSON `FeatureCollection`, one `MultiLineString`
/// feature per routed leg.
pub fn route_to_geojson(route: &MultiRoute) -> Value {
    let features: Vec<Value> = route
        .legs
        .iter()
        .filter_map(|leg| {
            let routed = leg.outcome.route()?;
            Some(json!({
                "type": "Feature",
                "geometry": multi_line_string(&routed.polylines),
                "properties": {
                    "leg": leg.index,
                    "distance": routed.distance,
                    "units": route.units,
                    "variant": leg.variant,
                    "crossed": leg.crossed,
                },
            }))
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Render a provider comparison as a `FeatureCollection` with one feature per
/// provider that produced geometry.
pub fn comparison_to_geojson(results: &[ProviderComparison]) -> Value {
    let features: Vec<Value> = results
        .iter()
        .filter_map(|result| {
            let route = result.route.as_ref()?;
            Some(json!({
                "type": "Feature",
                "geometry": multi_line_string(&route.polylines),
                "properties": {
                    "provider": result.provider,
                    "elapsed_ms": result.elapsed_ms,
                    "distance": route.distance,
                    "units": route.units,
                    "failed_legs": route.failed_legs,
                },
            }))
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph_set, GraphBuildOptions};
    use crate::network::{NetworkFeature, NetworkModel};
    use crate::routing::{plan_route, RouteRequest};

    fn seam_route() -> MultiRoute {
        let network = NetworkModel::new(vec![NetworkFeature::new(
            vec![Coordinate::new(179.0, 10.0), Coordinate::new(-179.0, 10.0)],
            None,
        )]);
        let graphs = build_graph_set(&network, &GraphBuildOptions::default()).expect("graphs");
        let request =
            RouteRequest::new(vec![Coordinate::new(179.0, 10.0), Coordinate::new(-179.0, 10.0)]);
        plan_route(&graphs, &request).expect("route")
    }

    #[test]
    fn geojson_has_one_feature_per_routed_leg() {
        let value = route_to_geojson(&seam_route());
        assert_eq!(value["type"], "FeatureCollection");
        let feature = &value["features"][0];
        assert_eq!(feature["geometry"]["type"], "MultiLineString");
        assert_eq!(feature["properties"]["crossed"], true);
        assert_eq!(feature["properties"]["variant"], "positive_shifted");
        assert_eq!(feature["geometry"]["coordinates"][1][1][0], -179.0);
    }

    #[test]
    fn comparison_features_carry_provider_timing() {
        let results = vec![
            ProviderComparison {
                provider: "seaway".to_string(),
                route: Some(crate::provider::ProviderRoute {
                    provider: "seaway".to_string(),
                    units: crate::distance::DistanceUnit::Kilometers,
                    polylines: vec![vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)]],
                    distance: 111.2,
                    failed_legs: Vec::new(),
                }),
                error: None,
                elapsed_ms: 4.5,
            },
            ProviderComparison {
                provider: "oracle".to_string(),
                route: None,
                error: Some("offline".to_string()),
                elapsed_ms: 1.0,
            },
        ];
        let value = comparison_to_geojson(&results);
        let features = value["features"].as_array().expect("features");
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["properties"]["provider"], "seaway");
        assert_eq!(features[0]["properties"]["elapsed_ms"], 4.5);
    }
}
