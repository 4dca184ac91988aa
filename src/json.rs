use crate::{MarkerKind, PlanResult};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};

impl PlanResult {
    /// Renders the plan as a GeoJSON feature collection.
    ///
    /// The collection carries the working boundary, the working obstacles,
    /// the mow path and the path markers, each tagged with a `kind`
    /// property (`boundary`, `obstacle`, `mow-path`, `start`, `end` or
    /// `direction`).
    #[must_use]
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let mut features = Vec::with_capacity(
            2 + self.working_obstacles().len() + self.markers().len(),
        );

        features.push(feature(
            geojson::Value::from(self.working_boundary()),
            "boundary",
        ));
        for obstacle in self.working_obstacles() {
            features.push(feature(geojson::Value::from(obstacle), "obstacle"));
        }
        features.push(feature(
            geojson::Value::from(self.mow_path()),
            "mow-path",
        ));
        for marker in self.markers() {
            let kind = match marker.kind() {
                MarkerKind::Start => "start",
                MarkerKind::End => "end",
                MarkerKind::Direction => "direction",
            };
            features.push(feature(
                geojson::Value::from(marker.shape()),
                kind,
            ));
        }

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

fn feature(value: geojson::Value, kind: &str) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("kind".to_owned(), JsonValue::from(kind));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
#[path = "./json_tests.rs"]
mod tests;
