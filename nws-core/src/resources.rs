//! Static descriptors served from `GET /resources`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DATE_PARAMETER: &str =
    "str (optional, ISO date 'YYYY-MM-DD', 'today', 'tomorrow', or weekday name 'Monday'-'Sunday')";

const COORDINATES_DESCRIPTION: &str =
    "Get current and forecast weather for a given latitude and longitude.";

const NAME_DESCRIPTION: &str =
    "Get current and forecast weather for a given US location name (city, state, or zip).";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceExample {
    pub query: String,
    pub description: String,
}

impl ResourceExample {
    fn new(query: &str, description: &str) -> Self {
        Self {
            query: query.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub description: String,
    pub parameters: BTreeMap<String, String>,
    pub examples: Vec<ResourceExample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceList {
    pub resources: Vec<Resource>,
    pub examples: Vec<ResourceExample>,
}

fn parameters(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn resource_list() -> ResourceList {
    let boston = ResourceExample::new(
        "/resources/nws-weather?lat=42.36&lon=-71.06",
        "Get weather for Boston, MA by coordinates.",
    );
    let boston_tomorrow = ResourceExample::new(
        "/resources/nws-weather?lat=42.36&lon=-71.06&date=tomorrow",
        "Get tomorrow's forecast for Boston, MA by coordinates.",
    );
    let boston_by_name = ResourceExample::new(
        "/resources/nws-weather-by-name?location=Boston,MA",
        "Get weather for Boston, MA by name.",
    );
    let list_all = ResourceExample::new("/resources", "List all available weather resources.");

    ResourceList {
        resources: vec![
            Resource {
                id: "nws-weather".into(),
                name: "National Weather Service Weather".into(),
                description: COORDINATES_DESCRIPTION.into(),
                parameters: parameters(&[
                    ("lat", "float"),
                    ("lon", "float"),
                    ("date", DATE_PARAMETER),
                ]),
                examples: vec![boston, boston_tomorrow],
            },
            Resource {
                id: "nws-weather-by-name".into(),
                name: "National Weather Service Weather by Location Name".into(),
                description: NAME_DESCRIPTION.into(),
                parameters: parameters(&[
                    ("location", "str (US city, state, or zip)"),
                    ("date", DATE_PARAMETER),
                ]),
                examples: vec![boston_by_name],
            },
        ],
        examples: vec![list_all],
    }
}
