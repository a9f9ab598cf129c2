use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Structural layout of the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Nested days/items hierarchy
    #[default]
    Default,
    /// Flat list of time-stamped events
    Timeline,
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(RenderMode::Default),
            "timeline" => Ok(RenderMode::Timeline),
            other => Err(format!("unknown render mode `{}`", other)),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Default => f.write_str("default"),
            RenderMode::Timeline => f.write_str("timeline"),
        }
    }
}

/// Declares the plain tag/attribute name fields of [`SchemaShape`] together
/// with their built-in defaults and the lookup used by mapping files.
macro_rules! name_fields {
    ($( $(#[$doc:meta])* $field:ident = $default:literal ),* $(,)?) => {
        /// Every tag and attribute name the XML builder emits.
        ///
        /// Defaults reproduce the built-in schema, so a shape that only
        /// overrides a few names still renders a complete document.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        pub struct SchemaShape {
            pub mode: RenderMode,
            /// Namespace URI applied to every element as the default namespace
            pub ns: Option<String>,
            /// Value of the root `version` attribute; `"1.0"` when unset
            pub version_value: Option<String>,
            /// Meta container; `None` writes meta fields directly under the root
            #[serde(serialize_with = "serialize_meta")]
            pub meta: Option<String>,
            $( $(#[$doc])* pub $field: String, )*
        }

        impl Default for SchemaShape {
            fn default() -> Self {
                Self {
                    mode: RenderMode::Default,
                    ns: None,
                    version_value: None,
                    meta: Some("Meta".to_string()),
                    $( $field: $default.to_string(), )*
                }
            }
        }

        impl SchemaShape {
            /// Names accepted as keys in a mapping file
            pub const FIELD_NAMES: &'static [&'static str] = &[
                "mode", "ns", "version_value", "meta", $( stringify!($field), )*
            ];

            fn set_name_field(&mut self, key: &str, value: &str) -> bool {
                $(
                    if key == stringify!($field) {
                        self.$field = value.to_string();
                        return true;
                    }
                )*
                false
            }
        }
    };
}

name_fields! {
    root = "TravelPlan",

    // days/items layout
    destination = "Destination",
    days_tag = "Days",
    day_tag = "Day",
    day_index_attr = "index",
    note = "Note",
    items_tag = "Items",
    item_tag = "Item",
    period_attr = "period",
    title = "Title",
    location = "Location",
    transport = "Transport",
    duration = "Duration",
    cost = "Cost",
    summary = "Summary",
    tips = "Tips",
    preferences = "Preferences",
    budget = "Budget",
    /// Day count under meta; only written when a meta container exists
    days_count = "Days",

    // timeline layout
    timeline_tag = "Timeline",
    event_tag = "Event",
    event_type_attr = "type",
    event_id_attr = "id",
    timeslot_tag = "TimeSlot",
    timeslot_day = "Day",
    timeslot_start = "StartTime",
    timeslot_end = "EndTime",
    timeslot_duration = "Duration",
    activity_tag = "Activity",
    activity_title = "Title",
    activity_desc = "Description",
    activity_category = "Category",
    highlights_tag = "Highlights",
    highlight_item = "Item",
    meta_title = "Title",
    meta_total_days = "TotalDays",
    meta_destinations = "Destinations",
    meta_city = "City",
    meta_travel_style = "TravelStyle",
    meta_budget = "Budget",
    meta_currency = "Currency",
    meta_total_estimate = "TotalEstimate",
    meta_per_person = "PerPerson",

    // people
    participants_tag = "Participants",
    participants_all_attr = "all",
    shared_transport = "SharedTransport",
    route = "Route",
    person_ref = "PersonRef",
    person_tag = "Person",
    person_id_attr = "id",
    person_name = "Name",
    person_role = "Role",
    person_departure = "DepartureFrom",

    // places
    locations_tag = "Locations",
    location_type_attr = "type",
    location_name = "Name",
    location_address = "Address",
    coordinates = "Coordinates",
    lat_attr = "lat",
    lng_attr = "lng",

    // per-event budget
    event_budget = "Budget",
    budget_estimated = "Estimated",
    budget_category = "Category",
    budget_per_person = "PerPerson",
    breakdown_tag = "Breakdown",
    breakdown_item = "Item",
    breakdown_person_attr = "person",
    breakdown_amount_attr = "amount",
}

impl SchemaShape {
    /// Apply one mapping entry. Returns `false` for unknown keys and
    /// values that do not fit the field.
    pub fn apply_override(&mut self, key: &str, value: &str) -> bool {
        match key {
            "mode" => match value.parse() {
                Ok(mode) => {
                    self.mode = mode;
                    true
                }
                Err(_) => false,
            },
            "ns" => {
                self.ns = non_empty(value);
                true
            }
            "version_value" => {
                self.version_value = non_empty(value);
                true
            }
            "meta" => {
                self.meta = non_empty(value);
                true
            }
            _ if value.trim().is_empty() => false,
            _ => self.set_name_field(key, value),
        }
    }

    pub fn version(&self) -> &str {
        self.version_value.as_deref().unwrap_or("1.0")
    }
}

/// `None` is written as `""` so a printed shape reads back as the same shape.
fn serialize_meta<S>(meta: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(meta.as_deref().unwrap_or(""))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let shape = SchemaShape::default();
        assert_eq!(shape.mode, RenderMode::Default);
        assert_eq!(shape.root, "TravelPlan");
        assert_eq!(shape.meta.as_deref(), Some("Meta"));
        assert_eq!(shape.day_index_attr, "index");
        assert_eq!(shape.timeslot_start, "StartTime");
        assert_eq!(shape.version(), "1.0");
        assert!(shape.ns.is_none());
    }

    #[test]
    fn test_apply_override() {
        let mut shape = SchemaShape::default();
        assert!(shape.apply_override("day_tag", "Jour"));
        assert!(shape.apply_override("mode", "Timeline"));
        assert!(shape.apply_override("meta", ""));
        assert!(!shape.apply_override("no_such_field", "X"));
        assert!(!shape.apply_override("mode", "spiral"));
        assert!(!shape.apply_override("root", "  "));

        assert_eq!(shape.day_tag, "Jour");
        assert_eq!(shape.mode, RenderMode::Timeline);
        assert!(shape.meta.is_none());
        assert_eq!(shape.root, "TravelPlan");
    }

    #[test]
    fn test_field_names_cover_overrides() {
        for name in SchemaShape::FIELD_NAMES {
            let mut shape = SchemaShape::default();
            let value = if *name == "mode" { "timeline" } else { "X" };
            assert!(shape.apply_override(name, value), "{} not settable", name);
        }
        assert!(SchemaShape::FIELD_NAMES.len() > 45);
    }

    #[test]
    fn test_serialized_shape_uses_field_names() {
        let json = serde_json::to_value(SchemaShape::default()).unwrap();
        assert_eq!(json["mode"], "default");
        assert_eq!(json["event_tag"], "Event");

        let mut flat = SchemaShape::default();
        flat.meta = None;
        assert_eq!(serde_json::to_value(&flat).unwrap()["meta"], "");
    }
}
