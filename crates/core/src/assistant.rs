//! Stubbed assistant.
//!
//! There is no language model behind the assistant endpoints. Messages are matched against a
//! couple of fixed command shapes and objects are classified by keywords in their model name.

use api_shared::AiObjectRes;
use serde::Deserialize;

const DRIVE_TO: &str = "drive to";

/// Body of `POST /ai_query`. `query` is the legacy field name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiQueryReq {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

impl AiQueryReq {
    /// The message text, preferring `message` over `query`. Empty strings count as missing.
    pub fn text(&self) -> Option<&str> {
        [self.message.as_deref(), self.query.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }
}

/// What the assistant should do with a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Geocode `place` and drive there. `place` is lower-cased and trimmed.
    DriveTo { place: String },
    /// Drive straight to the given coordinates.
    Coordinates { lat: f64, lon: f64 },
    Unrecognised,
}

/// Classifies a message.
///
/// A `drive to` phrase with nothing after it falls through to coordinate parsing.
pub fn parse_command(message: &str) -> Command {
    let lowered = message.to_lowercase();
    if let Some((_, rest)) = lowered.split_once(DRIVE_TO) {
        let place = rest.trim();
        if !place.is_empty() {
            return Command::DriveTo {
                place: place.to_owned(),
            };
        }
    }

    match find_coordinate_pair(message) {
        Some((lat, lon)) => Command::Coordinates { lat, lon },
        None => Command::Unrecognised,
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '.'
}

/// Finds the first run of `[-0-9.]` followed by whitespace and another such run, and parses
/// both as `f64`.
///
/// Only the first such pair is considered; if either half is not a valid number (`"-"`,
/// `"1.2.3"`) the message has no coordinates.
pub fn find_coordinate_pair(message: &str) -> Option<(f64, f64)> {
    let chars: Vec<(usize, char)> = message.char_indices().collect();
    let run_end = |from: usize| {
        chars[from..]
            .iter()
            .position(|(_, c)| !is_number_char(*c))
            .map_or(chars.len(), |n| from + n)
    };
    let byte_at = |i: usize| chars.get(i).map_or(message.len(), |(b, _)| *b);

    let mut i = 0;
    while i < chars.len() {
        if !is_number_char(chars[i].1) {
            i += 1;
            continue;
        }

        let first_end = run_end(i);
        let mut j = first_end;
        while j < chars.len() && chars[j].1.is_whitespace() {
            j += 1;
        }

        if j > first_end && j < chars.len() && is_number_char(chars[j].1) {
            let second_end = run_end(j);
            let lat = message[byte_at(i)..byte_at(first_end)].parse::<f64>().ok()?;
            let lon = message[byte_at(j)..byte_at(second_end)].parse::<f64>().ok()?;
            return Some((lat, lon));
        }

        i = first_end;
    }

    None
}

/// Body of `POST /ai/object`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiObjectReq {
    #[serde(default)]
    pub object: Option<SceneObject>,
}

/// An object in the 3D scene as the viewer describes it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneObject {
    #[serde(default)]
    pub model: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<serde_json::Value>,
}

fn value_text(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.to_lowercase(),
        Some(other) => other.to_string().to_lowercase(),
    }
}

/// Classifies a scene object by keywords in its model name and suggests actions.
pub fn classify_object(object: &SceneObject) -> AiObjectRes {
    let model = value_text(object.model.as_ref());
    let kind = value_text(object.kind.as_ref());
    let has_any = |words: &[&str]| words.iter().any(|w| model.contains(w));

    let (classification, suggestions): (String, &[&str]) =
        if has_any(&["car", "sedan", "truck"]) {
            (
                "car".into(),
                &["drive", "brake", "slow_at_checkpoints", "report_status"],
            )
        } else if has_any(&["aircraft", "plane", "airplane"]) {
            (
                "aircraft".into(),
                &["arm_engines", "takeoff", "land", "report_status"],
            )
        } else if has_any(&["satellite", "sat"]) {
            (
                "satellite".into(),
                &["monitor_orbit", "track_signal", "report_status"],
            )
        } else if kind.is_empty() {
            ("unknown".into(), &["inspect", "report_status"])
        } else {
            (kind, &["inspect", "report_status"])
        };

    AiObjectRes {
        classification,
        suggestions: suggestions.iter().map(|s| (*s).to_owned()).collect(),
        ai: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(model: Option<&str>, kind: Option<&str>) -> SceneObject {
        SceneObject {
            model: model.map(|m| serde_json::Value::String(m.into())),
            kind: kind.map(|k| serde_json::Value::String(k.into())),
        }
    }

    #[test]
    fn message_preferred_over_query() {
        let req: AiQueryReq =
            serde_json::from_str(r#"{"message": "hi", "query": "legacy"}"#).unwrap();
        assert_eq!(req.text(), Some("hi"));

        let legacy: AiQueryReq = serde_json::from_str(r#"{"query": "legacy"}"#).unwrap();
        assert_eq!(legacy.text(), Some("legacy"));

        let empty: AiQueryReq = serde_json::from_str(r#"{"message": ""}"#).unwrap();
        assert_eq!(empty.text(), None);
    }

    #[test]
    fn drive_to_extracts_lowercased_place() {
        assert_eq!(
            parse_command("Please Drive To Lagos Island "),
            Command::DriveTo {
                place: "lagos island".into()
            }
        );
    }

    #[test]
    fn empty_drive_to_falls_through() {
        assert_eq!(parse_command("drive to"), Command::Unrecognised);
        assert_eq!(
            parse_command("drive to   6.5 3.4"),
            Command::DriveTo {
                place: "6.5 3.4".into()
            }
        );
    }

    #[test]
    fn coordinates_are_parsed() {
        assert_eq!(
            parse_command("go 6.5244 3.3792 now"),
            Command::Coordinates {
                lat: 6.5244,
                lon: 3.3792
            }
        );
        assert_eq!(find_coordinate_pair("-33.9\t18.4"), Some((-33.9, 18.4)));
        assert_eq!(find_coordinate_pair("1 2 3"), Some((1.0, 2.0)));
    }

    #[test]
    fn unparsable_first_pair_means_no_coordinates() {
        assert_eq!(find_coordinate_pair("wait... 5"), None);
        assert_eq!(find_coordinate_pair("1.2.3 4"), None);
        assert_eq!(find_coordinate_pair("12,34"), None);
        assert_eq!(find_coordinate_pair("hello"), None);
        assert_eq!(parse_command("hello"), Command::Unrecognised);
    }

    #[test]
    fn pair_may_follow_a_lone_number() {
        assert_eq!(find_coordinate_pair("route7x 10 20"), Some((10.0, 20.0)));
    }

    #[test]
    fn classifies_by_model_keywords() {
        let car = classify_object(&object(Some("Sedan.glb"), None));
        assert_eq!(car.classification, "car");
        assert!(car.suggestions.contains(&"drive".to_string()));

        let plane = classify_object(&object(Some("airplane_a320.gltf"), Some("vehicle")));
        assert_eq!(plane.classification, "aircraft");
        assert_eq!(plane.suggestions[0], "arm_engines");

        let sat = classify_object(&object(Some("iss_sat.glb"), None));
        assert_eq!(sat.classification, "satellite");
    }

    #[test]
    fn falls_back_to_type_then_unknown() {
        let typed = classify_object(&object(Some("tower.glb"), Some("Building")));
        assert_eq!(typed.classification, "building");
        assert_eq!(typed.suggestions, vec!["inspect", "report_status"]);

        let bare = classify_object(&SceneObject::default());
        assert_eq!(bare.classification, "unknown");
        assert!(bare.ai.is_none());
    }
}
