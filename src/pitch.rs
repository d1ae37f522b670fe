use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A JSON field that can be missing, explicitly `null`, or hold a value.
///
/// The backend emits sparse rows: a key may be absent entirely, or present with
/// a `null` (pandas `NaN` after sanitizing). Both cases matter for the strike
/// zone filter, so they are kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Field<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Field<T> {
    /// Present in the record, even if `null`.
    pub fn is_defined(&self) -> bool {
        !matches!(self, Field::Missing)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Copy> Field<T> {
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Value(v),
            None => Field::Null,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Value(v) => serializer.serialize_some(v),
            _ => serializer.serialize_none(),
        }
    }
}

/// One recorded pitch, as returned in the `details` array of the recent games
/// endpoint. Everything the dashboard does not read lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PitchEvent {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub at_bat_number: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub inning: u32,
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub batter: Option<u32>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub events: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string_field",
        skip_serializing_if = "is_missing"
    )]
    pub description: Field<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub launch_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub launch_angle: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_f64_field",
        skip_serializing_if = "is_missing"
    )]
    pub plate_x: Field<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_f64_field",
        skip_serializing_if = "is_missing"
    )]
    pub plate_z: Field<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_f64_field",
        skip_serializing_if = "is_missing"
    )]
    pub sz_top: Field<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_f64_field",
        skip_serializing_if = "is_missing"
    )]
    pub sz_bot: Field<f64>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub pitch_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub release_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub balls: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub strikes: Option<u32>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub bb_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PitchEvent {
    pub fn description(&self) -> Option<&str> {
        self.description.value().map(String::as_str)
    }

    pub fn outcome(&self) -> Option<&str> {
        self.events.as_deref()
    }

    /// Ball-strike count before this pitch, e.g. `"1-2"`.
    pub fn count_label(&self) -> Option<String> {
        Some(format!("{}-{}", self.balls?, self.strikes?))
    }
}

fn is_missing<T>(field: &Field<T>) -> bool {
    matches!(field, Field::Missing)
}

// Integer columns come back as floats once pandas has seen a NaN in them.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_u32(deserializer)?.unwrap_or_default())
}

fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_u32))
}

pub(crate) fn value_to_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

// A value of the wrong type is dropped rather than failing the whole record.
fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

fn lenient_f64_field<'de, D>(deserializer: D) -> Result<Field<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.into())
}

fn lenient_string_field<'de, D>(deserializer: D) -> Result<Field<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Field::Value(s),
        _ => Field::Null,
    })
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinguishes_missing_from_null() {
        let raw = r#"{"at_bat_number": 3, "plate_x": null, "plate_z": 2.1}"#;
        let pitch: PitchEvent = serde_json::from_str(raw).expect("valid pitch");
        assert_eq!(pitch.plate_x, Field::Null);
        assert_eq!(pitch.plate_z, Field::Value(2.1));
        assert_eq!(pitch.sz_top, Field::Missing);
        assert!(pitch.plate_x.is_defined());
        assert!(!pitch.sz_top.is_defined());
    }

    #[test]
    fn float_integers_and_extra_fields() {
        let raw = r#"{"at_bat_number": 12.0, "inning": 4.0, "batter": 660271.0,
                      "events": "", "des": "Ball in the dirt", "zone": 14}"#;
        let pitch: PitchEvent = serde_json::from_str(raw).expect("valid pitch");
        assert_eq!(pitch.at_bat_number, 12);
        assert_eq!(pitch.inning, 4);
        assert_eq!(pitch.batter, Some(660271));
        assert_eq!(pitch.events, None);
        assert_eq!(pitch.extra.get("zone"), Some(&Value::from(14)));
        assert!(pitch.extra.contains_key("des"));
    }

    #[test]
    fn wrongly_typed_fields_are_dropped() {
        let raw = r#"{"at_bat_number": 2, "launch_speed": "n/a", "release_speed": "95.1",
                      "description": 7, "plate_x": "left", "plate_z": 2.0,
                      "pitch_type": false, "bb_type": ["line_drive"], "events": 3}"#;
        let pitch: PitchEvent = serde_json::from_str(raw).expect("lenient pitch");
        assert_eq!(pitch.at_bat_number, 2);
        assert_eq!(pitch.launch_speed, None);
        assert_eq!(pitch.release_speed, Some(95.1));
        assert_eq!(pitch.description, Field::Null);
        assert_eq!(pitch.plate_x, Field::Null);
        assert_eq!(pitch.plate_z, Field::Value(2.0));
        assert_eq!(pitch.sz_top, Field::Missing);
        assert_eq!(pitch.pitch_type, None);
        assert_eq!(pitch.bb_type, None);
        assert_eq!(pitch.events, None);
    }
}
