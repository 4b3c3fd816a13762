//! Participant field definitions and schema validation
//!
//! The submission wire format is a flat JSON object with camelCase keys.
//! Validation collects every violated field rather than stopping at the
//! first, so the client can surface a complete error list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Required metadata fields, in form order (wire names)
pub const REQUIRED_FIELDS: [&str; 12] = [
    "name",
    "age",
    "gender",
    "city",
    "country",
    "hairType",
    "hairLength",
    "hairDensity",
    "hairCondition",
    "scalpType",
    "recentTreatments",
    "scalpConditions",
];

/// Detail fields required only while their flag field equals "yes"
pub const CONDITIONAL_FIELDS: [(&str, &str); 2] = [
    ("recentTreatments", "treatmentDetails"),
    ("scalpConditions", "conditionDetails"),
];

/// One schema violation, keyed by wire field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: "Required".to_string(),
        }
    }
}

/// Validated participant metadata, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParticipant {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub city: String,
    pub country: String,
    pub hair_type: String,
    pub hair_length: String,
    pub hair_density: String,
    pub hair_condition: String,
    pub scalp_type: String,
    pub recent_treatments: String,
    pub treatment_details: Option<String>,
    pub scalp_conditions: String,
    pub condition_details: Option<String>,
}

impl NewParticipant {
    /// Validate a parsed submission body against the participant schema.
    ///
    /// The `age` field arrives as a numeric string from the form; a value
    /// that parses as an integer is coerced, anything else is rejected as a
    /// violation. Detail fields are required while their flag is "yes".
    pub fn from_json(data: Value) -> std::result::Result<Self, Vec<FieldViolation>> {
        let mut obj = match data {
            Value::Object(map) => map,
            // A non-object body validates like an empty one: every
            // required field is reported missing.
            _ => serde_json::Map::new(),
        };

        let coerced_age = match obj.get("age") {
            Some(Value::String(raw)) => raw.trim().parse::<i64>().ok(),
            _ => None,
        };
        if let Some(age) = coerced_age {
            obj.insert("age".to_string(), Value::from(age));
        }

        let mut violations = Vec::new();

        let age = match obj.get("age").and_then(Value::as_i64) {
            Some(age) if age > 0 => age,
            Some(_) => {
                violations.push(FieldViolation {
                    field: "age".to_string(),
                    message: "Must be a positive integer".to_string(),
                });
                0
            }
            None => {
                violations.push(FieldViolation {
                    field: "age".to_string(),
                    message: "Must be an integer".to_string(),
                });
                0
            }
        };

        let mut text = |field: &str| -> String {
            match obj.get(field).and_then(Value::as_str) {
                Some(value) if !value.trim().is_empty() => value.trim().to_string(),
                _ => {
                    violations.push(FieldViolation::required(field));
                    String::new()
                }
            }
        };

        let name = text("name");
        let gender = text("gender");
        let city = text("city");
        let country = text("country");
        let hair_type = text("hairType");
        let hair_length = text("hairLength");
        let hair_density = text("hairDensity");
        let hair_condition = text("hairCondition");
        let scalp_type = text("scalpType");
        let recent_treatments = text("recentTreatments");
        let scalp_conditions = text("scalpConditions");

        let mut detail = |flag_value: &str, field: &str| -> Option<String> {
            let value = obj
                .get(field)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            if flag_value == "yes" && value.is_none() {
                violations.push(FieldViolation::required(field));
            }
            value
        };

        let treatment_details = detail(&recent_treatments, "treatmentDetails");
        let condition_details = detail(&scalp_conditions, "conditionDetails");

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(Self {
            name,
            age,
            gender,
            city,
            country,
            hair_type,
            hair_length,
            hair_density,
            hair_condition,
            scalp_type,
            recent_treatments,
            treatment_details,
            scalp_conditions,
            condition_details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> Value {
        json!({
            "name": "Test Participant",
            "age": "28",
            "gender": "female",
            "city": "Lisbon",
            "country": "Portugal",
            "hairType": "wavy",
            "hairLength": "medium",
            "hairDensity": "high",
            "hairCondition": "healthy",
            "scalpType": "normal",
            "recentTreatments": "no",
            "scalpConditions": "no",
        })
    }

    #[test]
    fn numeric_string_age_is_coerced() {
        let p = NewParticipant::from_json(complete()).unwrap();
        assert_eq!(p.age, 28);
    }

    #[test]
    fn non_numeric_age_is_a_violation() {
        let mut data = complete();
        data["age"] = json!("twenty-eight");
        let violations = NewParticipant::from_json(data).unwrap_err();
        assert!(violations.iter().any(|v| v.field == "age"));
    }

    #[test]
    fn all_violations_are_collected() {
        let violations = NewParticipant::from_json(json!({})).unwrap_err();
        for field in REQUIRED_FIELDS {
            assert!(
                violations.iter().any(|v| v.field == field),
                "missing violation for {field}"
            );
        }
        assert_eq!(violations.len(), REQUIRED_FIELDS.len());
    }

    #[test]
    fn whitespace_only_fields_are_violations() {
        let mut data = complete();
        data["city"] = json!("   ");
        let violations = NewParticipant::from_json(data).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "city");
    }

    #[test]
    fn treatment_details_required_when_flag_is_yes() {
        let mut data = complete();
        data["recentTreatments"] = json!("yes");
        let violations = NewParticipant::from_json(data).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "treatmentDetails");
    }

    #[test]
    fn detail_fields_optional_when_flag_is_no() {
        let p = NewParticipant::from_json(complete()).unwrap();
        assert_eq!(p.treatment_details, None);
        assert_eq!(p.condition_details, None);
    }

    #[test]
    fn detail_value_is_kept_when_present() {
        let mut data = complete();
        data["scalpConditions"] = json!("yes");
        data["conditionDetails"] = json!("mild dandruff");
        let p = NewParticipant::from_json(data).unwrap();
        assert_eq!(p.condition_details.as_deref(), Some("mild dandruff"));
    }

    #[test]
    fn non_object_body_reports_every_field() {
        let violations = NewParticipant::from_json(json!(5)).unwrap_err();
        assert_eq!(violations.len(), REQUIRED_FIELDS.len());
    }
}
