use serde::{Deserialize, Deserializer, Serialize};

/// A persisted (cabinetType, brand) -> standard accessory charge association.
///
/// The backend enforces (cabinetType, brandName) unique; the client only
/// mirrors that pair. `id` is server-assigned and absent until the record has
/// been persisted. Fields the backend may omit are named optional members so
/// callers do not need ad hoc presence guards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareChargeDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Cabinet-type key. The backend delivers this as either a number (FK id)
    /// or a string depending on the serializer in play; both deserialize to
    /// the same string key so matrix lookups cannot silently miss.
    #[serde(deserialize_with = "string_or_number_key")]
    pub cabinet_type: String,
    #[serde(deserialize_with = "string_or_number_key")]
    pub brand_name: String,
    pub standard_accessory_charge: f64,
    /// ISO date (YYYY-MM-DD)
    pub effective_from: String,
    #[serde(default)]
    pub effective_to: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// CREATE payload: natural key plus the user-editable fields, no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHardwareChargeRequest {
    pub cabinet_type: String,
    pub brand_name: String,
    pub standard_accessory_charge: f64,
    pub effective_from: String,
    pub is_active: bool,
    pub currency: String,
}

/// The values a user commits into one matrix cell.
///
/// `amount` must already be a finite number; the view layer rejects
/// non-numeric input before this type is ever constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeInput {
    pub amount: f64,
    /// ISO date (YYYY-MM-DD)
    pub effective_from: String,
    /// None keeps the existing record's flag (or true for a new record)
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}

/// Accept `3`, `3.0` or `"3"` and yield `"3"`.
fn string_or_number_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Key::deserialize(deserializer)? {
        Key::Str(s) => s,
        Key::Int(i) => i.to_string(),
        Key::Float(f) => {
            if f.fract() == 0.0 {
                (f as i64).to_string()
            } else {
                f.to_string()
            }
        }
    })
}
