use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::ValidationError;

/// A boolean as posted by web forms.
///
/// Anything that is not a recognised spelling is kept as `Unrecognised` so it
/// is reported as a field error instead of failing the whole body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LaxBool {
    Value(bool),
    Unrecognised,
}

impl LaxBool {
    pub fn value(self) -> Option<bool> {
        match self {
            LaxBool::Value(b) => Some(b),
            LaxBool::Unrecognised => None,
        }
    }

    fn from_json(value: &Value) -> Self {
        let parsed = match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_f64() {
                Some(v) if v == 0.0 => Some(false),
                Some(v) if v == 1.0 => Some(true),
                _ => None,
            },
            Value::String(s) => match s.to_lowercase().as_str() {
                "1" | "on" | "t" | "true" | "y" | "yes" => Some(true),
                "0" | "off" | "f" | "false" | "n" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        };

        parsed.map_or(LaxBool::Unrecognised, LaxBool::Value)
    }
}

/// `deserialize_with` helper for optional form booleans. `null` reads as absent.
pub fn deserialize_lax_bool<'de, D>(deserializer: D) -> Result<Option<LaxBool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(LaxBool::from_json(&other)),
    })
}

pub fn validate_lax_bool(value: &LaxBool) -> Result<(), ValidationError> {
    match value {
        LaxBool::Value(_) => Ok(()),
        LaxBool::Unrecognised => Err(ValidationError::new("bool_parsing")),
    }
}

/// Address shape checks the `email` rule lets through: dot placement in the
/// local part and a dotted domain.
pub fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return Err(ValidationError::new("email"));
    };

    let local_ok = !local.is_empty()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..");
    let domain_ok = domain.contains('.') && !domain.split('.').any(str::is_empty);

    if local_ok && domain_ok {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}
