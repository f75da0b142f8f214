//! Request body validation for campaign writes.

use crate::error::{AppError, FieldErrors};
use crate::model::{CampaignDraft, CampaignPatch, CampaignStatus, Money, MoneyError, NAME_MAX_CHARS};
use serde_json::{Map, Value};

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";

/// Which fields must be present in the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Create,
    Replace,
    Partial,
}

pub struct RequestValidator;

impl RequestValidator {
    /// Create: name, budget and spend are required; status defaults to active.
    pub fn validate_create(body: &Map<String, Value>) -> Result<CampaignDraft, AppError> {
        let patch = validate(body, Mode::Create)?;
        match patch {
            CampaignPatch {
                name: Some(name),
                budget: Some(budget),
                spend: Some(spend),
                status,
            } => Ok(CampaignDraft {
                name,
                budget,
                spend,
                status: status.unwrap_or_default(),
            }),
            _ => Err(AppError::MalformedRequest("incomplete campaign body".into())),
        }
    }

    /// Replace: same requirements as create, but a missing status keeps the stored one.
    pub fn validate_replace(body: &Map<String, Value>) -> Result<CampaignPatch, AppError> {
        validate(body, Mode::Replace)
    }

    /// Validate only the fields present in body (for PATCH).
    pub fn validate_partial(body: &Map<String, Value>) -> Result<CampaignPatch, AppError> {
        validate(body, Mode::Partial)
    }
}

fn validate(body: &Map<String, Value>, mode: Mode) -> Result<CampaignPatch, AppError> {
    let mut errors = FieldErrors::new();
    let required = mode != Mode::Partial;

    let name = field(body, "name", required, &mut errors, parse_name);
    let budget = field(body, "budget", required, &mut errors, |v| parse_money(v, "Budget"));
    let spend = field(body, "spend", required, &mut errors, |v| parse_money(v, "Spend"));
    let status = field(body, "status", false, &mut errors, parse_status);

    if !errors.is_empty() {
        tracing::warn!(fields = %errors, "campaign body rejected");
    }
    errors.into_result(CampaignPatch {
        name,
        budget,
        spend,
        status,
    })
}

fn field<T>(
    body: &Map<String, Value>,
    name: &str,
    required: bool,
    errors: &mut FieldErrors,
    parse: impl FnOnce(&Value) -> Result<T, String>,
) -> Option<T> {
    match body.get(name) {
        None => {
            if required {
                errors.add(name, REQUIRED);
            }
            None
        }
        Some(Value::Null) => {
            errors.add(name, NOT_NULL);
            None
        }
        Some(v) => match parse(v) {
            Ok(value) => Some(value),
            Err(message) => {
                errors.add(name, message);
                None
            }
        },
    }
}

/// Strings and numbers are accepted; numbers keep their JSON spelling.
fn parse_name(v: &Value) -> Result<String, String> {
    let s = match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err("Not a valid string.".into()),
    };
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("This field may not be blank.".into());
    }
    if trimmed.chars().count() > NAME_MAX_CHARS {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            NAME_MAX_CHARS
        ));
    }
    Ok(trimmed.to_string())
}

/// Accepts JSON numbers and numeric strings.
fn parse_money(v: &Value, label: &str) -> Result<Money, String> {
    let parsed = match v {
        Value::String(s) => Money::parse(s),
        Value::Number(n) => Money::parse(&n.to_string()),
        _ => Err(MoneyError::Invalid),
    };
    parsed.map_err(|e| match e {
        MoneyError::Negative => format!("{} cannot be negative", label),
        other => other.to_string(),
    })
}

fn parse_status(v: &Value) -> Result<CampaignStatus, String> {
    match v {
        Value::String(s) => s.parse().map_err(|e: crate::model::UnknownStatus| e.to_string()),
        other => Err(format!("\"{}\" is not a valid choice.", other)),
    }
}
