//! Vehicle Check
//!
//! Command handlers behind the `vehicle-check` binary: validate vehicle
//! records or per-document sets read as JSON, inspect plates, and seed an
//! in-memory store with sample vehicles.

mod settings;

pub use settings::{AppConfig, LogFormat, DEFAULT_CONFIG_FILE};

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use vehicle_validator::{
    format_plate, is_valid_plate, normalize_plate, FieldError, Validator,
};

/// Initialize logging on stderr; `RUST_LOG` overrides `default_level`
pub fn init_logging(default_level: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (tests, embedding)
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Read a JSON document from a file, or from stdin when `path` is `-`
pub fn read_input(path: &Path) -> anyhow::Result<Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Result of validating one document
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    /// Validated record or set, normalized by the typed model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// Validate a single record (`set == false`) or a record set
pub fn validate_document(
    validator: &Validator,
    input: &Value,
    set: bool,
) -> anyhow::Result<ValidationReport> {
    let outcome = if set {
        validator
            .validate_set(input)
            .map(|records| serde_json::to_value(&records))
    } else {
        validator
            .validate(input)
            .map(|record| serde_json::to_value(&record))
    };

    Ok(match outcome {
        Ok(data) => ValidationReport {
            valid: true,
            data: Some(data.context("failed to serialize validated data")?),
            errors: Vec::new(),
        },
        Err(errors) => ValidationReport {
            valid: false,
            data: None,
            errors: errors.into_inner(),
        },
    })
}

/// Recognition and normalization of one plate
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PlateReport {
    pub input: String,
    pub valid: bool,
    pub normalized: String,
    pub formatted: String,
}

pub fn describe_plate(plate: &str) -> PlateReport {
    PlateReport {
        input: plate.to_string(),
        valid: is_valid_plate(plate),
        normalized: normalize_plate(plate),
        formatted: format_plate(plate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use vehicle_validator::ValidationConfig;

    fn validator() -> Validator {
        Validator::new(ValidationConfig {
            reference_year: Some(2026),
            ..Default::default()
        })
    }

    fn record() -> Value {
        json!({
            "placa": "ABC1234",
            "marca": "Nissan",
            "modelo": "Frontier",
            "numeroMotor": "YD25123456",
            "numeroChasis": "3N6CD33B1ZK123456",
            "anio": 2021,
            "tipo": "CAMIONETA",
            "condicion": "USADO"
        })
    }

    #[test]
    fn test_validate_single_record() {
        let report = validate_document(&validator(), &record(), false).unwrap();
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.data.unwrap()["placa"], "ABC1234");
    }

    #[test]
    fn test_validate_set_report() {
        let report = validate_document(&validator(), &json!([]), true).unwrap();
        assert!(!report.valid);
        assert!(report.data.is_none());
        assert_eq!(report.errors[0].message, "Debe incluir al menos un vehículo");

        let report = validate_document(&validator(), &json!([record()]), true).unwrap();
        assert!(report.valid);
        assert_eq!(report.data.unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_report_serialization_omits_empty_parts() {
        let report = validate_document(&validator(), &json!({}), false).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["valid"], false);
        assert!(value.get("data").is_none());
        assert_eq!(value["errors"][0]["path"], "placa");
        assert_eq!(value["errors"][0]["kind"], "required");
    }

    #[test]
    fn test_describe_plate() {
        assert_eq!(
            describe_plate("abc-1234"),
            PlateReport {
                input: "abc-1234".to_string(),
                valid: false,
                normalized: "ABC1234".to_string(),
                formatted: "ABC-1234".to_string(),
            }
        );
        assert!(describe_plate("ABC-123").valid);
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", record()).unwrap();
        let value = read_input(file.path()).unwrap();
        assert_eq!(value, record());
    }

    #[test]
    fn test_read_input_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = read_input(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON"));
    }
}
