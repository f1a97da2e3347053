//! Vehicle Record Validator

use crate::error::{FieldError, ValidationErrors, ViolationKind};
use crate::record::{VehicleRecord, VehicleRecordSet};
use crate::rules::{evaluate_rules, join_path, vehicle_rules, FieldRule};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Year used in place of the clock; `anio` may go up to one past it
    pub reference_year: Option<i32>,
    /// Fewest vehicles a document may carry
    pub min_vehicles: usize,
    /// Most vehicles a document may carry
    pub max_vehicles: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reference_year: None,
            min_vehicles: 1,
            max_vehicles: 5,
        }
    }
}

/// Validator for vehicle records and per-document record sets.
///
/// The rule table is built once at construction, including the upper bound
/// for `anio`, so a validator is immutable and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
    rules: Vec<FieldRule>,
    max_year: i32,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        let reference_year = config
            .reference_year
            .unwrap_or_else(|| chrono::Local::now().year());
        let max_year = reference_year + 1;

        Self {
            rules: vehicle_rules(max_year),
            config,
            max_year,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Latest accepted model year
    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    /// Validate one untyped vehicle record.
    ///
    /// All field violations are collected. The chassis/engine distinctness
    /// rule only runs once every field is individually valid.
    pub fn validate(&self, input: &Value) -> Result<VehicleRecord, ValidationErrors> {
        self.check_record(input, "").map_err(|errors| {
            debug!(errors = errors.len(), "vehicle record rejected");
            ValidationErrors::new(errors)
        })
    }

    /// Validate the vehicles of one document.
    ///
    /// Each element is validated independently and its errors are reported
    /// under its index (`1.placa`). A count outside the configured bounds adds
    /// one set-level error with an empty path.
    pub fn validate_set(&self, input: &Value) -> Result<VehicleRecordSet, ValidationErrors> {
        let items = match input.as_array() {
            Some(items) => items,
            None => {
                return Err(ValidationErrors::new(vec![FieldError::new(
                    "",
                    ViolationKind::InvalidType,
                    "Se esperaba una lista de vehículos",
                    Some(input),
                )]))
            }
        };

        let mut errors = Vec::new();
        if let Some(error) = self.check_cardinality(items.len()) {
            errors.push(error);
        }

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.check_record(item, &index.to_string()) {
                Ok(record) => records.push(record),
                Err(mut record_errors) => errors.append(&mut record_errors),
            }
        }

        if errors.is_empty() {
            Ok(VehicleRecordSet::new(records))
        } else {
            debug!(
                vehicles = items.len(),
                errors = errors.len(),
                "vehicle set rejected"
            );
            Err(ValidationErrors::new(errors))
        }
    }

    fn check_cardinality(&self, count: usize) -> Option<FieldError> {
        let (min, max) = (self.config.min_vehicles, self.config.max_vehicles);
        let message = if count < min {
            if min == 1 {
                "Debe incluir al menos un vehículo".to_string()
            } else {
                format!("Debe incluir al menos {min} vehículos")
            }
        } else if count > max {
            format!("No puede incluir más de {max} vehículos")
        } else {
            return None;
        };

        Some(FieldError::new(
            "",
            ViolationKind::Cardinality,
            message,
            Some(&Value::from(count)),
        ))
    }

    fn check_record(&self, input: &Value, prefix: &str) -> Result<VehicleRecord, Vec<FieldError>> {
        let data = match input.as_object() {
            Some(data) => data,
            None => {
                return Err(vec![FieldError::new(
                    prefix,
                    ViolationKind::InvalidType,
                    "Se esperaba un objeto",
                    Some(input),
                )])
            }
        };

        let mut errors = Vec::new();
        evaluate_rules(&self.rules, data, prefix, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }

        // Every field passed its checks, so the typed view cannot disagree
        // with the rule table; a failure here still surfaces as a value
        let record: VehicleRecord = serde_json::from_value(input.clone()).map_err(|e| {
            vec![FieldError::new(
                prefix,
                ViolationKind::InvalidType,
                e.to_string(),
                None,
            )]
        })?;

        if record.chassis_number == record.engine_number {
            return Err(vec![FieldError::new(
                join_path(prefix, "numeroMotor"),
                ViolationKind::CrossField,
                "Número de chasis y motor deben ser diferentes",
                data.get("numeroMotor"),
            )]);
        }

        Ok(record)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FuelType, VehicleType};
    use serde_json::json;

    fn validator() -> Validator {
        Validator::new(ValidationConfig {
            reference_year: Some(2026),
            ..Default::default()
        })
    }

    fn valid_record() -> Value {
        json!({
            "placa": "PBA-1234",
            "marca": "Chevrolet",
            "modelo": "Aveo Family",
            "numeroMotor": "F15S3123456",
            "numeroChasis": "8LATJ5SD0C0123456",
            "anio": 2012,
            "tipo": "AUTOMOVIL",
            "condicion": "USADO",
            "color": "PLATEADO",
            "combustible": "GASOLINA",
            "numeroAsientos": 5,
            "avaluo": 6500.0,
            "confidence": 0.92,
            "documentSource": "matricula.pdf"
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut record = valid_record();
        record[field] = value;
        record
    }

    fn distinct_record(i: usize) -> Value {
        let mut record = valid_record();
        record["placa"] = json!(format!("PBA-12{i:02}"));
        record["numeroMotor"] = json!(format!("F15S31234{i:02}"));
        record
    }

    #[test]
    fn test_valid_record() {
        let record = validator().validate(&valid_record()).unwrap();
        assert_eq!(record.plate, "PBA-1234");
        assert_eq!(record.year, 2012);
        assert_eq!(record.vehicle_type, VehicleType::Automovil);
        assert_eq!(record.fuel, Some(FuelType::Gasolina));
        assert_eq!(record.seats, Some(5));
        assert_eq!(record.sale_price, None);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let record = validator().validate(&with("observaciones", json!("x")));
        assert!(record.is_ok());
    }

    #[test]
    fn test_chassis_equal_to_engine() {
        let mut record = with("numeroChasis", json!("ABC1234567890"));
        record["numeroMotor"] = json!("ABC1234567890");

        let errors = validator().validate(&record).unwrap_err();
        assert_eq!(errors.len(), 1);
        let error = &errors.errors()[0];
        assert_eq!(error.path, "numeroMotor");
        assert_eq!(error.kind, ViolationKind::CrossField);
        assert_eq!(error.message, "Número de chasis y motor deben ser diferentes");
    }

    #[test]
    fn test_cross_field_waits_for_field_checks() {
        // Equal but too short for a chassis number: only the field error shows
        let mut record = with("numeroChasis", json!("ABC12"));
        record["numeroMotor"] = json!("ABC12");

        let errors = validator().validate(&record).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].path, "numeroChasis");
        assert_eq!(errors.errors()[0].kind, ViolationKind::TooShort);
    }

    #[test]
    fn test_year_range() {
        let v = validator();
        assert!(v.validate(&with("anio", json!(1900))).is_ok());
        assert!(v.validate(&with("anio", json!(2026))).is_ok());
        assert!(v.validate(&with("anio", json!(2027))).is_ok());

        let errors = v.validate(&with("anio", json!(1899))).unwrap_err();
        assert_eq!(errors.errors()[0].path, "anio");
        assert_eq!(errors.errors()[0].message, "El año debe ser mayor o igual a 1900");

        let errors = v.validate(&with("anio", json!(2028))).unwrap_err();
        assert_eq!(errors.errors()[0].message, "El año no puede ser mayor a 2027");
    }

    #[test]
    fn test_year_follows_clock_by_default() {
        let current = chrono::Local::now().year();
        let v = Validator::default();
        assert_eq!(v.max_year(), current + 1);
        assert!(v.validate(&with("anio", json!(current))).is_ok());
        assert!(v.validate(&with("anio", json!(current + 2))).is_err());
    }

    #[test]
    fn test_missing_plate_does_not_short_circuit() {
        let mut record = with("marca", json!("X"));
        record["numeroMotor"] = json!("abc-1");
        record.as_object_mut().unwrap().remove("placa");

        let errors = validator().validate(&record).unwrap_err();
        let placa: Vec<_> = errors.for_path("placa").collect();
        assert_eq!(placa.len(), 1);
        assert_eq!(placa[0].kind, ViolationKind::Required);
        assert_eq!(placa[0].message, "La placa es requerida");
        assert_eq!(errors.for_path("marca").count(), 1);
        assert_eq!(errors.for_path("numeroMotor").count(), 1);
        assert_eq!(
            errors.for_path("numeroMotor").next().unwrap().message,
            "El número de motor solo puede contener letras mayúsculas y números"
        );
    }

    #[test]
    fn test_non_object_record() {
        let errors = validator().validate(&json!("PBA-1234")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].path, "");
        assert_eq!(errors.errors()[0].message, "Se esperaba un objeto");
    }

    #[test]
    fn test_set_cardinality() {
        let v = validator();

        let errors = v.validate_set(&json!([])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].kind, ViolationKind::Cardinality);
        assert_eq!(errors.errors()[0].message, "Debe incluir al menos un vehículo");

        let six: Vec<_> = (0..6).map(distinct_record).collect();
        let errors = v.validate_set(&json!(six)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].message, "No puede incluir más de 5 vehículos");

        let five: Vec<_> = (0..5).map(distinct_record).collect();
        let set = v.validate_set(&json!(five)).unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(set.records()[4].plate, "PBA-1204");
    }

    #[test]
    fn test_set_reports_record_and_cardinality_errors_together() {
        let mut six: Vec<_> = (0..6).map(distinct_record).collect();
        six[2]["placa"] = json!("bad");

        let errors = validator().validate_set(&json!(six)).unwrap_err();
        assert_eq!(errors.errors()[0].path, "");
        assert_eq!(errors.errors()[0].kind, ViolationKind::Cardinality);
        assert!(errors.errors()[1..].iter().all(|e| e.path == "2.placa"));
        assert!(errors.len() > 1);
    }

    #[test]
    fn test_set_cross_field_path() {
        let chassis = valid_record()["numeroChasis"].clone();
        let record = with("numeroMotor", chassis);
        let errors = validator()
            .validate_set(&json!([valid_record(), record]))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].path, "1.numeroMotor");
    }

    #[test]
    fn test_set_requires_array() {
        let errors = validator().validate_set(&valid_record()).unwrap_err();
        assert_eq!(errors.errors()[0].message, "Se esperaba una lista de vehículos");
    }

    #[test]
    fn test_custom_cardinality() {
        let v = Validator::new(ValidationConfig {
            reference_year: Some(2026),
            min_vehicles: 2,
            max_vehicles: 3,
        });
        let errors = v.validate_set(&json!([valid_record()])).unwrap_err();
        assert_eq!(errors.errors()[0].message, "Debe incluir al menos 2 vehículos");
    }

    #[test]
    fn test_validation_is_deterministic() {
        let v = validator();
        let input = with("placa", json!("abc-12"));
        assert_eq!(v.validate(&input), v.validate(&input));
    }
}
