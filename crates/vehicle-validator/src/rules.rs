//! Field Rule Table and Evaluator
//!
//! Each field maps to a declared type plus an ordered list of checks. Fields
//! are evaluated independently and every failing check is reported; a value
//! of the wrong JSON type yields one type error and skips its checks.

use crate::error::{FieldError, ViolationKind};
use crate::plate::PLATE_RE;
use crate::record::{FuelType, VehicleCondition, VehicleType};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Engine and chassis numbers: uppercase letters and digits only
static ALNUM_UPPER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").expect("valid identifier regex"));

pub(crate) const MIN_YEAR: i32 = 1900;

/// Declared JSON type of a field
#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldKind {
    Text,
    Integer,
    Number,
    /// String restricted to the given names
    OneOf {
        allowed: &'static [&'static str],
        message: &'static str,
    },
}

impl FieldKind {
    fn type_message(&self) -> &'static str {
        match self {
            Self::Text | Self::OneOf { .. } => "Se esperaba texto",
            Self::Integer => "Se esperaba un número entero",
            Self::Number => "Se esperaba un número",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Text | Self::OneOf { .. } => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
        }
    }
}

/// A single constraint applied once the field has the right type
#[derive(Debug, Clone)]
pub(crate) enum Check {
    MinLength(usize, String),
    MaxLength(usize, String),
    Pattern(&'static LazyLock<Regex>, String),
    /// Inclusive lower bound
    Min(f64, String),
    /// Inclusive upper bound
    Max(f64, String),
    /// Strictly greater than zero
    Positive(String),
}

/// Rules for one field of the record
#[derive(Debug, Clone)]
pub(crate) struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Message for an absent required field; `None` marks the field optional
    pub required: Option<&'static str>,
    pub checks: Vec<Check>,
}

impl FieldRule {
    fn required(name: &'static str, kind: FieldKind, message: &'static str) -> Self {
        Self {
            name,
            kind,
            required: Some(message),
            checks: Vec::new(),
        }
    }

    fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: None,
            checks: Vec::new(),
        }
    }

    fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }
}

/// Build the rule table for vehicle records; `max_year` bounds `anio`
pub(crate) fn vehicle_rules(max_year: i32) -> Vec<FieldRule> {
    use Check::*;
    use FieldKind::*;

    vec![
        FieldRule::required("placa", Text, "La placa es requerida")
            .check(MinLength(6, "La placa debe tener al menos 6 caracteres".into()))
            .check(MaxLength(8, "La placa no puede exceder 8 caracteres".into()))
            .check(Pattern(
                &PLATE_RE,
                "Formato de placa inválido (ej: ABC-1234 o ABC1234)".into(),
            )),
        FieldRule::required("marca", Text, "La marca es requerida")
            .check(MinLength(2, "La marca debe tener al menos 2 caracteres".into()))
            .check(MaxLength(50, "La marca no puede exceder 50 caracteres".into())),
        FieldRule::required("modelo", Text, "El modelo es requerido")
            .check(MinLength(1, "El modelo es requerido".into()))
            .check(MaxLength(50, "El modelo no puede exceder 50 caracteres".into())),
        FieldRule::required("numeroMotor", Text, "El número de motor es requerido")
            .check(MinLength(
                5,
                "El número de motor debe tener al menos 5 caracteres".into(),
            ))
            .check(MaxLength(
                30,
                "El número de motor no puede exceder 30 caracteres".into(),
            ))
            .check(Pattern(
                &ALNUM_UPPER_RE,
                "El número de motor solo puede contener letras mayúsculas y números".into(),
            )),
        FieldRule::required("numeroChasis", Text, "El número de chasis es requerido")
            .check(MinLength(
                10,
                "El número de chasis debe tener al menos 10 caracteres".into(),
            ))
            .check(MaxLength(
                25,
                "El número de chasis no puede exceder 25 caracteres".into(),
            ))
            .check(Pattern(
                &ALNUM_UPPER_RE,
                "El número de chasis solo puede contener letras mayúsculas y números".into(),
            )),
        FieldRule::required("anio", Integer, "El año es requerido")
            .check(Min(
                f64::from(MIN_YEAR),
                format!("El año debe ser mayor o igual a {MIN_YEAR}"),
            ))
            .check(Max(
                f64::from(max_year),
                format!("El año no puede ser mayor a {max_year}"),
            )),
        FieldRule::required(
            "tipo",
            OneOf {
                allowed: VehicleType::NAMES,
                message: "Tipo de vehículo inválido",
            },
            "El tipo de vehículo es requerido",
        ),
        FieldRule::required(
            "condicion",
            OneOf {
                allowed: VehicleCondition::NAMES,
                message: "Condición de vehículo inválida",
            },
            "La condición del vehículo es requerida",
        ),
        FieldRule::optional("color", Text)
            .check(MaxLength(30, "El color no puede exceder 30 caracteres".into())),
        FieldRule::optional("cilindrada", Text).check(MaxLength(
            20,
            "La cilindrada no puede exceder 20 caracteres".into(),
        )),
        FieldRule::optional(
            "combustible",
            OneOf {
                allowed: FuelType::NAMES,
                message: "Tipo de combustible inválido",
            },
        ),
        FieldRule::optional("numeroAsientos", Integer)
            .check(Min(1.0, "Debe tener al menos 1 asiento".into()))
            .check(Max(100.0, "No puede tener más de 100 asientos".into())),
        FieldRule::optional("avaluo", Number)
            .check(Positive("El avalúo debe ser un valor positivo".into())),
        FieldRule::optional("precioVenta", Number)
            .check(Positive("El precio de venta debe ser un valor positivo".into())),
        FieldRule::optional("confidence", Number)
            .check(Min(0.0, "La confianza debe estar entre 0 y 1".into()))
            .check(Max(1.0, "La confianza debe estar entre 0 y 1".into())),
        FieldRule::optional("documentSource", Text).check(MaxLength(
            100,
            "La fuente del documento no puede exceder 100 caracteres".into(),
        )),
    ]
}

/// Join a field name onto a path prefix (`""` + `placa`, `"2"` + `placa`)
pub(crate) fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

/// Evaluate every rule against one record object, appending violations
pub(crate) fn evaluate_rules(
    rules: &[FieldRule],
    data: &Map<String, Value>,
    prefix: &str,
    errors: &mut Vec<FieldError>,
) {
    for rule in rules {
        evaluate_field(rule, data.get(rule.name), prefix, errors);
    }
}

fn evaluate_field(
    rule: &FieldRule,
    value: Option<&Value>,
    prefix: &str,
    errors: &mut Vec<FieldError>,
) {
    let path = || join_path(prefix, rule.name);

    // Null counts as absent
    let value = match value {
        Some(v) if !v.is_null() => v,
        _ => {
            if let Some(message) = rule.required {
                errors.push(FieldError::new(path(), ViolationKind::Required, message, None));
            }
            return;
        }
    };

    if !rule.kind.accepts(value) {
        errors.push(FieldError::new(
            path(),
            ViolationKind::InvalidType,
            rule.kind.type_message(),
            Some(value),
        ));
        return;
    }

    if let FieldKind::OneOf { allowed, message } = rule.kind {
        let name = value.as_str().unwrap_or_default();
        if !allowed.contains(&name) {
            errors.push(FieldError::new(
                path(),
                ViolationKind::NotAllowed,
                message,
                Some(value),
            ));
        }
    }

    for check in &rule.checks {
        if let Some((kind, message)) = failed_check(check, value) {
            errors.push(FieldError::new(path(), kind, message, Some(value)));
        }
    }
}

fn failed_check<'a>(check: &'a Check, value: &Value) -> Option<(ViolationKind, &'a str)> {
    match check {
        Check::MinLength(min, message) => {
            let len = value.as_str()?.chars().count();
            (len < *min).then_some((ViolationKind::TooShort, message.as_str()))
        }
        Check::MaxLength(max, message) => {
            let len = value.as_str()?.chars().count();
            (len > *max).then_some((ViolationKind::TooLong, message.as_str()))
        }
        Check::Pattern(regex, message) => {
            let s = value.as_str()?;
            (!regex.is_match(s)).then_some((ViolationKind::Pattern, message.as_str()))
        }
        Check::Min(min, message) => {
            let num = value.as_f64()?;
            (num < *min).then_some((ViolationKind::OutOfRange, message.as_str()))
        }
        Check::Max(max, message) => {
            let num = value.as_f64()?;
            (num > *max).then_some((ViolationKind::OutOfRange, message.as_str()))
        }
        Check::Positive(message) => {
            let num = value.as_f64()?;
            (num <= 0.0).then_some((ViolationKind::OutOfRange, message.as_str()))
        }
    }
}
