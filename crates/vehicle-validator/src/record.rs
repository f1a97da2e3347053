//! Vehicle Record Types

use crate::plate::format_plate;
use serde::{Deserialize, Serialize};

/// Vehicle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Automovil,
    Camioneta,
    Motocicleta,
    Camion,
    Bus,
    Otro,
}

impl VehicleType {
    /// Wire names, in declaration order
    pub const NAMES: &'static [&'static str] = &[
        "AUTOMOVIL",
        "CAMIONETA",
        "MOTOCICLETA",
        "CAMION",
        "BUS",
        "OTRO",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Automovil => "AUTOMOVIL",
            Self::Camioneta => "CAMIONETA",
            Self::Motocicleta => "MOTOCICLETA",
            Self::Camion => "CAMION",
            Self::Bus => "BUS",
            Self::Otro => "OTRO",
        }
    }
}

/// Vehicle condition at the time of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleCondition {
    Nuevo,
    Usado,
    Reparado,
}

impl VehicleCondition {
    pub const NAMES: &'static [&'static str] = &["NUEVO", "USADO", "REPARADO"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nuevo => "NUEVO",
            Self::Usado => "USADO",
            Self::Reparado => "REPARADO",
        }
    }
}

/// Fuel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    Gasolina,
    Diesel,
    Gas,
    Electrico,
    Hibrido,
}

impl FuelType {
    pub const NAMES: &'static [&'static str] =
        &["GASOLINA", "DIESEL", "GAS", "ELECTRICO", "HIBRIDO"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gasolina => "GASOLINA",
            Self::Diesel => "DIESEL",
            Self::Gas => "GAS",
            Self::Electrico => "ELECTRICO",
            Self::Hibrido => "HIBRIDO",
        }
    }
}

/// One vehicle extracted from or entered for a legal document.
///
/// Values of this type only come out of [`crate::Validator`], so every
/// field already satisfies its declared constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "marca")]
    pub make: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "numeroMotor")]
    pub engine_number: String,
    #[serde(rename = "numeroChasis")]
    pub chassis_number: String,
    #[serde(rename = "anio")]
    pub year: i32,
    #[serde(rename = "tipo")]
    pub vehicle_type: VehicleType,
    #[serde(rename = "condicion")]
    pub condition: VehicleCondition,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Engine displacement as written on the document (`"1600 cc"`)
    #[serde(rename = "cilindrada", default, skip_serializing_if = "Option::is_none")]
    pub displacement: Option<String>,
    #[serde(rename = "combustible", default, skip_serializing_if = "Option::is_none")]
    pub fuel: Option<FuelType>,
    #[serde(rename = "numeroAsientos", default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u8>,
    /// Appraisal value
    #[serde(rename = "avaluo", default, skip_serializing_if = "Option::is_none")]
    pub appraisal: Option<f64>,
    #[serde(rename = "precioVenta", default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    /// Extraction confidence in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(rename = "documentSource", default, skip_serializing_if = "Option::is_none")]
    pub document_source: Option<String>,
}

impl VehicleRecord {
    /// Plate in its dashed display form
    pub fn formatted_plate(&self) -> String {
        format_plate(&self.plate)
    }
}

/// Ordered sequence of validated vehicles belonging to one document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VehicleRecordSet(Vec<VehicleRecord>);

impl VehicleRecordSet {
    /// Only the validator builds sets, so the cardinality bound always holds
    pub(crate) fn new(records: Vec<VehicleRecord>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated set; provided for API symmetry
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VehicleRecord> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<VehicleRecord> {
        self.0
    }
}

impl IntoIterator for VehicleRecordSet {
    type Item = VehicleRecord;
    type IntoIter = std::vec::IntoIter<VehicleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a VehicleRecordSet {
    type Item = &'a VehicleRecord;
    type IntoIter = std::slice::Iter<'a, VehicleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
