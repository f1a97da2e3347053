//! Vehicle Record Validation
//!
//! Validates untyped vehicle records extracted from legal documents against
//! per-field rules and the chassis/engine distinctness rule, enforces the
//! per-document vehicle count, and normalizes license plates.

mod error;
mod plate;
mod record;
mod rules;
mod validator;

pub use error::{FieldError, ValidationErrors, ViolationKind};
pub use plate::{format_plate, is_valid_plate, normalize_plate};
pub use record::{FuelType, VehicleCondition, VehicleRecord, VehicleRecordSet, VehicleType};
pub use validator::{ValidationConfig, Validator};
