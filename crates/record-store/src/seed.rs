//! Sample Data Seeding
//!
//! Clears the vehicle collection and inserts a fixed set of sample vehicles.
//! Samples go through the validator first, so the seed never writes a record
//! the validator would reject.

use crate::{RecordStore, StoreError};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;
use vehicle_validator::{format_plate, ValidationErrors, Validator};

/// Collection holding seeded vehicles
pub const VEHICLES: &str = "vehicles";

/// Seeding errors
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Sample vehicle {index} rejected: {errors}")]
    InvalidSample {
        index: usize,
        errors: ValidationErrors,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of one seed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Records removed before inserting
    pub deleted: usize,
    pub inserted: usize,
    /// Collection size after the run
    pub total: usize,
}

/// Sample vehicles, as an extraction pipeline would hand them over
pub fn sample_vehicles() -> Vec<Value> {
    vec![
        json!({
            "placa": "PBA1234",
            "marca": "Toyota",
            "modelo": "Hilux 4x4 CD",
            "numeroMotor": "2GD0456789",
            "numeroChasis": "MR0HA3CD8L0456789",
            "anio": 2020,
            "tipo": "CAMIONETA",
            "condicion": "USADO",
            "color": "BLANCO",
            "cilindrada": "2400 cc",
            "combustible": "DIESEL",
            "numeroAsientos": 5,
            "avaluo": 28500.0,
            "precioVenta": 31000.0,
            "confidence": 0.94,
            "documentSource": "matricula-PBA1234.pdf"
        }),
        json!({
            "placa": "GYE-4821",
            "marca": "Hyundai",
            "modelo": "Tucson",
            "numeroMotor": "G4NA9876543",
            "numeroChasis": "KMHJU81BDCU123456",
            "anio": 2019,
            "tipo": "AUTOMOVIL",
            "condicion": "USADO",
            "combustible": "GASOLINA",
            "avaluo": 17800.0
        }),
        json!({
            "placa": "IBA-123",
            "marca": "Suzuki",
            "modelo": "GN 125",
            "numeroMotor": "157FMI3456",
            "numeroChasis": "LC6PCJG9870812345",
            "anio": 2022,
            "tipo": "MOTOCICLETA",
            "condicion": "NUEVO",
            "color": "ROJO",
            "cilindrada": "125 cc",
            "numeroAsientos": 2
        }),
    ]
}

/// Reset the vehicle collection to the sample data.
///
/// Plates are stored in their dashed display form.
pub fn seed<S: RecordStore + ?Sized>(
    store: &S,
    validator: &Validator,
) -> Result<SeedReport, SeedError> {
    let samples = sample_vehicles();

    // Validate everything before touching the store
    let mut records = Vec::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        let mut record = validator
            .validate(sample)
            .map_err(|errors| SeedError::InvalidSample { index, errors })?;
        record.plate = format_plate(&record.plate);
        records.push(record);
    }

    let deleted = store.delete_many(VEHICLES)?;
    info!("Cleared {} existing vehicles", deleted);

    for record in &records {
        let created = store.create(VEHICLES, serde_json::to_value(record)?)?;
        info!("Seeded vehicle {} (id {})", record.plate, created.id);
    }

    let total = store.count(VEHICLES)?;
    info!("Seed complete: {} vehicles", total);

    Ok(SeedReport {
        deleted,
        inserted: records.len(),
        total,
    })
}
