use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::c003_hardware_charge::dto::HardwareChargeDto;
use crate::matrix::error::ApiError;

/// Two-level sparse grid of charge records keyed by
/// (cabinetType key, brand key). Absence of a cell means "no charge
/// configured for this combination".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeMatrix {
    #[serde(flatten)]
    cells: HashMap<String, HashMap<String, HardwareChargeDto>>,
}

impl ChargeMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project a flat record array into the grid.
    ///
    /// Pure; the last record wins if the input carries duplicates of one
    /// (cabinetType, brand) pair. Duplicates violate the backend's unique
    /// constraint and should not occur, but projection must not fail on them.
    pub fn project(records: &[HardwareChargeDto]) -> Self {
        let mut grid = Self::new();
        for record in records {
            grid.insert(record.clone());
        }
        grid
    }

    /// Build a grid from the raw list payload.
    ///
    /// The list endpoint normally returns a JSON array of records, but some
    /// deployments respond with an object already shaped as a grid; that
    /// shape passes through unchanged.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, ApiError> {
        if payload.is_array() {
            let records: Vec<HardwareChargeDto> = serde_json::from_value(payload)
                .map_err(|e| ApiError::Decode(format!("charge list: {}", e)))?;
            Ok(Self::project(&records))
        } else {
            serde_json::from_value(payload)
                .map_err(|e| ApiError::Decode(format!("charge grid: {}", e)))
        }
    }

    /// Place a record at its own (cabinetType, brand) address, replacing any
    /// previous record there.
    pub fn insert(&mut self, record: HardwareChargeDto) {
        self.cells
            .entry(record.cabinet_type.clone())
            .or_default()
            .insert(record.brand_name.clone(), record);
    }

    pub fn get(&self, cabinet_type: &str, brand_name: &str) -> Option<&HardwareChargeDto> {
        self.cells.get(cabinet_type)?.get(brand_name)
    }

    /// All records back out of the grid, in no particular order.
    pub fn flatten(&self) -> Vec<HardwareChargeDto> {
        self.cells
            .values()
            .flat_map(|row| row.values().cloned())
            .collect()
    }

    pub fn populated_cells(&self) -> usize {
        self.cells.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.populated_cells() == 0
    }
}
