use crate::domain::c003_hardware_charge::dto::{
    ChargeInput, CreateHardwareChargeRequest, HardwareChargeDto,
};
use crate::matrix::grid::ChargeMatrix;

/// The request a cell edit translates into.
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertAction {
    Create(CreateHardwareChargeRequest),
    /// Full-replace PUT of the existing record with the edited fields
    /// overwritten. Every other field round-trips unchanged.
    Update { id: i64, record: HardwareChargeDto },
}

/// Decide CREATE vs UPDATE for a cell edit.
///
/// A cell occupied by a record with a server-assigned id updates that record;
/// anything else (empty cell, or a record somehow lacking an id) creates.
/// Pure; issues no request and never mutates the grid.
pub fn resolve(
    grid: &ChargeMatrix,
    cabinet_type: &str,
    brand_name: &str,
    input: &ChargeInput,
    default_currency: &str,
) -> UpsertAction {
    match grid.get(cabinet_type, brand_name) {
        Some(existing) if existing.id.is_some() => {
            let mut record = existing.clone();
            record.standard_accessory_charge = input.amount;
            record.effective_from = input.effective_from.clone();
            record.is_active = input.is_active.unwrap_or(existing.is_active);
            UpsertAction::Update {
                id: existing.id.unwrap_or_default(),
                record,
            }
        }
        _ => UpsertAction::Create(CreateHardwareChargeRequest {
            cabinet_type: cabinet_type.to_string(),
            brand_name: brand_name.to_string(),
            standard_accessory_charge: input.amount,
            effective_from: input.effective_from.clone(),
            is_active: input.is_active.unwrap_or(true),
            currency: default_currency.to_string(),
        }),
    }
}
