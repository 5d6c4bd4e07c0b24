use contracts::domain::c001_cabinet_type::CabinetTypeDto;
use contracts::domain::c002_hardware_brand::HardwareBrandDto;
use contracts::domain::c003_hardware_charge::dto::ChargeInput;
use contracts::matrix::{save_charge_cell, ChargeMatrix, MatrixLogger, PendingKeySet};
use leptos::prelude::*;

use crate::domain::c001_cabinet_type::api::fetch_cabinet_types;
use crate::domain::c002_hardware_brand::api::fetch_hardware_brands;
use crate::domain::c003_hardware_charge::api::list_charges;
use crate::domain::c003_hardware_charge::transport::HttpChargeTransport;
use crate::shared::logger::ConsoleMatrixLogger;

const DEFAULT_CURRENCY: &str = "INR";

/// ViewModel for the hardware-charges matrix page.
///
/// The grid signal only ever holds server-confirmed records: saves commit the
/// response record, never the value the user typed.
#[derive(Clone, Copy)]
pub struct MatrixViewModel {
    pub cabinet_types: RwSignal<Vec<CabinetTypeDto>>,
    pub brands: RwSignal<Vec<HardwareBrandDto>>,
    pub grid: RwSignal<ChargeMatrix>,
    pub pending: RwSignal<PendingKeySet>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
}

impl MatrixViewModel {
    pub fn new() -> Self {
        Self {
            cabinet_types: RwSignal::new(Vec::new()),
            brands: RwSignal::new(Vec::new()),
            grid: RwSignal::new(ChargeMatrix::new()),
            pending: RwSignal::new(PendingKeySet::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
        }
    }

    /// Load both master axes and the charge list.
    pub fn load(&self) {
        let cabinet_types = self.cabinet_types;
        let brands = self.brands;
        let grid = self.grid;
        let error = self.error;
        let loading = self.loading;

        loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = async {
                let types = fetch_cabinet_types().await?;
                let brand_list = fetch_hardware_brands().await?;
                let payload = list_charges().await.map_err(|e| e.user_message())?;
                let matrix = ChargeMatrix::from_payload(payload).map_err(|e| e.user_message())?;
                Ok::<_, String>((types, brand_list, matrix))
            }
            .await;

            match result {
                Ok((types, brand_list, matrix)) => {
                    cabinet_types.set(types);
                    brands.set(brand_list);
                    grid.set(matrix);
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
            loading.set(false);
        });
    }

    pub fn is_pending(&self, cabinet_type: &str, brand_name: &str) -> bool {
        self.pending
            .with(|p| p.is_pending(cabinet_type, brand_name))
    }

    /// Commit one cell edit.
    ///
    /// Non-numeric input is rejected here, before any request. The pending
    /// key is set before the request starts and cleared on every outcome.
    pub fn save_cell(&self, cabinet_type: String, brand_name: String, raw_amount: String) {
        let raw = raw_amount.trim().to_string();
        if raw.is_empty() {
            // clearing a cell is not a delete; leave the record untouched
            return;
        }
        let amount = match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                self.error
                    .set(Some(format!("\"{}\" is not a valid amount", raw)));
                return;
            }
        };

        let input = ChargeInput {
            amount,
            effective_from: today_iso(),
            is_active: None,
        };

        let grid = self.grid;
        let pending = self.pending;
        let error = self.error;

        let overlapping = pending.with_untracked(|p| p.is_pending(&cabinet_type, &brand_name));
        if overlapping {
            // not prevented; the later response wins in the grid
            ConsoleMatrixLogger.warn(&format!(
                "cell {}-{} edited again while a save is in flight",
                cabinet_type, brand_name
            ));
        }
        pending.update(|p| {
            p.begin(&cabinet_type, &brand_name);
        });

        wasm_bindgen_futures::spawn_local(async move {
            let snapshot = grid.get_untracked();
            let result = save_charge_cell(
                &HttpChargeTransport,
                &snapshot,
                &cabinet_type,
                &brand_name,
                &input,
                DEFAULT_CURRENCY,
                &ConsoleMatrixLogger,
            )
            .await;

            match result {
                Ok(outcome) => {
                    grid.update(|g| {
                        if let Some(fresh) = outcome.refreshed {
                            *g = fresh;
                        }
                        g.insert(outcome.record);
                    });
                    error.set(None);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            pending.update(|p| p.end(&cabinet_type, &brand_name));
        });
    }
}

/// Today's date as the default effectiveFrom for a cell edit.
fn today_iso() -> String {
    chrono::Utc::now().date_naive().to_string()
}
