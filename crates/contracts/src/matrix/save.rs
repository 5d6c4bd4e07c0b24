use async_trait::async_trait;
use thiserror::Error;

use crate::domain::c003_hardware_charge::dto::{
    ChargeInput, CreateHardwareChargeRequest, HardwareChargeDto,
};
use crate::matrix::error::ApiError;
use crate::matrix::grid::ChargeMatrix;
use crate::matrix::logger::MatrixLogger;
use crate::matrix::resolver::{resolve, UpsertAction};

/// REST seam the save flow drives. The frontend implements this over
/// `gloo-net`; tests implement it in memory.
#[async_trait(?Send)]
pub trait ChargeTransport {
    /// Raw list payload: a JSON array of records, or (defensively) an object
    /// already shaped as a grid. `ChargeMatrix::from_payload` handles both.
    async fn fetch_all(&self) -> Result<serde_json::Value, ApiError>;
    async fn create(
        &self,
        request: &CreateHardwareChargeRequest,
    ) -> Result<HardwareChargeDto, ApiError>;
    async fn update(
        &self,
        id: i64,
        record: &HardwareChargeDto,
    ) -> Result<HardwareChargeDto, ApiError>;
}

/// A confirmed save. `record` is the server's response and is the only thing
/// the caller should commit to its grid. `refreshed` carries the re-fetched
/// grid (with `record` already placed) when a conflict forced a refresh, so
/// the caller can replace its whole cache instead of patching a stale one.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub record: HardwareChargeDto,
    pub refreshed: Option<ChargeMatrix>,
}

#[derive(Debug, Clone, Error)]
pub enum SaveError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The conflict retry could not find the record even after a refresh.
    #[error("this charge changed on the server; refresh the page and try again")]
    StaleCell,
}

impl SaveError {
    pub fn user_message(&self) -> String {
        match self {
            SaveError::Api(e) => e.user_message(),
            SaveError::StaleCell => self.to_string(),
        }
    }
}

/// Commit one cell edit: decide CREATE vs UPDATE against the given grid,
/// issue the request, and recover from a uniqueness conflict on CREATE by
/// re-fetching, re-resolving against the fresh grid, and retrying as UPDATE
/// exactly once.
///
/// The refresh is awaited before the retry reads the grid, and the retry
/// never consults the caller's (by then stale) snapshot. If the fresh grid
/// still has no id for the cell the flow fails permanently; it never loops.
pub async fn save_charge_cell<T: ChargeTransport>(
    transport: &T,
    grid: &ChargeMatrix,
    cabinet_type: &str,
    brand_name: &str,
    input: &ChargeInput,
    default_currency: &str,
    logger: &dyn MatrixLogger,
) -> Result<SaveOutcome, SaveError> {
    match resolve(grid, cabinet_type, brand_name, input, default_currency) {
        UpsertAction::Update { id, record } => {
            logger.debug(&format!(
                "updating charge {} for cell {}-{}",
                id, cabinet_type, brand_name
            ));
            let record = transport.update(id, &record).await?;
            Ok(SaveOutcome {
                record,
                refreshed: None,
            })
        }
        UpsertAction::Create(request) => {
            logger.debug(&format!(
                "creating charge for cell {}-{}",
                cabinet_type, brand_name
            ));
            match transport.create(&request).await {
                Ok(record) => Ok(SaveOutcome {
                    record,
                    refreshed: None,
                }),
                Err(e) if e.is_unique_conflict() => {
                    logger.warn(&format!(
                        "create for cell {}-{} hit an existing record, refreshing and retrying as update",
                        cabinet_type, brand_name
                    ));
                    retry_as_update(transport, cabinet_type, brand_name, input, logger).await
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}

/// The single allowed conflict retry. Only ever reached from the CREATE path.
async fn retry_as_update<T: ChargeTransport>(
    transport: &T,
    cabinet_type: &str,
    brand_name: &str,
    input: &ChargeInput,
    logger: &dyn MatrixLogger,
) -> Result<SaveOutcome, SaveError> {
    let payload = transport.fetch_all().await?;
    let mut fresh = ChargeMatrix::from_payload(payload)?;

    let existing_id = fresh
        .get(cabinet_type, brand_name)
        .and_then(|record| record.id);
    let Some(id) = existing_id else {
        logger.error(&format!(
            "cell {}-{} still has no server record after refresh, giving up",
            cabinet_type, brand_name
        ));
        return Err(SaveError::StaleCell);
    };

    // currency is irrelevant here: a populated cell always resolves to update
    let action = resolve(&fresh, cabinet_type, brand_name, input, "");
    let UpsertAction::Update { record, .. } = action else {
        return Err(SaveError::StaleCell);
    };

    let record = transport.update(id, &record).await?;
    fresh.insert(record.clone());
    Ok(SaveOutcome {
        record,
        refreshed: Some(fresh),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::matrix::logger::NullLogger;
    use crate::matrix::pending::PendingKeySet;

    #[derive(Default)]
    struct MockTransport {
        create_calls: RefCell<u32>,
        update_calls: RefCell<u32>,
        fetch_calls: RefCell<u32>,
        /// every create attempt fails with this error when set
        create_error: Option<ApiError>,
        /// payload returned by fetch_all
        list_payload: serde_json::Value,
        /// observer invoked inside each transport call (pending-set probes)
        on_call: Option<Box<dyn Fn()>>,
    }

    impl MockTransport {
        fn conflicting(list_payload: serde_json::Value) -> Self {
            Self {
                create_error: Some(ApiError::from_response(
                    400,
                    r#"{"code": "unique_violation"}"#,
                )),
                list_payload,
                ..Default::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl ChargeTransport for MockTransport {
        async fn fetch_all(&self) -> Result<serde_json::Value, ApiError> {
            *self.fetch_calls.borrow_mut() += 1;
            Ok(self.list_payload.clone())
        }

        async fn create(
            &self,
            request: &CreateHardwareChargeRequest,
        ) -> Result<HardwareChargeDto, ApiError> {
            *self.create_calls.borrow_mut() += 1;
            if let Some(cb) = &self.on_call {
                cb();
            }
            if let Some(e) = &self.create_error {
                return Err(e.clone());
            }
            Ok(HardwareChargeDto {
                id: Some(101),
                cabinet_type: request.cabinet_type.clone(),
                brand_name: request.brand_name.clone(),
                standard_accessory_charge: request.standard_accessory_charge,
                effective_from: request.effective_from.clone(),
                effective_to: None,
                is_active: request.is_active,
                currency: Some(request.currency.clone()),
                created_at: None,
                updated_at: None,
            })
        }

        async fn update(
            &self,
            _id: i64,
            record: &HardwareChargeDto,
        ) -> Result<HardwareChargeDto, ApiError> {
            *self.update_calls.borrow_mut() += 1;
            if let Some(cb) = &self.on_call {
                cb();
            }
            Ok(record.clone())
        }
    }

    fn input(amount: f64) -> ChargeInput {
        ChargeInput {
            amount,
            effective_from: "2024-06-01".into(),
            is_active: None,
        }
    }

    fn server_record_json(id: i64, charge: f64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "cabinetType": "3",
            "brandName": "blum",
            "standardAccessoryCharge": charge,
            "effectiveFrom": "2023-04-01",
            "currency": "INR"
        })
    }

    #[tokio::test]
    async fn test_empty_cell_issues_exactly_one_create() {
        let transport = MockTransport::default();
        let grid = ChargeMatrix::new();

        let outcome = save_charge_cell(&transport, &grid, "3", "blum", &input(250.0), "INR", &NullLogger)
            .await
            .unwrap();

        assert_eq!(*transport.create_calls.borrow(), 1);
        assert_eq!(*transport.update_calls.borrow(), 0);
        assert_eq!(*transport.fetch_calls.borrow(), 0);
        assert_eq!(outcome.record.id, Some(101));
        assert_eq!(outcome.record.standard_accessory_charge, 250.0);
        assert!(outcome.refreshed.is_none());
    }

    #[tokio::test]
    async fn test_occupied_cell_issues_exactly_one_update() {
        let transport = MockTransport::default();
        let grid = ChargeMatrix::from_payload(serde_json::json!([server_record_json(7, 120.5)]))
            .unwrap();

        let outcome = save_charge_cell(&transport, &grid, "3", "blum", &input(200.0), "INR", &NullLogger)
            .await
            .unwrap();

        assert_eq!(*transport.create_calls.borrow(), 0);
        assert_eq!(*transport.update_calls.borrow(), 1);
        assert_eq!(outcome.record.id, Some(7));
        assert_eq!(outcome.record.standard_accessory_charge, 200.0);
        // untouched fields round-trip through the outgoing payload
        assert_eq!(outcome.record.currency.as_deref(), Some("INR"));
    }

    #[tokio::test]
    async fn test_conflict_refreshes_and_retries_as_update() {
        let transport =
            MockTransport::conflicting(serde_json::json!([server_record_json(42, 120.5)]));
        let grid = ChargeMatrix::new(); // stale: does not know about record 42

        let outcome = save_charge_cell(&transport, &grid, "3", "blum", &input(300.0), "INR", &NullLogger)
            .await
            .unwrap();

        assert_eq!(*transport.create_calls.borrow(), 1);
        assert_eq!(*transport.fetch_calls.borrow(), 1);
        assert_eq!(*transport.update_calls.borrow(), 1);
        assert_eq!(outcome.record.id, Some(42));
        assert_eq!(outcome.record.standard_accessory_charge, 300.0);

        let refreshed = outcome.refreshed.expect("refresh happened");
        assert_eq!(
            refreshed.get("3", "blum").unwrap().standard_accessory_charge,
            300.0
        );
    }

    #[tokio::test]
    async fn test_persistent_conflict_fails_terminally_without_looping() {
        // refresh finds nothing, so the retry cannot become an update
        let transport = MockTransport::conflicting(serde_json::json!([]));
        let grid = ChargeMatrix::new();

        let err = save_charge_cell(&transport, &grid, "3", "blum", &input(300.0), "INR", &NullLogger)
            .await
            .unwrap_err();

        assert!(matches!(err, SaveError::StaleCell));
        assert_eq!(*transport.create_calls.borrow(), 1);
        assert_eq!(*transport.fetch_calls.borrow(), 1);
        assert_eq!(*transport.update_calls.borrow(), 0);
    }

    #[tokio::test]
    async fn test_non_conflict_rejection_is_surfaced_not_retried() {
        let transport = MockTransport {
            create_error: Some(ApiError::from_response(
                400,
                r#"{"detail": "effectiveFrom is required"}"#,
            )),
            ..Default::default()
        };
        let grid = ChargeMatrix::new();

        let err = save_charge_cell(&transport, &grid, "3", "blum", &input(300.0), "INR", &NullLogger)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "effectiveFrom is required");
        assert_eq!(*transport.fetch_calls.borrow(), 0);
        assert_eq!(*transport.update_calls.borrow(), 0);
    }

    #[tokio::test]
    async fn test_pending_key_brackets_the_request() {
        use std::rc::Rc;

        let pending = Rc::new(RefCell::new(PendingKeySet::new()));
        let probe = pending.clone();
        let transport = MockTransport {
            on_call: Some(Box::new(move || {
                // the key must be visible while the request is in flight
                assert!(probe.borrow().is_pending("3", "blum"));
            })),
            ..Default::default()
        };
        let grid = ChargeMatrix::new();

        assert!(!pending.borrow().is_pending("3", "blum"));
        pending.borrow_mut().begin("3", "blum");
        let result =
            save_charge_cell(&transport, &grid, "3", "blum", &input(10.0), "INR", &NullLogger)
                .await;
        pending.borrow_mut().end("3", "blum");

        assert!(result.is_ok());
        assert_eq!(*transport.create_calls.borrow(), 1);
        assert!(!pending.borrow().is_pending("3", "blum"));
    }
}
