//! Hardware-charges matrix reconciliation.
//!
//! A small library the front end drives: project the backend's flat charge
//! list into a (cabinetType, brand) grid, decide CREATE vs UPDATE for a cell
//! edit, recover from uniqueness conflicts with a single awaited-refresh
//! retry, and track in-flight cells for the saving affordance. The grid is a
//! cache of server-confirmed records, never the source of truth.

pub mod error;
pub mod grid;
pub mod logger;
pub mod pending;
pub mod resolver;
pub mod save;

pub use error::{ApiError, ApiErrorBody};
pub use grid::ChargeMatrix;
pub use logger::{MatrixLogger, NullLogger};
pub use pending::{cell_key, PendingKeySet};
pub use resolver::{resolve, UpsertAction};
pub use save::{save_charge_cell, ChargeTransport, SaveError, SaveOutcome};
