use async_trait::async_trait;
use contracts::domain::c003_hardware_charge::dto::{
    CreateHardwareChargeRequest, HardwareChargeDto,
};
use contracts::matrix::{ApiError, ChargeTransport};

use super::api;

/// `ChargeTransport` over the quotation backend's REST endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpChargeTransport;

#[async_trait(?Send)]
impl ChargeTransport for HttpChargeTransport {
    async fn fetch_all(&self) -> Result<serde_json::Value, ApiError> {
        api::list_charges().await
    }

    async fn create(
        &self,
        request: &CreateHardwareChargeRequest,
    ) -> Result<HardwareChargeDto, ApiError> {
        api::create_charge(request).await
    }

    async fn update(
        &self,
        id: i64,
        record: &HardwareChargeDto,
    ) -> Result<HardwareChargeDto, ApiError> {
        api::update_charge(id, record).await
    }
}
