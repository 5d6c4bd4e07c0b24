use contracts::domain::c003_hardware_charge::dto::{
    CreateHardwareChargeRequest, HardwareChargeDto,
};
use contracts::matrix::ApiError;
use gloo_net::http::{Request, Response};

use crate::shared::api_utils::api_url;

const API_PATH: &str = "/api/pricing/hardware-charges";

/// List all charge records.
///
/// Returned as a raw JSON value because the endpoint answers with an array of
/// records or, on some deployments, an object already shaped as a grid;
/// `ChargeMatrix::from_payload` accepts both.
pub async fn list_charges() -> Result<serde_json::Value, ApiError> {
    let response = Request::get(&api_url(&format!("{}/", API_PATH)))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check_status(response)
        .await?
        .json::<serde_json::Value>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn create_charge(
    request: &CreateHardwareChargeRequest,
) -> Result<HardwareChargeDto, ApiError> {
    let response = Request::post(&api_url(&format!("{}/", API_PATH)))
        .json(request)
        .map_err(|e| ApiError::Network(format!("failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check_status(response)
        .await?
        .json::<HardwareChargeDto>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Full-replace update of one charge record.
pub async fn update_charge(
    id: i64,
    record: &HardwareChargeDto,
) -> Result<HardwareChargeDto, ApiError> {
    let response = Request::put(&api_url(&format!("{}/{}/", API_PATH, id)))
        .json(record)
        .map_err(|e| ApiError::Network(format!("failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check_status(response)
        .await?
        .json::<HardwareChargeDto>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Turn a non-2xx response into an `ApiError`, keeping the body so unique
/// conflicts stay classifiable.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &body))
}
