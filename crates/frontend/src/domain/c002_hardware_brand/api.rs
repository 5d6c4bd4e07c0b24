use contracts::domain::c002_hardware_brand::HardwareBrandDto;
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Fetch the hardware-brand master list (column axis of the charges matrix)
pub async fn fetch_hardware_brands() -> Result<Vec<HardwareBrandDto>, String> {
    let response = Request::get(&api_url("/api/masters/hardware-brands/"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json::<Vec<HardwareBrandDto>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
