use contracts::domain::c001_cabinet_type::CabinetTypeDto;
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Fetch the cabinet-type master list (row axis of the charges matrix)
pub async fn fetch_cabinet_types() -> Result<Vec<CabinetTypeDto>, String> {
    let response = Request::get(&api_url("/api/masters/cabinet-types/"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json::<Vec<CabinetTypeDto>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
