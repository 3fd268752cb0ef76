//! HTTP handler functions for the energy map API.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use energy_map_analytics::{filter_options, summarize};
use energy_map_analytics_models::FilterCriteria;
use energy_map_ingest::IngestError;
use energy_map_project_models::EnergyProject;
use energy_map_server_models::{ApiError, ApiHealth, FilterQueryParams, MarkerQueryParams};

use crate::AppState;

/// Loads the shared collection, or the `502` response to return instead.
async fn load_projects(state: &AppState) -> Result<Arc<[EnergyProject]>, HttpResponse> {
    state.ingestor.load().await.map_err(|e| dataset_unavailable(&e))
}

fn dataset_unavailable(e: &IngestError) -> HttpResponse {
    log::error!("Dataset unavailable: {e}");
    HttpResponse::BadGateway().json(ApiError::new(format!("Dataset unavailable: {e}")))
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        dataset_ready: state.ingestor.is_ready(),
    })
}

/// `GET /api/summary`
///
/// Aggregate statistics over the whole dataset.
pub async fn summary(state: web::Data<AppState>) -> HttpResponse {
    match load_projects(&state).await {
        Ok(projects) => HttpResponse::Ok().json(summarize(projects.iter())),
        Err(response) => response,
    }
}

/// `GET /api/summary/filtered`
///
/// Aggregate statistics over the projects passing the region, technology,
/// and status selections.
pub async fn filtered_summary(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
) -> HttpResponse {
    let criteria = FilterCriteria::from(&*params);
    match load_projects(&state).await {
        Ok(projects) => HttpResponse::Ok().json(energy_map_analytics::filtered_summary(
            &projects, &criteria,
        )),
        Err(response) => response,
    }
}

/// `GET /api/filters`
///
/// Lists the regions, technologies, and statuses available to filter on.
pub async fn filters(state: web::Data<AppState>) -> HttpResponse {
    match load_projects(&state).await {
        Ok(projects) => HttpResponse::Ok().json(filter_options(&summarize(projects.iter()))),
        Err(response) => response,
    }
}

/// `GET /api/insights`
pub async fn insights(state: web::Data<AppState>) -> HttpResponse {
    match load_projects(&state).await {
        Ok(projects) => {
            HttpResponse::Ok().json(energy_map_analytics::insights(&summarize(projects.iter())))
        }
        Err(response) => response,
    }
}

/// `GET /api/markers`
///
/// Returns at most `cap` map markers, largest projects first.
pub async fn markers(
    state: web::Data<AppState>,
    params: web::Query<MarkerQueryParams>,
) -> HttpResponse {
    if params.cap == Some(0) {
        return HttpResponse::BadRequest().json(ApiError::new("cap must be at least 1"));
    }

    let query = params.to_geo_query(state.marker_cap);
    match load_projects(&state).await {
        Ok(projects) => HttpResponse::Ok().json(energy_map_analytics::markers(&projects, &query)),
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use energy_map_ingest::DatasetIngestor;
    use energy_map_ingest::source::{FileSource, InMemorySource};
    use serde_json::Value;

    use super::*;
    use crate::configure;

    const CSV: &str = "\
Ref ID,Site Name,Technology Type,Installed Capacity (MWelec),Development Status (short),Region,X-coordinate,Y-coordinate
1,Glen,Wind Onshore,10,Operational,Scotland,300000,700000
2,Valley,Solar Photovoltaics,5,Operational,Wales,300000,250000
3,Fields,Biomass (dedicated),3,Application Refused,England,450000,300000
4,Nowhere,Battery,40,Operational,England,,
";

    fn state_with(ingestor: DatasetIngestor) -> web::Data<AppState> {
        web::Data::new(AppState::new(Arc::new(ingestor)))
    }

    fn in_memory_state() -> web::Data<AppState> {
        state_with(DatasetIngestor::new(Arc::new(InMemorySource::new(
            "test", CSV,
        ))))
    }

    fn failing_state() -> web::Data<AppState> {
        state_with(DatasetIngestor::new(Arc::new(FileSource::new(
            "does/not/exist.csv",
        ))))
    }

    async fn get_json(state: web::Data<AppState>, uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn health_reports_dataset_readiness() {
        let state = in_memory_state();
        let (status, body) = get_json(state.clone(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["healthy"], true);
        assert_eq!(body["datasetReady"], false);

        state.ingestor.load().await.unwrap();
        let (_, body) = get_json(state, "/api/health").await;
        assert_eq!(body["datasetReady"], true);
    }

    #[actix_web::test]
    async fn summary_covers_whole_dataset() {
        let (status, body) = get_json(in_memory_state(), "/api/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalProjects"], 4);
        assert_eq!(body["totalCapacity"], 58);
        assert_eq!(body["operationalProjects"], 3);
        assert_eq!(body["regionBreakdown"]["England"], 2);
    }

    #[actix_web::test]
    async fn filtered_summary_applies_selections() {
        let (status, body) = get_json(
            in_memory_state(),
            "/api/summary/filtered?region=England&technology=all&status=Operational",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalProjects"], 1);
        assert_eq!(body["totalCapacity"], 40);
    }

    #[actix_web::test]
    async fn filters_lists_sorted_options() {
        let (_, body) = get_json(in_memory_state(), "/api/filters").await;
        assert_eq!(
            body["regions"],
            serde_json::json!(["England", "Scotland", "Wales"])
        );
        assert_eq!(
            body["statuses"],
            serde_json::json!(["Application Refused", "Operational"])
        );
    }

    #[actix_web::test]
    async fn insights_counts_categories() {
        let (_, body) = get_json(in_memory_state(), "/api/insights").await;
        assert_eq!(body["districtHeatingProjects"], 1);
        assert_eq!(body["storageProjects"], 1);
        assert_eq!(body["failedProjects"], 1);
        assert_eq!(body["planningSuccessRate"], 75);
    }

    #[actix_web::test]
    async fn markers_skip_unlocated_and_respect_cap() {
        let (status, body) = get_json(in_memory_state(), "/api/markers").await;
        assert_eq!(status, StatusCode::OK);
        let refs: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["refId"].as_str().unwrap())
            .collect();
        assert_eq!(refs, vec!["1", "2", "3"]);

        let (_, body) = get_json(in_memory_state(), "/api/markers?cap=1").await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["refId"], "1");
        assert!(body[0]["position"]["lat"].is_number());
    }

    #[actix_web::test]
    async fn zero_cap_is_rejected() {
        let (status, body) = get_json(in_memory_state(), "/api/markers?cap=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn ingest_failure_is_bad_gateway() {
        let (status, body) = get_json(failing_state(), "/api/summary").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("Dataset unavailable"));
    }
}
