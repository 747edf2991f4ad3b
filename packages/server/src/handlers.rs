//! HTTP handler functions for the crime index API.

use actix_web::{HttpResponse, web};
use crime_index_dashboard::{DashboardError, map};
use crime_index_dashboard_models::ApiHealth;
use serde::Deserialize;

use crate::AppState;

/// Query string accepted by the per-state views.
#[derive(Debug, Deserialize)]
pub struct YearQuery {
    /// Year to analyse. Defaults to the configured or latest year.
    pub year: Option<i32>,
}

fn error_response(err: &DashboardError) -> HttpResponse {
    match err {
        DashboardError::UnknownState(_) | DashboardError::UnknownDistrict { .. } => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": err.to_string() }))
        }
        _ => {
            log::error!("Request failed: {err}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        incident_rows: state.dashboard.dataset().len(),
    })
}

/// `GET /api/categories`
///
/// Returns every crime category with the weight currently in use.
pub async fn categories(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.categories())
}

/// `GET /api/states`
pub async fn states(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.states())
}

/// `GET /api/states/{state}/districts`
pub async fn districts(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.dashboard.districts(&path) {
        Ok(districts) => HttpResponse::Ok().json(districts),
        Err(e) => error_response(&e),
    }
}

/// `GET /api/states/{state}/analysis?year=`
///
/// District severity table for the state, highest first.
pub async fn analysis(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<YearQuery>,
) -> HttpResponse {
    match state.dashboard.analysis(&path, query.year) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&e),
    }
}

/// `GET /api/states/{state}/map?year=`
///
/// District severity markers as a `GeoJSON` `FeatureCollection`. Responds
/// `404` when the state has no map centre.
pub async fn map(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<YearQuery>,
) -> HttpResponse {
    let view = match state.dashboard.analysis(&path, query.year) {
        Ok(view) => view,
        Err(e) => return error_response(&e),
    };

    let Some(collection) = map::severity_map(&view) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": "Coordinates for the selected state were not found."
        }));
    };

    match serde_json::to_string(&collection) {
        Ok(body) => HttpResponse::Ok()
            .content_type("application/geo+json")
            .body(body),
        Err(e) => error_response(&DashboardError::Json(e)),
    }
}

/// `GET /api/states/{state}/districts/{district}`
///
/// Category breakdown, trend, and recommendations for one district.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<YearQuery>,
) -> HttpResponse {
    let (state_name, district) = path.into_inner();
    match state.dashboard.detail(&state_name, &district, query.year) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use crime_index_crime_models::{CategoryCounts, CrimeCategory, IncidentRecord, LocationRecord};
    use crime_index_dashboard::Dashboard;
    use crime_index_dashboard_models::{AnalysisView, ApiCategory, ApiHealth, DetailView};
    use crime_index_dataset::{Dataset, Locations};
    use crime_index_severity_models::ScoringConfig;

    use crate::{AppState, configure};

    fn record(state: &str, district: &str, year: i32, murder: u64) -> IncidentRecord {
        IncidentRecord {
            state: state.to_string(),
            district: district.to_string(),
            year,
            counts: CategoryCounts::default().with(CrimeCategory::Murder, murder),
        }
    }

    fn location(state: &str, district: &str, latitude: f64, longitude: f64) -> LocationRecord {
        LocationRecord {
            state: state.to_string(),
            district: district.to_string(),
            latitude,
            longitude,
        }
    }

    fn state() -> web::Data<AppState> {
        let dataset = Dataset::new(vec![
            record("Goa", "North Goa", 2022, 40),
            record("Goa", "North Goa", 2023, 100),
            record("Goa", "South Goa", 2023, 20),
            record("Tamil Nadu", "Chennai", 2023, 300),
        ]);
        let locations = Locations::new(vec![
            location("Goa", "North Goa", 15.5, 73.9),
            location("Goa", "South Goa", 15.2, 74.0),
        ]);
        let dashboard = Dashboard::new(dataset, locations, &ScoringConfig::default(), None);
        web::Data::new(AppState {
            dashboard: Arc::new(dashboard),
        })
    }

    macro_rules! app {
        () => {
            test::init_service(App::new().app_data(state()).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn health_reports_row_count() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: ApiHealth = test::call_and_read_body_json(&app, req).await;
        assert!(body.healthy);
        assert_eq!(body.incident_rows, 4);
    }

    #[actix_web::test]
    async fn categories_carry_weights() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/categories").to_request();
        let body: Vec<ApiCategory> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.len(), CrimeCategory::all().len());
        assert_eq!(body[0].category, CrimeCategory::Murder);
        assert_eq!(body[0].weight, 5);
    }

    #[actix_web::test]
    async fn lists_states_and_districts() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/states").to_request();
        let body: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, vec!["Goa", "Tamil Nadu"]);

        let req = test::TestRequest::get()
            .uri("/api/states/goa/districts")
            .to_request();
        let body: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, vec!["North Goa", "South Goa"]);
    }

    #[actix_web::test]
    async fn analysis_sorts_and_honours_year() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/states/Goa/analysis")
            .to_request();
        let body: AnalysisView = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.year, Some(2023));
        assert_eq!(body.districts[0].district, "North Goa");
        assert_eq!(body.districts[1].district, "South Goa");

        let req = test::TestRequest::get()
            .uri("/api/states/Goa/analysis?year=2022")
            .to_request();
        let body: AnalysisView = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.year, Some(2022));
        assert_eq!(body.districts[0].total_incidents, 40);
        assert_eq!(body.districts[1].total_incidents, 0);
    }

    #[actix_web::test]
    async fn map_is_geojson() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/states/Goa/map").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap().to_str().unwrap(),
            "application/geo+json"
        );

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn map_without_state_coordinates_is_not_found() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/states/Tamil%20Nadu/map")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn detail_includes_trend() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/states/Goa/districts/North%20Goa")
            .to_request();
        let body: DetailView = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.district, "North Goa");
        assert_eq!(body.trend.len(), 2);
        assert!(!body.recommendations.advice.is_empty());
    }

    #[actix_web::test]
    async fn unknown_regions_are_not_found() {
        let app = app!();
        for uri in [
            "/api/states/Atlantis/districts",
            "/api/states/Atlantis/analysis",
            "/api/states/Goa/districts/Nowhere",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert!(body["error"].is_string(), "{uri}");
        }
    }
}
