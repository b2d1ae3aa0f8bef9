//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::feed::FeedError;
use crate::network::RegistryError;
use crate::poller::{self, RefreshSummary};
use crate::status::{TrainStatus, recent_updates, train_status};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/trains", get(list_trains))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/resolve", get(resolve_station))
        .route("/api/lines", get(list_lines))
        .route("/api/markers", get(list_markers))
        .route(
            "/api/filter",
            get(get_filter).post(select_filter).delete(reset_filter),
        )
        .route("/api/refresh", post(refresh_now))
        .route("/api/status", get(service_status))
        .route("/api/updates", get(service_updates))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The dashboard page, rendered with the current snapshot.
async fn index_page(State(state): State<AppState>) -> IndexTemplate {
    let session = state.session.read().await;
    let visible = session.visible_train_records();

    IndexTemplate {
        stations: session
            .registry()
            .stations()
            .iter()
            .map(|s| s.name.as_str().to_string())
            .collect(),
        legend: LegendView::all(),
        selected: session.filter().target().map(|s| s.as_str().to_string()),
        status: StatusView::from_status(&train_status(session.records())),
        cards: TrainCardsTemplate::new(&visible, session.filter().target()),
        poll_secs: state.poll_interval.as_secs(),
    }
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Trains passing the current filter, as JSON or as card HTML.
async fn list_trains(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = state.session.read().await;
    let visible = session.visible_train_records();

    if accepts_html(&headers) {
        let template = TrainCardsTemplate::new(&visible, session.filter().target());
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })?;
        return Ok(Html(html).into_response());
    }

    let response = TrainsResponse {
        trains: visible.iter().map(|t| TrainResult::from_resolved(t)).collect(),
        total: session.snapshot().trains.len(),
        filter: session.filter().target().map(|s| s.as_str().to_string()),
        fetched_at: session.snapshot().fetched_at,
    };
    Ok(Json(response).into_response())
}

/// Every station in the catalog.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let session = state.session.read().await;
    let stations = session
        .registry()
        .stations()
        .iter()
        .map(StationResult::from_station)
        .collect();
    Json(StationsResponse { stations })
}

/// Resolve free text (e.g. a feed destination) to a station.
async fn resolve_station(
    State(state): State<AppState>,
    Query(req): Query<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    if req.q.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "query must not be empty".to_string(),
        });
    }

    let session = state.session.read().await;
    let registry = session.registry();

    Ok(Json(ResolveResponse {
        station: registry.resolve(&req.q).map(StationResult::from_station),
        candidates: registry
            .resolve_all(&req.q)
            .into_iter()
            .map(|s| s.name.as_str().to_string())
            .collect(),
        query: req.q,
    }))
}

/// Route polylines for every line.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let session = state.session.read().await;
    let lines = session
        .route_polylines()
        .into_iter()
        .map(|(line, points)| LineResult {
            line,
            color: line.color(),
            points: points.into_iter().map(|p| p.to_lat_lng()).collect(),
        })
        .collect();
    Json(LinesResponse { lines })
}

/// Station and train markers for the map.
async fn list_markers(State(state): State<AppState>) -> Json<MarkersResponse> {
    let session = state.session.read().await;
    Json(MarkersResponse {
        stations: session
            .station_markers()
            .iter()
            .map(StationMarkerResult::from)
            .collect(),
        trains: session
            .train_markers()
            .iter()
            .map(TrainMarkerResult::from)
            .collect(),
    })
}

async fn get_filter(State(state): State<AppState>) -> Json<FilterResponse> {
    let session = state.session.read().await;
    Json(FilterResponse {
        station: session.highlighted_station().map(StationResult::from_station),
    })
}

/// Filter the train list on a station.
async fn select_filter(
    State(state): State<AppState>,
    Json(req): Json<FilterRequest>,
) -> Result<Json<FilterResponse>, AppError> {
    let mut session = state.session.write().await;
    let station = session.select_station(&req.station)?;
    tracing::info!(station = %station.name, "station filter selected");

    Ok(Json(FilterResponse {
        station: Some(StationResult::from_station(station)),
    }))
}

/// Show all trains again.
async fn reset_filter(State(state): State<AppState>) -> Json<FilterResponse> {
    state.session.write().await.reset_filter();
    tracing::info!("station filter reset");
    Json(FilterResponse { station: None })
}

/// Fetch fresh data now instead of waiting for the poller.
async fn refresh_now(State(state): State<AppState>) -> Result<Json<RefreshSummary>, AppError> {
    state.feed.invalidate();
    let summary = poller::refresh(&state.feed, &state.session).await?;
    Ok(Json(summary))
}

async fn service_status(State(state): State<AppState>) -> Json<TrainStatus> {
    let session = state.session.read().await;
    Json(train_status(session.records()))
}

async fn service_updates(State(state): State<AppState>) -> Json<UpdatesResponse> {
    let session = state.session.read().await;
    Json(UpdatesResponse {
        updates: recent_updates(session.records()),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl From<FeedError> for AppError {
    fn from(e: FeedError) -> Self {
        match e {
            FeedError::Cache { .. } | FeedError::Mock { .. } => AppError::Internal {
                message: e.to_string(),
            },
            _ => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::debug!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use axum::http::HeaderValue;
    use serde_json::Value;
    use tokio::sync::RwLock;

    use crate::domain::RawTrainRecord;
    use crate::feed::{MockTrainFeed, TrainFeed};
    use crate::network::StationRegistry;
    use crate::session::DashboardSession;

    fn raw(id: &str, line: &str, station: &str, delay: &str) -> RawTrainRecord {
        RawTrainRecord {
            train_id: Some(id.into()),
            line: Some(line.into()),
            station: Some(station.into()),
            destination: Some("AIRPORT".into()),
            waiting_time: Some("Arriving".into()),
            delay: Some(delay.into()),
            ..Default::default()
        }
    }

    async fn state() -> AppState {
        let feed = TrainFeed::Mock(MockTrainFeed::from_records(vec![
            raw("101", "RED", "FIVE POINTS", "T0S"),
            raw("202", "GREEN", "OMNI STATION", "T720S"),
        ]));
        let registry = Arc::new(StationRegistry::marta().unwrap());
        let state = AppState::new(
            Arc::new(RwLock::new(DashboardSession::new(registry))),
            Arc::new(feed),
        );
        poller::refresh(&state.feed, &state.session).await.unwrap();
        state
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn train_ids(body: &Value) -> Vec<String> {
        body["trains"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["train_id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn trains_json_unfiltered() {
        let state = state().await;
        let response = list_trains(State(state), HeaderMap::new()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(train_ids(&body), ["101", "202"]);
        assert_eq!(body["total"], 2);
        assert!(body["filter"].is_null());
        assert_eq!(body["trains"][1]["resolved_station"], "OMNI");
    }

    #[tokio::test]
    async fn filter_round_trip() {
        let state = state().await;

        let Json(selected) = select_filter(
            State(state.clone()),
            Json(FilterRequest {
                station: "omni".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(selected.station.unwrap().name, "OMNI");

        let response = list_trains(State(state.clone()), HeaderMap::new())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(train_ids(&body), ["202"]);
        assert_eq!(body["filter"], "OMNI");

        let Json(reset) = reset_filter(State(state.clone())).await;
        assert!(reset.station.is_none());

        let Json(current) = get_filter(State(state)).await;
        assert!(current.station.is_none());
    }

    #[tokio::test]
    async fn unknown_station_is_not_found() {
        let state = state().await;
        let err = select_filter(
            State(state.clone()),
            Json(FilterRequest {
                station: "Nowhere".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let Json(current) = get_filter(State(state)).await;
        assert!(current.station.is_none());
    }

    #[tokio::test]
    async fn trains_html_fragment() {
        let state = state().await;
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));

        let response = list_trains(State(state), headers).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("data-train-id=\"101\""));
        assert!(html.contains("bg-success"));
    }

    #[tokio::test]
    async fn resolve_free_text() {
        let state = state().await;
        let Json(body) = resolve_station(
            State(state.clone()),
            Query(ResolveRequest {
                q: "Hartsfield-Jackson".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(body.station.unwrap().name, "AIRPORT");
        assert_eq!(body.candidates, ["AIRPORT"]);

        let err = resolve_station(State(state), Query(ResolveRequest { q: "  ".into() }))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn lines_have_colours_and_points() {
        let state = state().await;
        let Json(body) = list_lines(State(state)).await;
        assert_eq!(body.lines.len(), 4);
        assert_eq!(body.lines[0].color, "#CE0E2D");
        assert_eq!(body.lines[0].points.len(), 19);
    }

    #[tokio::test]
    async fn markers_follow_filter() {
        let state = state().await;
        state.session.write().await.select_station("FIVE POINTS").unwrap();

        let Json(body) = list_markers(State(state)).await;
        assert_eq!(body.stations.len(), 35);
        assert_eq!(body.trains.len(), 2);

        let five_points = body
            .stations
            .iter()
            .find(|m| m.name == "FIVE POINTS")
            .unwrap();
        assert!(five_points.highlighted);
        assert_eq!(five_points.radius, 8);
    }

    #[tokio::test]
    async fn status_and_updates() {
        let state = state().await;

        let Json(status) = service_status(State(state.clone())).await;
        assert_eq!(status.details, "GREEN Line: 12 minute delays");

        let Json(body) = service_updates(State(state)).await;
        assert_eq!(
            body.updates[0].message,
            "Service disruption on GREEN Line between OMNI STATION and AIRPORT"
        );
    }

    #[tokio::test]
    async fn refresh_reports_summary() {
        let state = state().await;
        let Json(summary) = refresh_now(State(state)).await.unwrap();
        assert_eq!(summary.trains, 2);
        assert_eq!(summary.rejected, 0);
    }

    #[tokio::test]
    async fn index_renders() {
        let state = state().await;
        let html = index_page(State(state)).await.render().unwrap();
        assert!(html.contains("MARTA Rail Dashboard"));
        assert!(html.contains("<option value=\"FIVE POINTS\">"));
        assert!(html.contains("Major Delays"));
    }
}
