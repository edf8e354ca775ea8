use std::sync::{Arc, OnceLock};

use axum::{
    Json, Router,
    http::{
        HeaderValue, Method, Uri,
        header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, LOCATION},
    },
    routing::get,
};
use axum_prometheus::{PrometheusMetricLayer, metrics_exporter_prometheus::PrometheusHandle};
use dishlens_core::{application::create_service, domain::common::DishLensConfig};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info_span, warn};
use utoipa_scalar::{Scalar, Servable};

use crate::application::http::{
    food_analysis::router::food_analysis_routes,
    health::health_routes,
    root::root_routes,
    server::{api_entities::api_error::ApiError, app_state::AppState, openapi::api_doc},
};
use crate::args::{Args, ServerArgs};

/// The exporter installs a process-wide recorder, so only the first router
/// creates it; later routers share the handle.
static METRIC_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = DishLensConfig::from(args.as_ref().clone());
    let service = create_service(config).await?;

    Ok(AppState::new(args, service))
}

fn cors_layer(server: &ServerArgs) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    if server.allows_any_origin() {
        return cors.allow_origin(Any).allow_headers(Any).expose_headers([LOCATION]);
    }

    let allowed_origins = server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    cors.allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .expose_headers([LOCATION])
        .allow_credentials(true)
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let cors = cors_layer(&state.args.server);

    let metric_handle = METRIC_HANDLE
        .get_or_init(|| PrometheusMetricLayer::pair().1)
        .clone();
    let prometheus_layer = PrometheusMetricLayer::new();

    let root_path = state.root_path();
    let openapi = api_doc(&root_path);
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let router = axum::Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .route(
            &api_docs_url,
            get(move || {
                let openapi = openapi.clone();
                async move { Json(openapi) }
            }),
        )
        .merge(root_routes(&root_path))
        .merge(food_analysis_routes(state.clone()))
        .merge(health_routes(&root_path))
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .fallback(route_not_found)
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer)
        .with_state(state);
    Ok(router)
}
