use std::{any::Any, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    Json, Router, ServiceExt,
    extract::{DefaultBodyLimit, MatchedPath, Request},
    handler::HandlerWithoutStateExt,
    http::{HeaderName, HeaderValue, Method, header},
    response::{IntoResponse, Response},
    routing::get,
};
use frit_common::views::ApiErrorResponse;
use frit_db::storage::Storage;
use tower::{Layer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{self, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tokio::{net::TcpListener, sync::Notify};
use tracing::{field::Empty, info_span, warn};
use utoipa::{
    ToSchema,
    openapi::{
        ContentBuilder, Info, License, OpenApi, Ref, RefOr, ResponseBuilder, path::Operation,
        server::Server,
    },
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{config::FritApiConfig, context::ApiContext, error::ApiError, handlers};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Largest request body the API will buffer.
const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// The router behind a trailing-slash trim, which has to run before routing.
pub type App = NormalizePath<Router>;

pub fn make(cfg: FritApiConfig, db: Arc<dyn Storage>) -> (App, OpenApi) {
    let static_dir = cfg.static_dir.clone();
    let public_url = cfg.public_url.clone();
    let context = ApiContext::new(cfg, db);

    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            x_request_id.clone(),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    let span = info_span!(
                        "http_request",
                        method = %req.method(),
                        request_id = Empty,
                        path = Empty,
                    );

                    if let Some(request_id) = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                    {
                        span.record("request_id", request_id);
                    };

                    if let Some(path) = req.extensions().get::<MatchedPath>() {
                        span.record("path", path.as_str())
                    } else {
                        span.record("path", req.uri().path())
                    };

                    span
                }),
        )
        .layer(security_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .layer(security_header(header::X_FRAME_OPTIONS, "SAMEORIGIN"))
        .layer(security_header(header::REFERRER_POLICY, "no-referrer"))
        .layer(security_header(header::X_DNS_PREFETCH_CONTROL, "off"))
        .layer(security_header(
            HeaderName::from_static("cross-origin-resource-policy"),
            "same-origin",
        ))
        .layer(security_header(
            HeaderName::from_static("cross-origin-opener-policy"),
            "same-origin",
        ))
        .layer(security_header(
            HeaderName::from_static("x-permitted-cross-domain-policies"),
            "none",
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::PATCH,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id));

    let openapi = OpenApi::builder()
        .info(
            Info::builder()
                .title("Frit API Reference")
                .version(env!("CARGO_PKG_VERSION"))
                .license(Some(
                    License::builder()
                        .name("Apache 2.0 License")
                        .identifier(Some(env!("CARGO_PKG_LICENSE")))
                        .build()
                ))
        )
        .servers(Some(vec![Server::new(public_url)]))
        .build();

    let (r, mut a) = OpenApiRouter::with_openapi(openapi)
        .routes(routes!(handlers::users::list_users, handlers::users::create_user))
        .routes(routes!(
            handlers::users::get_user,
            handlers::users::update_user,
            handlers::users::delete_user
        ))
        .routes(routes!(handlers::users::update_user_status))
        .routes(routes!(handlers::general::echo_test))
        .routes(routes!(handlers::general::api_status))
        .routes(routes!(handlers::general::api_info))
        .routes(routes!(handlers::general::root))
        .routes(routes!(handlers::health_check))
        .split_for_parts();

    a.paths.paths.iter_mut().for_each(|(_path, item)| {
        apply_default_errors(&mut item.get, false);
        apply_default_errors(&mut item.post, true);
        apply_default_errors(&mut item.patch, true);
        apply_default_errors(&mut item.put, true);
        apply_default_errors(&mut item.delete, false);
    });

    let docs = a.clone();
    let r = r.route(
        "/api/docs",
        get(move || std::future::ready(Json(docs.clone()))),
    );

    let r = match static_dir {
        Some(dir) => r.fallback_service(
            ServeDir::new(dir)
                .not_found_service(handlers::general::route_not_found.into_service()),
        ),
        None => r.fallback(handlers::general::route_not_found),
    };

    let r = r
        .layer(middleware)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(context);

    (NormalizePathLayer::trim_trailing_slash().layer(r), a)
}

/// Serve `app` until `signal` resolves, then give open connections at most
/// `grace` to finish.
pub async fn serve<F>(
    listener: TcpListener,
    app: App,
    signal: F,
    grace: Duration,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let signalled = Arc::new(Notify::new());
    let server = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown({
            let signalled = signalled.clone();
            async move {
                signal.await;
                signalled.notify_one();
            }
        });

    tokio::select! {
        res = server.into_future() => res.context("server exited with an error"),
        _ = async {
            signalled.notified().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!("Connections still open after {grace:?}, forcing shutdown");
            anyhow::bail!("could not close connections in time")
        }
    }
}

fn security_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}

/// Turns a panic inside a handler into the usual 500 envelope.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Panicked(detail).into_response()
}

fn apply_default_errors(item: &mut Option<Operation>, has_body: bool) {
    if let Some(item) = item {
        let error_response = |description: &str| {
            RefOr::T(
                ResponseBuilder::new()
                    .description(description)
                    .content(
                        "application/json",
                        ContentBuilder::new()
                            .schema(Some(Ref::from_schema_name(ApiErrorResponse::name())))
                            .build(),
                    )
                    .build(),
            )
        };

        if has_body {
            item.responses
                .responses
                .entry("400".into())
                .or_insert_with(|| error_response("Malformed request body"));
        }

        item.responses
            .responses
            .entry("500".into())
            .or_insert_with(|| error_response("Internal server error"));
    }
}
