//! Request handlers: form validation, pipeline calls and response rendering
//!
//! Any pipeline failure on a page route redirects back to the form with a
//! message. The JSON route reports the same failures as status codes.

use axum::{
    Form, Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::config::DefaultsConfig;
use crate::export::{csv_filename, to_csv};
use crate::models::{Location, ShapedRow};
use crate::pages::{index_page, results_page};
use crate::web::AppState;
use crate::{Result, TempViewError};

/// Raw city/days pair as submitted by the form or query string
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub city: Option<String>,
    pub days: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    pub error: Option<String>,
}

/// A validated request: trimmed non-empty city, day count within policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub city: String,
    pub days: u32,
}

impl ReportRequest {
    /// Validate raw parameters against the configured day limits
    pub fn parse(params: &ReportParams, defaults: &DefaultsConfig) -> Result<Self> {
        let days = match params.days.as_deref().map(str::trim) {
            None | Some("") => defaults.days,
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| TempViewError::validation("Days must be a number"))?,
        };

        let city = params.city.as_deref().unwrap_or_default().trim();
        if city.is_empty() {
            return Err(TempViewError::validation("Enter a city name"));
        }

        if days == 0 || days > defaults.max_days {
            return Err(TempViewError::validation(format!(
                "Days must be between 1 and {}",
                defaults.max_days
            )));
        }

        Ok(Self {
            city: city.to_string(),
            days,
        })
    }

    fn query_string(&self) -> String {
        format!("city={}&days={}", urlencoding::encode(&self.city), self.days)
    }
}

fn redirect_to_form(message: &str) -> Response {
    Redirect::to(&format!("/?error={}", urlencoding::encode(message))).into_response()
}

fn fetch_failed(err: &TempViewError) -> Response {
    warn!("Pipeline failed: {}", err);
    redirect_to_form(&format!("Error fetching data: {}", err.user_message()))
}

pub async fn index(State(state): State<AppState>, Query(params): Query<IndexParams>) -> Html<String> {
    Html(index_page(
        params.error.as_deref(),
        state.defaults.days,
        state.defaults.max_days,
    ))
}

pub async fn submit(State(state): State<AppState>, Form(params): Form<ReportParams>) -> Response {
    match ReportRequest::parse(&params, &state.defaults) {
        Ok(request) => Redirect::to(&format!("/results?{}", request.query_string())).into_response(),
        Err(err) => redirect_to_form(&err.user_message()),
    }
}

pub async fn results(State(state): State<AppState>, Query(params): Query<ReportParams>) -> Response {
    let request = match ReportRequest::parse(&params, &state.defaults) {
        Ok(request) => request,
        Err(err) => return redirect_to_form(&err.user_message()),
    };

    match state.pipeline.build_report(&request.city, request.days).await {
        Ok(report) => {
            info!("Rendered results for '{}' ({} rows)", request.city, report.rows.len());
            Html(results_page(&report, request.days)).into_response()
        }
        Err(err) => fetch_failed(&err),
    }
}

pub async fn download_csv(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Response {
    let request = match ReportRequest::parse(&params, &state.defaults) {
        Ok(request) => request,
        Err(err) => return redirect_to_form(&err.user_message()),
    };

    let csv = match state.pipeline.fetch_rows(&request.city, request.days).await {
        Ok((_, rows)) => to_csv(&rows),
        Err(err) => return fetch_failed(&err),
    };

    match csv {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!(
                        "attachment; filename=\"{}\"",
                        csv_filename(&request.city, request.days)
                    ),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => fetch_failed(&err),
    }
}

pub async fn chart_png(State(state): State<AppState>, Query(params): Query<ReportParams>) -> Response {
    let result = match ReportRequest::parse(&params, &state.defaults) {
        Ok(request) => state.pipeline.build_report(&request.city, request.days).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(report) => ([(header::CONTENT_TYPE, "image/png")], report.chart_png).into_response(),
        Err(err) => error_response(&err),
    }
}

#[derive(Debug, Serialize)]
pub struct TemperaturesResponse {
    pub location: Location,
    pub days: u32,
    pub rows: Vec<ShapedRow>,
}

pub async fn api_temperatures(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Response {
    let result = match ReportRequest::parse(&params, &state.defaults) {
        Ok(request) => state
            .pipeline
            .fetch_rows(&request.city, request.days)
            .await
            .map(|(location, rows)| TemperaturesResponse {
                location,
                days: request.days,
                rows,
            }),
        Err(err) => Err(err),
    };

    match result {
        Ok(body) => Json(body).into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn health() -> &'static str {
    "ok"
}

/// HTTP status for a pipeline error on the machine-facing routes
#[must_use]
pub fn status_for(err: &TempViewError) -> StatusCode {
    match err {
        TempViewError::Validation { .. } => StatusCode::BAD_REQUEST,
        TempViewError::NotFound { .. } => StatusCode::NOT_FOUND,
        TempViewError::NoData { .. } | TempViewError::Transport { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &TempViewError) -> Response {
    warn!("Request failed: {}", err);
    (
        status_for(err),
        Json(json!({ "error": err.user_message() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn params(city: Option<&str>, days: Option<&str>) -> ReportParams {
        ReportParams {
            city: city.map(String::from),
            days: days.map(String::from),
        }
    }

    #[test]
    fn test_parse_trims_city_and_defaults_days() {
        let request = ReportRequest::parse(&params(Some("  London "), None), &DefaultsConfig::default())
            .unwrap();
        assert_eq!(
            request,
            ReportRequest {
                city: "London".to_string(),
                days: 7
            }
        );
    }

    #[rstest]
    #[case(Some("Paris"), Some("seven"), "Days must be a number")]
    #[case(Some("Paris"), Some("-3"), "Days must be a number")]
    #[case(Some("Paris"), Some("2.5"), "Days must be a number")]
    #[case(Some("   "), Some("7"), "Enter a city name")]
    #[case(None, Some("7"), "Enter a city name")]
    #[case(Some("Paris"), Some("0"), "Days must be between 1 and 365")]
    #[case(Some("Paris"), Some("400"), "Days must be between 1 and 365")]
    fn test_parse_rejects_invalid_input(
        #[case] city: Option<&str>,
        #[case] days: Option<&str>,
        #[case] message: &str,
    ) {
        let err = ReportRequest::parse(&params(city, days), &DefaultsConfig::default()).unwrap_err();
        assert!(matches!(err, TempViewError::Validation { .. }));
        assert_eq!(err.user_message(), message);
    }

    #[rstest]
    #[case("1", 1)]
    #[case("365", 365)]
    #[case(" 30 ", 30)]
    fn test_parse_accepts_bounds(#[case] days: &str, #[case] expected: u32) {
        let request =
            ReportRequest::parse(&params(Some("Oslo"), Some(days)), &DefaultsConfig::default()).unwrap();
        assert_eq!(request.days, expected);
    }

    #[test]
    fn test_query_string_encodes_city() {
        let request = ReportRequest {
            city: "New York".to_string(),
            days: 3,
        };
        assert_eq!(request.query_string(), "city=New%20York&days=3");
    }

    #[test]
    fn test_status_for_errors() {
        assert_eq!(status_for(&TempViewError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&TempViewError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&TempViewError::no_data("x")), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(&TempViewError::transport("x", Some(500))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&TempViewError::render("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
