use axum::{
    Router,
    extract::Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    Investment, MAX_SOLVER_MONTHS, PlanInput, PlanReport, PortfolioProjection, ReadinessResult,
    build_plan, project_portfolio,
};
use crate::error::{PlannerError, Result};

#[derive(Parser, Debug)]
#[command(
    name = "deposit-planner",
    about = "Property deposit planner: readiness score, savings timeline and entity strategies"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API over HTTP.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Build a plan from a JSON payload file and print the report.
    Plan {
        #[arg(long, help = "Path to a plan payload in the same shape POST /api/plan accepts")]
        input: PathBuf,
        #[arg(long, help = "Override today's date (YYYY-MM-DD) for milestone dates")]
        today: Option<String>,
        #[arg(long, default_value_t = false, help = "Print single-line JSON")]
        compact: bool,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanPayload {
    #[serde(flatten)]
    input: PlanInput,
    today: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    investments: Vec<Investment>,
    #[serde(deserialize_with = "crate::core::lenient::u32_or_zero")]
    horizon_months: u32,
}

#[derive(Debug)]
struct PlanRequest {
    input: PlanInput,
    today: NaiveDate,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { port } => run_http_server(port).await,
        Command::Plan {
            input,
            today,
            compact,
        } => {
            let json = std::fs::read_to_string(&input)?;
            let mut request = plan_request_from_json(&json)?;
            if let Some(today) = today {
                request.today = parse_date(&today)?;
            }
            let report = plan_for_request(&request);
            let rendered = if compact {
                serde_json::to_string(&report)?
            } else {
                serde_json::to_string_pretty(&report)?
            };
            println!("{rendered}");
            Ok(())
        }
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/plan", post(plan_handler))
        .route("/api/readiness", post(readiness_handler))
        .route("/api/project", post(project_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "deposit planner API listening");
    info!("local access: http://127.0.0.1:{port}/health");

    axum::serve(listener, router()).await?;
    Ok(())
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn plan_handler(body: String) -> Response {
    match plan_request_from_json(&body) {
        Ok(request) => json_response(StatusCode::OK, plan_for_request(&request)),
        Err(err) => bad_request(err),
    }
}

async fn readiness_handler(body: String) -> Response {
    match plan_request_from_json(&body) {
        Ok(request) => {
            let readiness: ReadinessResult = plan_for_request(&request).readiness;
            json_response(StatusCode::OK, readiness)
        }
        Err(err) => bad_request(err),
    }
}

async fn project_handler(body: String) -> Response {
    match projection_from_json(&body) {
        Ok(projection) => json_response(StatusCode::OK, projection),
        Err(err) => bad_request(err),
    }
}

fn plan_for_request(request: &PlanRequest) -> PlanReport {
    let report = build_plan(&request.input, request.today);
    info!(
        investments = request.input.investments.len(),
        summaries = request.input.monthly_summaries.len(),
        entities = request.input.entities.len(),
        score = report.readiness.total,
        months_to_deposit = ?report.timeline.months_to_deposit,
        "plan computed"
    );
    report
}

fn plan_request_from_json(json: &str) -> Result<PlanRequest> {
    let payload = if json.trim().is_empty() {
        PlanPayload::default()
    } else {
        serde_json::from_str::<PlanPayload>(json)?
    };
    let today = match payload.today.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    debug!(%today, "parsed plan payload");
    Ok(PlanRequest {
        input: payload.input,
        today,
    })
}

fn projection_from_json(json: &str) -> Result<PortfolioProjection> {
    let payload = serde_json::from_str::<ProjectPayload>(json)?;
    let horizon = payload.horizon_months.min(MAX_SOLVER_MONTHS);
    let investments: Vec<Investment> = payload
        .investments
        .iter()
        .map(Investment::sanitized)
        .collect();
    Ok(project_portfolio(&investments, horizon))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| PlannerError::InvalidDate(raw.to_string()))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn bad_request(err: PlannerError) -> Response {
    warn!(error = %err, "rejected request");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
