use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{Inputs, MAX_PROJECTION_YEARS, project};

/// One projection request. Every field is optional; omitted fields fall back
/// to the defaults carried by [`Cli`], including the advanced cost
/// percentages (closing 3%, selling 6%, annual ownership 1.5%).
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    home_price: Option<f64>,
    down_payment: Option<f64>,
    mortgage_rate: Option<f64>,
    mortgage_term: Option<u32>,
    home_appreciation_rate: Option<f64>,
    initial_rent: Option<f64>,
    rent_increase_rate: Option<f64>,
    investment_return_rate: Option<f64>,
    time_horizon: Option<u32>,
    closing_costs_percent: Option<f64>,
    selling_costs_percent: Option<f64>,
    annual_ownership_cost_percent: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "rentbuy",
    about = "Rent-vs-buy net worth projection (amortization + reinvested cost differential)"
)]
struct Cli {
    #[arg(long, default_value_t = 500_000.0, help = "Purchase price of the home")]
    home_price: f64,
    #[arg(long, default_value_t = 100_000.0, help = "Cash down payment")]
    down_payment: f64,
    #[arg(
        long,
        default_value_t = 6.5,
        help = "Annual fixed mortgage rate in percent, e.g. 6.5"
    )]
    mortgage_rate: f64,
    #[arg(long, default_value_t = 30, help = "Mortgage term in years")]
    mortgage_term: u32,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Annual home appreciation in percent; may be negative"
    )]
    home_appreciation_rate: f64,
    #[arg(long, default_value_t = 2_500.0, help = "Current monthly rent")]
    initial_rent: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Annual rent increase in percent; may be negative"
    )]
    rent_increase_rate: f64,
    #[arg(
        long,
        default_value_t = 7.0,
        help = "Annual return on invested cash in percent; may be negative"
    )]
    investment_return_rate: f64,
    #[arg(
        long,
        default_value_t = 10,
        help = "Number of years over which the two strategies are compared"
    )]
    time_horizon: u32,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "One-time purchase closing costs as percent of price"
    )]
    closing_costs_percent: f64,
    #[arg(
        long,
        default_value_t = 6.0,
        help = "Selling costs at the horizon as percent of the home's value"
    )]
    selling_costs_percent: f64,
    #[arg(
        long,
        default_value_t = 1.5,
        help = "Recurring ownership costs (taxes, insurance, maintenance) as percent of price per year"
    )]
    annual_ownership_cost_percent: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<Inputs, String> {
    for (name, value) in [
        ("--home-price", cli.home_price),
        ("--down-payment", cli.down_payment),
        ("--initial-rent", cli.initial_rent),
        ("--mortgage-rate", cli.mortgage_rate),
        ("--closing-costs-percent", cli.closing_costs_percent),
        ("--selling-costs-percent", cli.selling_costs_percent),
        (
            "--annual-ownership-cost-percent",
            cli.annual_ownership_cost_percent,
        ),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be >= 0"));
        }
    }

    for (name, value) in [
        ("--home-appreciation-rate", cli.home_appreciation_rate),
        ("--rent-increase-rate", cli.rent_increase_rate),
        ("--investment-return-rate", cli.investment_return_rate),
    ] {
        if !value.is_finite() || value <= -100.0 {
            return Err(format!("{name} must be > -100"));
        }
    }

    if cli.mortgage_term == 0 || cli.mortgage_term > MAX_PROJECTION_YEARS {
        return Err(format!(
            "--mortgage-term must be between 1 and {MAX_PROJECTION_YEARS}"
        ));
    }

    if cli.time_horizon == 0 || cli.time_horizon > MAX_PROJECTION_YEARS {
        return Err(format!(
            "--time-horizon must be between 1 and {MAX_PROJECTION_YEARS}"
        ));
    }

    if cli.down_payment > cli.home_price {
        return Err("--down-payment cannot exceed --home-price".to_string());
    }

    Ok(Inputs {
        home_price: cli.home_price,
        down_payment: cli.down_payment,
        mortgage_rate: cli.mortgage_rate,
        mortgage_term: cli.mortgage_term,
        home_appreciation_rate: cli.home_appreciation_rate,
        initial_rent: cli.initial_rent,
        rent_increase_rate: cli.rent_increase_rate,
        investment_return_rate: cli.investment_return_rate,
        time_horizon: cli.time_horizon,
        closing_costs_percent: cli.closing_costs_percent,
        selling_costs_percent: cli.selling_costs_percent,
        annual_ownership_cost_percent: cli.annual_ownership_cost_percent,
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    log::info!("rent-vs-buy API listening on http://{addr}");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => {
            log::warn!("rejected projection request: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    match project(&inputs) {
        Ok(result) => json_response(StatusCode::OK, result),
        Err(e) => {
            log::warn!("rejected projection request: {e}");
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload)
}

fn inputs_from_payload(payload: ProjectPayload) -> Result<Inputs, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.home_price {
        cli.home_price = v;
    }
    if let Some(v) = payload.down_payment {
        cli.down_payment = v;
    }
    if let Some(v) = payload.mortgage_rate {
        cli.mortgage_rate = v;
    }
    if let Some(v) = payload.mortgage_term {
        cli.mortgage_term = v;
    }
    if let Some(v) = payload.home_appreciation_rate {
        cli.home_appreciation_rate = v;
    }
    if let Some(v) = payload.initial_rent {
        cli.initial_rent = v;
    }
    if let Some(v) = payload.rent_increase_rate {
        cli.rent_increase_rate = v;
    }
    if let Some(v) = payload.investment_return_rate {
        cli.investment_return_rate = v;
    }
    if let Some(v) = payload.time_horizon {
        cli.time_horizon = v;
    }
    if let Some(v) = payload.closing_costs_percent {
        cli.closing_costs_percent = v;
    }
    if let Some(v) = payload.selling_costs_percent {
        cli.selling_costs_percent = v;
    }
    if let Some(v) = payload.annual_ownership_cost_percent {
        cli.annual_ownership_cost_percent = v;
    }

    build_inputs(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        home_price: 500_000.0,
        down_payment: 100_000.0,
        mortgage_rate: 6.5,
        mortgage_term: 30,
        home_appreciation_rate: 3.0,
        initial_rent: 2_500.0,
        rent_increase_rate: 3.0,
        investment_return_rate: 7.0,
        time_horizon: 10,
        closing_costs_percent: 3.0,
        selling_costs_percent: 6.0,
        annual_ownership_cost_percent: 1.5,
    }
}
