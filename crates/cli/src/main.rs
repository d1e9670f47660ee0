// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod report;

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use painel_activity::{ActivityEvent, ActivityKind};
use painel_api::{
    ActivityLogger, ComparisonService, DashboardRpc, HttpRpcClient, HttpRpcConfig,
    list_available_periods, recent_weeks,
};
use painel_domain::{
    FilterPayload, FilterState, UserAccessContext, ValidatedFilters, build_filter_payload,
    validate_filter_payload, wire,
};

use crate::report::ComparisonReport;

type CliResult<T> = Result<T, Box<dyn Error>>;

/// Painel - filter payloads and period comparisons for the operational dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    backend: BackendArgs,

    #[command(subcommand)]
    command: Command,
}

/// Backend connection settings.
#[derive(clap::Args, Debug)]
struct BackendArgs {
    /// Backend project URL.
    #[arg(long, env = "PAINEL_BACKEND_URL", global = true)]
    backend_url: Option<String>,

    /// Public API key of the backend.
    #[arg(long, env = "PAINEL_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Access token of the signed-in user.
    #[arg(long, env = "PAINEL_ACCESS_TOKEN", global = true, hide_env_values = true)]
    access_token: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "PAINEL_TIMEOUT_SECS", global = true, default_value_t = 30)]
    timeout_secs: u64,
}

impl BackendArgs {
    fn config(&self) -> CliResult<HttpRpcConfig> {
        let base_url: &str = self
            .backend_url
            .as_deref()
            .ok_or("--backend-url or PAINEL_BACKEND_URL is required")?;
        let api_key: &str = self
            .api_key
            .as_deref()
            .ok_or("--api-key or PAINEL_API_KEY is required")?;
        Ok(HttpRpcConfig {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            access_token: self.access_token.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

/// JSON arguments accept inline JSON or `@path` to read a file.
#[derive(Subcommand, Debug)]
enum Command {
    /// Builds the backend payload for a filter selection.
    Payload {
        /// The filter selection (JSON).
        #[arg(long)]
        state: String,
        /// The user access context (JSON).
        #[arg(long)]
        user: Option<String>,
    },
    /// Validates and normalizes a raw payload.
    Validate {
        /// The payload, keyed by parameter name (JSON).
        #[arg(long)]
        params: String,
    },
    /// Compares two or more periods.
    Compare {
        /// A period label such as 2025-W10. Repeat for each period.
        #[arg(long = "period", required = true)]
        periods: Vec<String>,
        /// The venue to compare.
        #[arg(long)]
        venue: Option<String>,
        /// The user access context (JSON).
        #[arg(long)]
        user: Option<String>,
        /// Breakdown entries per page.
        #[arg(long, default_value_t = 8)]
        per_page: usize,
        /// Session recorded with the activity event.
        #[arg(long)]
        session: Option<String>,
    },
    /// Lists the periods available for comparison.
    Weeks {
        /// Number of recent weeks listed when the backend has none.
        #[arg(long, default_value_t = 8)]
        fallback_weeks: usize,
    },
}

/// Reads a JSON argument, inline or from `@path`.
fn read_json_arg<T: DeserializeOwned>(arg: &str) -> CliResult<T> {
    let text: String = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {path}: {e}"))?,
        None => arg.to_string(),
    };
    Ok(serde_json::from_str(&text)?)
}

fn read_user(arg: Option<&str>) -> CliResult<Option<UserAccessContext>> {
    arg.map(read_json_arg::<UserAccessContext>).transpose()
}

fn payload_command(state: &str, user: Option<&str>) -> CliResult<Value> {
    let state: FilterState = read_json_arg(state)?;
    let user: Option<UserAccessContext> = read_user(user)?;
    let payload: FilterPayload = build_filter_payload(&state, user.as_ref())?;
    Ok(payload.to_params()?)
}

fn validate_command(params: &str) -> CliResult<Value> {
    let raw: Value = read_json_arg(params)?;
    let validated: ValidatedFilters = validate_filter_payload(&raw, painel_domain::today())?;
    let mut normalized: Value = validated.payload.to_params()?;
    if let Some(fields) = normalized.as_object_mut() {
        fields.insert(wire::LIMIT.to_string(), json!(validated.limit));
    }
    Ok(normalized)
}

async fn compare_command(
    backend: &BackendArgs,
    periods: &[String],
    venue: Option<&str>,
    user: Option<&str>,
    per_page: usize,
    session: Option<&str>,
) -> CliResult<Value> {
    let user: Option<UserAccessContext> = read_user(user)?;
    let client: Arc<HttpRpcClient> = Arc::new(HttpRpcClient::new(backend.config()?)?);
    let service: ComparisonService<HttpRpcClient> =
        ComparisonService::new(DashboardRpc::new(Arc::clone(&client)));

    let rows = service
        .compare(periods, venue, user.as_ref())
        .await?
        .ok_or("comparison was superseded")?;

    let mut event: ActivityEvent = ActivityEvent::new(
        ActivityKind::Comparison,
        format!("Comparou {} semanas", periods.len()),
    )
    .with_tab("comparacao")
    .with_filters(json!({ "periods": periods, "venue": venue }));
    if let Some(session) = session {
        event = event.with_session(session);
    }
    let outcome = ActivityLogger::new(client).log(&event).await;
    debug!(?outcome, "comparison activity logged");

    Ok(serde_json::to_value(ComparisonReport::build(&rows, per_page))?)
}

async fn weeks_command(backend: &BackendArgs, fallback_weeks: usize) -> CliResult<Value> {
    let client: Arc<HttpRpcClient> = Arc::new(HttpRpcClient::new(backend.config()?)?);
    let rpc: DashboardRpc<HttpRpcClient> = DashboardRpc::new(client);
    let fallback = recent_weeks(painel_domain::today(), fallback_weeks);
    let periods = list_available_periods(&rpc, painel_domain::current_year(), &fallback).await;
    let labels: Vec<String> = periods.iter().map(ToString::to_string).collect();
    Ok(json!(labels))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let output: Value = match &args.command {
        Command::Payload { state, user } => payload_command(state, user.as_deref())?,
        Command::Validate { params } => validate_command(params)?,
        Command::Compare {
            periods,
            venue,
            user,
            per_page,
            session,
        } => {
            info!(periods = periods.len(), "Comparing periods");
            compare_command(
                &args.backend,
                periods,
                venue.as_deref(),
                user.as_deref(),
                *per_page,
                session.as_deref(),
            )
            .await?
        }
        Command::Weeks { fallback_weeks } => weeks_command(&args.backend, *fallback_weeks).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use painel_core::{ComparisonRow, DashboardSnapshot};
    use painel_domain::WeekIdentifier;

    fn create_test_row(week: u32, completed: u64) -> ComparisonRow {
        ComparisonRow::new(
            WeekIdentifier::new(2025, week),
            DashboardSnapshot::from_value(&json!({
                "totais": { "corridas_completadas": completed },
                "aderencia_origem": [
                    { "origem": "App", "aderencia_percentual": 80.0 },
                    { "origem": "Web", "aderencia_percentual": 60.0 },
                    { "origem": "Parceiro", "aderencia_percentual": 40.0 }
                ]
            })),
            None,
        )
    }

    #[test]
    fn test_compare_args_collect_repeated_periods() {
        let args: Args = Args::try_parse_from([
            "painel",
            "--backend-url",
            "https://painel.example.com",
            "compare",
            "--period",
            "2025-W10",
            "--period",
            "2025-W11",
            "--venue",
            "Rio",
        ])
        .unwrap();

        let Command::Compare {
            periods,
            venue,
            per_page,
            ..
        } = args.command
        else {
            panic!("expected the compare command");
        };
        assert_eq!(periods, vec!["2025-W10", "2025-W11"]);
        assert_eq!(venue.as_deref(), Some("Rio"));
        assert_eq!(per_page, 8);
    }

    #[test]
    fn test_compare_requires_a_period() {
        assert!(Args::try_parse_from(["painel", "compare"]).is_err());
    }

    #[test]
    fn test_missing_backend_url_is_reported() {
        let backend: BackendArgs = BackendArgs {
            backend_url: None,
            api_key: Some(String::from("key")),
            access_token: None,
            timeout_secs: 30,
        };
        assert!(backend.config().is_err());
    }

    #[test]
    fn test_payload_command_applies_user_scope() {
        let output: Value = payload_command(
            r#"{"filterMode":"ano_semana","year":2025,"week":10,"venue":"São Paulo"}"#,
            Some(r#"{"isAdmin":false,"role":"user","assignedVenues":["Rio"],"organizationId":"org-42"}"#),
        )
        .unwrap();

        assert_eq!(output["p_praca"], "Rio");
        assert_eq!(output["p_semana"], 10);
        assert_eq!(output["p_organization_id"], "org-42");
    }

    #[test]
    fn test_payload_command_accepts_state_without_mode_tag() {
        let output: Value = payload_command(r#"{"venue":"Rio"}"#, None).unwrap();

        assert_eq!(output["p_praca"], "Rio");
        assert_eq!(output["p_filtro_modo"], "ano_semana");
    }

    #[test]
    fn test_payload_command_rejects_inverted_range() {
        let result = payload_command(
            r#"{"filterMode":"intervalo","dateStart":"2025-03-10","dateEnd":"2025-03-01"}"#,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_command_adds_limit() {
        let output: Value =
            validate_command(r#"{"p_ano":"2024","p_semana":3,"p_limite":"20"}"#).unwrap();
        assert_eq!(output["p_ano"], 2024);
        assert_eq!(output["p_limite"], 20);
    }

    #[test]
    fn test_read_json_arg_rejects_malformed_input() {
        assert!(read_json_arg::<Value>("{not json").is_err());
        assert!(read_json_arg::<Value>("@/nonexistent/painel.json").is_err());
    }

    #[test]
    fn test_report_paginates_breakdowns() {
        let rows: Vec<ComparisonRow> = vec![create_test_row(10, 100), create_test_row(11, 110)];
        let report: ComparisonReport = ComparisonReport::build(&rows, 2);

        assert_eq!(report.periods, vec!["2025-W10", "2025-W11"]);
        assert_eq!(report.totals[1].rides_completed_change, "+10.0%");
        assert_eq!(report.weekdays.len(), 7);
        assert_eq!(report.origins.len(), 2);
        assert_eq!(report.origins[0].len(), 2);
        assert_eq!(report.origins[1][0].label, "Parceiro");
        assert!(report.sub_venues.is_empty());
    }
}
