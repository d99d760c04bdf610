//! review-console - review change requests from a terminal.

use anyhow::Context;
use tradeassoc_domain::{RecordId, ReviewDomain};
use tradeassoc_review::infrastructure::config::load_dotenv_from_repo_root;
use tradeassoc_review::infrastructure::telemetry::init_tracing;
use tradeassoc_review::presentation::{
    detail_view, list_rows, parse_status_filter, render_detail, render_list, render_notice,
};
use tradeassoc_review::{ReviewApp, ReviewConfig, ReviewService};

const USAGE: &str = "Usage: review-console <membership|bill|invoice> <command>

Commands:
  list [STATUS|all]     List change requests
  show <ID>             Show the changes proposed by a request
  approve <ID>          Approve a request
  decline <ID> <NOTE>   Decline a request with a reason";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();
    init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(domain) = args.next() else {
        anyhow::bail!(USAGE);
    };
    let domain: ReviewDomain = domain.parse().map_err(|e| anyhow::anyhow!("{e}\n\n{USAGE}"))?;
    let command = args.next();
    let rest: Vec<String> = args.collect();

    let config = ReviewConfig::from_env().context("loading review configuration")?;
    tracing::info!(api_url = %config.api_url, %domain, "Starting review console");

    let app = ReviewApp::from_config(&config);
    let service = app.service(domain);

    let result = match command.as_deref() {
        Some("list") => list(service, rest.first().map(String::as_str)).await,
        Some("show") => show(service, required_id(&rest)?).await,
        Some("approve") => approve(service, required_id(&rest)?).await,
        Some("decline") => {
            let note = rest.get(1..).map(|words| words.join(" ")).unwrap_or_default();
            decline(service, required_id(&rest)?, &note).await
        }
        Some(cmd) => Err(anyhow::anyhow!("Unknown command: {cmd}\n\n{USAGE}")),
        None => Err(anyhow::anyhow!(USAGE)),
    };

    for notice in service.take_notices().await {
        eprintln!("{}", render_notice(&notice));
    }
    result
}

fn required_id(rest: &[String]) -> anyhow::Result<&str> {
    rest.first()
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing change request id\n\n{USAGE}"))
}

async fn list(service: &ReviewService, filter: Option<&str>) -> anyhow::Result<()> {
    let filter = filter
        .map(parse_status_filter)
        .transpose()
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .flatten();
    service.load(filter).await?;

    let state = service.state().await;
    print!("{}", render_list(service.domain(), &list_rows(&state, service.profile())));
    Ok(())
}

/// Loads the full list and resolves a typed id against it.
async fn resolve(service: &ReviewService, raw_id: &str) -> anyhow::Result<RecordId> {
    service.load(None).await?;
    let state = service.state().await;
    state
        .find_by_raw_id(raw_id)
        .map(|request| request.id.clone())
        .ok_or_else(|| anyhow::anyhow!("No {} change request with id {raw_id}", service.domain()))
}

async fn show(service: &ReviewService, raw_id: &str) -> anyhow::Result<()> {
    let id = resolve(service, raw_id).await?;
    service.select(&id).await?;

    let state = service.state().await;
    if let Some(view) = detail_view(&state, service.profile(), &id) {
        print!("{}", render_detail(&view));
    }
    Ok(())
}

async fn approve(service: &ReviewService, raw_id: &str) -> anyhow::Result<()> {
    let id = resolve(service, raw_id).await?;
    let outcome = service.approve(&id).await?;
    println!("Change request #{} {}", outcome.request_id, outcome.verdict);
    Ok(())
}

async fn decline(service: &ReviewService, raw_id: &str, note: &str) -> anyhow::Result<()> {
    let id = resolve(service, raw_id).await?;
    service.request_decline_reason(&id).await?;
    service.set_decline_reason(note).await;
    let outcome = service.submit_decline(&id, note).await?;
    println!("Change request #{} {}", outcome.request_id, outcome.verdict);
    Ok(())
}
