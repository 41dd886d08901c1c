use std::process;

mod api;
mod config;
mod constants;
mod digest;
mod error;
mod pipeline;
mod slack;
mod utils;

use api::client::BitbucketClient;
use config::ReminderConfig;
use error::Error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        utils::display::error(&format!("{}", e));
        process::exit(1);
    }
}

/// One reminder run: resolve config, walk projects to repositories to
/// open pull requests, then post the digest to the webhook.
async fn run() -> Result<(), Error> {
    let cfg = ReminderConfig::load()?;
    let client = BitbucketClient::new(&cfg)?;

    let projects = pipeline::select_projects(&cfg, client.list_projects().await?);
    for project in &projects {
        utils::debug::log(&format!("Project: {} - {}", project.id, project.key));
    }

    let repos = pipeline::collect_repositories(&client, &projects).await?;
    let records = pipeline::collect_pull_requests(&client, &repos).await?;

    let message = digest::render(&cfg, &records);
    slack::post_webhook(&cfg.slack.webhook_url, &message).await?;

    utils::display::success(&format!(
        "Digest sent: {} open pull requests across {} repositories",
        records.len(),
        repos.len()
    ));
    Ok(())
}
