use anyhow::Context as _;
use routecord::ClientContext;
use routecord::params::Params;
use routecord::rest::{HttpRestClient, RequestOpts};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Default: routecord=info, serenity=warn
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routecord=info,serenity=warn".into()),
        )
        .init();

    info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        description = env!("CARGO_PKG_DESCRIPTION"),
        "Starting application"
    );

    let params = Params::new()?;
    info!(?params, "Application parameters loaded");

    let rest_client = HttpRestClient::new(
        params.api_url()?,
        Some(params.discord_token.clone()),
        &params.transport_settings(),
    )?;
    let context = ClientContext::without_audio(Arc::new(rest_client));
    let opts = RequestOpts::new();

    let regions = context
        .rest()
        .voice()
        .get_voice_regions(&opts)
        .await
        .context("Listing voice regions")?;
    for region in &regions {
        info!(
            id = %region.id,
            name = %region.name,
            optimal = region.optimal,
            deprecated = region.deprecated,
            "Voice region"
        );
    }

    if let Some(code) = &params.invite_code {
        match context.fetch_invite(code, &opts).await {
            Ok(invite) => info!(
                code = invite.code(),
                url = %invite.url(),
                guild = ?invite.data().guild.as_ref().map(|g| &g.name),
                members = ?invite.data().approximate_member_count,
                "Invite resolved"
            ),
            Err(err) => warn!(%code, error = %err, "Failed to resolve invite"),
        }
    }

    context.shutdown();
    Ok(())
}
