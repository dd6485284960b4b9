mod changelog;
mod config;
mod github;
mod hooks;
mod slack;

use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use color_eyre::eyre;

#[actix_web::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    color_eyre::install()?;
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(tracing_subscriber::fmt().finish())?;

    let config::Config {
        listen_addr,
        github_api,
        github_token,
    } = envy::prefixed("SHIPLOG_").from_env()?;

    tracing::info!("Listening on {}", listen_addr);

    HttpServer::new(move || {
        // GitHub rejects requests without a User-Agent.
        let http = awc::Client::builder()
            .header(
                header::USER_AGENT,
                concat!("shiplog/", env!("CARGO_PKG_VERSION")),
            )
            .finish();

        App::new()
            .data(github::GithubClient::new(
                http.clone(),
                github_api.clone(),
                github_token.clone(),
            ))
            .data(slack::SlackWebhook::new(http))
            .wrap(Logger::default())
            .route("/on-release", web::post().to(hooks::release_hook))
    })
    .bind(&listen_addr)?
    .run()
    .await
    .map_err(Into::into)
}
