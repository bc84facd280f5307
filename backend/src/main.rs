use backend::{build_rocket, config::AppConfig, routes::AppState};
use tracing::info;

#[shuttle_runtime::main]
async fn rocket(
    #[shuttle_runtime::Secrets] secret_store: shuttle_runtime::SecretStore,
) -> shuttle_rocket::ShuttleRocket {
    let config = AppConfig::from_lookup(|key| secret_store.get(key));
    info!("🚀 Starting live vote server under {}", config.base_path);

    let rocket = build_rocket(config, AppState::new());
    Ok(rocket.into())
}
