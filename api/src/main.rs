//! JobLane API server binary.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use jl_api::{app, state::AppState};
use jl_core::domain::clock::{Clock, SystemClock};
use jl_core::services::auth::AuthService;
use jl_core::services::password_reset::PasswordResetService;
use jl_core::services::registration::RegistrationService;
use jl_core::services::reset_token::ResetTokenCodec;
use jl_core::services::token::AuthTokenService;
use jl_infra::database::{
    DatabasePool, MySqlAccountRepository, MySqlPendingRegistrationRepository,
};
use jl_infra::email::create_mailer;
use jl_shared::config::{AuthConfig, DatabaseConfig, EmailConfig, OtpConfig, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let email_config = EmailConfig::from_env();
    let auth_config = AuthConfig::from_env();
    let otp_config = OtpConfig::from_env();

    if auth_config.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is not set, tokens are signed with the insecure default");
    }

    let pool = DatabasePool::new(&database_config).await?;
    pool.health_check().await?;

    let pending_repo = Arc::new(MySqlPendingRegistrationRepository::new(
        pool.get_pool().clone(),
    ));
    let account_repo = Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()));
    let mailer = Arc::new(create_mailer(&email_config)?);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let tokens = Arc::new(AuthTokenService::new(&auth_config, Arc::clone(&clock)));
    let codec = ResetTokenCodec::new(&auth_config.secret, otp_config.reset_token_max_age_seconds);

    let registration = Arc::new(RegistrationService::new(
        Arc::clone(&pending_repo),
        Arc::clone(&account_repo),
        Arc::clone(&mailer),
        Arc::clone(&tokens),
        Arc::clone(&clock),
        otp_config.clone(),
    ));
    let password_reset = Arc::new(PasswordResetService::new(
        Arc::clone(&account_repo),
        Arc::clone(&mailer),
        codec,
        Arc::clone(&clock),
        otp_config,
    ));
    let auth = Arc::new(AuthService::new(
        Arc::clone(&account_repo),
        Arc::clone(&tokens),
    ));

    let state = web::Data::new(AppState {
        registration,
        password_reset,
        auth,
        tokens,
    });

    let bind_address = server_config.bind_address();
    tracing::info!(%bind_address, "starting JobLane API server");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(
                app::configure::<
                    MySqlPendingRegistrationRepository,
                    MySqlAccountRepository,
                    jl_infra::Mailer,
                >,
            )
    })
    .workers(server_config.workers)
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
