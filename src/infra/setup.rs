use std::{fs::File, path::Path, sync::Arc};

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::http::app_state::AppState,
    application::{
        access_gate::AccessGate,
        use_cases::waitlist::{WaitlistRepo, WaitlistUseCases},
        validators::{DocumentRules, PhoneRules, ValidationRules},
    },
    infra::{config::AppConfig, db::run_migrations, error::InfraError, postgres_persistence},
};

/// Connects to the database and wires the use cases. The pool is returned
/// alongside the state so it can be closed on shutdown.
pub async fn init_app_state(config: AppConfig) -> anyhow::Result<(AppState, PgPool)> {
    let postgres = postgres_persistence(&config.database_url, &config.pool).await?;
    let pool = postgres.pool().clone();

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    let rules = ValidationRules {
        documents: DocumentRules::default(),
        phone: PhoneRules {
            digits: config.phone_digits.clone(),
        },
    };

    let waitlist_repo = Arc::new(postgres) as Arc<dyn WaitlistRepo>;
    let waitlist_use_cases =
        WaitlistUseCases::new(waitlist_repo, rules, config.launch_date.clone());

    let access_gate = AccessGate::new(
        copy_secret(&config.api_key),
        copy_secret(&config.admin_username),
        copy_secret(&config.admin_password),
    );

    Ok((
        AppState {
            config: Arc::new(config),
            access_gate: Arc::new(access_gate),
            waitlist_use_cases: Arc::new(waitlist_use_cases),
        },
        pool,
    ))
}

fn copy_secret(secret: &SecretString) -> SecretString {
    SecretString::new(secret.expose_secret().into())
}

pub fn init_tracing(log_file: Option<&Path>) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs)
    let json_layer = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| InfraError::LogFile {
                path: path.display().to_string(),
                source,
            })?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(true)
                    .with_span_list(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
