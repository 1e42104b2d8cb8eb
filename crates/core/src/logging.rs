//! Logging setup for the GeneCoder pipeline.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise le système de logging (appelé une fois par le binaire hôte).
pub fn init_logging() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();
}

/// Trace l'entrée/sortie d'une étape du pipeline.
#[macro_export]
macro_rules! log_stage {
    ($name:expr, $block:block) => {{
        let span = ::tracing::span!(::tracing::Level::DEBUG, $name);
        let _enter = span.enter();
        ::tracing::info!("stage start: {}", $name);
        let result = $block;
        ::tracing::info!("stage end: {}", $name);
        result
    }};
}

/// Trace une erreur avant de la propager.
#[macro_export]
macro_rules! log_error {
    ($error:expr) => {{
        ::tracing::error!("error: {}", $error);
        $error
    }};
}
