use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in main() before any fallible operations to ensure
/// colored error output. Safe to call multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing with environment-aware configuration.
///
/// - **Production** (`APP_ENV=production`): JSON format for log aggregation,
///   module targets hidden, ErrorLayer for span trace capture.
/// - **Development** (default): pretty-printed format, ErrorLayer included.
///
/// Environment variables:
/// - `APP_ENV`: set to "production" for JSON logs (default: "development")
/// - `RUST_LOG`: override log levels (e.g., "debug", "ticketing_api=trace")
///
/// Safe to call multiple times; re-initialization is silently skipped
/// (common in tests).
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("info,tower_http=info")
        } else {
            EnvFilter::new("debug")
        }
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => {
            info!(
                "Tracing initialized with ErrorLayer. Environment: {:?}",
                environment
            );
        }
        Err(_) => {
            debug!("Tracing already initialized, skipping re-initialization");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_development() {
        init_tracing(&Environment::Development);
    }

    #[test]
    fn test_init_tracing_multiple_calls() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }

    #[test]
    fn test_init_tracing_with_rust_log_env() {
        temp_env::with_var("RUST_LOG", Some("trace"), || {
            init_tracing(&Environment::Development);
        });
    }
}
