use mongodb::{Client, bson::doc};
use std::time::Instant;

/// Result of a detailed MongoDB health probe
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database answered the ping
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    /// Round-trip time of the probe in milliseconds
    pub response_time_ms: u64,
}

/// Ping MongoDB and report whether it responds
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect, check_health};
///
/// let client = connect("mongodb://localhost:27017").await?;
/// if !check_health(&client).await {
///     tracing::error!("database unreachable");
/// }
/// ```
pub async fn check_health(client: &Client) -> bool {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .is_ok()
}

/// Ping MongoDB and report latency and any error message
///
/// Used by the readiness endpoint, which surfaces the response time
/// alongside the overall verdict.
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let outcome = client.database("admin").run_command(doc! { "ping": 1 }).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_check_health() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        assert!(check_health(&client).await);
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_check_health_detailed() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let status = check_health_detailed(&client).await;
        assert!(status.healthy);
        assert!(status.message.is_none());
    }
}
