//! Auth Config

use clap::Args;

use larder_app::auth::{DEFAULT_ACCESS_TTL_SECONDS, DEFAULT_REFRESH_TTL_SECONDS, JwtSettings};

/// Token signing settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign access and refresh tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in seconds
    #[arg(long, env = "JWT_ACCESS_TTL_SECONDS", default_value_t = DEFAULT_ACCESS_TTL_SECONDS)]
    pub jwt_access_ttl_seconds: u64,

    /// Refresh token lifetime in seconds
    #[arg(long, env = "JWT_REFRESH_TTL_SECONDS", default_value_t = DEFAULT_REFRESH_TTL_SECONDS)]
    pub jwt_refresh_ttl_seconds: u64,
}

impl AuthConfig {
    #[must_use]
    pub fn jwt_settings(&self) -> JwtSettings {
        JwtSettings {
            secret: self.jwt_secret.clone(),
            access_ttl_seconds: self.jwt_access_ttl_seconds,
            refresh_ttl_seconds: self.jwt_refresh_ttl_seconds,
        }
    }
}
