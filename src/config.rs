use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-for-development";

/// Connection settings for the OpenSearch cluster
#[derive(Clone, PartialEq, Eq)]
pub struct OpenSearchConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub use_ssl: bool,
    pub verify_certs: bool,
}

impl OpenSearchConfig {
    pub fn base_url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    /// Basic auth is only sent when both username and password are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.username.is_empty() || self.password.is_empty() {
            None
        } else {
            Some((self.username.as_str(), self.password.as_str()))
        }
    }
}

impl fmt::Debug for OpenSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenSearchConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("use_ssl", &self.use_ssl)
            .field("verify_certs", &self.verify_certs)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret_key: String,
    pub access_token_expires: Duration,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret_key", &redact(&self.secret_key))
            .field("access_token_expires", &self.access_token_expires)
            .finish()
    }
}

/// Process-wide settings, resolved once at startup and passed by reference.
///
/// Resolution never fails: every unset or unparsable variable falls back to
/// its documented default. Use [`Config::insecure_defaults`] to surface the
/// fallbacks that matter outside development.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub opensearch: OpenSearchConfig,
    pub secret_key: String,
    pub debug: bool,
    pub stripe_secret_key: String,
    pub jwt: JwtConfig,
    /// Whether JWT_SECRET_KEY was absent and the app secret was reused
    pub jwt_secret_inherited: bool,
    pub gateway_host: String,
    pub gateway_port: u16,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = string_or("OPENSEARCH_HOST", "localhost");

        let port = string_or("OPENSEARCH_PORT", "9200").trim().parse().unwrap_or(9200);

        let username = string_or("OPENSEARCH_USERNAME", "");
        let password = string_or("OPENSEARCH_PASSWORD", "");
        let use_ssl = parse_flag(&string_or("OPENSEARCH_USE_SSL", "false"));
        let verify_certs = parse_flag(&string_or("OPENSEARCH_VERIFY_CERTS", "false"));

        let secret_key = string_or("SECRET_KEY", DEFAULT_SECRET_KEY);
        let debug = parse_flag(&string_or("DEBUG", "True"));
        let stripe_secret_key = string_or("STRIPE_SECRET_KEY", "");

        let (jwt_secret_key, jwt_secret_inherited) = match lookup("JWT_SECRET_KEY") {
            Some(key) => (key, false),
            None => (secret_key.clone(), true),
        };

        let jwt_expires_secs: u64 = string_or("JWT_ACCESS_TOKEN_EXPIRES", "3600")
            .trim()
            .parse()
            .unwrap_or(3600);

        let gateway_host = string_or("GATEWAY_HOST", "127.0.0.1");

        let gateway_port = string_or("GATEWAY_PORT", "9100").trim().parse().unwrap_or(9100);

        let log_dir = lookup("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./logs"));

        Config {
            opensearch: OpenSearchConfig {
                host,
                port,
                username,
                password,
                use_ssl,
                verify_certs,
            },
            secret_key,
            debug,
            stripe_secret_key,
            jwt: JwtConfig {
                secret_key: jwt_secret_key,
                access_token_expires: Duration::from_secs(jwt_expires_secs),
            },
            jwt_secret_inherited,
            gateway_host,
            gateway_port,
            log_dir,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.gateway_host, self.gateway_port);
        addr.parse().map_err(|e| anyhow::anyhow!("Invalid socket address: {}", e))
    }

    /// Settings that are acceptable for local development but not for production.
    pub fn insecure_defaults(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.secret_key == DEFAULT_SECRET_KEY {
            warnings.push("SECRET_KEY is set to the development default".to_string());
        }

        if self.jwt.secret_key == DEFAULT_SECRET_KEY {
            warnings.push("JWT_SECRET_KEY is set to the development default".to_string());
        } else if self.jwt_secret_inherited {
            warnings.push("JWT_SECRET_KEY is not set; reusing SECRET_KEY for token signing".to_string());
        }

        if self.debug {
            warnings.push("DEBUG is enabled".to_string());
        }

        if !self.opensearch.use_ssl {
            warnings.push("OpenSearch connection does not use TLS (OPENSEARCH_USE_SSL=false)".to_string());
        } else if !self.opensearch.verify_certs {
            warnings.push(
                "OpenSearch TLS certificates are not verified (OPENSEARCH_VERIFY_CERTS=false)".to_string(),
            );
        }

        if self.opensearch.credentials().is_none() {
            warnings.push("OpenSearch credentials are not configured".to_string());
        }

        warnings
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("opensearch", &self.opensearch)
            .field("secret_key", &redact(&self.secret_key))
            .field("debug", &self.debug)
            .field("stripe_secret_key", &redact(&self.stripe_secret_key))
            .field("jwt", &self.jwt)
            .field("jwt_secret_inherited", &self.jwt_secret_inherited)
            .field("gateway_host", &self.gateway_host)
            .field("gateway_port", &self.gateway_port)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}
