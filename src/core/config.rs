use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub grading: GradingConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Settings for locally issued HS256 access tokens
#[derive(Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_ttl: Duration,
    pub jwt_leeway: Duration,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &"***")
            .field("issuer", &self.issuer)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("jwt_leeway", &self.jwt_leeway)
            .finish()
    }
}

/// Completion API and scoring settings used by the grading feature
#[derive(Clone)]
pub struct GradingConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout: Duration,
    /// Minimum score (inclusive) for a submission to count as correct
    pub pass_threshold: u32,
    /// Directory with prompt template overrides
    pub template_dir: String,
}

impl std::fmt::Debug for GradingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradingConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout", &self.timeout)
            .field("pass_threshold", &self.pass_threshold)
            .field("template_dir", &self.template_dir)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            grading: GradingConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            environment,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: u64 = 60;
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let secret_key = env::var("SECRET_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "SECRET_KEY environment variable is required".to_string())?;

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "codecraft".to_string());

        let expire_minutes = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| Self::DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES.to_string())
            .parse::<u64>()
            .map_err(|_| "ACCESS_TOKEN_EXPIRE_MINUTES must be a valid number".to_string())?;

        let jwt_leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        Ok(Self {
            secret_key,
            issuer,
            access_token_ttl: Self::token_ttl(expire_minutes)?,
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
        })
    }

    fn token_ttl(expire_minutes: u64) -> Result<Duration, String> {
        expire_minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| "ACCESS_TOKEN_EXPIRE_MINUTES is too large".to_string())
    }
}

impl GradingConfig {
    const DEFAULT_BASE_URL: &'static str = "https://api.groq.com/openai/v1";
    const DEFAULT_MODEL: &'static str = "llama-3.3-70b-versatile";
    const DEFAULT_TEMPERATURE: f32 = 0.3;
    const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_PASS_THRESHOLD: u32 = 70;
    const DEFAULT_TEMPLATE_DIR: &'static str = "templates/prompts";

    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("GROQ_API_KEY")
            .map_err(|_| "GROQ_API_KEY environment variable is required".to_string())?;

        let base_url = env::var("GROQ_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let model = env::var("GRADING_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        let temperature = env::var("GRADING_TEMPERATURE")
            .unwrap_or_else(|_| Self::DEFAULT_TEMPERATURE.to_string())
            .parse::<f32>()
            .map_err(|_| "GRADING_TEMPERATURE must be a valid number".to_string())?;

        let max_output_tokens = env::var("GRADING_MAX_TOKENS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_OUTPUT_TOKENS.to_string())
            .parse::<u32>()
            .map_err(|_| "GRADING_MAX_TOKENS must be a valid number".to_string())?;

        let timeout_secs = env::var("GRADING_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "GRADING_TIMEOUT_SECS must be a valid number".to_string())?;

        let pass_threshold = env::var("GRADING_PASS_THRESHOLD")
            .unwrap_or_else(|_| Self::DEFAULT_PASS_THRESHOLD.to_string())
            .parse::<u32>()
            .map_err(|_| "GRADING_PASS_THRESHOLD must be a valid number".to_string())?;

        if pass_threshold > 100 {
            return Err("GRADING_PASS_THRESHOLD must be between 0 and 100".to_string());
        }

        let template_dir =
            env::var("PROMPT_TEMPLATE_DIR").unwrap_or_else(|_| Self::DEFAULT_TEMPLATE_DIR.to_string());

        Ok(Self {
            api_key,
            base_url,
            model,
            temperature,
            max_output_tokens,
            timeout: Self::grading_timeout(timeout_secs)?,
            pass_threshold,
            template_dir,
        })
    }

    /// A zero timeout would turn every graded submission into the fallback
    fn grading_timeout(secs: u64) -> Result<Duration, String> {
        if secs == 0 {
            return Err("GRADING_TIMEOUT_SECS must be greater than 0".to_string());
        }
        Ok(Duration::from_secs(secs))
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "CodeCraft API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Engineering skills verification platform".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
