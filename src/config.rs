use anyhow::Result;
use std::{env, fmt, path::PathBuf, time::Duration};

pub const DEFAULT_BACKEND_SCHEME: &str = "http";
pub const DEFAULT_BACKEND_HOST: &str = "192.168.50.53";
pub const DEFAULT_BACKEND_PORT: u16 = 11434;
pub const DEFAULT_GENERATE_PATH: &str = "/api/generate";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_GENERATE_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_MODEL: &str = "my-model";
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 5000;

/// 后端协议
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

impl Scheme {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "http" => Some(Scheme::Http),
            "https" => Some(Scheme::Https),
            _ => None,
        }
    }
}

/// Ollama 后端地址，启动时解析一次，之后不可变
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub generate_path: String,
    /// 每个模型列表候选路径的超时
    pub probe_timeout: Duration,
    pub generate_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::default(),
            host: DEFAULT_BACKEND_HOST.to_string(),
            port: DEFAULT_BACKEND_PORT,
            generate_path: DEFAULT_GENERATE_PATH.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            generate_timeout: DEFAULT_GENERATE_TIMEOUT,
        }
    }
}

impl BackendConfig {
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// 拼接后端路径，path 需以 '/' 开头
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub fn generate_url(&self) -> String {
        self.url(&self.generate_path)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // 监听配置
    pub host: String,
    pub port: u16,

    // 后端配置
    pub backend: BackendConfig,
    pub default_model: String,

    // 日志配置
    pub debug: bool,
    pub verbose: bool,
    pub log_raw_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_LISTEN_HOST.to_string(),
            port: DEFAULT_LISTEN_PORT,
            backend: BackendConfig::default(),
            default_model: DEFAULT_MODEL.to_string(),
            debug: false,
            verbose: false,
            log_raw_json: false,
        }
    }
}

impl Config {
    fn load_dotenv(custom_path: Option<PathBuf>) -> Option<PathBuf> {
        if let Some(path) = custom_path {
            if path.exists() && dotenvy::from_path(&path).is_ok() {
                return Some(path);
            }
            eprintln!("⚠️  WARNING: Custom config file not found: {}", path.display());
        }

        if let Ok(path) = dotenvy::dotenv() {
            return Some(path);
        }

        if let Ok(home) = env::var("HOME") {
            let home_config = PathBuf::from(home).join(".ollama-relay.env");
            if home_config.exists() && dotenvy::from_path(&home_config).is_ok() {
                return Some(home_config);
            }
        }

        let etc_config = PathBuf::from("/etc/ollama-relay/.env");
        if etc_config.exists() && dotenvy::from_path(&etc_config).is_ok() {
            return Some(etc_config);
        }

        None
    }

    pub fn from_env_with_path(custom_path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = Self::load_dotenv(custom_path) {
            eprintln!("📄 Loaded config from: {}", path.display());
        } else {
            eprintln!("ℹ️  No .env file found, using environment variables only");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源构建配置（测试中不触碰进程环境变量）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let scheme = match get("OLLAMA_SCHEME") {
            Some(raw) => Scheme::parse(&raw).ok_or_else(|| {
                anyhow::anyhow!(
                    "OLLAMA_SCHEME must be 'http' or 'https', got '{}'",
                    raw
                )
            })?,
            None => Scheme::default(),
        };

        let backend_host = get("OLLAMA_HOST").unwrap_or_else(|| DEFAULT_BACKEND_HOST.to_string());
        let backend_port = parse_port(get("OLLAMA_PORT"), "OLLAMA_PORT", DEFAULT_BACKEND_PORT);

        let generate_path = match get("OLLAMA_GENERATE_PATH") {
            Some(path) if path.starts_with('/') => path,
            Some(path) => format!("/{}", path),
            None => DEFAULT_GENERATE_PATH.to_string(),
        };

        let probe_timeout = parse_secs(
            get("OLLAMA_PROBE_TIMEOUT"),
            "OLLAMA_PROBE_TIMEOUT",
            DEFAULT_PROBE_TIMEOUT,
        );
        let generate_timeout = parse_secs(
            get("OLLAMA_GENERATE_TIMEOUT"),
            "OLLAMA_GENERATE_TIMEOUT",
            DEFAULT_GENERATE_TIMEOUT,
        );

        let default_model = get("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_LISTEN_HOST.to_string());
        let port = parse_port(get("PORT"), "PORT", DEFAULT_LISTEN_PORT);

        let flag = |key: &str| {
            get(key)
                .map(|v| v == "1" || v.to_lowercase() == "true")
                .unwrap_or(false)
        };

        Ok(Config {
            host,
            port,
            backend: BackendConfig {
                scheme,
                host: backend_host,
                port: backend_port,
                generate_path,
                probe_timeout,
                generate_timeout,
            },
            default_model,
            debug: flag("DEBUG"),
            verbose: flag("VERBOSE"),
            log_raw_json: flag("LOG_RAW_JSON"),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(raw: Option<String>, key: &str, default: u16) -> u16 {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            eprintln!("⚠️  WARNING: {} is not a valid port ('{}'), using {}", key, value, default);
            default
        }),
        None => default,
    }
}

/// 以秒为单位的超时，0 或非法值回退到默认
fn parse_secs(raw: Option<String>, key: &str, default: Duration) -> Duration {
    match raw.map(|v| (v.trim().parse::<u64>(), v)) {
        Some((Ok(secs), _)) if secs > 0 => Duration::from_secs(secs),
        Some((_, value)) => {
            eprintln!(
                "⚠️  WARNING: {} is not a valid timeout ('{}'), using {}s",
                key,
                value,
                default.as_secs()
            );
            default
        }
        None => default,
    }
}
