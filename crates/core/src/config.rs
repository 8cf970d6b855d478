use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const DEFAULT_SITE_NAME: &str = "Jimowers";
const DEFAULT_SITE_DESCRIPTION: &str = "A WordPress site served by press-kit";
const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const DEFAULT_WORDPRESS_URL: &str = "https://jimowers.infy.uk";
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_ACCEPTED_DOMAINS: &[&str] = &[
    "gmail.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
    "mail.com",
];

/// Complete site configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub site: SiteSettings,
    pub wordpress: WordPressSettings,
    pub smtp: SmtpSettings,
    pub newsletter: NewsletterSettings,
    pub server: ServerSettings,
}

/// Public identity of the rendered site
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub name: String,
    pub description: String,
    /// Origin without trailing slash, e.g. `https://example.com`
    pub url: String,
    pub language: String,
    /// Path or absolute URL of the publisher logo
    pub logo: String,
}

impl SiteSettings {
    /// Absolute URL for a site-relative path
    pub fn absolute(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }

    pub fn canonical(&self, slug: &str) -> String {
        format!("{}/{}", self.url, slug)
    }
}

#[derive(Debug, Clone)]
pub struct WordPressSettings {
    /// CMS origin without trailing slash
    pub url: String,
    pub cache_ttl: Duration,
    pub menu_location: String,
    /// Whether slug resolution also tries tags
    pub resolve_tags: bool,
}

impl WordPressSettings {
    /// Base of the core REST routes (`/wp-json/wp/v2`)
    pub fn rest_base(&self) -> String {
        format!("{}/wp-json/wp/v2", self.url)
    }

    pub fn rating_endpoint(&self) -> String {
        format!("{}/wp-json/custom/v1/save-rating", self.url)
    }

    pub fn maintenance_endpoint(&self) -> String {
        format!("{}/wp-json/myplugin/v1/maintenance-mode", self.url)
    }
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    /// Empty host puts the mailer in log-only mode
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    /// Where contact and signup notifications go
    pub recipient: String,
    pub starttls: bool,
}

#[derive(Debug, Clone)]
pub struct NewsletterSettings {
    pub accepted_domains: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
    pub static_dir: String,
}

/// Raw TOML configuration structure
/// Every field is optional; missing ones take the defaults above.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    site: RawSite,
    #[serde(default)]
    wordpress: RawWordPress,
    #[serde(default)]
    smtp: RawSmtp,
    #[serde(default)]
    newsletter: RawNewsletter,
    #[serde(default)]
    server: RawServer,
}

#[derive(Debug, Default, Deserialize)]
struct RawSite {
    name: Option<String>,
    description: Option<String>,
    url: Option<String>,
    language: Option<String>,
    logo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawWordPress {
    url: Option<String>,
    cache_ttl_secs: Option<u64>,
    menu_location: Option<String>,
    resolve_tags: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSmtp {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    from: Option<String>,
    recipient: Option<String>,
    starttls: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNewsletter {
    accepted_domains: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawServer {
    bind: Option<String>,
    port: Option<u16>,
    static_dir: Option<String>,
}

/// Parse press-kit.toml from a file path
pub fn parse_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse press-kit.toml from a string (useful for testing)
pub fn parse_config_str(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)?;
    from_raw(raw)
}

/// Load configuration the way the server does: file if present, then env.
///
/// A missing file is not an error; the defaults are used instead.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(p) if p.exists() => parse_config(p)?,
        Some(p) => {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
        None => from_raw(RawConfig::default())?,
    };
    config.with_env_overrides(|key| std::env::var(key).ok())
}

impl Default for Config {
    fn default() -> Self {
        Config {
            site: SiteSettings {
                name: DEFAULT_SITE_NAME.to_string(),
                description: DEFAULT_SITE_DESCRIPTION.to_string(),
                url: DEFAULT_SITE_URL.to_string(),
                language: "en-US".to_string(),
                logo: "/static/logo.svg".to_string(),
            },
            wordpress: WordPressSettings {
                url: DEFAULT_WORDPRESS_URL.to_string(),
                cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
                menu_location: "main-menu".to_string(),
                resolve_tags: true,
            },
            smtp: SmtpSettings {
                host: String::new(),
                port: 587,
                username: None,
                password: None,
                from: "no-reply@example.com".to_string(),
                recipient: "admin@example.com".to_string(),
                starttls: true,
            },
            newsletter: NewsletterSettings {
                accepted_domains: DEFAULT_ACCEPTED_DOMAINS
                    .iter()
                    .map(|d| d.to_string())
                    .collect(),
            },
            server: ServerSettings {
                bind: "127.0.0.1".to_string(),
                port: 3000,
                static_dir: "public".to_string(),
            },
        }
    }
}

impl Config {
    /// Apply environment overrides, then re-validate.
    ///
    /// `lookup` is `std::env::var` in production and a map in tests.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("SITE_NAME") {
            self.site.name = v;
        }
        if let Some(v) = get("SITE_DESCRIPTION") {
            self.site.description = v;
        }
        if let Some(v) = get("SITE_URL") {
            self.site.url = v;
        }
        if let Some(v) = get("WORDPRESS_URL") {
            self.wordpress.url = v;
        }
        if let Some(v) = get("SMTP_SERVER_HOST") {
            self.smtp.host = v;
        }
        if let Some(v) = get("SMTP_SERVER_PORT") {
            self.smtp.port = v
                .parse()
                .map_err(|_| Error::Config(format!("Invalid SMTP_SERVER_PORT '{}'", v)))?;
        }
        if let Some(v) = get("SMTP_SERVER_USERNAME") {
            self.smtp.username = Some(v);
        }
        if let Some(v) = get("SMTP_SERVER_PASSWORD") {
            self.smtp.password = Some(v);
        }
        if let Some(v) = get("SMTP_FROM") {
            self.smtp.from = v;
        }
        if let Some(v) = get("SITE_MAIL_RECEIVER") {
            self.smtp.recipient = v;
        }

        self.site.url = validate_url(&self.site.url, "SITE_URL")?;
        self.wordpress.url = validate_url(&self.wordpress.url, "WORDPRESS_URL")?;
        Ok(self)
    }
}

fn from_raw(raw: RawConfig) -> Result<Config> {
    let defaults = Config::default();

    let site_url = match raw.site.url {
        Some(url) => validate_url(&url, "site.url")?,
        None => defaults.site.url,
    };
    let wordpress_url = match raw.wordpress.url {
        Some(url) => validate_url(&url, "wordpress.url")?,
        None => defaults.wordpress.url,
    };

    let cache_ttl = raw
        .wordpress
        .cache_ttl_secs
        .map(Duration::from_secs)
        .unwrap_or(defaults.wordpress.cache_ttl);

    let accepted_domains = match raw.newsletter.accepted_domains {
        Some(domains) => {
            let domains: Vec<String> = domains
                .into_iter()
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect();
            if domains.is_empty() {
                return Err(Error::Config(
                    "newsletter.accepted_domains must list at least one domain".to_string(),
                ));
            }
            domains
        }
        None => defaults.newsletter.accepted_domains,
    };

    let port = raw.server.port.unwrap_or(defaults.server.port);
    if port == 0 {
        return Err(Error::Config("server.port must be non-zero".to_string()));
    }

    Ok(Config {
        site: SiteSettings {
            name: raw.site.name.unwrap_or(defaults.site.name),
            description: raw.site.description.unwrap_or(defaults.site.description),
            url: site_url,
            language: raw.site.language.unwrap_or(defaults.site.language),
            logo: raw.site.logo.unwrap_or(defaults.site.logo),
        },
        wordpress: WordPressSettings {
            url: wordpress_url,
            cache_ttl,
            menu_location: raw
                .wordpress
                .menu_location
                .unwrap_or(defaults.wordpress.menu_location),
            resolve_tags: raw
                .wordpress
                .resolve_tags
                .unwrap_or(defaults.wordpress.resolve_tags),
        },
        smtp: SmtpSettings {
            host: raw.smtp.host.unwrap_or(defaults.smtp.host),
            port: raw.smtp.port.unwrap_or(defaults.smtp.port),
            username: raw.smtp.username,
            password: raw.smtp.password,
            from: raw.smtp.from.unwrap_or(defaults.smtp.from),
            recipient: raw.smtp.recipient.unwrap_or(defaults.smtp.recipient),
            starttls: raw.smtp.starttls.unwrap_or(defaults.smtp.starttls),
        },
        newsletter: NewsletterSettings { accepted_domains },
        server: ServerSettings {
            bind: raw.server.bind.unwrap_or(defaults.server.bind),
            port,
            static_dir: raw.server.static_dir.unwrap_or(defaults.server.static_dir),
        },
    })
}

/// Validate an origin URL and strip trailing slashes.
///
/// Only absolute `http`/`https` URLs with a host are accepted.
fn validate_url(url_str: &str, field_name: &str) -> Result<String> {
    let trimmed = url_str.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config(format!("Empty URL in '{}' field", field_name)));
    }

    let parsed = url::Url::parse(trimmed)
        .map_err(|e| {
            Error::Config(format!(
                "Invalid URL in '{}': '{}' ({})",
                field_name, url_str, e
            ))
        })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::Config(format!(
            "Only http and https URLs allowed in '{}': '{}'",
            field_name, url_str
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(Error::Config(format!(
            "Missing host in '{}': '{}'",
            field_name, url_str
        )));
    }

    Ok(trimmed.to_string())
}
