use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

const DEFAULT_CREDENTIALS_PATH: &str = "credentials.txt";

/// API tokens for both services plus the Simply Plural user id.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    pub sp_token: String,
    pub pk_token: String,
    pub sp_userid: String,
}

impl Credentials {
    /// Parse the credentials JSON document. Every field must be a non-empty string.
    pub fn from_json(json: &str) -> Result<Self> {
        let credentials: Credentials =
            serde_json::from_str(json.trim()).context("Credentials must be a JSON object")?;

        for (field, value) in [
            ("sp_token", &credentials.sp_token),
            ("pk_token", &credentials.pk_token),
            ("sp_userid", &credentials.sp_userid),
        ] {
            if value.trim().is_empty() {
                bail!("Credential field {} is empty", field);
            }
        }

        Ok(credentials)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials from {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid credentials in {}", path.display()))
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("sp_token", &mask(&self.sp_token))
            .field("pk_token", &mask(&self.pk_token))
            .field("sp_userid", &self.sp_userid)
            .finish()
    }
}

/// Keep the last four characters of a secret.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials_path: PathBuf,
    pub credentials: Credentials,
    pub simplyplural_base_url: Option<String>,
    pub pluralkit_base_url: Option<String>,
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let credentials_path = PathBuf::from(
            env::var("PLURALSYNC_CREDENTIALS")
                .unwrap_or_else(|_| DEFAULT_CREDENTIALS_PATH.to_string()),
        );
        let credentials = Credentials::from_file(&credentials_path)?;

        Ok(Self {
            credentials_path,
            credentials,
            simplyplural_base_url: env::var("SIMPLYPLURAL_BASE_URL").ok(),
            pluralkit_base_url: env::var("PLURALKIT_BASE_URL").ok(),
            dry_run: env::var("PLURALSYNC_DRY_RUN")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .context("PLURALSYNC_DRY_RUN must be true or false")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"sp_token": "sp-secret-1234", "pk_token": "pk-secret-5678", "sp_userid": "user-1"}"#;

    #[test]
    fn parses_valid_credentials() {
        let credentials = Credentials::from_json(VALID).unwrap();

        assert_eq!(credentials.sp_token, "sp-secret-1234");
        assert_eq!(credentials.pk_token, "pk-secret-5678");
        assert_eq!(credentials.sp_userid, "user-1");
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let padded = format!("\n  {}  \n", VALID);

        assert!(Credentials::from_json(&padded).is_ok());
    }

    #[test]
    fn rejects_missing_field() {
        let err = Credentials::from_json(r#"{"sp_token": "a", "pk_token": "b"}"#).unwrap_err();

        assert!(format!("{:#}", err).contains("sp_userid"));
    }

    #[test]
    fn rejects_unknown_field() {
        let json = r#"{"sp_token": "a", "pk_token": "b", "sp_userid": "c", "extra": "d"}"#;

        assert!(Credentials::from_json(json).is_err());
    }

    #[test]
    fn rejects_empty_field() {
        let json = r#"{"sp_token": "a", "pk_token": " ", "sp_userid": "c"}"#;

        let err = Credentials::from_json(json).unwrap_err();

        assert!(err.to_string().contains("pk_token"));
    }

    #[test]
    fn rejects_non_json() {
        assert!(Credentials::from_json("sp_token=abc").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = Path::new("/nonexistent/pluralsync/credentials.txt");

        let err = Credentials::from_file(path).unwrap_err();

        assert!(err.to_string().contains("Failed to read credentials"));
    }

    #[test]
    fn reads_credentials_file() {
        let path = env::temp_dir().join(format!("pluralsync-credentials-{}.txt", std::process::id()));
        std::fs::write(&path, VALID).unwrap();

        let credentials = Credentials::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(credentials.unwrap().sp_userid, "user-1");
    }

    #[test]
    fn debug_output_masks_tokens() {
        let credentials = Credentials::from_json(VALID).unwrap();

        let rendered = format!("{:?}", credentials);

        assert!(!rendered.contains("sp-secret"));
        assert!(!rendered.contains("pk-secret"));
        assert!(rendered.contains("****1234"));
        assert!(rendered.contains("user-1"));
    }

    #[test]
    fn short_secrets_are_fully_masked() {
        assert_eq!(mask("abc"), "****");
        assert_eq!(mask(""), "****");
    }
}
