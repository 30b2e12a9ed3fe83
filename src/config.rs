use std::path::PathBuf;

use clap::Parser;
use uuid::Uuid;

use crate::api::sinpe::SinpeClient;

const DEFAULT_USER_ID: &str = "ad677daf-9a6a-446a-b6c2-ce61fa1bc07e";

/// Command-line SINPE móvil client
///
/// Runs an interactive prompt, or a single command when one is given after
/// the options (e.g. `sinpe-movil balance`).
#[derive(Debug, Parser)]
#[command(name = "sinpe-movil", version)]
pub struct Config {
    /// Base URL of the SINPE móvil backend
    #[arg(long, env = "SINPE_API_BASE_URL", default_value = SinpeClient::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Account the transfers are sent from
    #[arg(long, env = "SINPE_USER_ID", default_value = DEFAULT_USER_ID, value_parser = parse_user_id)]
    pub user_id: String,

    /// JSON address book
    #[arg(long, env = "SINPE_CONTACTS_FILE", default_value = "contacts.json")]
    pub contacts: PathBuf,

    /// Command to run instead of the interactive prompt
    #[arg(trailing_var_arg = true)]
    pub command: Vec<String>,
}

/// Account ids are UUIDs; reject anything else before it reaches a URL
fn parse_user_id(raw: &str) -> Result<String, String> {
    Uuid::parse_str(raw.trim())
        .map(|id| id.to_string())
        .map_err(|e| format!("user id must be a UUID: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["sinpe-movil"]).unwrap();
        assert_eq!(config.user_id, DEFAULT_USER_ID);
        assert_eq!(config.contacts, PathBuf::from("contacts.json"));
        assert!(config.command.is_empty());
    }

    #[test]
    fn test_trailing_command() {
        let config = Config::try_parse_from([
            "sinpe-movil",
            "--base-url",
            "http://localhost:3000",
            "send",
            "1",
            "₡2.000",
            "almuerzo",
        ])
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.command, vec!["send", "1", "₡2.000", "almuerzo"]);
    }

    #[test]
    fn test_user_id_must_be_uuid() {
        assert!(Config::try_parse_from(["sinpe-movil", "--user-id", "../admin"]).is_err());

        let config = Config::try_parse_from([
            "sinpe-movil",
            "--user-id",
            "AD677DAF-9A6A-446A-B6C2-CE61FA1BC07E",
        ])
        .unwrap();
        assert_eq!(config.user_id, DEFAULT_USER_ID);
    }
}
