//! CLI argument definitions using clap
//!
//! Commands:
//! - crm-contacts serve
//! - crm-contacts function
//! - crm-contacts invoke < request.json
//! - crm-contacts list
//! - crm-contacts delete (--id <id> | --all)
//!
//! Every flag falls back to an environment variable; `.env` (or the file
//! named by `DOTENV_PATH`) is loaded before parsing.

use clap::{Args, Parser, Subcommand};

use crate::api::cors::DEFAULT_ORIGIN;
use crate::observability::LogFormat;
use crate::store::{ContactStoreConfig, DEFAULT_COLLECTION_ID, DEFAULT_DATABASE_ID};

/// Contacts backend over a hosted document database
#[derive(Parser, Debug)]
#[command(name = "crm-contacts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log line format: pretty or json
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the contacts API over HTTP
    Serve {
        #[command(flatten)]
        listen: ListenArgs,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Serve the serverless function over local HTTP
    Function {
        #[command(flatten)]
        listen: ListenArgs,

        #[command(flatten)]
        function: FunctionArgs,
    },

    /// Run one function invocation read as JSON from stdin
    Invoke {
        /// Value of Access-Control-Allow-Origin
        #[arg(long, env = "CORS_ORIGIN", default_value = DEFAULT_ORIGIN)]
        cors_origin: String,

        #[command(flatten)]
        function: FunctionArgs,
    },

    /// Print every contact as JSON
    List {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Delete one contact, or all of them
    Delete {
        /// Identifier of the contact to delete
        #[arg(long, conflicts_with = "all", required_unless_present = "all")]
        id: Option<String>,

        /// Delete every contact in the collection
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        store: StoreArgs,
    },
}

/// Listen address and CORS origin
#[derive(Args, Debug, Clone)]
pub struct ListenArgs {
    #[arg(long, env = "CONTACTS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "CONTACTS_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Value of Access-Control-Allow-Origin
    #[arg(long, env = "CORS_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub cors_origin: String,
}

impl ListenArgs {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which collection to use
#[derive(Args, Debug, Clone)]
pub struct CollectionArgs {
    #[arg(long, env = "APPWRITE_DATABASE_ID", default_value = DEFAULT_DATABASE_ID)]
    pub database_id: String,

    #[arg(long, env = "APPWRITE_COLLECTION_ID", default_value = DEFAULT_COLLECTION_ID)]
    pub collection_id: String,

    /// Page cap sent with list calls
    #[arg(long, env = "CONTACTS_LIST_LIMIT")]
    pub list_limit: Option<u32>,
}

impl CollectionArgs {
    pub fn store_config(&self) -> ContactStoreConfig {
        ContactStoreConfig {
            database_id: self.database_id.clone(),
            collection_id: self.collection_id.clone(),
            list_limit: self.list_limit,
        }
    }
}

/// Document database connection
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    #[arg(long, env = "APPWRITE_ENDPOINT")]
    pub endpoint: Option<String>,

    #[arg(long, env = "APPWRITE_PROJECT_ID")]
    pub project_id: Option<String>,

    #[arg(long, env = "APPWRITE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Use a process-local store instead of the hosted service
    #[arg(long)]
    pub in_memory: bool,

    #[command(flatten)]
    pub collection: CollectionArgs,
}

/// Function runtime settings; the API key arrives per invocation
#[derive(Args, Debug, Clone)]
pub struct FunctionArgs {
    #[arg(long, env = "APPWRITE_FUNCTION_API_ENDPOINT")]
    pub function_endpoint: Option<String>,

    #[arg(long, env = "APPWRITE_FUNCTION_PROJECT_ID")]
    pub function_project_id: Option<String>,

    /// Use a process-local store instead of the hosted service
    #[arg(long)]
    pub in_memory: bool,

    #[command(flatten)]
    pub collection: CollectionArgs,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_delete_requires_id_or_all() {
        assert!(Cli::try_parse_from(["crm-contacts", "delete", "--in-memory"]).is_err());
        assert!(
            Cli::try_parse_from(["crm-contacts", "delete", "--id", "a", "--all"]).is_err()
        );

        let cli = Cli::try_parse_from(["crm-contacts", "delete", "--id", "a"]).unwrap();
        match cli.command {
            Command::Delete { id, all, .. } => {
                assert_eq!(id.as_deref(), Some("a"));
                assert!(!all);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_collection_flags() {
        let cli = Cli::try_parse_from([
            "crm-contacts",
            "list",
            "--in-memory",
            "--collection-id",
            "people",
            "--list-limit",
            "25",
        ])
        .unwrap();
        match cli.command {
            Command::List { store } => {
                assert!(store.in_memory);
                let config = store.collection.store_config();
                assert_eq!(config.collection_id, "people");
                assert_eq!(config.list_limit, Some(25));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
