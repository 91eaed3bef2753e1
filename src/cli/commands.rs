//! CLI command implementations
//!
//! Configuration is resolved once from flags and environment, then
//! injected. Long-running commands stop on Ctrl-C.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::{ContactsApi, DeleteResponse};
use crate::functions::{
    AppwriteProvider, ClientProvider, ContactsFunction, FunctionConfig, FunctionHost,
    FunctionRequest, Invoker, StaticProvider,
};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{self, log_event, Event};
use crate::store::{
    AppwriteClient, AppwriteConfig, ContactStore, DocumentClient, InMemoryDocumentClient,
};

use super::args::{Cli, Command, FunctionArgs, ListenArgs, StoreArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_json};

/// Env file loaded before parsing, overridable through `DOTENV_PATH`
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Load the env file, parse arguments and run the command
pub fn run() -> CliResult<()> {
    load_env_file()?;
    let cli = Cli::parse_args();
    observability::init(cli.log_format);
    log_event(Event::BootStart, "crm-contacts starting");
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { listen, store } => serve(&listen, &store),
        Command::Function {
            listen,
            function: args,
        } => function(&listen, &args),
        Command::Invoke {
            cors_origin,
            function: args,
        } => invoke(cors_origin, &args),
        Command::List { store } => list(&store),
        Command::Delete { id, all, store } => delete(id.filter(|_| !all), &store),
    }
}

fn load_env_file() -> CliResult<()> {
    let path = std::env::var("DOTENV_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_ENV_FILE));

    match dotenvy::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(CliError::config_error(format!(
            "Failed to load {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Serve the contacts API until interrupted
pub fn serve(listen: &ListenArgs, store: &StoreArgs) -> CliResult<()> {
    let api = ContactsApi::new(contact_store(store)?);
    let config = HttpServerConfig {
        host: listen.host.clone(),
        port: listen.port,
        cors_origin: listen.cors_origin.clone(),
    };
    let server = HttpServer::new(config, api)?;
    log_event(Event::ConfigLoaded, "HTTP server configured");

    block_on(async move {
        let shutdown = shutdown_on_ctrl_c();
        server
            .start(shutdown)
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Serve the function over local HTTP until interrupted
pub fn function(listen: &ListenArgs, args: &FunctionArgs) -> CliResult<()> {
    let invoker = invoker(listen.cors_origin.clone(), args)?;
    let host = FunctionHost::new(listen.socket_addr(), invoker);
    log_event(Event::ConfigLoaded, "function host configured");

    block_on(async move {
        let shutdown = shutdown_on_ctrl_c();
        host.start(shutdown)
            .await
            .map_err(|e| CliError::boot_failed(format!("Function host failed: {}", e)))
    })
}

/// Run a single invocation from stdin and print its result
pub fn invoke(cors_origin: String, args: &FunctionArgs) -> CliResult<()> {
    let request: FunctionRequest = read_request()?;
    let invoker = invoker(cors_origin, args)?;

    let result = block_on(async move { Ok(invoker.invoke(request.normalized()).await) })?;
    write_json(&result)
}

/// Print every contact
pub fn list(store: &StoreArgs) -> CliResult<()> {
    let api = ContactsApi::new(contact_store(store)?);
    let contacts = block_on(async move { Ok(api.list().await?) })?;

    log_event(
        Event::CommandComplete,
        &format!("listed {} contacts", contacts.len()),
    );
    write_json(&contacts)
}

/// Delete one contact, or every contact when `id` is `None`
pub fn delete(id: Option<String>, store: &StoreArgs) -> CliResult<()> {
    let api = ContactsApi::new(contact_store(store)?);
    let response: DeleteResponse = block_on(async move { Ok(api.delete(id.as_deref()).await?) })?;

    log_event(Event::CommandComplete, "delete finished");
    write_json(&response)
}

// ==================
// Helpers
// ==================

fn block_on<F, T>(future: F) -> CliResult<T>
where
    F: Future<Output = CliResult<T>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(future)
}

/// Token cancelled on the first Ctrl-C. Must be called inside a runtime.
fn shutdown_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log_event(Event::ShutdownStart, "interrupt received");
                trigger.cancel();
            }
            Err(e) => tracing::error!("failed to listen for Ctrl-C: {}", e),
        }
    });
    token
}

fn contact_store(args: &StoreArgs) -> CliResult<ContactStore> {
    Ok(ContactStore::new(
        document_client(args)?,
        args.collection.store_config(),
    ))
}

/// The hosted client, or the in-memory one with `--in-memory`
pub fn document_client(args: &StoreArgs) -> CliResult<Arc<dyn DocumentClient>> {
    if args.in_memory {
        tracing::warn!("using the in-memory store; contacts are lost on exit");
        return Ok(Arc::new(InMemoryDocumentClient::new()));
    }

    let config = AppwriteConfig {
        endpoint: required(&args.endpoint, "endpoint", "APPWRITE_ENDPOINT")?,
        project_id: required(&args.project_id, "project-id", "APPWRITE_PROJECT_ID")?,
        api_key: required(&args.api_key, "api-key", "APPWRITE_API_KEY")?,
    };
    Ok(Arc::new(AppwriteClient::new(&config)?))
}

fn invoker(cors_origin: String, args: &FunctionArgs) -> CliResult<Invoker> {
    let provider: Arc<dyn ClientProvider> = if args.in_memory {
        tracing::warn!("using the in-memory store; contacts are lost on exit");
        Arc::new(StaticProvider::new(Arc::new(InMemoryDocumentClient::new())))
    } else {
        Arc::new(AppwriteProvider::new(
            required(
                &args.function_endpoint,
                "function-endpoint",
                "APPWRITE_FUNCTION_API_ENDPOINT",
            )?,
            required(
                &args.function_project_id,
                "function-project-id",
                "APPWRITE_FUNCTION_PROJECT_ID",
            )?,
        ))
    };

    let config = FunctionConfig {
        cors_origin,
        store: args.collection.store_config(),
    };
    Ok(Invoker::new(ContactsFunction::new(config, provider)))
}

fn required(value: &Option<String>, flag: &str, env: &str) -> CliResult<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CliError::missing(flag, env))
}
