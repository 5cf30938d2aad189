use sds_client::adapters::outbound::console::{ConsoleNoticeReporter, StderrProgressReporter};
use sds_client::adapters::outbound::filesystem::{read_upload_file, FileApiKeyStore};
use sds_client::adapters::outbound::network::{ApiError, ClientSettings, SdsApiClient};
use sds_client::application::dto::{LookupRequest, SdsResponse};
use sds_client::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use sds_client::application::use_cases::{
    RevisionInfoUseCase, SdsDetailsUseCase, SearchSdsUseCase, UploadSdsUseCase,
    DEFAULT_POLL_INTERVAL,
};
use sds_client::cli::{ApiKeyCommand, Args, Command, UploadArgs};
use sds_client::config::{discover_config, load_config_from_path, ConfigFile};
use sds_client::ports::outbound::{ApiKeyStore, NoticeReporter};
use sds_client::sds::domain::{ApiKey, UploadForm};
use sds_client::shared::error::{ExitCode, ValidationError};
use sds_client::shared::security::MAX_UPLOAD_BYTES;
use sds_client::shared::Result;
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            exit_code_for(&e)
        }
    };
    process::exit(code.as_i32());
}

/// `-v` raises the default level; RUST_LOG wins when set
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let Args {
        config: config_path,
        base_url,
        api_key,
        timeout,
        format,
        output,
        verbose: _,
        command,
    } = args;

    let command = match command {
        Command::ApiKey(action) => return manage_api_key(action),
        command => command,
    };

    let config = load_config(config_path.as_deref())?;
    let settings = ClientSettings {
        base_url: base_url
            .or_else(|| config.base_url.clone())
            .unwrap_or_else(|| ClientSettings::default().base_url),
        api_key: resolve_api_key(api_key, config.api_key.clone()),
        timeout: timeout
            .or(config.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(ClientSettings::default().timeout),
        upload_timeout: config
            .upload_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(ClientSettings::default().upload_timeout),
    };

    let notices: Arc<dyn NoticeReporter> = Arc::new(ConsoleNoticeReporter::new());
    let client = SdsApiClient::new(&settings, notices)?;
    let language = config.language_code.clone();

    let (response, code) = match command {
        Command::Search(search) => {
            let query = search.to_query(language.as_deref());
            let response = SearchSdsUseCase::new(client).execute(query).await?;
            (response, ExitCode::Success)
        }
        Command::Details(details) => {
            let request = LookupRequest::from_identifiers(
                details.lookup.sds_ids,
                details.lookup.pdf_md5s,
                details.language.or(language),
            )?;
            let response = SdsDetailsUseCase::new(client)
                .execute(request, details.fe)
                .await?;
            (response, ExitCode::Success)
        }
        Command::Revision(lookup) => {
            let request =
                LookupRequest::from_identifiers(lookup.sds_ids, lookup.pdf_md5s, None)?;
            let response = RevisionInfoUseCase::new(client).execute(request).await?;
            (response, ExitCode::Success)
        }
        Command::Upload(upload) => run_upload(client, upload, &config).await?,
        Command::ApiKey(action) => return manage_api_key(action),
    };

    let formatter = FormatterFactory::create(format.or(config.format).unwrap_or_default());
    let rendered = formatter.format(&response)?;
    PresenterFactory::create(PresenterType::from_output(output)).present(&rendered)?;

    Ok(code)
}

async fn run_upload(
    client: SdsApiClient,
    upload: UploadArgs,
    config: &ConfigFile,
) -> Result<(SdsResponse, ExitCode)> {
    let max_bytes = config.max_upload_bytes.unwrap_or(MAX_UPLOAD_BYTES);
    let file = read_upload_file(&upload.file, max_bytes)?;

    let mut form = UploadForm::new(max_bytes);
    form.select_file(file)?;
    form.sku = upload.sku;
    form.upc_ean = upload.upc_ean;
    form.product_code = upload.product_code;
    form.email = upload.email;
    form.private_import = upload.private_import;

    let poll_interval = upload
        .poll_interval_ms
        .or(config.poll_interval_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_POLL_INTERVAL);

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let use_case = UploadSdsUseCase::new(client, StderrProgressReporter::new())
        .with_poll_interval(poll_interval);
    let result = use_case.execute(&mut form, cancel).await;
    ctrl_c.abort();

    let outcome = result?;
    let code = if outcome.extraction_failed() {
        ExitCode::ExtractionFailed
    } else {
        ExitCode::Success
    };
    Ok((SdsResponse::Upload(outcome), code))
}

fn load_config(path: Option<&Path>) -> Result<ConfigFile> {
    let config = match path {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(Path::new("."))?,
    };
    Ok(config.unwrap_or_default())
}

/// Flag or `SDS_API_KEY`, then the config file, then the key store
fn resolve_api_key(flag: Option<String>, from_config: Option<String>) -> Option<ApiKey> {
    if let Some(key) = ApiKey::from_optional(flag).or_else(|| ApiKey::from_optional(from_config)) {
        return Some(key);
    }
    match FileApiKeyStore::locate().and_then(|store| store.load()) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(error = %e, "stored API key could not be read; continuing without one");
            None
        }
    }
}

fn manage_api_key(action: ApiKeyCommand) -> Result<ExitCode> {
    let store = FileApiKeyStore::locate()?;
    match action {
        ApiKeyCommand::Set { key } => {
            let key = ApiKey::new(key)?;
            store.save(&key)?;
            eprintln!("✅ API key {} saved to {}", key.masked(), store.path().display());
        }
        ApiKeyCommand::Clear => {
            store.clear()?;
            eprintln!("✅ API key cleared");
        }
        ApiKeyCommand::Show => match store.load()? {
            Some(key) => println!("{}", key.masked()),
            None => println!("No API key stored"),
        },
    }
    Ok(ExitCode::Success)
}

/// Prints the error chain. A server `detail` was already shown as a notice,
/// so it is not repeated.
fn report_error(e: &anyhow::Error) {
    let shown_as_notice = |err: &(dyn std::error::Error + 'static)| {
        err.downcast_ref::<ApiError>()
            .is_some_and(|api| api.notice().is_some())
    };

    eprintln!("\n❌ An error occurred:\n");
    let mut first = true;
    for err in e.chain().filter(|err| !shown_as_notice(*err)) {
        if first {
            eprintln!("{}", err);
            first = false;
        } else {
            eprintln!("\nCaused by: {}", err);
        }
    }
    if first {
        eprintln!("The SDS API rejected the request (see notice above)");
    }
    eprintln!();
}

fn exit_code_for(e: &anyhow::Error) -> ExitCode {
    if e.chain().any(|err| err.is::<ValidationError>()) {
        ExitCode::ValidationFailed
    } else {
        ExitCode::ApplicationError
    }
}
