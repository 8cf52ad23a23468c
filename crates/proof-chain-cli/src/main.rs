// crates/proof-chain-cli/src/main.rs
// ============================================================================
// Module: Proof Chain CLI Entry Point
// Description: Command dispatcher for bundle, certification, seal, receipt,
//              and parity workflows.
// Purpose: Run one proof-chain tool per invocation with fail-closed exit codes.
// Dependencies: clap, proof-chain-config, proof-chain-core,
//               proof-chain-registry-http, thiserror, time, tracing,
//               tracing-subscriber
// ============================================================================

//! ## Overview
//! Each subcommand loads `proof-chain.toml`, opens a [`FileArtifactStore`]
//! rooted at `--root`, runs exactly one core operation, and prints a one-line
//! result. Any integrity or freshness violation exits with status 1 and a
//! message naming the offending file, digest, or timestamp pair. Diagnostics
//! go to stderr through `tracing`, filtered by `PROOF_CHAIN_LOG`.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use proof_chain_cli::FileArtifactStore;
use proof_chain_cli::t;
use proof_chain_config::ProofChainConfig;
use proof_chain_core::BundleBuilder;
use proof_chain_core::Certifier;
use proof_chain_core::ChainVerifier;
use proof_chain_core::ParityChecker;
use proof_chain_core::ParityStatus;
use proof_chain_core::ReceiptId;
use proof_chain_core::ReceiptLedger;
use proof_chain_core::ReceiptRequest;
use proof_chain_core::RotationInputs;
use proof_chain_core::SealRotator;
use proof_chain_core::TenantId;
use proof_chain_core::Timestamp;
use proof_chain_core::write_json_document;
use proof_chain_registry_http::RestProofRegistry;
use proof_chain_registry_http::RestRegistryConfig;
use thiserror::Error;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PROOF_CHAIN_LOG";
/// Log filter used when `PROOF_CHAIN_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";
/// Upper bound for `--window`.
const MAX_WINDOW_SECONDS: u32 = 86_400;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "proof-chain", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Config file (defaults to `PROOF_CHAIN_CONFIG`, then ./proof-chain.toml).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Directory that artifact paths are relative to.
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    root: PathBuf,
    /// Fixed current time (RFC 3339) for reproducible runs.
    #[arg(long, value_name = "TIMESTAMP", global = true)]
    now: Option<String>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Proof bundle utilities.
    Bundle {
        /// Selected bundle subcommand.
        #[command(subcommand)]
        command: BundleCommand,
    },
    /// Verify a bundle and write its pre-certification.
    Precert(PrecertCommand),
    /// Cross-check bundle and pre-certification and write the meta-certification.
    Certify(CertifyCommand),
    /// Meta-seal utilities.
    Seal {
        /// Selected seal subcommand.
        #[command(subcommand)]
        command: SealCommand,
    },
    /// Change receipt ledger utilities.
    Receipt {
        /// Selected receipt subcommand.
        #[command(subcommand)]
        command: ReceiptCommand,
    },
    /// Cloud parity utilities.
    Parity {
        /// Selected parity subcommand.
        #[command(subcommand)]
        command: ParityCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Bundle subcommands.
#[derive(Subcommand, Debug)]
enum BundleCommand {
    /// Hash proof artifacts and write a bundle manifest.
    Build(BundleBuildCommand),
    /// Verify every member digest and the aggregate digest of a bundle.
    Verify(BundleVerifyCommand),
}

/// Seal subcommands.
#[derive(Subcommand, Debug)]
enum SealCommand {
    /// Write a new meta-seal over bundle, summary, and integrity report.
    Rotate(SealRotateCommand),
}

/// Receipt subcommands.
#[derive(Subcommand, Debug)]
enum ReceiptCommand {
    /// Append a change receipt to the ledger.
    Append(ReceiptAppendCommand),
    /// Check ledger ordering and digest.
    Validate(ReceiptValidateCommand),
}

/// Parity subcommands.
#[derive(Subcommand, Debug)]
enum ParityCommand {
    /// Compare local digests with the registry and write a parity report.
    Check(ParityCheckCommand),
    /// Upsert local digests into the registry.
    Push(ParityPushCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate the configuration.
    Validate,
}

/// Arguments for `bundle build`.
#[derive(Args, Debug)]
struct BundleBuildCommand {
    /// Proof artifacts to include (defaults to `bundle.proofs`).
    #[arg(value_name = "PROOF")]
    proofs: Vec<String>,
    /// Bundle output path (defaults to `bundle.path`).
    #[arg(long, value_name = "PATH")]
    out: Option<String>,
}

/// Arguments for `bundle verify`.
#[derive(Args, Debug)]
struct BundleVerifyCommand {
    /// Bundle path (defaults to `bundle.path`).
    #[arg(long, value_name = "PATH")]
    bundle: Option<String>,
}

/// Arguments for `precert`.
#[derive(Args, Debug)]
struct PrecertCommand {
    /// Bundle path (defaults to `bundle.path`).
    #[arg(long, value_name = "PATH")]
    bundle: Option<String>,
    /// Pre-certification output path (defaults to `bundle.pre_cert`).
    #[arg(long, value_name = "PATH")]
    out: Option<String>,
}

/// Arguments for `certify`.
#[derive(Args, Debug)]
struct CertifyCommand {
    /// Bundle path (defaults to `bundle.path`).
    #[arg(long, value_name = "PATH")]
    bundle: Option<String>,
    /// Pre-certification path (defaults to `bundle.pre_cert`).
    #[arg(long, value_name = "PATH")]
    pre_cert: Option<String>,
    /// Meta-certification output path (defaults to `bundle.meta_cert`).
    #[arg(long, value_name = "PATH")]
    out: Option<String>,
    /// Freshness window override in seconds.
    #[arg(
        long,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_SECONDS))
    )]
    window: Option<u32>,
}

/// Arguments for `seal rotate`.
#[derive(Args, Debug)]
struct SealRotateCommand {
    /// Bundle path (defaults to `bundle.path`).
    #[arg(long, value_name = "PATH")]
    bundle: Option<String>,
    /// Summary path (defaults to `rotation.summary`).
    #[arg(long, value_name = "PATH")]
    summary: Option<String>,
    /// Integrity report path (defaults to `rotation.integrity_report`).
    #[arg(long, value_name = "PATH")]
    integrity_report: Option<String>,
    /// Cadence label (defaults to `rotation.cadence`).
    #[arg(long, value_name = "LABEL")]
    cadence: Option<String>,
    /// Meta-seal output path (defaults to `rotation.out`).
    #[arg(long, value_name = "PATH")]
    out: Option<String>,
}

/// Arguments for `receipt append`.
#[derive(Args, Debug)]
struct ReceiptAppendCommand {
    /// Change category.
    #[arg(long, value_name = "TYPE")]
    change_type: String,
    /// Human-readable summary.
    #[arg(long, value_name = "TEXT")]
    summary: String,
    /// Digest of the associated diff or proof.
    #[arg(long, value_name = "SHA256")]
    diff_hash: String,
    /// Explicit receipt id (generated from the current time when absent).
    #[arg(long, value_name = "ID")]
    id: Option<String>,
    /// Ledger index path (defaults to `receipts.index`).
    #[arg(long, value_name = "PATH")]
    index: Option<String>,
}

/// Arguments for `receipt validate`.
#[derive(Args, Debug)]
struct ReceiptValidateCommand {
    /// Ledger index path (defaults to `receipts.index`).
    #[arg(long, value_name = "PATH")]
    index: Option<String>,
}

/// Arguments for `parity check`.
#[derive(Args, Debug)]
struct ParityCheckCommand {
    /// Tracked files (defaults to `parity.files`).
    #[arg(value_name = "FILE")]
    files: Vec<String>,
    /// Registry tenant (defaults to `parity.tenant_id`).
    #[arg(long, value_name = "TENANT")]
    tenant: Option<String>,
    /// Report output path (defaults to `parity.report`).
    #[arg(long, value_name = "PATH")]
    out: Option<String>,
}

/// Arguments for `parity push`.
#[derive(Args, Debug)]
struct ParityPushCommand {
    /// Files to publish (defaults to `parity.files`).
    #[arg(value_name = "FILE")]
    files: Vec<String>,
    /// Registry tenant (defaults to `parity.tenant_id`).
    #[arg(long, value_name = "TENANT")]
    tenant: Option<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    init_logging();
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run(cli: Cli) -> CliResult<ExitCode> {
    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        print_line(&t!("main.version", version = version))?;
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = cli.command else {
        let mut help = Cli::command();
        print_line(&help.render_help().to_string())?;
        return Ok(ExitCode::SUCCESS);
    };

    let config = ProofChainConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let ctx = Context {
        store: open_store(&cli.root)?,
        now: resolve_now(cli.now.as_deref())?,
        config,
    };
    tracing::debug!(
        target: "proof_chain.cli",
        root = %ctx.store.root().display(),
        now = %ctx.now,
        "command context ready"
    );
    match command {
        Commands::Bundle {
            command,
        } => match command {
            BundleCommand::Build(command) => command_bundle_build(&ctx, command),
            BundleCommand::Verify(command) => command_bundle_verify(&ctx, &command),
        },
        Commands::Precert(command) => command_precert(&ctx, &command),
        Commands::Certify(command) => command_certify(&ctx, &command),
        Commands::Seal {
            command: SealCommand::Rotate(command),
        } => command_seal_rotate(&ctx, command),
        Commands::Receipt {
            command,
        } => match command {
            ReceiptCommand::Append(command) => command_receipt_append(&ctx, command),
            ReceiptCommand::Validate(command) => command_receipt_validate(&ctx, &command),
        },
        Commands::Parity {
            command,
        } => match command {
            ParityCommand::Check(command) => command_parity_check(&ctx, command),
            ParityCommand::Push(command) => command_parity_push(&ctx, command),
        },
        Commands::Config {
            command: ConfigCommand::Validate,
        } => command_config_validate(&ctx.config),
    }
}

/// Shared state for one command run.
struct Context {
    /// Loaded configuration.
    config: ProofChainConfig,
    /// Artifact store rooted at `--root`.
    store: FileArtifactStore,
    /// Current time for every stamped document.
    now: Timestamp,
}

// ============================================================================
// SECTION: Bundle Commands
// ============================================================================

/// Executes `bundle build`.
fn command_bundle_build(ctx: &Context, command: BundleBuildCommand) -> CliResult<ExitCode> {
    let proofs =
        if command.proofs.is_empty() { ctx.config.bundle.proofs.clone() } else { command.proofs };
    if proofs.is_empty() {
        return Err(CliError::new(t!("bundle.build.empty")));
    }
    let out = command.out.unwrap_or_else(|| ctx.config.bundle.path.clone());
    let bundle = BundleBuilder::new()
        .build(&ctx.store, &proofs, ctx.now)
        .and_then(|bundle| write_json_document(&ctx.store, &out, &bundle).map(|()| bundle))
        .map_err(|err| CliError::new(t!("bundle.build.failed", error = err)))?;
    print_line(&t!(
        "bundle.build.ok",
        path = out,
        count = bundle.proofs.len(),
        sha256 = bundle.bundle_sha256
    ))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `bundle verify`.
fn command_bundle_verify(ctx: &Context, command: &BundleVerifyCommand) -> CliResult<ExitCode> {
    let path = command.bundle.as_deref().unwrap_or(&ctx.config.bundle.path);
    let verified = ChainVerifier::new()
        .verify_bundle(&ctx.store, path)
        .map_err(|err| CliError::new(t!("bundle.verify.failed", error = err)))?;
    print_line(&t!(
        "bundle.verify.ok",
        path = path,
        count = verified.proofs.len(),
        sha256 = verified.bundle_sha256
    ))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Certification Commands
// ============================================================================

/// Executes `precert`.
fn command_precert(ctx: &Context, command: &PrecertCommand) -> CliResult<ExitCode> {
    let bundle = command.bundle.as_deref().unwrap_or(&ctx.config.bundle.path);
    let out = command.out.as_deref().unwrap_or(&ctx.config.bundle.pre_cert);
    let pre_cert = Certifier::new(ctx.config.certifier_config())
        .pre_certify(&ctx.store, bundle, ctx.now)
        .and_then(|pre_cert| write_json_document(&ctx.store, out, &pre_cert).map(|()| pre_cert))
        .map_err(|err| CliError::new(t!("precert.failed", error = err)))?;
    print_line(&t!("precert.ok", path = out, seal = pre_cert.seal))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `certify`.
fn command_certify(ctx: &Context, command: &CertifyCommand) -> CliResult<ExitCode> {
    let bundle = command.bundle.as_deref().unwrap_or(&ctx.config.bundle.path);
    let pre_cert = command.pre_cert.as_deref().unwrap_or(&ctx.config.bundle.pre_cert);
    let out = command.out.as_deref().unwrap_or(&ctx.config.bundle.meta_cert);
    let mut config = ctx.config.certifier_config();
    if let Some(window) = command.window {
        config.window_seconds = window;
    }
    let meta_cert = Certifier::new(config)
        .certify(&ctx.store, bundle, pre_cert, ctx.now)
        .and_then(|meta| write_json_document(&ctx.store, out, &meta).map(|()| meta))
        .map_err(|err| CliError::new(t!("certify.failed", error = err)))?;
    print_line(&t!(
        "certify.ok",
        path = out,
        meta_hash = meta_cert.meta_hash,
        span = meta_cert.lineage.timestamp_window_seconds,
        window = meta_cert.lineage.window_seconds
    ))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Seal Commands
// ============================================================================

/// Executes `seal rotate`.
fn command_seal_rotate(ctx: &Context, command: SealRotateCommand) -> CliResult<ExitCode> {
    let rotation = &ctx.config.rotation;
    let inputs = RotationInputs {
        bundle: command.bundle.unwrap_or_else(|| ctx.config.bundle.path.clone()),
        summary: command.summary.unwrap_or_else(|| rotation.summary.clone()),
        integrity_report: command
            .integrity_report
            .unwrap_or_else(|| rotation.integrity_report.clone()),
        cadence: command.cadence.unwrap_or_else(|| rotation.cadence.clone()),
    };
    let out = command.out.unwrap_or_else(|| rotation.out.clone());
    let seal = SealRotator::new(ctx.config.rotation_config())
        .rotate_to(&ctx.store, &inputs, ctx.now, &out)
        .map_err(|err| CliError::new(t!("seal.rotate.failed", error = err)))?;
    print_line(&t!("seal.rotate.ok", path = out, meta_hash = seal.meta_hash))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Receipt Commands
// ============================================================================

/// Executes `receipt append`.
fn command_receipt_append(ctx: &Context, command: ReceiptAppendCommand) -> CliResult<ExitCode> {
    let index = command.index.unwrap_or_else(|| ctx.config.receipts.index.clone());
    let ledger = ReceiptLedger::new(index);
    let request = ReceiptRequest {
        change_type: command.change_type,
        summary: command.summary,
        diff_hash: command.diff_hash,
        receipt_id: command.id.map(ReceiptId::new),
    };
    let receipt = ledger
        .append(&ctx.store, request, ctx.now)
        .map_err(|err| CliError::new(t!("receipt.append.failed", error = err)))?;
    print_line(&t!("receipt.append.ok", id = receipt.receipt_id, path = ledger.index_path()))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `receipt validate`.
fn command_receipt_validate(
    ctx: &Context,
    command: &ReceiptValidateCommand,
) -> CliResult<ExitCode> {
    let index = command.index.as_deref().unwrap_or(&ctx.config.receipts.index);
    let validation = ReceiptLedger::new(index)
        .validate(&ctx.store)
        .map_err(|err| CliError::new(t!("receipt.validate.failed", error = err)))?;
    let last = validation
        .last_receipt_id
        .map_or_else(|| t!("receipt.validate.none"), |id| id.to_string());
    print_line(&t!("receipt.validate.ok", path = index, count = validation.receipts, last = last))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Parity Commands
// ============================================================================

/// Executes `parity check`; the report is written even when parity fails.
fn command_parity_check(ctx: &Context, command: ParityCheckCommand) -> CliResult<ExitCode> {
    let tenant = resolve_tenant(&ctx.config, command.tenant)?;
    let files = resolve_files(&ctx.config, command.files)?;
    let out = command.out.unwrap_or_else(|| ctx.config.parity.report.clone());
    let registry = open_registry(&ctx.config)?;
    let report = ParityChecker::new(tenant)
        .check(&ctx.store, &registry, &files, ctx.now)
        .and_then(|report| write_json_document(&ctx.store, &out, &report).map(|()| report))
        .map_err(|err| CliError::new(t!("parity.check.failed", error = err)))?;

    for entry in report.results.iter().filter(|entry| entry.status != ParityStatus::Ok) {
        print_line(&t!("parity.entry", status = entry.status, path = entry.path))?;
    }
    let counters = &report.counters;
    print_line(&t!(
        "parity.check.summary",
        path = out,
        trust_index = format!("{:.2}", report.trust_index),
        ok = counters.ok,
        mismatch = counters.mismatch,
        missing_sha = counters.missing_sha,
        not_found = counters.not_found,
        errors = counters.errors
    ))?;
    if report.passed {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::new(t!("parity.check.not_passed")))
    }
}

/// Executes `parity push`.
fn command_parity_push(ctx: &Context, command: ParityPushCommand) -> CliResult<ExitCode> {
    let tenant = resolve_tenant(&ctx.config, command.tenant)?;
    let files = resolve_files(&ctx.config, command.files)?;
    let registry = open_registry(&ctx.config)?;
    let published = ParityChecker::new(tenant)
        .publish(&ctx.store, &registry, &files, ctx.now)
        .map_err(|err| CliError::new(t!("parity.push.failed", error = err)))?;
    for path in &published.uploaded {
        print_line(&t!("parity.push.uploaded", path = path))?;
    }
    for path in &published.skipped {
        print_line(&t!("parity.push.skipped", path = path))?;
    }
    print_line(&t!(
        "parity.push.ok",
        uploaded = published.uploaded.len(),
        skipped = published.skipped.len()
    ))?;
    Ok(ExitCode::SUCCESS)
}

/// Resolves the tenant from the flag or the config.
fn resolve_tenant(config: &ProofChainConfig, flag: Option<String>) -> CliResult<TenantId> {
    match flag {
        Some(tenant) if !tenant.trim().is_empty() => Ok(TenantId::new(tenant)),
        Some(_) => Err(CliError::new(t!("parity.tenant_missing"))),
        None => config.parity.tenant().map_err(|_| CliError::new(t!("parity.tenant_missing"))),
    }
}

/// Resolves tracked files from arguments or the config.
fn resolve_files(config: &ProofChainConfig, files: Vec<String>) -> CliResult<Vec<String>> {
    let files = if files.is_empty() { config.parity.files.clone() } else { files };
    if files.is_empty() {
        return Err(CliError::new(t!("parity.files_empty")));
    }
    Ok(files)
}

/// Opens the REST registry described by `[registry]`.
fn open_registry(config: &ProofChainConfig) -> CliResult<RestProofRegistry> {
    let registry =
        config.registry.as_ref().ok_or_else(|| CliError::new(t!("parity.registry_missing")))?;
    let rest = RestRegistryConfig {
        table: registry.table.clone(),
        api_key: registry.api_key(),
        timeout_ms: registry.timeout_ms,
        allow_http: registry.allow_http,
        ..RestRegistryConfig::new(registry.url.clone())
    };
    RestProofRegistry::new(rest)
        .map_err(|err| CliError::new(t!("parity.registry_failed", error = err)))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes `config validate`.
fn command_config_validate(config: &ProofChainConfig) -> CliResult<ExitCode> {
    let source = config
        .source
        .as_ref()
        .map_or_else(|| t!("config.source.defaults"), |path| path.display().to_string());
    print_line(&t!("config.validate.ok", source = source))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Setup Helpers
// ============================================================================

/// Installs the stderr log subscriber.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Opens the artifact store at `root`.
fn open_store(root: &Path) -> CliResult<FileArtifactStore> {
    FileArtifactStore::new(root).map_err(|err| {
        CliError::new(t!("store.root_invalid", path = root.display(), error = err))
    })
}

/// Resolves the current time from `--now` or the system clock.
fn resolve_now(now: Option<&str>) -> CliResult<Timestamp> {
    match now {
        Some(value) => Timestamp::parse(value)
            .map_err(|err| CliError::new(t!("time.now_invalid", value = value, error = err))),
        None => Ok(Timestamp::from_datetime(OffsetDateTime::now_utc())),
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stdout, mapping failures into [`CliError`].
fn print_line(message: &str) -> CliResult<()> {
    write_stdout_line(message).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
