mod terminal;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::collections::BTreeSet;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use resonant_client::components::account_card::{DELETE_CONFIRMATION, alias_edit, render_account_cards};
use resonant_client::components::add_account_wizard::{
    AddAccountWizard, CLOUDFORMATION_TEMPLATE, TEMPLATE_FILE_NAME, WizardError,
};
use resonant_client::components::non_compliant_card::render_non_compliant_card;
use resonant_client::components::policy_form::{PolicyForm, PolicyFormError, parse_severity};
use resonant_client::components::policy_list::{render_policy_detail, render_policy_stats};
use resonant_client::components::region_selector::RegionSelector;
use resonant_client::components::resources_table::{render_resource_detail, render_resources_table};
use resonant_client::components::scan_status_card::{render_poll_state, render_scan_status_card};
use resonant_client::components::table::render_table;
use resonant_client::components::violations_table::{render_violation_detail, render_violations_table};
use resonant_client::config::ConfigError;
use resonant_client::net::types::{AccountStatus, ResourceStats, ScanJob, ScanStatus, Severity, ViolationStatus};
use resonant_client::pages::login::{AuthFormError, LoginForm};
use resonant_client::pages::register::RegisterForm;
use resonant_client::pages::{
    aws_account_detail, aws_account_settings, aws_accounts, dashboard, login, register, settings, tag_policies,
};
use resonant_client::poll::scan_status::PollState;
use resonant_client::query::hooks;
use resonant_client::state::router::Route;
use resonant_client::state::theme::{Theme, detect_system_theme};
use resonant_client::util::storage::StorageError;
use resonant_client::util::validation::ValidationError;
use resonant_client::{ApiError, AppContext, ClientConfig, ContextError};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::terminal::{Output, TerminalNotifier, print_json};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("state file: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthFormError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Policy(#[from] PolicyFormError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} (pass --yes to confirm)")]
    NotConfirmed(&'static str),
    #[error("{0}")]
    NothingToSave(&'static str),
    #[error("scan polling stopped before the job finished: {0}")]
    PollStopped(String),
    #[error("scan {job_id} failed")]
    ScanFailed { job_id: String },
}

impl CliError {
    /// True when the backend rejected the stored session.
    fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Api(ApiError::Unauthorized)
                | Self::Context(ContextError::Api(ApiError::Unauthorized))
                | Self::Auth(AuthFormError::Api(ApiError::Unauthorized))
                | Self::Wizard(WizardError::Api(ApiError::Unauthorized))
                | Self::Policy(PolicyFormError::Api(ApiError::Unauthorized))
        )
    }
}

#[derive(Parser, Debug)]
#[command(name = "resonant", about = "Resonant AWS tag compliance CLI")]
struct Cli {
    /// Backend base URL, e.g. `https://resonant.example.com/api`.
    #[arg(long, env = "RESONANT_API_URL", global = true)]
    api_url: Option<String>,

    /// Directory holding the session and theme state file.
    #[arg(long, env = "RESONANT_STATE_DIR", global = true)]
    state_dir: Option<PathBuf>,

    /// Print raw JSON instead of rendered text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Never color badges, even on a terminal.
    #[arg(long, global = true, default_value_t = false)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login(LoginArgs),
    Register(RegisterArgs),
    Logout,
    Whoami {
        /// Refetch the profile from the backend.
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
    /// Render the page at a route path, e.g. `/aws-accounts/acct-1`.
    Open {
        path: String,
    },
    Dashboard {
        /// Re-render at the stats refresh interval until interrupted.
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
    Accounts(AccountsCommand),
    Scans(ScansCommand),
    Violations(ViolationsCommand),
    Resources(ResourcesCommand),
    Policies(PoliciesCommand),
    Settings(SettingsCommand),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "RESONANT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long, env = "RESONANT_PASSWORD", hide_env_values = true)]
    password: String,

    /// Defaults to `--password`.
    #[arg(long)]
    confirm_password: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ThemeAction {
    Toggle,
    Light,
    Dark,
}

#[derive(Args, Debug)]
struct AccountsCommand {
    #[command(subcommand)]
    command: AccountsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AccountsSubcommand {
    List {
        #[arg(long, value_enum)]
        status: Option<AccountStatusArg>,
    },
    Show {
        id: String,
    },
    /// Generate an external id and print the role deployment step.
    ExternalId,
    /// Write the CloudFormation template for the cross-account role.
    Template {
        #[arg(long, help = "Output file path; stdout when omitted")]
        output: Option<PathBuf>,
    },
    Add(AddAccountArgs),
    Test {
        id: String,
    },
    Rename {
        id: String,
        alias: String,
    },
    Delete {
        id: String,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    Regions(RegionsCommand),
}

#[derive(Args, Debug)]
struct AddAccountArgs {
    #[arg(long)]
    alias: String,

    #[arg(long)]
    role_arn: String,

    /// Id from `accounts external-id`, used when deploying the role.
    #[arg(long, env = "RESONANT_EXTERNAL_ID")]
    external_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AccountStatusArg {
    Active,
    Invalid,
    Expired,
    Testing,
}

impl From<AccountStatusArg> for AccountStatus {
    fn from(value: AccountStatusArg) -> Self {
        match value {
            AccountStatusArg::Active => Self::Active,
            AccountStatusArg::Invalid => Self::Invalid,
            AccountStatusArg::Expired => Self::Expired,
            AccountStatusArg::Testing => Self::Testing,
        }
    }
}

#[derive(Args, Debug)]
struct RegionsCommand {
    #[command(subcommand)]
    command: RegionsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RegionsSubcommand {
    List {
        account_id: String,
    },
    /// Enable exactly the given regions.
    Set {
        account_id: String,
        #[arg(required = true, num_args = 1..)]
        regions: Vec<String>,
    },
    SelectAll {
        account_id: String,
    },
    Rediscover {
        account_id: String,
    },
}

#[derive(Args, Debug)]
struct ScansCommand {
    #[command(subcommand)]
    command: ScansSubcommand,
}

#[derive(Subcommand, Debug)]
enum ScansSubcommand {
    Trigger {
        account_id: String,
        /// Poll until the scan finishes.
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
    Status {
        job_id: String,
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
    List {
        #[arg(long)]
        account: Option<String>,
    },
    Latest {
        account_id: String,
    },
}

#[derive(Args, Debug)]
struct ViolationsCommand {
    #[command(subcommand)]
    command: ViolationsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ViolationsSubcommand {
    List {
        #[arg(long, value_enum)]
        status: Option<ViolationStatusArg>,
    },
    Show {
        id: String,
    },
    Ignore {
        id: String,
    },
    Reopen {
        id: String,
    },
    Stats,
    ByAccount {
        account_id: String,
    },
    ByResource {
        resource_id: String,
    },
    ByPolicy {
        policy_id: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ViolationStatusArg {
    Open,
    Resolved,
    Ignored,
}

impl From<ViolationStatusArg> for ViolationStatus {
    fn from(value: ViolationStatusArg) -> Self {
        match value {
            ViolationStatusArg::Open => Self::Open,
            ViolationStatusArg::Resolved => Self::Resolved,
            ViolationStatusArg::Ignored => Self::Ignored,
        }
    }
}

#[derive(Args, Debug)]
struct ResourcesCommand {
    #[command(subcommand)]
    command: ResourcesSubcommand,
}

#[derive(Subcommand, Debug)]
enum ResourcesSubcommand {
    List {
        #[arg(long = "type")]
        resource_type: Option<String>,
    },
    Show {
        id: String,
    },
    ByAccount {
        account_id: String,
    },
    Stats,
}

#[derive(Args, Debug)]
struct PoliciesCommand {
    #[command(subcommand)]
    command: PoliciesSubcommand,
}

#[derive(Subcommand, Debug)]
enum PoliciesSubcommand {
    List {
        #[arg(long)]
        enabled: Option<bool>,
    },
    Show {
        id: String,
    },
    Create(PolicyArgs),
    Update {
        id: String,
        #[command(flatten)]
        fields: PolicyArgs,
    },
    Enable {
        id: String,
    },
    Disable {
        id: String,
    },
    Delete {
        id: String,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    Stats,
}

#[derive(Args, Debug, Default)]
struct PolicyArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long, value_parser = severity_arg)]
    severity: Option<Severity>,

    /// Resource type such as `ec2:instance`; repeat for several.
    #[arg(long = "resource-type")]
    resource_types: Vec<String>,

    /// `key`, `key=*` or `key=v1|v2`; repeat for several.
    #[arg(long = "tag")]
    tags: Vec<String>,

    #[arg(long)]
    enabled: Option<bool>,
}

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: Option<SettingsSubcommand>,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    Enable { resource_type: String },
    Disable { resource_type: String },
}

fn severity_arg(raw: &str) -> Result<Severity, String> {
    parse_severity(raw).ok_or_else(|| {
        let known: Vec<&str> = Severity::ALL.iter().map(|s| s.as_str()).collect();
        format!("unknown severity '{raw}' (expected one of {})", known.join(", "))
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            if err.is_unauthorized() {
                eprintln!("hint: run `resonant login` to start a new session");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = open_context(&cli)?;
    let color = (!cli.no_color && std::io::stdout().is_terminal()).then(|| ctx.theme.theme());
    let out = &Output::new(cli.json, color);
    match cli.command {
        Command::Login(args) => run_login(&ctx, args, out).await,
        Command::Register(args) => run_register(&ctx, args, out).await,
        Command::Logout => {
            hooks::use_logout(&ctx)?;
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami { refresh } => run_whoami(&ctx, refresh, out).await,
        Command::Theme { action } => run_theme(&ctx, action),
        Command::Open { path } => run_open(&ctx, &path, out).await,
        Command::Dashboard { watch } => run_dashboard(&ctx, watch, out).await,
        Command::Accounts(command) => run_accounts(&ctx, command.command, out).await,
        Command::Scans(command) => run_scans(&ctx, command.command, out).await,
        Command::Violations(command) => run_violations(&ctx, command.command, out).await,
        Command::Resources(command) => run_resources(&ctx, command.command, out).await,
        Command::Policies(command) => run_policies(&ctx, command.command, out).await,
        Command::Settings(command) => run_settings(&ctx, command.command, out).await,
    }
}

fn open_context(cli: &Cli) -> Result<AppContext, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url.as_deref() {
        config = config.with_api_url(api_url)?;
    }
    if let Some(state_dir) = cli.state_dir.clone() {
        config = config.with_state_dir(state_dir);
    }
    let system_theme = detect_system_theme(
        std::env::var("RESONANT_THEME").ok().as_deref(),
        std::env::var("COLORFGBG").ok().as_deref(),
    );
    let ctx = AppContext::open(config, Arc::new(TerminalNotifier), system_theme)?;
    ctx.auth.validate()?;
    Ok(ctx)
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

// =============================================================================
// AUTH + LOCAL STATE
// =============================================================================

async fn run_login(ctx: &AppContext, args: LoginArgs, out: &Output) -> Result<(), CliError> {
    let response = LoginForm::new(args.email, args.password).submit(ctx).await?;
    if out.json {
        return print_json(&response.user);
    }
    println!("Signed in as {} <{}>", response.user.name, response.user.email);
    Ok(())
}

async fn run_register(ctx: &AppContext, args: RegisterArgs, out: &Output) -> Result<(), CliError> {
    let confirm_password = args.confirm_password.unwrap_or_else(|| args.password.clone());
    let form = RegisterForm { name: args.name, email: args.email, password: args.password, confirm_password };
    let response = form.submit(ctx).await?;
    if out.json {
        return print_json(&response.user);
    }
    println!("Account created. Signed in as {} <{}>", response.user.name, response.user.email);
    Ok(())
}

async fn run_whoami(ctx: &AppContext, refresh: bool, out: &Output) -> Result<(), CliError> {
    let user = if refresh { Some(hooks::use_current_user(ctx).await?) } else { ctx.auth.user() };
    let Some(user) = user else {
        println!("Not signed in.");
        return Ok(());
    };
    if out.json {
        return print_json(&user);
    }
    println!("{} <{}>", user.name, user.email);
    Ok(())
}

fn run_theme(ctx: &AppContext, action: Option<ThemeAction>) -> Result<(), CliError> {
    let theme = match action {
        None => ctx.theme.theme(),
        Some(ThemeAction::Toggle) => ctx.theme.toggle()?,
        Some(ThemeAction::Light) => {
            ctx.theme.set(Theme::Light)?;
            Theme::Light
        }
        Some(ThemeAction::Dark) => {
            ctx.theme.set(Theme::Dark)?;
            Theme::Dark
        }
    };
    println!("{}", theme.as_str());
    Ok(())
}

/// Resolve `path` through the route guard and render whatever page it
/// lands on.
async fn run_open(ctx: &AppContext, path: &str, out: &Output) -> Result<(), CliError> {
    let requested = Route::parse(path);
    let route = ctx.router.navigate_guarded(requested.clone(), &ctx.auth.snapshot());
    if route != requested {
        info!(requested = %requested, resolved = %route, "open: redirected");
        eprintln!("Redirected to {route}");
    }
    let page = match route {
        Route::Login => login::render(),
        Route::Register => register::render(),
        Route::Dashboard => dashboard::render(ctx).await?,
        Route::AwsAccounts => aws_accounts::render(ctx).await?,
        Route::AwsAccountDetail(id) => aws_account_detail::render(ctx, &id).await?,
        Route::AwsAccountSettings(id) => aws_account_settings::render(ctx, &id).await?,
        Route::TagPolicies => tag_policies::render(ctx, None).await?,
        Route::Settings => settings::render(ctx).await?,
    };
    out.text(&page);
    Ok(())
}

async fn run_dashboard(ctx: &AppContext, watch: bool, out: &Output) -> Result<(), CliError> {
    let every = ctx.config.stats_refresh_interval;
    loop {
        out.text(&dashboard::render(ctx).await?);
        if !watch {
            return Ok(());
        }
        tokio::time::sleep(every).await;
        println!();
    }
}

// =============================================================================
// ACCOUNTS
// =============================================================================

async fn run_accounts(ctx: &AppContext, command: AccountsSubcommand, out: &Output) -> Result<(), CliError> {
    match command {
        AccountsSubcommand::List { status } => {
            let filters = status.map(|s| {
                let mut filters = Map::new();
                filters.insert("status".to_owned(), Value::from(AccountStatus::from(s).as_str()));
                filters
            });
            let accounts = hooks::use_aws_accounts_filtered(ctx, filters.as_ref()).await?;
            if out.json {
                return print_json(&accounts);
            }
            if status.is_none() {
                out.text(&aws_accounts::render(ctx).await?);
            } else {
                out.text(&render_account_cards(&accounts, now()));
            }
        }
        AccountsSubcommand::Show { id } => {
            if out.json {
                return print_json(&hooks::use_aws_account(ctx, &id).await?);
            }
            out.text(&aws_account_detail::render(ctx, &id).await?);
        }
        AccountsSubcommand::ExternalId => {
            let mut wizard = AddAccountWizard::new();
            wizard.start(ctx).await?;
            if out.json {
                return print_json(&serde_json::json!({ "externalId": wizard.external_id() }));
            }
            out.text(&wizard.render());
            println!("\nThen run `resonant accounts add --alias <alias> --role-arn <arn> --external-id <id>`.");
        }
        AccountsSubcommand::Template { output } => match output {
            Some(path) => {
                std::fs::write(&path, CLOUDFORMATION_TEMPLATE)?;
                println!("Wrote {TEMPLATE_FILE_NAME} template to {}", path.display());
            }
            None => out.text(CLOUDFORMATION_TEMPLATE),
        },
        AccountsSubcommand::Add(args) => {
            let mut wizard = AddAccountWizard::resume(args.external_id);
            wizard.proceed()?;
            wizard.account_alias = args.alias;
            wizard.role_arn = args.role_arn;
            let account = wizard.submit(ctx).await?;
            if out.json {
                return print_json(&account);
            }
            out.text(&render_account_cards(std::slice::from_ref(&account), now()));
        }
        AccountsSubcommand::Test { id } => {
            let result = hooks::test_connection(ctx, &id).await?;
            if out.json {
                return print_json(&result);
            }
        }
        AccountsSubcommand::Rename { id, alias } => {
            let Some(alias) = alias_edit(&alias) else {
                return Err(CliError::NothingToSave("alias cannot be blank"));
            };
            let account = hooks::update_alias(ctx, &id, &alias).await?;
            if out.json {
                return print_json(&account);
            }
        }
        AccountsSubcommand::Delete { id, yes } => {
            if !yes {
                return Err(CliError::NotConfirmed(DELETE_CONFIRMATION));
            }
            hooks::delete_account(ctx, &id).await?;
        }
        AccountsSubcommand::Regions(command) => run_regions(ctx, command.command, out).await?,
    }
    Ok(())
}

async fn run_regions(ctx: &AppContext, command: RegionsSubcommand, out: &Output) -> Result<(), CliError> {
    match command {
        RegionsSubcommand::List { account_id } => {
            if out.json {
                return print_json(&hooks::use_account_regions(ctx, &account_id).await?);
            }
            out.text(&aws_account_settings::render(ctx, &account_id).await?);
        }
        RegionsSubcommand::Set { account_id, regions } => {
            let mut selector = aws_account_settings::load_selector(ctx, &account_id).await?;
            selector.deselect_all();
            for code in regions.iter().collect::<BTreeSet<_>>() {
                selector.toggle(code);
                if !selector.is_selected(code) {
                    warn!(region = %code, "regions: unknown region code ignored");
                }
            }
            save_regions(ctx, &account_id, selector, out).await?;
        }
        RegionsSubcommand::SelectAll { account_id } => {
            let mut selector = aws_account_settings::load_selector(ctx, &account_id).await?;
            selector.select_all();
            save_regions(ctx, &account_id, selector, out).await?;
        }
        RegionsSubcommand::Rediscover { account_id } => {
            let regions = hooks::rediscover_regions(ctx, &account_id).await?;
            if out.json {
                return print_json(&regions);
            }
        }
    }
    Ok(())
}

async fn save_regions(
    ctx: &AppContext,
    account_id: &str,
    mut selector: RegionSelector,
    out: &Output,
) -> Result<(), CliError> {
    if let Some(warning) = selector.warning() {
        return Err(CliError::NothingToSave(warning));
    }
    let Some(saved) = aws_account_settings::save(ctx, account_id, &mut selector).await? else {
        println!("No changes to save.");
        return Ok(());
    };
    if out.json {
        return print_json(&saved);
    }
    out.text(&selector.render());
    Ok(())
}

// =============================================================================
// SCANS
// =============================================================================

async fn run_scans(ctx: &AppContext, command: ScansSubcommand, out: &Output) -> Result<(), CliError> {
    match command {
        ScansSubcommand::Trigger { account_id, watch } => {
            let job = hooks::trigger_scan(ctx, &account_id).await?;
            if watch {
                watch_scan(ctx, &job.id, out).await?;
            } else if out.json {
                print_json(&job)?;
            } else {
                out.text(&render_scan_status_card(&job, now()));
                println!("\nFollow with `resonant scans status {} --watch`.", job.id);
            }
        }
        ScansSubcommand::Status { job_id, watch } => {
            if watch {
                watch_scan(ctx, &job_id, out).await?;
            } else {
                let job = hooks::use_scan_job(ctx, &job_id).await?;
                if out.json {
                    return print_json(&job);
                }
                out.text(&render_scan_status_card(&job, now()));
            }
        }
        ScansSubcommand::List { account } => {
            let jobs = match account.as_deref() {
                Some(account_id) => hooks::use_account_scans(ctx, account_id).await?,
                None => hooks::use_scans(ctx).await?,
            };
            if out.json {
                return print_json(&jobs);
            }
            out.text(&render_scan_list(&jobs));
        }
        ScansSubcommand::Latest { account_id } => {
            let latest = hooks::use_latest_scan(ctx, &account_id).await?;
            if out.json {
                return print_json(&latest);
            }
            match latest {
                Some(job) => out.text(&render_scan_status_card(&job, now())),
                None => println!("No scans yet"),
            }
        }
    }
    Ok(())
}

/// Poll `job_id` and print each new snapshot until it is terminal.
async fn watch_scan(ctx: &AppContext, job_id: &str, out: &Output) -> Result<ScanJob, CliError> {
    let handle = ctx.poller.spawn(job_id);
    let mut updates = handle.subscribe();
    loop {
        let state = updates.borrow_and_update().clone();
        if let PollState::Stopped(reason) = state {
            return Err(CliError::PollStopped(reason));
        }
        if !out.json {
            out.text(&render_poll_state(&state, now()));
        }
        if let Some(job) = state.job().filter(|j| j.status.is_terminal()).cloned() {
            if out.json {
                print_json(&job)?;
            }
            if job.status == ScanStatus::Failed {
                return Err(CliError::ScanFailed { job_id: job.id });
            }
            return Ok(job);
        }
        if updates.changed().await.is_err() {
            return Err(CliError::PollStopped("status channel closed".to_owned()));
        }
    }
}

fn render_scan_list(jobs: &[ScanJob]) -> String {
    if jobs.is_empty() {
        return "No scans yet\n".to_owned();
    }
    let rows: Vec<Vec<String>> = jobs
        .iter()
        .map(|j| {
            vec![
                j.id.clone(),
                j.account_alias.clone(),
                j.status.as_str().to_owned(),
                j.resources_scanned.to_string(),
                j.violations_found.to_string(),
                j.started_at.clone(),
            ]
        })
        .collect();
    render_table(&["ID", "Account", "Status", "Resources", "Violations", "Started"], &rows)
}

// =============================================================================
// VIOLATIONS + RESOURCES
// =============================================================================

async fn run_violations(ctx: &AppContext, command: ViolationsSubcommand, out: &Output) -> Result<(), CliError> {
    let (violations, status) = match command {
        ViolationsSubcommand::List { status } => {
            let status = status.map(ViolationStatus::from);
            (hooks::use_violations(ctx, status).await?, status)
        }
        ViolationsSubcommand::ByAccount { account_id } => (hooks::use_account_violations(ctx, &account_id).await?, None),
        ViolationsSubcommand::ByResource { resource_id } => {
            (hooks::use_resource_violations(ctx, &resource_id).await?, None)
        }
        ViolationsSubcommand::ByPolicy { policy_id } => (hooks::use_policy_violations(ctx, &policy_id).await?, None),
        ViolationsSubcommand::Show { id } => {
            let violation = hooks::use_violation(ctx, &id).await?;
            if out.json {
                return print_json(&violation);
            }
            out.text(&render_violation_detail(&violation, now()));
            return Ok(());
        }
        ViolationsSubcommand::Ignore { id } => {
            let violation = hooks::ignore_violation(ctx, &id).await?;
            return if out.json { print_json(&violation) } else { Ok(()) };
        }
        ViolationsSubcommand::Reopen { id } => {
            let violation = hooks::reopen_violation(ctx, &id).await?;
            return if out.json { print_json(&violation) } else { Ok(()) };
        }
        ViolationsSubcommand::Stats => {
            let stats = hooks::use_violation_stats(ctx).await?;
            if out.json {
                return print_json(&stats);
            }
            out.text(&render_non_compliant_card(Some(&stats)));
            return Ok(());
        }
    };
    if out.json {
        return print_json(&violations);
    }
    out.text(&render_violations_table(&violations, status, now()));
    Ok(())
}

async fn run_resources(ctx: &AppContext, command: ResourcesSubcommand, out: &Output) -> Result<(), CliError> {
    let resources = match command {
        ResourcesSubcommand::List { resource_type } => hooks::use_resources(ctx, resource_type.as_deref()).await?,
        ResourcesSubcommand::ByAccount { account_id } => hooks::use_account_resources(ctx, &account_id).await?,
        ResourcesSubcommand::Show { id } => {
            let (resource, violations) =
                tokio::join!(hooks::use_resource(ctx, &id), hooks::use_resource_violations(ctx, &id));
            let resource = resource?;
            if out.json {
                return print_json(&resource);
            }
            out.text(&render_resource_detail(&resource, now()));
            match violations {
                Ok(violations) => out.text(&render_violations_table(&violations, None, now())),
                Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
                Err(e) => warn!(error = %e, "resources: violations unavailable"),
            }
            return Ok(());
        }
        ResourcesSubcommand::Stats => {
            let stats = hooks::use_resource_stats(ctx).await?;
            if out.json {
                return print_json(&stats);
            }
            out.text(&render_resource_stats(&stats));
            return Ok(());
        }
    };
    if out.json {
        return print_json(&resources);
    }
    out.text(&render_resources_table(&resources, now()));
    Ok(())
}

fn render_resource_stats(stats: &ResourceStats) -> String {
    let mut rows: Vec<Vec<String>> =
        stats.by_type.iter().map(|(kind, count)| vec![kind.clone(), count.to_string()]).collect();
    rows.push(vec!["Total".to_owned(), stats.total.to_string()]);
    render_table(&["Type", "Resources"], &rows)
}

// =============================================================================
// POLICIES + SETTINGS
// =============================================================================

async fn run_policies(ctx: &AppContext, command: PoliciesSubcommand, out: &Output) -> Result<(), CliError> {
    match command {
        PoliciesSubcommand::List { enabled } => {
            if out.json {
                return print_json(&hooks::use_tag_policies(ctx, enabled).await?);
            }
            out.text(&tag_policies::render(ctx, enabled).await?);
        }
        PoliciesSubcommand::Show { id } => {
            let policy = hooks::use_tag_policy(ctx, &id).await?;
            if out.json {
                return print_json(&policy);
            }
            out.text(&render_policy_detail(&policy));
        }
        PoliciesSubcommand::Create(fields) => {
            let form = apply_policy_args(PolicyForm::new(), fields)?;
            let policy = form.submit(ctx, None).await?;
            if out.json {
                return print_json(&policy);
            }
            out.text(&render_policy_detail(&policy));
        }
        PoliciesSubcommand::Update { id, fields } => {
            let existing = hooks::use_tag_policy(ctx, &id).await?;
            let form = apply_policy_args(PolicyForm::from_policy(&existing), fields)?;
            let policy = form.submit(ctx, Some(&id)).await?;
            if out.json {
                return print_json(&policy);
            }
            out.text(&render_policy_detail(&policy));
        }
        PoliciesSubcommand::Enable { id } => {
            let policy = hooks::enable_policy(ctx, &id).await?;
            if out.json {
                return print_json(&policy);
            }
        }
        PoliciesSubcommand::Disable { id } => {
            let policy = hooks::disable_policy(ctx, &id).await?;
            if out.json {
                return print_json(&policy);
            }
        }
        PoliciesSubcommand::Delete { id, yes } => {
            if !yes {
                return Err(CliError::NotConfirmed("Are you sure you want to delete this policy?"));
            }
            hooks::delete_policy(ctx, &id).await?;
        }
        PoliciesSubcommand::Stats => {
            let stats = hooks::use_tag_policy_stats(ctx).await?;
            if out.json {
                return print_json(&stats);
            }
            out.text(&render_policy_stats(&stats));
        }
    }
    Ok(())
}

/// Overlay command-line fields on `form`. Given `--tag`s replace the
/// existing requirements; given `--resource-type`s replace the existing
/// scope.
fn apply_policy_args(mut form: PolicyForm, args: PolicyArgs) -> Result<PolicyForm, CliError> {
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if let Some(severity) = args.severity {
        form.severity = severity;
    }
    if let Some(enabled) = args.enabled {
        form.enabled = enabled;
    }
    if !args.resource_types.is_empty() {
        form.resource_types.clear();
        for resource_type in &args.resource_types {
            form.toggle_resource_type(resource_type);
        }
    }
    if !args.tags.is_empty() {
        form.required_tags.clear();
        for tag in &args.tags {
            form.add_tag(tag)?;
        }
    }
    Ok(form)
}

async fn run_settings(ctx: &AppContext, command: Option<SettingsSubcommand>, out: &Output) -> Result<(), CliError> {
    let (resource_type, enabled) = match command {
        None => {
            if out.json {
                return print_json(&hooks::use_resource_type_settings(ctx).await?);
            }
            out.text(&settings::render(ctx).await?);
            return Ok(());
        }
        Some(SettingsSubcommand::Enable { resource_type }) => (resource_type, true),
        Some(SettingsSubcommand::Disable { resource_type }) => (resource_type, false),
    };
    let setting = hooks::update_resource_type_setting(ctx, &resource_type, enabled).await?;
    if out.json {
        return print_json(&setting);
    }
    Ok(())
}
