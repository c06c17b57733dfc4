mod render;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rxdesk_core::config::{base_url_from_env_value, resolve_token_dir};
use rxdesk_core::constants::{API_BASE_URL_ENV, TOKEN_DIR_ENV};
use rxdesk_core::pages::{LoginPage, PrescriptionForm, PrescriptionsPage, ReportsPage};
use rxdesk_core::{
    ApiClient, AuthService, AuthSession, ClientConfig, DateRange, Gender, GuardDecision,
    LoginRequest, PrescriptionService, ReportService, Route, RouteGuard, SessionStore,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rxdesk")]
#[command(about = "RxDesk prescription management CLI")]
struct Cli {
    /// API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Directory holding the saved auth token
    #[arg(long, global = true)]
    token_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and save the token
    Login {
        #[arg(long)]
        username: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the saved token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List prescriptions (current month by default)
    List(RangeArgs),
    /// Show one prescription
    Show { id: i64 },
    /// Create a prescription
    Create(FormArgs),
    /// Update a prescription; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a prescription
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Day-wise prescription counts (current month by default)
    Report(RangeArgs),
}

#[derive(Args)]
struct RangeArgs {
    /// First day, YYYY-MM-DD
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last day, YYYY-MM-DD
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl RangeArgs {
    fn resolve(&self, today: NaiveDate) -> DateRange {
        let month = DateRange::current_month(today);
        DateRange::new(self.from.unwrap_or(month.start), self.to.unwrap_or(month.end))
    }
}

#[derive(Args)]
struct FormArgs {
    /// Prescription date, YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    age: Option<String>,
    /// MALE, FEMALE or OTHER
    #[arg(long)]
    gender: Option<Gender>,
    #[arg(long)]
    diagnosis: Option<String>,
    #[arg(long)]
    medicines: Option<String>,
    /// Next visit date, YYYY-MM-DD
    #[arg(long)]
    next_visit: Option<String>,
}

impl FormArgs {
    /// Overwrites the fields that were given on the command line.
    fn apply(self, form: &mut PrescriptionForm) {
        let FormArgs {
            date,
            name,
            age,
            gender,
            diagnosis,
            medicines,
            next_visit,
        } = self;
        if let Some(v) = date {
            form.prescription_date = v;
        }
        if let Some(v) = name {
            form.patient_name = v;
        }
        if let Some(v) = age {
            form.patient_age = v;
        }
        if let Some(v) = gender {
            form.patient_gender = v;
        }
        if let Some(v) = diagnosis {
            form.diagnosis = v;
        }
        if let Some(v) = medicines {
            form.medicines = v;
        }
        if let Some(v) = next_visit {
            form.next_visit_date = v;
        }
    }
}

/// Everything a command needs, built once from the resolved configuration.
struct App {
    client: ApiClient,
    session: AuthSession,
}

impl App {
    /// Flags win over the environment, which wins over the defaults.
    fn new(base_url: Option<String>, token_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let base_url =
            base_url_from_env_value(base_url.or_else(|| std::env::var(API_BASE_URL_ENV).ok()));
        let token_dir = resolve_token_dir(
            token_dir.or_else(|| std::env::var(TOKEN_DIR_ENV).ok().map(PathBuf::from)),
        )?;
        let cfg = ClientConfig::new(base_url, token_dir)?;
        tracing::debug!("API base URL {}", cfg.base_url());

        let store = SessionStore::new(cfg.token_store());
        let client = ApiClient::new(&cfg, store);
        let session = AuthSession::new(AuthService::new(client.clone()));
        Ok(Self { client, session })
    }

    /// Bootstraps the session and applies the route guard for `route`.
    async fn enter(&mut self, route: Route) -> anyhow::Result<()> {
        self.session.bootstrap().await;
        match RouteGuard::check(self.session.state(), route.path()) {
            GuardDecision::Render => Ok(()),
            GuardDecision::Redirect { from, .. } => {
                bail!("Not signed in. Run `rxdesk login` and try {from} again.")
            }
            GuardDecision::Loading => bail!("Session is still loading"),
        }
    }

    fn prescriptions_page(&self) -> PrescriptionsPage {
        PrescriptionsPage::new(PrescriptionService::new(self.client.clone()), today())
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn prompt(question: &str) -> anyhow::Result<String> {
    eprint!("{question} ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn submit(page: &mut PrescriptionsPage, values: PrescriptionForm) -> anyhow::Result<()> {
    if page.submit_form(values).await {
        if let Some(message) = page.take_feedback() {
            println!("{message}");
        }
        return Ok(());
    }

    if let Some(errors) = page.form().and_then(|f| f.errors.as_ref()) {
        eprintln!("{}", render::field_errors(errors));
    }
    bail!(page.take_feedback().unwrap_or_default())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        base_url,
        token_dir,
        command,
    } = cli;
    let Some(command) = command else {
        println!("Use 'rxdesk --help' for commands");
        return Ok(());
    };
    let mut app = App::new(base_url, token_dir)?;

    match command {
        Commands::Login { username, password } => {
            app.session.bootstrap().await;
            if let Some(next) = LoginPage::already_signed_in(&app.session, None) {
                if let Some(user) = app.session.user() {
                    println!("Already signed in as {} (continue at {next})", user.username);
                }
                return Ok(());
            }

            let password = match password {
                Some(p) => p,
                None => prompt("Password:")?,
            };
            let credentials = LoginRequest { username, password };
            let mut page = LoginPage::new();
            match page.submit(&mut app.session, &credentials, None).await {
                Some(_) => {
                    let user = app.session.user().map(|u| u.username.as_str()).unwrap_or_default();
                    println!("Signed in as {user}");
                }
                None => bail!(page.error().unwrap_or_default().to_string()),
            }
        }
        Commands::Logout => {
            app.session.logout();
            println!("Signed out");
        }
        Commands::Whoami => {
            app.session.bootstrap().await;
            match app.session.user() {
                Some(user) => println!("{}", user.username),
                None => println!("Not signed in"),
            }
        }
        Commands::List(range) => {
            app.enter(Route::Prescriptions).await?;
            let mut page = app.prescriptions_page();
            page.set_range(range.resolve(today())).await;
            if let Some(error) = page.error() {
                bail!(error.to_string());
            }
            println!("{}", render::prescriptions(page.table()));
        }
        Commands::Show { id } => {
            app.enter(Route::Prescriptions).await?;
            let service = PrescriptionService::new(app.client.clone());
            let prescription = service
                .get(id)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message("Failed to load prescription")))?;
            println!("{}", render::detail(&prescription));
        }
        Commands::Create(form) => {
            app.enter(Route::Prescriptions).await?;
            let mut values = PrescriptionForm::default();
            form.apply(&mut values);

            let mut page = app.prescriptions_page();
            page.open_create_form();
            submit(&mut page, values).await?;
        }
        Commands::Update { id, form } => {
            app.enter(Route::Prescriptions).await?;
            let service = PrescriptionService::new(app.client.clone());
            let existing = service
                .get(id)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message("Failed to load prescription")))?;

            let mut page = app.prescriptions_page();
            page.open_edit_form(&existing);
            let mut values = PrescriptionForm::from_prescription(&existing);
            form.apply(&mut values);
            submit(&mut page, values).await?;
        }
        Commands::Delete { id, yes } => {
            app.enter(Route::Prescriptions).await?;
            let service = PrescriptionService::new(app.client.clone());
            let existing = service
                .get(id)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message("Failed to load prescription")))?;

            let mut page = app.prescriptions_page();
            let mut prompt_error = None;
            let deleted = page
                .delete(&existing, |question| {
                    if yes {
                        return true;
                    }
                    match prompt(&format!("{question} [y/N]")) {
                        Ok(answer) => answer.trim().eq_ignore_ascii_case("y"),
                        Err(e) => {
                            prompt_error = Some(e);
                            false
                        }
                    }
                })
                .await;
            if let Some(e) = prompt_error {
                return Err(e);
            }

            match page.take_feedback() {
                Some(message) if deleted => println!("{message}"),
                Some(message) => bail!(message),
                None => println!("Cancelled"),
            }
        }
        Commands::Report(range) => {
            app.enter(Route::Reports).await?;
            let mut page = ReportsPage::new(ReportService::new(app.client.clone()), today());
            page.set_range(range.resolve(today())).await;
            if let Some(error) = page.error() {
                bail!(error.to_string());
            }
            println!("{}", render::report(page.table(), page.total()));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout is reserved for command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rxdesk=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(Cli::parse()).await
}
