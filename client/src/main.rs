//! Diabetes Risk Client
//!
//! Terminal front-end for the diabetes-risk prediction API.
//!
//! ## Commands
//!
//! - `predict`: step-by-step prediction wizard
//! - `login` / `register` / `logout`: session management
//! - `history`: paged list of past predictions
//! - `upload`: batch prediction from a CSV file
//! - `accuracy`: reported model accuracy
//! - `theme`: light/dark preference

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use diabetes_risk_client::auth::{self, AuthFlow, Credentials, SignupForm};
use diabetes_risk_client::config::ClientConfig;
use diabetes_risk_client::history::{self, HistoryView};
use diabetes_risk_client::recommendation::{self, RecommendationView};
use diabetes_risk_client::upload;
use diabetes_risk_client::wizard::{Step, Wizard, WizardAction};
use diabetes_risk_client::AppState;
use diabetes_risk_shared::{MetricField, PredictionResult};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "diabetes-risk", version, about = "Diabetes risk prediction client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Enter your health metrics and get a risk prediction
    Predict,
    /// Log in to save predictions to your history
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "DIABETES_RISK_PASSWORD", hide_env_values = true)]
        password: String,
        /// Remember the username for next time
        #[arg(long)]
        remember: bool,
    },
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long, env = "DIABETES_RISK_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show past predictions
    History {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Batch prediction from a CSV file
    Upload {
        file: PathBuf,
        /// Write the results to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show the model's reported accuracy
    Accuracy,
    /// Set the display theme
    Theme {
        #[arg(value_enum)]
        mode: ThemeMode,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeMode {
    Light,
    Dark,
    Toggle,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if ClientConfig::is_production() { "production" } else { "development" },
        api = %config.api.base_url,
        "Starting diabetes-risk client"
    );

    let state = AppState::init(config).await?;

    tokio::select! {
        result = run(cli.command, state) => result,
        _ = signal::ctrl_c() => {
            info!("Interrupted");
            Ok(())
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if ClientConfig::is_production() {
            "diabetes_risk_client=info".into()
        } else {
            "diabetes_risk_client=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if ClientConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(command: Command, state: AppState) -> Result<()> {
    match command {
        Command::Predict => run_wizard(state).await,
        Command::Login {
            username,
            password,
            remember,
        } => {
            let credentials = Credentials::new(username, password).remember(remember);
            if let Err(e) = auth::login(&state, credentials).await {
                bail!(AuthFlow::Login.failure_message(&e));
            }
            println!("Login successful!");
            Ok(())
        }
        Command::Register {
            username,
            password,
            confirm_password,
        } => {
            let form = SignupForm::new(username, password, confirm_password);
            if let Err(e) = auth::register(&state, form).await {
                bail!(AuthFlow::Signup.failure_message(&e));
            }
            println!("Signup successful!");
            Ok(())
        }
        Command::Logout => {
            state.logout().await?;
            println!("Logged out.");
            Ok(())
        }
        Command::History { page } => show_history(&state, page).await,
        Command::Upload { file, output } => {
            let rows = match upload::upload_csv(state.api(), &file).await {
                Ok(rows) => rows,
                Err(e) => bail!(upload::failure_message(&e)),
            };
            for row in &rows {
                println!("{}: {} ({:.1}%)", row.name, row.prediction, row.risk_percentage);
            }
            if let Some(output) = output {
                tokio::fs::write(&output, upload::export_results_csv(&rows)?).await?;
                println!("Results written to {}", output.display());
            }
            Ok(())
        }
        Command::Accuracy => match state.api().model_accuracy().await {
            Ok(accuracy) => {
                println!("Model accuracy: {}", accuracy);
                Ok(())
            }
            Err(e) => bail!(e.user_message()),
        },
        Command::Theme { mode } => {
            let dark = match mode {
                ThemeMode::Light => {
                    state.set_dark_mode(false).await?;
                    false
                }
                ThemeMode::Dark => {
                    state.set_dark_mode(true).await?;
                    true
                }
                ThemeMode::Toggle => state.toggle_dark_mode().await?,
            };
            println!("Dark mode {}", if dark { "on" } else { "off" });
            Ok(())
        }
    }
}

async fn show_history(state: &AppState, page: usize) -> Result<()> {
    let mut view: HistoryView = match history::load_history(state).await {
        Ok(view) => view,
        Err(e) => bail!(history::failure_message(&e)),
    };
    if view.is_empty() {
        println!("No predictions yet.");
        return Ok(());
    }
    if !view.go_to(page) {
        bail!(
            "Page {} does not exist (1-{})",
            page,
            view.pager().page_count()
        );
    }

    for row in view.rows() {
        println!(
            "{}  {:<16} glucose {:>5}  bp {:>4}  risk {:>4} ({})",
            row.recorded_at,
            row.prediction,
            row.glucose,
            row.blood_pressure,
            row.risk,
            row.risk_band
        );
    }
    println!(
        "Page {} of {}",
        view.pager().current_page(),
        view.pager().page_count()
    );
    Ok(())
}

// ============================================================================
// Interactive wizard
// ============================================================================

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, label: &str) -> Result<String> {
        print!("{}: ", label);
        std::io::stdout().flush()?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line),
            None => bail!("Input closed"),
        }
    }

    /// Ask until the wizard accepts the value
    async fn field(&mut self, wizard: &mut Wizard, field: MetricField, label: &str) -> Result<()> {
        loop {
            let value = self.ask(label).await?;
            match wizard.set_field(field, &value) {
                Ok(()) => return Ok(()),
                Err(e) => eprintln!("{}", e.user_message()),
            }
        }
    }
}

async fn run_wizard(state: AppState) -> Result<()> {
    let mut wizard = Wizard::new(state).await;
    let mut prompt = Prompt::new();
    let total = wizard.controller().total_steps();

    print_step(Step::Anthropometrics, total);
    loop {
        prompt.field(&mut wizard, MetricField::Sex, "Sex (Male/Female)").await?;
        prompt.field(&mut wizard, MetricField::Age, "Age (years)").await?;
        prompt.field(&mut wizard, MetricField::Height, "Height (cm)").await?;
        prompt.field(&mut wizard, MetricField::Weight, "Weight (kg)").await?;

        match wizard.advance() {
            Ok(WizardAction::PopupShown(reading)) => {
                println!("Your BMI: {:.1} ({})", reading.value, reading.category);
                break;
            }
            Ok(_) => break,
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }
    wizard.settle_popup().await;

    print_step(Step::ClinicalInputs, total);
    if wizard.controller().metrics().pregnancies_visible() {
        prompt
            .field(&mut wizard, MetricField::Pregnancies, "Number of pregnancies")
            .await?;
    }
    prompt.field(&mut wizard, MetricField::Glucose, "Glucose (mg/dL)").await?;
    prompt
        .field(&mut wizard, MetricField::BloodPressure, "Blood pressure (mmHg)")
        .await?;
    prompt
        .field(&mut wizard, MetricField::SkinThickness, "Skin thickness (mm)")
        .await?;
    prompt.field(&mut wizard, MetricField::Insulin, "Insulin (μU/ml)").await?;
    prompt
        .field(
            &mut wizard,
            MetricField::DiabetesPedigreeFunction,
            "Diabetes pedigree function",
        )
        .await?;

    if !wizard.controller().is_authenticated() {
        if let Some(result) = wizard.submit().await? {
            print_result(&result);
        }
        println!("Log in to save your predictions and see personalised recommendations.");
        return Ok(());
    }

    let action = wizard.continue_to_recommendations().await?;
    if let Some(result) = wizard.controller().metrics().result.as_ref() {
        print_result(result);
    }
    if action != WizardAction::Advanced(Step::ActivityGoal) {
        return Ok(());
    }

    print_step(Step::ActivityGoal, total);
    loop {
        prompt
            .field(&mut wizard, MetricField::ActivityLevel, "Activity level (Low/Moderate/High)")
            .await?;
        prompt
            .field(&mut wizard, MetricField::Goal, "Goal (Cutting/Standard/Bulking)")
            .await?;
        match wizard.finish() {
            Ok(_) => break,
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }

    match wizard.recommendations().await {
        Ok(view) => print_recommendations(&view),
        Err(e) => bail!(recommendation::failure_message(&e)),
    }
    Ok(())
}

fn print_step(step: Step, total: u8) {
    println!("Step {} of {}: {}", step.number(), total, step.title());
}

fn print_result(result: &PredictionResult) {
    println!();
    println!("Result: {}", result.prediction);
    if let Some(risk) = result.risk_percentage {
        println!("Risk: {:.1}%", risk);
    }
    if !result.diet_suggestion.is_empty() {
        println!("{}", result.diet_suggestion);
    }
}

fn print_recommendations(view: &RecommendationView) {
    println!();
    println!("BMI {:.1}, TDEE {:.0} kcal", view.bmi, view.tdee);
    println!(
        "Daily targets: {:.0} kcal, {:.0} g carbs, {:.0} g protein, {:.0} g fat",
        view.targets.energy, view.targets.carbs, view.targets.protein, view.targets.fat
    );
    println!(
        "Water {} L, fibre {} g, macros {}% / {}% / {}%",
        view.guidance.water_liters,
        view.guidance.fiber_grams,
        view.guidance.carbs_percent,
        view.guidance.protein_percent,
        view.guidance.fat_percent
    );

    println!();
    println!("Meal plan ({:.0} kcal/day)", view.meal_plan.target_calories);
    for day in &view.meal_plan.days {
        println!("  {} ({} kcal)", day.day, day.total_calories());
        for (label, slot) in day.slots() {
            for meal in slot.meals() {
                println!("    {:<10} {} ({} kcal)", label, meal.name, meal.calories);
            }
        }
    }

    println!();
    println!("Exercises ({})", view.activity_level.description());
    for exercise in view.exercises {
        println!(
            "  {}: {}, {}. {}",
            exercise.name, exercise.duration, exercise.frequency, exercise.description
        );
    }

    if let Some(tip) = view.tips.current() {
        println!();
        println!("Tip: {}", tip);
    }
}
