//! Employee Portal - employee directory with validated CRUD, search and print views.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use employee_portal as portal;

use portal::app::App;
use portal::config::{AppConfig, ConfigLoadResult};
use portal::image::ImageUpload;
use portal::models::{EmployeeDraft, Gender, UpdateEmployee};
use portal::views::{EmployeeFilter, GenderFilter, StatusFilter, format_date};
use portal::{AppError, export, logging};

/// Employee directory: list, add, edit, delete and print employee records.
#[derive(Parser)]
#[command(name = "employee-portal", version)]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", conflicts_with = "dev")]
    config: Option<PathBuf>,

    /// Login email
    #[arg(long, default_value = "")]
    email: String,

    /// Login password
    #[arg(long, default_value = "")]
    password: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List employees, optionally filtered
    List(FilterArgs),
    /// Show one employee
    Show { id: i64 },
    /// Add an employee
    Add(AddArgs),
    /// Edit an employee
    Update(UpdateArgs),
    /// Delete an employee
    Delete { id: i64 },
    /// Flip an employee between active and inactive
    Toggle { id: i64 },
    /// Show directory stats
    Stats,
    /// Print the employee table
    Print(FilterArgs),
    /// Export the employee table to Excel
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file (default: employees_<timestamp>.xlsx)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Discard all changes and restore the sample employees
    Reset,
}

#[derive(Args)]
struct FilterArgs {
    /// Case-insensitive name search
    #[arg(long, default_value = "")]
    search: String,
    /// all, male, female or other
    #[arg(long, default_value = "all")]
    gender: GenderFilter,
    /// all, active or inactive
    #[arg(long, default_value = "all")]
    status: StatusFilter,
}

impl FilterArgs {
    fn into_filter(self) -> EmployeeFilter {
        EmployeeFilter {
            search: self.search,
            gender: self.gender,
            status: self.status,
        }
    }
}

#[derive(Args)]
struct AddArgs {
    /// Full name
    #[arg(long, default_value = "")]
    name: String,
    /// male, female or other
    #[arg(long, default_value = "male")]
    gender: Gender,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_flexible_date)]
    dob: Option<NaiveDate>,
    /// US state name
    #[arg(long, default_value = "")]
    state: String,
    #[command(flatten)]
    photo: PhotoArgs,
    /// Create the employee as inactive
    #[arg(long)]
    inactive: bool,
}

#[derive(Args)]
struct UpdateArgs {
    id: i64,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    gender: Option<Gender>,
    #[arg(long, value_parser = parse_flexible_date)]
    dob: Option<NaiveDate>,
    #[arg(long)]
    state: Option<String>,
    #[command(flatten)]
    photo: PhotoArgs,
    /// Set the active flag
    #[arg(long)]
    active: Option<bool>,
}

#[derive(Args)]
struct PhotoArgs {
    /// Profile image file (JPEG, PNG, GIF or WebP, max 5MB)
    #[arg(long, value_name = "FILE", conflicts_with = "photo_url")]
    photo: Option<PathBuf>,
    /// Profile image URL or data URI
    #[arg(long, value_name = "URL")]
    photo_url: Option<String>,
}

impl PhotoArgs {
    /// Resolve to the stored image string, embedding files as data URIs.
    fn resolve(self) -> Result<Option<String>, AppError> {
        match (self.photo, self.photo_url) {
            (Some(path), _) => {
                let upload = ImageUpload::from_path(&path)?;
                upload.into_data_uri().map(Some).map_err(AppError::Image)
            }
            (None, url) => Ok(url),
        }
    }
}

/// Parse date input flexibly, accepting multiple formats.
fn parse_flexible_date(input: &str) -> Result<NaiveDate, String> {
    let input = input.trim();
    for fmt in &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Ok(date);
        }
    }
    Err(format!("invalid date '{input}' (expected YYYY-MM-DD)"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_error(e: &anyhow::Error) {
    match e.downcast_ref::<AppError>() {
        Some(AppError::Validation(errors)) => {
            eprintln!("Please fix the following:");
            for (field, message) in errors.messages() {
                eprintln!("  {field}: {message}");
            }
        }
        _ => eprintln!("Error: {e:#}"),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        cli.config.clone().unwrap_or_else(AppConfig::default_path)
    };

    let (config, first_run) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, false),
        ConfigLoadResult::Missing => (AppConfig::default(), true),
        ConfigLoadResult::Invalid(e) => {
            return Err(e).with_context(|| format!("Invalid config at {}", config_path.display()));
        }
    };

    // Initialize logging
    let _log_guard = logging::init(&config);
    tracing::info!("Employee Portal starting...");
    tracing::info!("Config path: {:?}", config_path);

    if first_run {
        tracing::info!("Config missing, writing defaults");
        if let Err(e) = config.save(&config_path) {
            tracing::warn!("Could not write default config: {}", e);
        }
    }

    let mut app = App::open(config).context("Failed to open employee directory")?;
    let identity = app.login(&cli.email, &cli.password)?;
    tracing::debug!("Session: {} ({})", identity.name, identity.role);

    let today = Local::now().date_naive();

    match cli.command {
        Command::List(args) => {
            let filter = args.into_filter();
            let employees = app.employees(&filter)?;
            for emp in &employees {
                println!(
                    "#{:<14} {:<24} {:<7} {:<16} {}",
                    emp.id,
                    emp.full_name,
                    emp.gender,
                    emp.state,
                    if emp.is_active { "Active" } else { "Inactive" }
                );
            }
            println!(
                "Showing {} of {} employees",
                employees.len(),
                app.directory().len()
            );
        }
        Command::Show { id } => {
            let emp = app.employee(id)?;
            println!("ID:            #{}", emp.id);
            println!("Full name:     {}", emp.full_name);
            println!("Gender:        {}", emp.gender);
            println!("Date of birth: {}", format_date(emp.date_of_birth));
            println!("Age:           {} years", portal::views::age_on(emp.date_of_birth, today));
            println!("State:         {}", emp.state);
            println!("Status:        {}", if emp.is_active { "Active" } else { "Inactive" });
            println!("Photo:         {}", summarize_image(&emp.profile_image));
        }
        Command::Add(args) => {
            let draft = EmployeeDraft {
                full_name: args.name,
                gender: args.gender,
                date_of_birth: args.dob,
                state: args.state,
                profile_image: args.photo.resolve()?.unwrap_or_default(),
                is_active: !args.inactive,
            };
            let record = app.create_employee(&draft, today)?;
            println!("Added employee #{} ({})", record.id, record.full_name);
        }
        Command::Update(args) => {
            let data = UpdateEmployee {
                full_name: args.name,
                gender: args.gender,
                date_of_birth: args.dob,
                state: args.state,
                profile_image: args.photo.resolve()?,
                is_active: args.active,
            };
            if data.is_empty() {
                println!("Nothing to update");
                return Ok(());
            }
            let record = app.update_employee(args.id, data, today)?;
            println!("Updated employee #{} ({})", record.id, record.full_name);
        }
        Command::Delete { id } => {
            let name = app.employee(id)?.full_name.clone();
            app.delete_employee(id)?;
            println!("Deleted employee #{id} ({name})");
        }
        Command::Toggle { id } => {
            let is_active = app.toggle_employee_status(id)?;
            println!(
                "Employee #{id} is now {}",
                if is_active { "active" } else { "inactive" }
            );
        }
        Command::Stats => {
            let stats = app.stats()?;
            println!("Total Employees:    {}", stats.total);
            println!("Active Employees:   {} ({}%)", stats.active, stats.active_percentage);
            println!("Inactive Employees: {} ({}%)", stats.inactive, stats.inactive_percentage);
            println!("Activity Rate:      {}% of total", stats.active_percentage);
        }
        Command::Print(args) => {
            print!("{}", app.print_view(&args.into_filter(), today)?);
        }
        Command::Export { filter, output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(export::generate_export_filename("employees")));
            let count = app.export_employees(&filter.into_filter(), today, &path)?;
            println!("Exported {count} employees to {}", path.display());
        }
        Command::Reset => {
            app.reset_directory()?;
            println!("Directory reset to {} sample employees", app.directory().len());
        }
    }

    app.logout();
    Ok(())
}

/// Short description of a stored image; data URIs are not printed in full.
fn summarize_image(image: &str) -> String {
    match image.strip_prefix("data:").and_then(|rest| rest.split_once(';')) {
        Some((mime, _)) => format!("embedded {mime} ({} bytes encoded)", image.len()),
        None => image.to_string(),
    }
}
