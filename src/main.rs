use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use nutri_booking::config::{self, Config, Credentials};
use nutri_booking::{Clinic, StaffSession, Status, Submission};
use std::{io, path::PathBuf};
use tracing_subscriber::EnvFilter;

/// Appointment bookings for the nutrition clinic, kept in a flat csv file.
#[derive(Debug, Parser)]
#[command(name = config::APP_NAME, version)]
struct Cli {
    /// Path of the appointment file
    #[arg(long, env = "NUTRI_DATA_FILE", default_value = config::DEFAULT_DATA_FILE)]
    data_file: PathBuf,
    /// Username of the staff account
    #[arg(long, env = "NUTRI_STAFF_USER", requires = "staff_password")]
    staff_user: Option<String>,
    /// Password of the staff account
    #[arg(
        long,
        env = "NUTRI_STAFF_PASSWORD",
        hide_env_values = true,
        requires = "staff_user"
    )]
    staff_password: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the data file with its header if needed
    Init,
    /// Submit a booking request
    Book {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        /// Nutrição Esportiva, Emagrecimento or Reeducação Alimentar
        #[arg(long = "type")]
        appointment_type: String,
    },
    /// Print every appointment as csv
    List(Login),
    /// Print the number of appointments per status
    Summary(Login),
    /// Change the status of one appointment
    SetStatus {
        #[command(flatten)]
        login: Login,
        id: String,
        /// Pendente, Confirmada, Cancelada or Concluída
        status: String,
    },
}

#[derive(Debug, Args)]
struct Login {
    #[arg(long)]
    user: String,
    #[arg(long)]
    password: String,
}

impl Login {
    fn session(&self, clinic: &Clinic) -> Result<StaffSession> {
        Ok(clinic.login(&self.user, &self.password)?)
    }
}

fn main() -> Result<()> {
    // stdout carries the reports
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);
    let cli = Cli::parse();
    let credentials = match (cli.staff_user, cli.staff_password) {
        (Some(user), Some(password)) => Some(Credentials::new(user, password)),
        _ => None,
    };
    let clinic = Clinic::new(&Config::new(cli.data_file, credentials));
    tracing::debug!(path = %clinic.store().path().display(), "using appointment file");

    match cli.command {
        Command::Init => clinic.store().ensure_initialized()?,
        Command::Book {
            name,
            phone,
            email,
            date,
            time,
            appointment_type,
        } => {
            let receipt = clinic.submit(Submission {
                name: Some(name),
                phone: Some(phone),
                email: Some(email),
                date: Some(date),
                time: Some(time),
                appointment_type: Some(appointment_type),
            })?;
            println!("booked {} for {}", receipt.id, receipt.name);
        }
        Command::List(login) => {
            let session = login.session(&clinic)?;
            clinic
                .appointments(&session)?
                .serialize_to_writer(io::stdout())?;
        }
        Command::Summary(login) => {
            let session = login.session(&clinic)?;
            let summary = clinic.summary(&session)?;
            println!("total: {}", summary.total);
            for status in Status::ALL {
                println!("{}: {}", status, summary.count(status));
            }
        }
        Command::SetStatus { login, id, status } => {
            let session = login.session(&clinic)?;
            let status = clinic.update_status(&session, &id, &status)?;
            println!("{} is now {}", id, status);
        }
    }

    Ok(())
}
