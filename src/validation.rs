use crate::parser::appointments::{Appointment, AppointmentType, Status};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

pub const MIN_NAME_CHARS: usize = 3;
pub const MIN_PHONE_CHARS: usize = 10;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A booking request as submitted by a visitor.
/// Accepts both the English field names and the clinic form's field names.
#[derive(Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct Submission {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default, alias = "telefone")]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "data")]
    pub date: Option<String>,
    #[serde(default, alias = "horario")]
    pub time: Option<String>,
    #[serde(default, alias = "tipo_consulta")]
    pub appointment_type: Option<String>,
}

/// A submission that passed every rule.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Booking {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: NaiveDate,
    pub time: String,
    pub appointment_type: AppointmentType,
}

impl From<Booking> for Appointment {
    /// id is left empty for the store to assign
    fn from(booking: Booking) -> Self {
        Appointment {
            id: String::new(),
            name: booking.name,
            phone: booking.phone,
            email: booking.email,
            date: booking.date.format(DATE_FORMAT).to_string(),
            time: booking.time,
            appointment_type: booking.appointment_type.label().to_string(),
            status: Status::Pending,
        }
    }
}

/// Why a submission was turned down. Only the first failing rule is reported.
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum Rejection {
    #[error("full name must have at least 3 characters")]
    NameTooShort,
    #[error("phone must have at least 10 digits")]
    PhoneTooShort,
    #[error("invalid email")]
    InvalidEmail,
    #[error("date is required")]
    MissingDate,
    #[error("invalid date")]
    InvalidDate,
    #[error("appointments cannot be booked on past dates")]
    PastDate,
    #[error("time is required")]
    MissingTime,
    #[error("invalid appointment type")]
    InvalidType,
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

/// Checks `submission` against the booking rules, in order, relative to
/// `today`. Same-day bookings are accepted.
pub fn validate(submission: &Submission, today: NaiveDate) -> Result<Booking, Rejection> {
    let name = field(&submission.name);
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(Rejection::NameTooShort);
    }
    // length only, digits are not checked
    let phone = field(&submission.phone);
    if phone.chars().count() < MIN_PHONE_CHARS {
        return Err(Rejection::PhoneTooShort);
    }
    let email = field(&submission.email);
    if !email.contains('@') {
        return Err(Rejection::InvalidEmail);
    }
    let date = field(&submission.date);
    if date.is_empty() {
        return Err(Rejection::MissingDate);
    }
    let date =
        NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| Rejection::InvalidDate)?;
    if date < today {
        return Err(Rejection::PastDate);
    }
    let time = field(&submission.time);
    if time.is_empty() {
        return Err(Rejection::MissingTime);
    }
    let appointment_type = AppointmentType::from_label(field(&submission.appointment_type))
        .ok_or(Rejection::InvalidType)?;

    Ok(Booking {
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        date,
        time: time.to_string(),
        appointment_type,
    })
}

/// `validate` against the local calendar date.
pub fn validate_today(submission: &Submission) -> Result<Booking, Rejection> {
    validate(submission, Local::now().date_naive())
}
