//! Entry points for the web layer: visitors book, the staff account lists,
//! summarizes and moves appointments between statuses.

use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use crate::lifecycle;
use crate::parser::agenda::{Agenda, StatusSummary};
use crate::parser::appointments::{Appointment, Status};
use crate::store::Store;
use crate::validation::{self, Submission};

/// Returned to the visitor once a booking is stored.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Receipt {
    pub id: String,
    pub name: String,
}

/// Proof of a successful staff login. Only `Clinic::login` hands these out.
#[derive(Debug)]
pub struct StaffSession {
    username: String,
}

impl StaffSession {
    pub fn username(&self) -> &str {
        &self.username
    }
}

pub struct Clinic {
    store: Store,
    credentials: Option<Credentials>,
}

impl Clinic {
    pub fn new(config: &Config) -> Self {
        Clinic {
            store: Store::new(config.data_file.clone()),
            credentials: config.credentials.clone(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Validates and stores a booking. New bookings always start `Pending`.
    pub fn submit(&self, submission: Submission) -> Result<Receipt> {
        let booking = match validation::validate_today(&submission) {
            Ok(booking) => booking,
            Err(rejection) => {
                tracing::debug!(%rejection, "booking rejected");
                return Err(rejection.into());
            }
        };
        let mut appointment = Appointment::from(booking);
        self.store.append(&mut appointment)?;
        tracing::info!(id = %appointment.id, "booking stored");
        Ok(Receipt {
            id: appointment.id,
            name: appointment.name,
        })
    }

    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.credentials
            .as_ref()
            .is_some_and(|creds| creds.matches(username, password))
    }

    pub fn login(&self, username: &str, password: &str) -> Result<StaffSession> {
        if !self.authenticate(username, password) {
            tracing::warn!(%username, "staff login refused");
            return Err(Error::Unauthorized);
        }
        Ok(StaffSession {
            username: username.to_string(),
        })
    }

    pub fn appointments(&self, _session: &StaffSession) -> Result<Agenda> {
        Ok(Agenda::from(self.store.read_all()?))
    }

    pub fn summary(&self, session: &StaffSession) -> Result<StatusSummary> {
        Ok(self.appointments(session)?.summary())
    }

    pub fn update_status(
        &self,
        session: &StaffSession,
        id: &str,
        status: &str,
    ) -> Result<Status> {
        tracing::debug!(staff = %session.username(), %id, %status, "status change requested");
        lifecycle::set_status(&self.store, id, status)
    }
}
