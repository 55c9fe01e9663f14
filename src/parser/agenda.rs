use crate::error::Result;
use crate::parser::appointments::{Appointment, Status};
use csv::WriterBuilder;
use std::collections::BTreeMap;
use std::io::Write;

/// Per-status totals for the staff overview.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StatusSummary {
    pub total: usize,
    // every status is present, zero when unused
    pub by_status: BTreeMap<Status, usize>,
}

impl StatusSummary {
    pub fn count(&self, status: Status) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// The appointments of the data file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Agenda {
    pub appointments: Vec<Appointment>,
}

impl From<Vec<Appointment>> for Agenda {
    fn from(appointments: Vec<Appointment>) -> Self {
        Agenda { appointments }
    }
}

impl Agenda {
    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter()
    }

    /// first appointment carrying `id`; rows without an id never match
    pub fn find(&self, id: &str) -> Option<&Appointment> {
        self.iter().find(|a| a.is_addressable() && a.id == id)
    }

    pub fn summary(&self) -> StatusSummary {
        let mut by_status: BTreeMap<Status, usize> =
            Status::ALL.iter().map(|s| (*s, 0)).collect();
        for appointment in self.iter() {
            *by_status.entry(appointment.status).or_insert(0) += 1;
        }
        StatusSummary {
            total: self.len(),
            by_status,
        }
    }

    /// Writes the agenda as a csv report, with an English header.
    /// throws error if unable to serialize
    pub fn serialize_to_writer(&self, w: impl Write) -> Result<()> {
        // better to be explicit in case library defaults change
        let mut wtr = WriterBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .from_writer(w);
        wtr.write_record([
            "id",
            "name",
            "phone",
            "email",
            "date",
            "time",
            "appointment_type",
            "status",
        ])?;
        for appointment in self.iter() {
            wtr.serialize(appointment)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
