use chrono::NaiveDate;
use serde::{
    self,
    de::{Error, Visitor},
    Deserialize, Deserializer, Serialize,
};
use std::fmt;

/// status of an appointment.
/// Any status may be set from any other; there is no transition table.
#[derive(
    Serialize, Deserialize, Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash,
)]
pub enum Status {
    #[default]
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Confirmada")]
    Confirmed,
    #[serde(rename = "Cancelada")]
    Cancelled,
    #[serde(rename = "Concluída")]
    Completed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::Confirmed,
        Status::Cancelled,
        Status::Completed,
    ];

    /// The label stored in the data file
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "Pendente",
            Status::Confirmed => "Confirmada",
            Status::Cancelled => "Cancelada",
            Status::Completed => "Concluída",
        }
    }

    /// exact match against the stored labels
    pub fn from_label(label: &str) -> Option<Status> {
        Status::ALL.iter().copied().find(|s| s.label() == label)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The kinds of consultation the clinic offers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AppointmentType {
    #[serde(rename = "Nutrição Esportiva")]
    SportsNutrition,
    #[serde(rename = "Emagrecimento")]
    WeightLoss,
    #[serde(rename = "Reeducação Alimentar")]
    DietaryReeducation,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 3] = [
        AppointmentType::SportsNutrition,
        AppointmentType::WeightLoss,
        AppointmentType::DietaryReeducation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentType::SportsNutrition => "Nutrição Esportiva",
            AppointmentType::WeightLoss => "Emagrecimento",
            AppointmentType::DietaryReeducation => "Reeducação Alimentar",
        }
    }

    pub fn from_label(label: &str) -> Option<AppointmentType> {
        AppointmentType::ALL
            .iter()
            .copied()
            .find(|t| t.label() == label)
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A booking as it lives in the data file.
///
/// `date`, `time` and `appointment_type` stay textual: rows written by older
/// deployments are carried through a rewrite exactly as they were read.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub appointment_type: String,
    #[serde(deserialize_with = "deserialize_status")]
    pub status: Status,
}

impl Appointment {
    /// legacy rows carry no id and cannot be addressed for updates
    pub fn is_addressable(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn kind(&self) -> Option<AppointmentType> {
        AppointmentType::from_label(&self.appointment_type)
    }

    /// fields in file column order
    pub fn fields(&self) -> [&str; 8] {
        [
            &self.id,
            &self.name,
            &self.phone,
            &self.email,
            &self.date,
            &self.time,
            &self.appointment_type,
            self.status.label(),
        ]
    }
}

/// A row of the original six column layout, before ids and statuses existed.
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct LegacyAppointment {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub appointment_type: String,
}

impl From<LegacyAppointment> for Appointment {
    fn from(legacy: LegacyAppointment) -> Self {
        Appointment {
            id: String::new(),
            name: legacy.name,
            phone: legacy.phone,
            email: legacy.email,
            date: legacy.date,
            time: legacy.time,
            appointment_type: legacy.appointment_type,
            status: Status::Pending,
        }
    }
}

/// Reads a status column. Anything outside the four labels, empty included,
/// becomes `Pending` instead of failing the row.
pub fn deserialize_status<'de, D>(deserializer: D) -> Result<Status, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(StatusVisitor)
}

struct StatusVisitor;
impl<'de> Visitor<'de> for StatusVisitor {
    type Value = Status;
    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an appointment status label")
    }
    fn visit_str<E>(self, value: &str) -> Result<Status, E>
    where
        E: Error,
    {
        Ok(Status::from_label(value).unwrap_or_default())
    }
}
