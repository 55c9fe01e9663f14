pub mod clinic;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod parser;
pub mod store;
pub mod validation;

pub use clinic::{Clinic, Receipt, StaffSession};
pub use config::{Config, Credentials};
pub use error::{Error, Result};
pub use parser::agenda::{Agenda, StatusSummary};
pub use parser::appointments::{Appointment, AppointmentType, Status};
pub use store::Store;
pub use validation::{Booking, Rejection, Submission};
