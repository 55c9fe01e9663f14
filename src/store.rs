use crate::error::Result;
use crate::parser::appointments::Appointment;
use crate::parser::codec;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Owner of the flat data file.
///
/// Nothing is cached between calls: every operation reads or rewrites the
/// whole file. There is no locking, so a second writer can interleave with a
/// read-modify-write and one of the updates is lost.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)?,
            _ => {}
        }
        Ok(())
    }

    /// Creates the parent directory and, if the file is missing or empty,
    /// writes the header. Does nothing on an initialized file.
    pub fn ensure_initialized(&self) -> Result<()> {
        self.ensure_dir()?;
        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => true,
            Err(err) => return Err(err.into()),
        };
        if needs_header {
            let mut wtr = codec::writer(File::create(&self.path)?);
            wtr.write_record(codec::HEADER)?;
            wtr.flush()?;
            tracing::info!(path = %self.path.display(), "initialized appointment file");
        }
        Ok(())
    }

    /// Every decodable record, in file order. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<Appointment>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err.into()),
        };
        let appointments = codec::decode_all(file)?;
        tracing::debug!(count = appointments.len(), "read appointments");
        Ok(appointments)
    }

    /// Appends one record, assigning its id first if it has none.
    pub fn append(&self, appointment: &mut Appointment) -> Result<()> {
        self.ensure_initialized()?;
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut wtr = codec::writer(file);
        codec::encode_into(&mut wtr, appointment)?;
        wtr.flush()?;
        tracing::debug!(id = %appointment.id, "appended appointment");
        Ok(())
    }

    /// Overwrites the file with the header followed by `appointments` in
    /// order. Records without an id get one.
    /// Not atomic: a crash mid-write leaves a truncated file.
    pub fn replace_all(&self, appointments: &mut [Appointment]) -> Result<()> {
        self.ensure_dir()?;
        let mut wtr = codec::writer(File::create(&self.path)?);
        wtr.write_record(codec::HEADER)?;
        for appointment in appointments.iter_mut() {
            codec::encode_into(&mut wtr, appointment)?;
        }
        wtr.flush()?;
        tracing::debug!(count = appointments.len(), "rewrote appointment file");
        Ok(())
    }
}
