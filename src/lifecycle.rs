use crate::error::{Error, Result};
use crate::parser::appointments::Status;
use crate::store::Store;

/// Sets the status of the appointment with id `id` and rewrites the file.
///
/// An unknown status fails before the file is touched. If no record carries
/// `id` the file is left as it was; rows without an id never match.
pub fn set_status(store: &Store, id: &str, new_status: &str) -> Result<Status> {
    let status =
        Status::from_label(new_status).ok_or_else(|| Error::InvalidStatus(new_status.to_string()))?;

    let mut appointments = store.read_all()?;
    let target = appointments
        .iter_mut()
        .find(|a| a.is_addressable() && a.id == id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    let previous = target.status;
    target.status = status;

    store.replace_all(&mut appointments)?;
    tracing::info!(%id, from = %previous, to = %status, "appointment status updated");
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::appointments::Appointment;
    use anyhow::Result;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("agendamentos.csv"));
        (dir, store)
    }

    fn booking(name: &str) -> Appointment {
        Appointment {
            id: String::new(),
            name: name.to_string(),
            phone: "11988887777".to_string(),
            email: "ana@x.com".to_string(),
            date: "2099-01-01".to_string(),
            time: "10:00".to_string(),
            appointment_type: "Emagrecimento".to_string(),
            status: Status::Pending,
        }
    }

    #[test]
    fn confirms_second_record() -> Result<()> {
        let (_dir, store) = setup();
        let mut first = booking("Ana Silva");
        let mut second = booking("Bruno Lima");
        store.append(&mut first)?;
        store.append(&mut second)?;

        assert_eq!(set_status(&store, &second.id, "Confirmada")?, Status::Confirmed);

        let read = store.read_all()?;
        assert_eq!(read.len(), 2);
        assert_eq!(read[0], first);
        assert_eq!(read[1].id, second.id);
        assert_eq!(read[1].status, Status::Confirmed);
        assert_eq!(fs::read_to_string(store.path())?.lines().count(), 3);
        Ok(())
    }

    #[test]
    fn any_status_can_follow_any_other() -> Result<()> {
        let (_dir, store) = setup();
        let mut appointment = booking("Ana Silva");
        store.append(&mut appointment)?;
        for label in ["Concluída", "Pendente", "Cancelada", "Confirmada"] {
            set_status(&store, &appointment.id, label)?;
            assert_eq!(store.read_all()?[0].status.label(), label);
        }
        Ok(())
    }

    #[test]
    fn unknown_id_leaves_file_untouched() -> Result<()> {
        let (_dir, store) = setup();
        store.append(&mut booking("Ana Silva"))?;
        let before = fs::read(store.path())?;

        let err = set_status(&store, "no-such-id", "Confirmada").unwrap_err();
        assert!(matches!(err, Error::NotFound(id) if id == "no-such-id"));
        assert_eq!(fs::read(store.path())?, before);
        Ok(())
    }

    #[test]
    fn legacy_rows_are_not_addressable() -> Result<()> {
        let (_dir, store) = setup();
        let legacy = "Maria Souza,11977776666,maria@x.com,2024-05-02,09:30,Emagrecimento\n";
        fs::write(store.path(), legacy)?;

        let err = set_status(&store, "", "Confirmada").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(fs::read_to_string(store.path())?, legacy);
        Ok(())
    }

    #[test]
    fn invalid_status_touches_nothing() -> Result<()> {
        let (_dir, store) = setup();
        let err = set_status(&store, "whatever", "Confirmed").unwrap_err();
        assert!(matches!(err, Error::InvalidStatus(s) if s == "Confirmed"));
        // no read, and no write either: the file was never created
        assert!(!store.path().exists());
        Ok(())
    }
}
