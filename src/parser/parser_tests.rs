use crate::parser::agenda::Agenda;
use crate::parser::appointments::{Appointment, AppointmentType, Status};
use crate::parser::codec::{decode, encode};
use anyhow::Result;

const DATA_1: &str = r#"id,nome,telefone,email,data,horario,tipo_consulta,status
       a1,Ana Silva,11988887777,ana@x.com,2099-01-01,10:00,Emagrecimento,Pendente
       Maria Souza,11977776666,maria@x.com,2024-05-02,09:30,Reeducação Alimentar

       b2,Bruno Lima,11955554444,bruno@x.com,2099-02-03,15:30,Nutrição Esportiva,Confirmada
       broken,row,with,four
       c3,Carla Dias,11933332222,carla@x.com,2099-03-04,08:00,Emagrecimento,Arquivada
       d4,Davi Rocha,11922221111,davi@x.com,2099-04-05,11:00,Emagrecimento,Concluída,extra"#;

#[allow(clippy::too_many_arguments)]
fn appointment(
    id: &str,
    name: &str,
    phone: &str,
    email: &str,
    date: &str,
    time: &str,
    kind: &str,
    status: Status,
) -> Appointment {
    Appointment {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        appointment_type: kind.to_string(),
        status,
    }
}

fn data_1_expected() -> Vec<Appointment> {
    vec![
        appointment(
            "a1",
            "Ana Silva",
            "11988887777",
            "ana@x.com",
            "2099-01-01",
            "10:00",
            "Emagrecimento",
            Status::Pending,
        ),
        appointment(
            "",
            "Maria Souza",
            "11977776666",
            "maria@x.com",
            "2024-05-02",
            "09:30",
            "Reeducação Alimentar",
            Status::Pending,
        ),
        appointment(
            "b2",
            "Bruno Lima",
            "11955554444",
            "bruno@x.com",
            "2099-02-03",
            "15:30",
            "Nutrição Esportiva",
            Status::Confirmed,
        ),
        appointment(
            "c3",
            "Carla Dias",
            "11933332222",
            "carla@x.com",
            "2099-03-04",
            "08:00",
            "Emagrecimento",
            Status::Pending,
        ),
    ]
}

const DATA_1_EXPECTED_REPORT: [&str; 5] = [
    "id,name,phone,email,date,time,appointment_type,status",
    "a1,Ana Silva,11988887777,ana@x.com,2099-01-01,10:00,Emagrecimento,Pendente",
    ",Maria Souza,11977776666,maria@x.com,2024-05-02,09:30,Reeducação Alimentar,Pendente",
    "b2,Bruno Lima,11955554444,bruno@x.com,2099-02-03,15:30,Nutrição Esportiva,Confirmada",
    "c3,Carla Dias,11933332222,carla@x.com,2099-03-04,08:00,Emagrecimento,Pendente",
];

fn agenda_of(data: &str) -> Agenda {
    Agenda::from(data.lines().filter_map(decode).collect::<Vec<_>>())
}

/// helper function to test that the decoded agenda's report matches the expected lines, in order
fn test_data(data: &str, data_expected: Vec<&str>) -> Result<()> {
    let agenda = agenda_of(data);
    let mut serialized_result = vec![];
    agenda.serialize_to_writer(&mut serialized_result)?;
    let serialized_result_utf8 = String::from_utf8(serialized_result)?;
    assert_eq!(
        data_expected,
        serialized_result_utf8.lines().collect::<Vec<&str>>()
    );
    Ok(())
}

/// check that decoding keeps file order, skips header/blank/malformed lines
/// and normalizes statuses
#[test]
pub fn test_deserialize() -> Result<()> {
    let agenda = agenda_of(DATA_1);
    assert_eq!(agenda.appointments, data_1_expected());
    Ok(())
}

/// check the report serialization
#[test]
pub fn test_serialize() -> Result<()> {
    test_data(DATA_1, DATA_1_EXPECTED_REPORT.to_vec())
}

/// check that a header-only file is empty
#[test]
pub fn test_empty() -> Result<()> {
    let agenda = agenda_of("id,nome,telefone,email,data,horario,tipo_consulta,status\n");
    assert!(agenda.is_empty());
    test_data("", vec!["id,name,phone,email,date,time,appointment_type,status"])
}

/// check that the summary counts every status, zeros included
#[test]
pub fn test_summary() -> Result<()> {
    let summary = agenda_of(DATA_1).summary();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.count(Status::Pending), 3);
    assert_eq!(summary.count(Status::Confirmed), 1);
    assert_eq!(summary.count(Status::Cancelled), 0);
    assert_eq!(summary.count(Status::Completed), 0);
    assert_eq!(summary.by_status.len(), Status::ALL.len());
    Ok(())
}

/// check that lookups by id ignore legacy rows
#[test]
pub fn test_find() -> Result<()> {
    let agenda = agenda_of(DATA_1);
    assert_eq!(agenda.find("b2").map(|a| a.name.as_str()), Some("Bruno Lima"));
    assert!(agenda.find("").is_none());
    assert!(agenda.find("zz").is_none());
    Ok(())
}

/// check the typed accessors on decoded rows
#[test]
pub fn test_typed_fields() -> Result<()> {
    let agenda = agenda_of(DATA_1);
    let first = &agenda.appointments[0];
    assert_eq!(first.kind(), Some(AppointmentType::WeightLoss));
    assert_eq!(
        first.parsed_date(),
        chrono::NaiveDate::from_ymd_opt(2099, 1, 1)
    );
    Ok(())
}

/// check that re-encoding every decoded row reproduces the same records
#[test]
pub fn test_reencode() -> Result<()> {
    for mut original in data_1_expected().into_iter().filter(|a| a.is_addressable()) {
        let expected = original.clone();
        let line = encode(&mut original)?;
        assert_eq!(decode(&line), Some(expected));
    }
    Ok(())
}
