//! One appointment per line, comma separated, no quoting or escaping.
//!
//! Two row layouts are understood on read: the current eight column layout
//! and the legacy six column one. Writes always use the current layout.
//! Rows end at `\n`, `\r\n` or a lone `\r`.

use crate::error::Result;
use crate::parser::appointments::{Appointment, LegacyAppointment};
use csv::{
    ByteRecord, QuoteStyle, Reader, ReaderBuilder, StringRecord, Terminator, Trim, Writer,
    WriterBuilder,
};
use std::io::{Read, Write};
use uuid::Uuid;

pub const DELIMITER: u8 = b',';

/// Header written at the top of every data file.
pub const HEADER: [&str; 8] = [
    "id",
    "nome",
    "telefone",
    "email",
    "data",
    "horario",
    "tipo_consulta",
    "status",
];

/// Leading column labels that mark a header row, lowercased.
const HEADER_LABELS: [&str; 3] = ["id", "nome", "name"];

pub const CURRENT_WIDTH: usize = 8;
pub const LEGACY_WIDTH: usize = 6;

/// A known row layout: raw fields in, appointment out, or `None` when the row
/// is not of this shape.
type Shape = fn(&StringRecord) -> Option<Appointment>;

/// Tried in order, first match wins.
const SHAPES: [Shape; 2] = [current_shape, legacy_shape];

fn current_shape(record: &StringRecord) -> Option<Appointment> {
    if record.len() != CURRENT_WIDTH {
        return None;
    }
    record.deserialize(None).ok()
}

fn legacy_shape(record: &StringRecord) -> Option<Appointment> {
    if record.len() != LEGACY_WIDTH {
        return None;
    }
    record
        .deserialize::<LegacyAppointment>(None)
        .ok()
        .map(Appointment::from)
}

/// A row whose first column is one of the header labels, case-insensitive.
pub fn is_header(record: &StringRecord) -> bool {
    record.len() > 1
        && record
            .get(0)
            .map(str::to_lowercase)
            .is_some_and(|first| HEADER_LABELS.contains(&first.as_str()))
}

/// Whitespace around the row as a whole is dropped, inner fields are kept
/// as written.
fn strip_edges(record: &StringRecord) -> StringRecord {
    let last = record.len().saturating_sub(1);
    record
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let field = if i == 0 { field.trim_start() } else { field };
            if i == last {
                field.trim_end()
            } else {
                field
            }
        })
        .collect()
}

/// csv reader configured for the data file layout.
pub fn reader<R: Read>(r: R) -> Reader<R> {
    // better to be explicit in case library defaults change
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::None)
        .delimiter(DELIMITER)
        .terminator(Terminator::CRLF)
        .from_reader(r)
}

/// Decodes one raw row. Blank rows, header rows, rows that are not valid
/// UTF-8 and rows of an unknown width yield `None`.
pub fn decode_record(record: &ByteRecord) -> Option<Appointment> {
    let line = record.position().map(|pos| pos.line());
    let record = match StringRecord::from_byte_record(record.clone()) {
        Ok(record) => strip_edges(&record),
        Err(_) => {
            tracing::debug!(?line, "skipping row that is not valid utf-8");
            return None;
        }
    };
    if (record.len() == 1 && record[0].is_empty()) || is_header(&record) {
        return None;
    }
    let decoded = SHAPES.iter().find_map(|shape| shape(&record));
    if decoded.is_none() {
        tracing::debug!(?line, fields = record.len(), "skipping malformed row");
    }
    decoded
}

/// Decodes every row of `r`, in order. Only I/O failures are errors.
pub fn decode_all<R: Read>(r: R) -> Result<Vec<Appointment>> {
    let mut appointments = vec![];
    for record in reader(r).byte_records() {
        if let Some(appointment) = decode_record(&record?) {
            appointments.push(appointment);
        }
    }
    Ok(appointments)
}

/// Decodes one line of the data file.
pub fn decode(line: &str) -> Option<Appointment> {
    let record = reader(line.as_bytes()).byte_records().next()?.ok()?;
    decode_record(&record)
}

/// Replaces anything that would split a row or a column with a space, then
/// trims.
pub fn sanitize(value: &str) -> String {
    value.replace([',', '\n', '\r'], " ").trim().to_string()
}

/// Gives the appointment an id if it has none.
/// Mutates `appointment`; the status is always valid by construction.
pub fn finalize(appointment: &mut Appointment) {
    if appointment.id.is_empty() {
        appointment.id = Uuid::new_v4().to_string();
    }
}

/// csv writer configured for the data file layout.
pub fn writer<W: Write>(w: W) -> Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(w)
}

/// finalizes `appointment` and writes it as one row
pub fn encode_into<W: Write>(wtr: &mut Writer<W>, appointment: &mut Appointment) -> Result<()> {
    finalize(appointment);
    let fields = appointment.fields().map(sanitize);
    wtr.write_record(&fields)?;
    Ok(())
}

/// Encodes one appointment as a newline terminated line.
pub fn encode(appointment: &mut Appointment) -> Result<String> {
    let mut wtr = writer(vec![]);
    encode_into(&mut wtr, appointment)?;
    let bytes = wtr.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
