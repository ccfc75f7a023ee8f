//! Participants spreadsheet export.
//!
//! The workbook always has a single sheet named [`SHEET_NAME`] with a header
//! row followed by one row per participant in the order they are held. Values
//! are written as-is; a numeric graduation year stays a number, empty fields
//! become blank cells.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use crate::error::RosterResult;
use crate::participant::{GraduationYear, Participant};

/// Longest text a single xlsx cell can hold, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;

pub const FILE_NAME: &str = "participants.xlsx";
pub const SHEET_NAME: &str = "Participants";
pub const EXPORT_HEADERS: [&str; 6] = [
    "Name",
    "Email",
    "College",
    "Graduation Year",
    "Branch",
    "Phone",
];

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

impl<'a> From<&'a str> for Cell<'a> {
    fn from(s: &'a str) -> Self {
        if s.is_empty() {
            return Cell::Blank;
        }

        match s.char_indices().nth(MAX_CELL_CHARS) {
            Some((end, _)) => Cell::Text(&s[..end]),
            None => Cell::Text(s),
        }
    }
}

fn cells(participant: &Participant) -> [Cell<'_>; 6] {
    let year = match &participant.graduation_year {
        Some(GraduationYear::Year(year)) => Cell::Number(*year as f64),
        Some(GraduationYear::Number(number)) => Cell::Number(*number),
        Some(GraduationYear::Label(label)) => Cell::from(label.as_str()),
        None => Cell::Blank,
    };

    [
        Cell::from(participant.username.as_str()),
        Cell::from(participant.email.as_str()),
        Cell::from(participant.college.as_str()),
        year,
        Cell::from(participant.branch.as_str()),
        Cell::from(participant.phone.as_str()),
    ]
}

fn write_row(worksheet: &mut Worksheet, row: u32, cells: [Cell<'_>; 6]) -> RosterResult<()> {
    for (col, cell) in (0u16..).zip(cells) {
        match cell {
            Cell::Text(text) => {
                worksheet.write_string(row, col, text)?;
            }
            Cell::Number(number) => {
                worksheet.write_number(row, col, number)?;
            }
            Cell::Blank => {}
        }
    }
    Ok(())
}

/// Build the participants workbook in memory.
pub fn build_workbook(participants: &[Participant]) -> RosterResult<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in (0u16..).zip(EXPORT_HEADERS) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }

    for (row, participant) in (1u32..).zip(participants) {
        write_row(worksheet, row, cells(participant))?;
    }

    worksheet.autofit();

    Ok(workbook)
}

/// Serialize the participants workbook to xlsx bytes.
pub fn to_buffer(participants: &[Participant]) -> RosterResult<Vec<u8>> {
    let mut workbook = build_workbook(participants)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write `participants.xlsx` into `dir` and return the full path.
pub fn write_file(participants: &[Participant], dir: &Path) -> RosterResult<PathBuf> {
    let path = dir.join(FILE_NAME);
    debug!(path = %path.display(), rows = participants.len(), "Writing spreadsheet");

    let mut workbook = build_workbook(participants)?;
    workbook.save(&path)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx, open_workbook, open_workbook_from_rs};
    use std::io::Cursor;

    fn alice() -> Participant {
        Participant {
            id: "p1".to_string(),
            username: "Alice".to_string(),
            email: "a@x.com".to_string(),
            college: "MIT".to_string(),
            graduation_year: Some(GraduationYear::Year(2024)),
            branch: "CS".to_string(),
            phone: "123".to_string(),
        }
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    fn read_rows(bytes: Vec<u8>) -> (Vec<String>, Vec<Vec<Data>>) {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let names = workbook.sheet_names();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        let rows = range.rows().map(|r| r.to_vec()).collect();
        (names, rows)
    }

    fn is_number(cell: &Data, expected: f64) -> bool {
        match cell {
            Data::Float(f) => *f == expected,
            Data::Int(i) => *i as f64 == expected,
            _ => false,
        }
    }

    #[test]
    fn test_export_single_participant() {
        let bytes = to_buffer(&[alice()]).unwrap();
        let (names, rows) = read_rows(bytes);

        assert_eq!(names, vec![SHEET_NAME.to_string()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            EXPORT_HEADERS.iter().map(|h| text(h)).collect::<Vec<_>>()
        );
        assert_eq!(rows[1][0], text("Alice"));
        assert_eq!(rows[1][1], text("a@x.com"));
        assert_eq!(rows[1][2], text("MIT"));
        assert!(is_number(&rows[1][3], 2024.0), "got {:?}", rows[1][3]);
        assert_eq!(rows[1][4], text("CS"));
        assert_eq!(rows[1][5], text("123"));
    }

    #[test]
    fn test_export_keeps_order_and_blanks() {
        let mut bob = alice();
        bob.id = "p2".to_string();
        bob.username = "Bob".to_string();
        bob.college = String::new();
        bob.graduation_year = Some(GraduationYear::Label("Final".to_string()));

        let bytes = to_buffer(&[alice(), bob]).unwrap();
        let (_, rows) = read_rows(bytes);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0], text("Alice"));
        assert_eq!(rows[2][0], text("Bob"));
        assert_eq!(rows[2][2], Data::Empty);
        assert_eq!(rows[2][3], text("Final"));
    }

    #[test]
    fn test_export_float_year_as_number() {
        let json = r#"{"_id":"p1","username":"A","graduationYear":2024.0}"#;
        let whole: Participant = serde_json::from_str(json).unwrap();
        let json = r#"{"_id":"p2","username":"B","graduationYear":2024.5}"#;
        let fractional: Participant = serde_json::from_str(json).unwrap();

        let (_, rows) = read_rows(to_buffer(&[whole, fractional]).unwrap());

        assert!(is_number(&rows[1][3], 2024.0), "got {:?}", rows[1][3]);
        assert!(is_number(&rows[2][3], 2024.5), "got {:?}", rows[2][3]);
    }

    #[test]
    fn test_export_truncates_oversized_cells() {
        let mut participant = alice();
        participant.college = "é".repeat(MAX_CELL_CHARS + 10);

        let (_, rows) = read_rows(to_buffer(&[participant]).unwrap());

        match &rows[1][2] {
            Data::String(s) => assert_eq!(s.chars().count(), MAX_CELL_CHARS),
            other => panic!("expected text cell, got {other:?}"),
        }
        assert_eq!(rows[1][0], text("Alice"));
    }

    #[test]
    fn test_export_empty_list_has_header_only() {
        let (_, rows) = read_rows(to_buffer(&[]).unwrap());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], text("Name"));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_file(&[alice()], dir.path()).unwrap();

        assert_eq!(path, dir.path().join("participants.xlsx"));
        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.height(), 2);
    }

    #[test]
    fn test_write_file_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        assert!(write_file(&[alice()], &missing).is_err());
    }
}
