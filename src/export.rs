//! Print view and Excel export of the employee list.

use std::path::Path;

use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};

use crate::models::EmployeeRecord;
use crate::views::{age_on, format_date};

/// Columns shown in the print view and the spreadsheet.
const HEADERS: [&str; 7] = ["ID", "Full Name", "Gender", "Date of Birth", "Age", "State", "Status"];

/// Printable cell values for one employee.
fn row_cells(emp: &EmployeeRecord, today: NaiveDate) -> [String; 7] {
    [
        format!("#{}", emp.id),
        emp.full_name.clone(),
        emp.gender.to_string(),
        format_date(emp.date_of_birth),
        format!("{} years", age_on(emp.date_of_birth, today)),
        emp.state.clone(),
        status_label(emp.is_active).to_string(),
    ]
}

fn status_label(is_active: bool) -> &'static str {
    if is_active { "Active" } else { "Inactive" }
}

/// Render employees as a plain-text table for printing.
pub fn render_print_view(employees: &[&EmployeeRecord], today: NaiveDate) -> String {
    if employees.is_empty() {
        return "No employees found\n".to_string();
    }

    let rows: Vec<[String; 7]> = employees.iter().map(|emp| row_cells(emp, today)).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS.iter().map(|h| h.to_string()), &widths);
    push_line(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
    for row in rows {
        push_line(&mut out, row.into_iter(), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize; 7]) {
    let line: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

/// Export employees to Excel file.
pub fn export_employees_to_excel(
    employees: &[&EmployeeRecord],
    today: NaiveDate,
    path: &Path,
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Employees")?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 16)?; // ID
    worksheet.set_column_width(1, 30)?; // Full Name
    worksheet.set_column_width(2, 10)?; // Gender
    worksheet.set_column_width(3, 20)?; // Date of Birth
    worksheet.set_column_width(4, 10)?; // Age
    worksheet.set_column_width(5, 18)?; // State
    worksheet.set_column_width(6, 10)?; // Status

    // Data rows
    for (idx, emp) in employees.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_number(row, 0, emp.id as f64)?;
        worksheet.write_string(row, 1, &emp.full_name)?;
        worksheet.write_string(row, 2, emp.gender.name())?;
        worksheet.write_string(row, 3, emp.date_of_birth.to_string())?;
        worksheet.write_number(row, 4, age_on(emp.date_of_birth, today) as f64)?;
        worksheet.write_string(row, 5, &emp.state)?;
        worksheet.write_string(row, 6, status_label(emp.is_active))?;
    }

    // Autofilter
    if !employees.is_empty() {
        let last_row = employees.len() as u32;
        worksheet.autofilter(0, 0, last_row, 6)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::seed_employees;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_print_view_layout() {
        let seed = seed_employees();
        let refs: Vec<&EmployeeRecord> = seed.iter().take(2).collect();
        let text = render_print_view(&refs, today());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].ends_with("Status"));
        assert!(lines[1].starts_with("--"));
        assert!(lines[2].starts_with("#1 "));
        assert!(lines[2].contains("Sarah Johnson"));
        assert!(lines[2].contains("May 15, 1990"));
        assert!(lines[2].contains("35 years"));
        assert!(lines[2].ends_with("Active"));
        assert!(lines[3].contains("New York"));
    }

    #[test]
    fn test_print_view_empty() {
        assert_eq!(render_print_view(&[], today()), "No employees found\n");
    }

    #[test]
    fn test_export_filename() {
        let name = generate_export_filename("employees");
        assert!(name.starts_with("employees_"));
        assert!(name.ends_with(".xlsx"));
        assert_eq!(name.len(), "employees_".len() + 15 + ".xlsx".len());
    }

    #[test]
    fn test_export_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.xlsx");
        let seed = seed_employees();
        let refs: Vec<&EmployeeRecord> = seed.iter().collect();

        export_employees_to_excel(&refs, today(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip archive
        assert_eq!(&bytes[..2], b"PK");
    }
}
