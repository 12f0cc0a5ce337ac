//! Aligned-column rendering for search and list output.

use passfile_core::Database;

const HEADERS: [&str; 6] = ["Service Name", "ID", "Password", "E-Mail", "URL", "Text"];

/// Marker shown when a stored password fails to decrypt.
///
/// The engines collapse decrypt failures to an empty string, so an empty
/// password cell means the ciphertext could not be recovered.
const DECRYPT_FAILED: &str = "(decryption failed)";

/// Render records as aligned columns with a header and a dash rule.
pub fn render(results: &Database) -> String {
    let mut rows: Vec<[String; 6]> = Vec::new();
    for (service_name, records) in results {
        for record in records {
            rows.push([
                service_name.clone(),
                record.id.clone().unwrap_or_default(),
                display_pass(record.pass.as_deref()),
                record.mail.clone().unwrap_or_default(),
                record.url.clone().unwrap_or_default(),
                record.text.clone().unwrap_or_default(),
            ]);
        }
    }

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    push_row(&mut out, &widths.map(|width| "-".repeat(width)), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn display_pass(pass: Option<&str>) -> String {
    match pass {
        None => String::new(),
        Some("") => DECRYPT_FAILED.to_string(),
        Some(pass) => pass.to_string(),
    }
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}
