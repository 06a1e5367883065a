//! Colored terminal output helpers.
//!
//! All user-facing status output goes through these functions so we get
//! consistent styling across every command. Status lines go to stderr
//! when stdout carries a JSON body or a recovered secret.

use comfy_table::{ContentArrangement, Table};
use console::style;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    eprintln!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    eprintln!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    eprintln!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of payload fields and their decoded sizes.
///
/// `rows` are (field name, byte length) pairs; `None` means the field is
/// absent from the file.
pub fn print_field_table(rows: &[(&str, Option<usize>)]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Bytes"]);

    for (name, len) in rows {
        let len = match len {
            Some(n) => n.to_string(),
            None => style("missing").red().to_string(),
        };
        table.add_row(vec![name.to_string(), len]);
    }

    println!("{table}");
}
