//! Go code generation modules.

pub mod client;
pub mod introspect;
pub mod model;
pub mod server;
pub mod signals;
pub mod types;

pub use client::ClientGenerator;
pub use introspect::IntrospectGenerator;
pub use model::{InterfaceModel, Model};
pub use server::ServerGenerator;
pub use signals::SignalHelperGenerator;
pub use types::go_type;

/// Quotes a string as a Go interpreted string literal.
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Renders `name value` rows with the values aligned the way gofmt
/// aligns struct fields and const specs.
#[must_use]
pub fn aligned(rows: &[(String, String)], indent: &str) -> String {
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut output = String::new();
    for (name, value) in rows {
        output.push_str(&format!("{indent}{name:<width$} {value}\n"));
    }
    output
}

/// Appends a `Deprecated:` paragraph to a doc comment when requested.
#[must_use]
pub fn doc_comment(summary: &str, deprecated: bool, indent: &str) -> String {
    let mut output = format!("{indent}// {summary}\n");
    if deprecated {
        output.push_str(&format!("{indent}//\n"));
        output.push_str(&format!(
            "{indent}// Deprecated: marked with org.freedesktop.DBus.Deprecated.\n"
        ));
    }
    output
}
