//! Variable listing display formatting
//!
//! Formats key/value pairs for terminal output as an aligned table.

/// Format key/value pairs as an aligned two-column listing
pub fn format_variable_list(entries: &[(String, String)]) -> String {
    if entries.is_empty() {
        return "No variables found.".to_string();
    }

    let key_width = entries
        .iter()
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or(3)
        .max(3);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<key_width$}  {}\n",
        "Key",
        "Value",
        key_width = key_width
    ));
    output.push_str(&format!(
        "{:-<key_width$}  {:-<5}\n",
        "",
        "",
        key_width = key_width
    ));

    for (key, value) in entries {
        output.push_str(&format!(
            "{:<key_width$}  {}\n",
            key,
            value,
            key_width = key_width
        ));
    }

    output.push_str(&format!("\n{} variable(s)", entries.len()));
    output
}
