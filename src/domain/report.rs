// Report file naming

pub const REPORT_SUFFIX: &str = "_report.pdf";

/// Replace every non-alphanumeric character with `_` and lower-case the rest.
pub fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

pub fn report_file_name(file_name: &str) -> String {
    format!("{}{}", sanitize_file_name(file_name), REPORT_SUFFIX)
}
