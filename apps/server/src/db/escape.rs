//! LIKE/ILIKE pattern escaping helpers

/// Escape `%`, `_` and `\` in user input before embedding it in an
/// ILIKE pattern, so filter values match literally.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Build a `%value%` substring pattern with the value escaped.
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input))
}
