//! Small display formatting helpers shared by pages and the terminal view.

/// Render an integer with `,` thousands separators (`52341` -> `52,341`).
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Playtime label used on library cards (`1243` -> `1,243 hrs`).
pub fn hours(value: u32) -> String {
    format!("{} hrs", thousands(u64::from(value)))
}
