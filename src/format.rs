//! Brazilian number formatting (pt_BR): `.` groups thousands, `,` marks decimals.

const NBSP: char = '\u{00A0}';

/// Format an amount as Brazilian reais: `R$ 1.234,56`, with a non-breaking space
/// after the symbol and a leading `-` for negative amounts.
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return format!("R${}{}", NBSP, value);
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}R${}{},{:02}",
        sign,
        NBSP,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Integer with pt_BR thousands separators: `12.345`.
pub fn format_integer(value: usize) -> String {
    group_thousands(value as u64)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
