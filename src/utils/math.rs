/// `numerator / denominator * 100`, left non-finite when the denominator is zero.
pub fn ratio_pct(numerator: f64, denominator: f64) -> f64 {
    numerator / denominator * 100.0
}

/// Round half away from zero to two decimals, the precision figures are shown at.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fixed-decimal rendering with thousands separators, e.g. `-13,803.00`.
///
/// Non-finite values render as `n/a` so a degenerate ratio never breaks a row.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Currency with an explicit sign for gains, e.g. `+$1,797.00` / `-$2,013.00`.
pub fn format_signed_currency(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let sign = if value >= 0.0 { "+" } else { "-" };
    format!("{sign}${}", format_number(value.abs(), 2))
}

pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    if value < 0.0 {
        return format!("-${}", format_number(value.abs(), 2));
    }
    format!("${}", format_number(value, 2))
}

pub fn format_pct(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{}%", format_number(value, 2))
}
