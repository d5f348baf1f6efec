/// Formats an amount the way the classroom reads it: `R$ 1.500,00`.
pub fn money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    format!("{sign}R$ {},{fraction:02}", group_thousands(whole))
}

/// Signed percentage with one decimal, e.g. `+2.5%` or `-1.0%`.
pub fn percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

/// Button caption for a preset amount, e.g. `+R$ 500` or `-R$ 100`.
pub fn preset(amount: f64) -> String {
    let sign = if amount < 0.0 { '-' } else { '+' };
    format!("{sign}R$ {}", group_thousands(amount.abs().round() as u64))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}
