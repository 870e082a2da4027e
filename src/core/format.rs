use super::types::MonthsAway;

/// Renders a whole-pound amount with thousands separators, e.g. `£12,345`.
pub fn money(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && rounded > 0 {
        format!("-£{grouped}")
    } else {
        format!("£{grouped}")
    }
}

pub fn percent(value: f64) -> String {
    format!("{:.0}%", if value.is_finite() { value } else { 0.0 })
}

impl MonthsAway {
    pub fn describe(self) -> String {
        match self {
            MonthsAway::Months(0) => "Already there".to_string(),
            MonthsAway::Months(1) => "1 month".to_string(),
            MonthsAway::Months(m) if m < 12 => format!("{m} months"),
            MonthsAway::Months(m) => {
                let years = m / 12;
                let rem = m % 12;
                let year_part = if years == 1 {
                    "1 year".to_string()
                } else {
                    format!("{years} years")
                };
                match rem {
                    0 => year_part,
                    1 => format!("{year_part} 1 month"),
                    _ => format!("{year_part} {rem} months"),
                }
            }
            MonthsAway::Unreachable => "Not reachable at the current savings rate".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0.0), "£0");
        assert_eq!(money(999.4), "£999");
        assert_eq!(money(1_000.0), "£1,000");
        assert_eq!(money(1_234_567.0), "£1,234,567");
        assert_eq!(money(-25_000.0), "-£25,000");
        assert_eq!(money(f64::NAN), "£0");
    }

    #[test]
    fn months_away_describes_spans() {
        assert_eq!(MonthsAway::Months(0).describe(), "Already there");
        assert_eq!(MonthsAway::Months(7).describe(), "7 months");
        assert_eq!(MonthsAway::Months(12).describe(), "1 year");
        assert_eq!(MonthsAway::Months(26).describe(), "2 years 2 months");
        assert!(MonthsAway::Unreachable.describe().starts_with("Not reachable"));
    }
}
