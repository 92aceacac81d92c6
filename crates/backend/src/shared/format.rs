/// Integer with pt-BR thousands separators (dots)
///
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Brazilian currency notation: `R$ 44.200,00`
///
/// ```
/// use backend::shared::format::format_money;
/// assert_eq!(format_money(1500.0), "R$ 1.500,00");
/// assert_eq!(format_money(-416.666), "-R$ 416,67");
/// ```
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let units = (cents / 100) as usize;
    let fraction = cents % 100;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, format_number(units), fraction)
}

/// A [0, 1] fraction as a percentage with one decimal: `0.65 -> 65,0%`
pub fn format_percent(fraction: f64) -> String {
    format_decimal(fraction * 100.0, 1) + "%"
}

/// Fixed decimals with a comma separator, no thousands grouping.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234), "1.234");
        assert_eq!(format_number(1234567), "1.234.567");
        assert_eq!(format_number(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "R$ 0,00");
        assert_eq!(format_money(44200.0), "R$ 44.200,00");
        assert_eq!(format_money(1200.5), "R$ 1.200,50");
        assert_eq!(format_money(-0.001), "R$ 0,00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.65), "65,0%");
        assert_eq!(format_percent(0.5), "50,0%");
        assert_eq!(format_percent(0.0), "0,0%");
        assert_eq!(format_decimal(3.3936, 2), "3,39");
    }
}
