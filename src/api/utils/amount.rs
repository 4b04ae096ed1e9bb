use alloy::primitives::U256;

/// Renders `raw / 10^decimals` as a plain decimal string.
///
/// The scaling is done on the digit string, so any `U256` and any `u8`
/// decimal count render exactly and never in scientific notation. Trailing
/// zeros and a dangling decimal point are stripped. A non-zero amount that
/// does not exceed one base unit is shown as the dust marker
/// `< 0.0…01` instead of a value that reads like zero.
pub fn format_amount(raw: U256, decimals: u8) -> String {
    if raw.is_zero() {
        return "0".to_string();
    }

    let decimals = decimals as usize;
    if decimals == 0 {
        return raw.to_string();
    }
    if raw <= U256::from(1) {
        return dust_marker(decimals);
    }

    let digits = format!("{:0>width$}", raw.to_string(), width = decimals + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

fn dust_marker(decimals: usize) -> String {
    format!("< 0.{}1", "0".repeat(decimals - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 18, "0")]
    #[case(0, 0, "0")]
    #[case(1_500_000_000_000_000_000, 18, "1.5")]
    #[case(1_000_000_000_000_000_000, 18, "1")]
    #[case(2, 18, "0.000000000000000002")]
    #[case(123_456_789, 6, "123.456789")]
    #[case(1_000_000, 6, "1")]
    #[case(10, 0, "10")]
    #[case(1, 0, "1")]
    #[case(250, 2, "2.5")]
    #[case(12_000_000_000_000_000_000_000_000, 18, "12000000")]
    fn formats_scaled_amounts(#[case] raw: u128, #[case] decimals: u8, #[case] expected: &str) {
        assert_eq!(format_amount(U256::from(raw), decimals), expected);
    }

    #[rstest]
    #[case(18, "< 0.000000000000000001")]
    #[case(6, "< 0.000001")]
    #[case(1, "< 0.1")]
    fn single_base_unit_renders_the_dust_marker(#[case] decimals: u8, #[case] expected: &str) {
        assert_eq!(format_amount(U256::from(1), decimals), expected);
    }

    #[test]
    fn huge_values_stay_in_positional_notation() {
        let formatted = format_amount(U256::MAX, 18);

        assert!(!formatted.contains('e'));
        assert!(formatted.starts_with("115792089237316195423570985008687907853269984665640564039457"));
        assert_eq!(formatted.split('.').nth(1).map(str::len), Some(18));
    }

    #[test]
    fn decimals_beyond_the_digit_count_pad_with_zeros() {
        let formatted = format_amount(U256::from(25), 80);

        assert_eq!(formatted, format!("0.{}25", "0".repeat(78)));
    }
}
