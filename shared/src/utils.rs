//! # Shared Utility Functions
//!
//! Display helpers used by the terminal client.
//!
//! ## Amount Formatting
//!
//! - [`format_amount`] - Thousands grouping with at most two decimals
//! - [`format_inr`] - [`format_amount`] with a rupee sign
//! - [`format_change`] - Signed percentage with two decimals
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_change, format_inr};
//!
//! assert_eq!(format_inr(2456.75), "₹2,456.75");
//! assert_eq!(format_change(-0.5), "-0.50%");
//! ```

/// Format an amount with `,` thousands separators and at most two decimals.
///
/// Trailing zero decimals are dropped, so whole amounts print without a fraction.
/// Non-finite input formats as `0`.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_amount;
///
/// assert_eq!(format_amount(1234567.891), "1,234,567.89");
/// assert_eq!(format_amount(100000.0), "100,000");
/// assert_eq!(format_amount(-42.5), "-42.5");
/// ```
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let rounded = (amount * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let mut out = String::with_capacity(grouped.len() + frac.len() + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an amount in rupees, as shown for the wallet balance in the header.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_inr;
///
/// assert_eq!(format_inr(0.0), "₹0");
/// assert_eq!(format_inr(5000.0), "₹5,000");
/// ```
pub fn format_inr(amount: f64) -> String {
    format!("₹{}", format_amount(amount))
}

/// Format a percentage change with an explicit sign.
pub fn format_change(percent: f64) -> String {
    format!("{:+.2}%", percent)
}
