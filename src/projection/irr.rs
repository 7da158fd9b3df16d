//! Internal Rate of Return (IRR) for projection schedules
//!
//! Used to express any schedule (SIP, RD, SWP...) as a single effective
//! annual yield so different instruments can be compared side by side.

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;
const MIN_PERIODIC_RATE: f64 = -0.99;
const MAX_PERIODIC_RATE: f64 = 10.0;

/// Calculate the effective annual IRR of evenly spaced cashflows
///
/// Newton-Raphson on the periodic rate, falling back to bisection when the
/// derivative vanishes or iteration does not settle.
///
/// # Arguments
/// * `cashflows` - Cashflow at the start of each period (negative = paid in)
/// * `periods_per_year` - 12 for monthly schedules, 1 for yearly
///
/// # Returns
/// * `Option<f64>` - Annual rate as a decimal (0.08 for 8%), or None if the
///   flows never change sign or no root is bracketed
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cashflows.is_empty() || periods_per_year == 0 {
        return None;
    }

    if cashflows.iter().all(|cf| cf.abs() < TOLERANCE) {
        return Some(0.0);
    }

    let has_inflow = cashflows.iter().any(|&cf| cf > TOLERANCE);
    let has_outflow = cashflows.iter().any(|&cf| cf < -TOLERANCE);
    if !has_inflow || !has_outflow {
        return None;
    }

    let mut rate = 0.05 / periods_per_year as f64;

    for _ in 0..MAX_ITERATIONS {
        let (npv, slope) = npv_and_slope(cashflows, rate);

        if slope.abs() < 1e-20 {
            return bisect(cashflows, periods_per_year);
        }

        let next = (rate - npv / slope).clamp(MIN_PERIODIC_RATE, MAX_PERIODIC_RATE);

        if (next - rate).abs() < TOLERANCE {
            return Some(annualize(next, periods_per_year));
        }

        rate = next;
    }

    bisect(cashflows, periods_per_year)
}

fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

/// NPV and its derivative with respect to the periodic rate
fn npv_and_slope(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut slope = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            slope -= (t as f64) * cf / (discount * (1.0 + rate));
        }
    }

    (npv, slope)
}

fn npv(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

fn bisect(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    let mut low = MIN_PERIODIC_RATE;
    let mut high = MAX_PERIODIC_RATE;
    let mut npv_low = npv(cashflows, low);

    if npv_low * npv(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(cashflows, mid);

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(annualize(mid, periods_per_year));
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_year_monthly() {
        // Rs 1000 in, Rs 1100 out twelve months later
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1100.0);

        let irr = calculate_irr(&cashflows, 12).unwrap();
        assert!((irr - 0.10).abs() < 0.001, "Expected ~10% IRR, got {}", irr);
    }

    #[test]
    fn test_no_sign_change() {
        assert_eq!(calculate_irr(&[-100.0, -100.0], 12), None);
        assert_eq!(calculate_irr(&[], 12), None);
    }

    #[test]
    fn test_zero_growth() {
        // Twelve deposits of 100 returned as 1200
        let mut cashflows = vec![-100.0; 12];
        cashflows.push(1200.0);

        let irr = calculate_irr(&cashflows, 12).unwrap();
        assert!(irr.abs() < 1e-6, "Expected 0% IRR, got {}", irr);
    }
}
