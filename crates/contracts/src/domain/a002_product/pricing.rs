//! Price helpers for the pricing tab and the product table.

/// `(price - cost) / cost * 100`; undefined for a non-positive cost.
pub fn profit_margin(cost: f64, price: f64) -> Option<f64> {
    (cost > 0.0).then(|| (price - cost) / cost * 100.0)
}

/// Price that yields `margin` percent over `cost`.
pub fn price_for_margin(cost: f64, margin: f64) -> f64 {
    round2(cost * (1.0 + margin / 100.0))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin() {
        assert_eq!(profit_margin(40.0, 50.0), Some(25.0));
        assert_eq!(profit_margin(0.0, 50.0), None);
        assert_eq!(profit_margin(10.0, 5.0), Some(-50.0));
    }

    #[test]
    fn test_price_for_margin() {
        assert_eq!(price_for_margin(40.0, 25.0), 50.0);
        assert_eq!(price_for_margin(3.0, 33.333), 4.0);
    }
}
