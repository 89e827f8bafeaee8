//! Prices

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Deref, Sub},
};

use rust_decimal::{Decimal, RoundingStrategy};

/// Represents a price in rupees.
///
/// Arithmetic is exact; rounding to paise only happens when a price is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    value: Decimal,
}

impl Price {
    /// A price of nothing.
    pub const ZERO: Price = Price {
        value: Decimal::ZERO,
    };

    /// Creates a new Price
    pub fn new(value: Decimal) -> Self {
        Price { value }
    }

    /// Creates a price from a whole number of rupees.
    pub fn rupees(value: i64) -> Self {
        Price {
            value: Decimal::from(value),
        }
    }

    /// The price multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Price {
            value: self.value * Decimal::from(quantity),
        }
    }

    /// The price rounded to two decimal places, midpoint away from zero.
    pub fn rounded(self) -> Decimal {
        let mut rounded = self
            .value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        rounded.rescale(2);

        rounded
    }
}

impl Deref for Price {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Price::new(value)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Self::Output {
        Price::new(self.value + rhs.value)
    }
}

impl Sub for Price {
    type Output = Price;

    fn sub(self, rhs: Price) -> Self::Output {
        Price::new(self.value - rhs.value)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Price) {
        self.value += rhs.value;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs. {}", self.rounded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(Decimal::new(12050, 2));

        assert_eq!(price.value, Decimal::new(12050, 2));
    }

    #[test]
    fn price_derefs_to_decimal() {
        let price = Price::rupees(100);

        assert_eq!(*price, Decimal::from(100));
    }

    #[test]
    fn times_multiplies_by_quantity() {
        assert_eq!(Price::rupees(50).times(3), Price::rupees(150));
        assert_eq!(Price::rupees(50).times(0), Price::ZERO);
    }

    #[test]
    fn sum_of_prices() {
        let total: Price = [Price::rupees(50), Price::rupees(50), Price::rupees(180)]
            .into_iter()
            .sum();

        assert_eq!(total, Price::rupees(280));
    }

    #[test]
    fn display_rounds_to_paise() {
        assert_eq!(Price::rupees(280).to_string(), "Rs. 280.00");
        assert_eq!(Price::new(Decimal::new(50001, 3)).to_string(), "Rs. 50.00");
        assert_eq!(Price::new(Decimal::new(14005, 3)).to_string(), "Rs. 14.01");
    }
}
