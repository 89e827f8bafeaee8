//! Bill

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Color, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::prices::Price;

/// Errors that can occur when printing a bill.
#[derive(Debug, Error)]
pub enum BillError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Tax and discount rules applied to a subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillPolicy {
    tax_rate: Percentage,
    discount_rate: Percentage,
    discount_threshold: Price,
}

impl Default for BillPolicy {
    /// 5% tax, with 10% off subtotals above Rs. 500.
    fn default() -> Self {
        Self {
            tax_rate: Percentage::from(Decimal::new(5, 2)),
            discount_rate: Percentage::from(Decimal::new(10, 2)),
            discount_threshold: Price::rupees(500),
        }
    }
}

impl BillPolicy {
    /// Create a policy. The discount applies only when the subtotal is strictly above the
    /// threshold.
    pub fn new(tax_rate: Percentage, discount_rate: Percentage, discount_threshold: Price) -> Self {
        Self {
            tax_rate,
            discount_rate,
            discount_threshold,
        }
    }

    /// Tax rate as a fraction
    pub fn tax_rate(&self) -> Percentage {
        self.tax_rate
    }

    /// Discount rate as a fraction
    pub fn discount_rate(&self) -> Percentage {
        self.discount_rate
    }

    /// Subtotal that must be exceeded before the discount applies
    pub fn discount_threshold(&self) -> Price {
        self.discount_threshold
    }

    /// Compute the bill for a subtotal. Amounts are exact; nothing is rounded.
    pub fn compute(&self, subtotal: Price) -> Bill {
        let tax = percent_of(self.tax_rate, subtotal);

        let discount = if subtotal > self.discount_threshold {
            percent_of(self.discount_rate, subtotal)
        } else {
            Price::ZERO
        };

        Bill {
            subtotal,
            tax,
            discount,
            final_amount: subtotal + tax - discount,
            tax_rate: self.tax_rate,
            discount_rate: self.discount_rate,
        }
    }
}

/// Compute a bill with the default policy.
pub fn compute_bill(subtotal: Price) -> Bill {
    BillPolicy::default().compute(subtotal)
}

fn percent_of(rate: Percentage, amount: Price) -> Price {
    Price::new(rate * *amount)
}

/// Tax and discount breakdown for a subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bill {
    subtotal: Price,
    tax: Price,
    discount: Price,
    final_amount: Price,
    tax_rate: Percentage,
    discount_rate: Percentage,
}

impl Bill {
    /// Total before tax and discount
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Tax on the subtotal
    pub fn tax(&self) -> Price {
        self.tax
    }

    /// Discount on the subtotal, zero when the threshold wasn't exceeded
    pub fn discount(&self) -> Price {
        self.discount
    }

    /// Amount payable
    pub fn final_amount(&self) -> Price {
        self.final_amount
    }

    /// Whether a discount was given
    pub fn has_discount(&self) -> bool {
        self.discount > Price::ZERO
    }

    /// Prints the bill summary as a table. The final amount is bolded with ANSI escapes
    /// when `bold` is set, so only pass it for terminal output.
    ///
    /// # Errors
    ///
    /// Returns an error if the output can't be written.
    pub fn write_to(&self, mut out: impl io::Write, bold: bool) -> Result<(), BillError> {
        let mut builder = Builder::default();

        builder.push_record(["Bill Summary", ""]);
        builder.push_record(["Subtotal".to_string(), self.subtotal.to_string()]);
        builder.push_record([
            format!("Tax ({}%)", percent_points(self.tax_rate)),
            self.tax.to_string(),
        ]);

        if self.has_discount() {
            builder.push_record([
                format!("Discount ({}%)", percent_points(self.discount_rate)),
                format!("-{}", self.discount),
            ]);
        }

        let final_row = if self.has_discount() { 4 } else { 3 };

        builder.push_record(["Final Amount".to_string(), self.final_amount.to_string()]);

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);
        theme.insert_horizontal_line(final_row, separator);

        table.with(theme);
        table.modify(Columns::new(1..2), Alignment::right());

        if bold {
            table.modify((final_row, 0), Color::BOLD);
            table.modify((final_row, 1), Color::BOLD);
        }

        writeln!(out, "{table}")?;

        Ok(())
    }
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED)
        .round_dp(2)
        .normalize()
}
