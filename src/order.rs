//! Orders
//!
//! An [`OrderAccumulator`] collects units while the customer is ordering. Checkout turns it
//! into an immutable [`Order`]; the next order starts from a fresh accumulator.

use std::fmt;

use jiff::civil::DateTime;

use crate::{bill::Bill, menu::MenuKey, prices::Price};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderStatus {
    /// Items are being added
    #[default]
    Placed,

    /// Billed and logged
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Placed => f.write_str("PLACED"),
            OrderStatus::Completed => f.write_str("COMPLETED"),
        }
    }
}

/// Running list of units added to the current order, and their total.
#[derive(Debug, Clone, Default)]
pub struct OrderAccumulator {
    items: Vec<MenuKey>,
    total: Price,
    status: OrderStatus,
}

impl OrderAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit at the given price.
    pub fn add(&mut self, key: MenuKey, price: Price) {
        self.items.push(key);
        self.total += price;
    }

    /// Sum of the prices of every unit added
    pub fn total(&self) -> Price {
        self.total
    }

    /// Units added, one entry per unit
    pub fn items(&self) -> &[MenuKey] {
        &self.items
    }

    /// Current status, always [`OrderStatus::Placed`] while accumulating.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Check if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every unit and reset the total.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Price::ZERO;
        self.status = OrderStatus::Placed;
    }
}

/// One line of a finalised order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    key: MenuKey,
    name: String,
    quantity: u32,
    unit_price: Price,
}

impl OrderLine {
    /// Create an order line.
    pub fn new(key: MenuKey, name: impl Into<String>, quantity: u32, unit_price: Price) -> Self {
        Self {
            key,
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Menu item key
    pub fn key(&self) -> MenuKey {
        self.key
    }

    /// Item name at the time of ordering
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units ordered
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of one unit
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Unit price times quantity
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// A completed, billed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: u64,
    placed_at: DateTime,
    lines: Vec<OrderLine>,
    bill: Bill,
    status: OrderStatus,
}

impl Order {
    /// Create a completed order.
    pub fn new(id: u64, placed_at: DateTime, lines: Vec<OrderLine>, bill: Bill) -> Self {
        Self {
            id,
            placed_at,
            lines,
            bill,
            status: OrderStatus::Completed,
        }
    }

    /// Order number within the session
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Local time the order was checked out
    pub fn placed_at(&self) -> DateTime {
        self.placed_at
    }

    /// Order lines, in the order items were first added
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Tax and discount breakdown
    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    /// Sum of the line totals
    pub fn total(&self) -> Price {
        self.bill.subtotal()
    }

    /// Always [`OrderStatus::Completed`]
    pub fn status(&self) -> OrderStatus {
        self.status
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order ID: {}", self.id)?;

        for line in &self.lines {
            writeln!(f, "{} x {}", line.name, line.quantity)?;
        }

        writeln!(f, "Total: {}", self.total())?;
        writeln!(f, "Status: {}", self.status)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use slotmap::SlotMap;

    use super::*;
    use crate::bill::compute_bill;

    fn keys() -> (MenuKey, MenuKey) {
        let mut map: SlotMap<MenuKey, ()> = SlotMap::with_key();

        (map.insert(()), map.insert(()))
    }

    #[test]
    fn accumulator_total_is_sum_of_added_prices() {
        let (coke, tikka) = keys();
        let mut acc = OrderAccumulator::new();

        acc.add(coke, Price::rupees(50));
        acc.add(coke, Price::rupees(50));
        acc.add(tikka, Price::rupees(180));

        assert_eq!(acc.total(), Price::rupees(280));
        assert_eq!(acc.items(), [coke, coke, tikka]);
        assert_eq!(acc.status(), OrderStatus::Placed);
    }

    #[test]
    fn accumulator_clear_resets_everything() {
        let (coke, _) = keys();
        let mut acc = OrderAccumulator::new();

        acc.add(coke, Price::rupees(50));
        acc.clear();

        assert!(acc.is_empty());
        assert_eq!(acc.total(), Price::ZERO);
        assert_eq!(acc.status(), OrderStatus::Placed);
    }

    #[test]
    fn line_total_multiplies_quantity() {
        let (coke, _) = keys();
        let line = OrderLine::new(coke, "Coke", 3, Price::rupees(50));

        assert_eq!(line.line_total(), Price::rupees(150));
    }

    #[test]
    fn order_summary() {
        let (coke, tikka) = keys();

        let order = Order::new(
            7,
            date(2026, 10, 19).at(13, 5, 0, 0),
            vec![
                OrderLine::new(coke, "Coke", 2, Price::rupees(50)),
                OrderLine::new(tikka, "Paneer Tikka", 1, Price::rupees(180)),
            ],
            compute_bill(Price::rupees(280)),
        );

        assert_eq!(order.status(), OrderStatus::Completed);
        assert_eq!(
            order.to_string(),
            "Order ID: 7\nCoke x 2\nPaneer Tikka x 1\nTotal: Rs. 280.00\nStatus: COMPLETED\n"
        );
    }
}
