//! Cart

use crate::menu::MenuKey;

/// A menu item and how many units of it are in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    key: MenuKey,
    quantity: u32,
}

impl CartLine {
    /// The menu item on this line
    pub fn key(&self) -> MenuKey {
        self.key
    }

    /// Units ordered, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Quantities per menu item, in the order items were first added.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of an item, returning the new quantity for that item.
    pub fn add(&mut self, key: MenuKey) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|line| line.key == key) {
            line.quantity = line.quantity.saturating_add(1);

            return line.quantity;
        }

        self.lines.push(CartLine { key, quantity: 1 });

        1
    }

    /// Quantity of an item, zero if it isn't in the cart.
    pub fn quantity(&self, key: MenuKey) -> u32 {
        self.lines
            .iter()
            .find(|line| line.key == key)
            .map_or(0, |line| line.quantity)
    }

    /// Cart lines in first-added order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total number of units across all lines.
    pub fn units(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove everything from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
