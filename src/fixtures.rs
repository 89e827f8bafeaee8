//! Menu Fixtures
//!
//! Menus are described in YAML:
//!
//! ```yaml
//! items:
//!   - name: "Coke"
//!     price: "50 INR"
//!     category: Beverages
//!   - name: "Pasta"
//!     price: "200 INR"
//!     category: Main Course
//!     available: false
//! ```

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    menu::{Catalog, Category, MenuError, MenuItem},
    prices::Price,
};

/// The menu bundled with the crate.
const STANDARD_MENU: &str = include_str!("../fixtures/menu.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The menu couldn't be assembled
    #[error(transparent)]
    Menu(#[from] MenuError),
}

/// Wrapper for menu items in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Menu items, in display order
    pub items: Vec<MenuItemFixture>,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Item name
    pub name: String,

    /// Item price (e.g., "120 INR")
    pub price: String,

    /// Menu category
    pub category: Category,

    /// Whether the item can be ordered
    #[serde(default = "available_by_default")]
    pub available: bool,
}

fn available_by_default() -> bool {
    true
}

impl TryFrom<MenuItemFixture> for MenuItem {
    type Error = FixtureError;

    fn try_from(fixture: MenuItemFixture) -> Result<Self, Self::Error> {
        let (price, _currency) = parse_price(&fixture.price)?;

        Ok(MenuItem::new(
            fixture.name,
            price,
            fixture.available,
            fixture.category,
        ))
    }
}

/// Load the bundled standard menu.
///
/// # Errors
///
/// Returns an error if the bundled menu is malformed.
pub fn standard_menu() -> Result<Catalog, FixtureError> {
    parse_menu(STANDARD_MENU)
}

/// Load a menu from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if it lists the same item twice.
pub fn load_menu(path: impl AsRef<Path>) -> Result<Catalog, FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_menu(&contents)
}

/// Build a catalog from YAML menu contents.
///
/// # Errors
///
/// Returns an error if the YAML is invalid, a price is malformed, or an item name repeats.
pub fn parse_menu(contents: &str) -> Result<Catalog, FixtureError> {
    let fixture: MenuFixture = serde_norway::from_str(contents)?;
    let mut catalog = Catalog::new();

    for item_fixture in fixture.items {
        catalog.insert(item_fixture.try_into()?)?;
    }

    Ok(catalog)
}

/// Parse price string (e.g., "120.50 INR") into a price and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount is
/// not a non-negative decimal, or if the currency is not rupees.
pub fn parse_price(s: &str) -> Result<(Price, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let currency = match *currency_code {
        "INR" => iso::INR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((Price::new(amount), currency))
}
