//! Canteen
//!
//! Canteen is the ordering core of a restaurant counter: a categorised menu, a cart, bills
//! with tax and discount, and a daily log of completed orders.
//!
//! ```no_run
//! use canteen::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new(standard_menu()?, OrderLog::new("."));
//!
//! session.add_unit("Coke")?;
//! session.add_unit("Paneer Tikka")?;
//!
//! let checkout = session.checkout()?;
//!
//! assert_eq!(checkout.order().total(), Price::rupees(230));
//! # Ok(())
//! # }
//! ```

pub mod bill;
pub mod cart;
pub mod config;
pub mod fixtures;
pub mod menu;
pub mod observability;
pub mod order;
pub mod order_log;
pub mod prelude;
pub mod prices;
pub mod session;
pub mod shell;
