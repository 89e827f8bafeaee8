//! Canteen prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bill::{Bill, BillError, BillPolicy, compute_bill},
    cart::{Cart, CartLine},
    fixtures::{FixtureError, load_menu, parse_menu, standard_menu},
    menu::{Catalog, Category, MenuError, MenuItem, MenuKey},
    order::{Order, OrderAccumulator, OrderLine, OrderStatus},
    order_log::{OrderLog, OrderLogError},
    prices::Price,
    session::{CartSnapshot, Checkout, LogFailurePolicy, MenuEntry, Session, SessionError},
};
