//! Ordering Session
//!
//! A [`Session`] owns everything one interactive ordering session needs: the catalog, the
//! cart, the order being accumulated, the bill policy and the order log. Front-ends drive it
//! through item keys and names; they never need to parse their own display text.

use std::path::{Path, PathBuf};

use jiff::{Zoned, civil::DateTime};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    bill::{Bill, BillPolicy},
    cart::Cart,
    menu::{Catalog, Category, MenuItem, MenuKey},
    order::{Order, OrderAccumulator, OrderLine, OrderStatus},
    order_log::{OrderLog, OrderLogError},
    prices::Price,
};

/// What checkout does when the order can't be written to the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFailurePolicy {
    /// Complete the checkout and report the log error alongside the order.
    #[default]
    Proceed,

    /// Fail the checkout and keep the cart as it was.
    Abort,
}

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No item with this name is on the menu.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// No item with this key is on the menu.
    #[error("Unknown menu key: {0:?}")]
    UnknownKey(MenuKey),

    /// The item can't be ordered right now.
    #[error("{name} is currently unavailable")]
    ItemUnavailable {
        /// Item name
        name: String,

        /// Available combos that can be ordered instead
        alternatives: SmallVec<[MenuKey; 8]>,
    },

    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The order couldn't be logged and the session is set to abort.
    #[error(transparent)]
    LogWrite(#[from] OrderLogError),
}

/// A menu item as presented to a front-end, with its key alongside the display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Key to pass back to [`Session::add_key`]
    pub key: MenuKey,

    /// Item name
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Whether the item can be ordered
    pub available: bool,

    /// Units ordered this session
    pub popularity: u32,
}

impl MenuEntry {
    fn new(key: MenuKey, item: &MenuItem) -> Self {
        Self {
            key,
            name: item.name().to_string(),
            price: item.price(),
            available: item.is_available(),
            popularity: item.popularity(),
        }
    }
}

/// The cart as it stands, with names and prices resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    /// One line per distinct item, in first-added order
    pub lines: Vec<OrderLine>,

    /// Sum of the line totals
    pub total: Price,
}

impl CartSnapshot {
    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The result of a successful checkout.
#[derive(Debug)]
pub struct Checkout {
    order: Order,
    log_path: Option<PathBuf>,
    log_error: Option<OrderLogError>,
}

impl Checkout {
    /// The completed order
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// The bill for the order
    pub fn bill(&self) -> &Bill {
        self.order.bill()
    }

    /// Log file the order was written to, if logging succeeded
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Why the order wasn't logged, if logging failed
    pub fn log_error(&self) -> Option<&OrderLogError> {
        self.log_error.as_ref()
    }

    /// Take the completed order.
    pub fn into_order(self) -> Order {
        self.order
    }
}

/// One interactive ordering session.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    cart: Cart,
    current: OrderAccumulator,
    policy: BillPolicy,
    log: OrderLog,
    on_log_failure: LogFailurePolicy,
    next_order_id: u64,
}

impl Session {
    /// Start a session with the default bill policy, proceeding on log failures.
    pub fn new(catalog: Catalog, log: OrderLog) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            current: OrderAccumulator::new(),
            policy: BillPolicy::default(),
            log,
            on_log_failure: LogFailurePolicy::default(),
            next_order_id: 1,
        }
    }

    /// Use a different bill policy.
    #[must_use]
    pub fn with_policy(mut self, policy: BillPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Choose what happens when an order can't be logged.
    #[must_use]
    pub fn with_log_failure_policy(mut self, on_log_failure: LogFailurePolicy) -> Self {
        self.on_log_failure = on_log_failure;
        self
    }

    /// The menu catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Menu categories, in display order.
    pub fn list_categories(&self) -> &'static [Category] {
        self.catalog.categories()
    }

    /// Every item in a category, available or not.
    pub fn list_items_in_category(&self, category: Category) -> Vec<MenuEntry> {
        self.catalog
            .by_category(category)
            .map(|(key, item)| MenuEntry::new(key, item))
            .collect()
    }

    /// Combos that can be ordered, offered when an item is unavailable.
    pub fn combo_alternatives(&self) -> Vec<MenuEntry> {
        self.entries(self.catalog.available_combos())
    }

    /// The most ordered items this session.
    pub fn popular(&self, limit: usize) -> Vec<MenuEntry> {
        self.catalog
            .most_popular(limit)
            .into_iter()
            .map(|(key, item)| MenuEntry::new(key, item))
            .collect()
    }

    /// Resolve keys into menu entries, skipping any that aren't in the catalog.
    pub fn entries(&self, keys: impl IntoIterator<Item = MenuKey>) -> Vec<MenuEntry> {
        keys.into_iter()
            .filter_map(|key| self.catalog.get(key).map(|item| MenuEntry::new(key, item)))
            .collect()
    }

    /// Add one unit of the named item, returning its new quantity in the cart.
    ///
    /// # Errors
    ///
    /// - [`SessionError::ItemNotFound`]: no item has this name.
    /// - [`SessionError::ItemUnavailable`]: the item can't be ordered; nothing changes.
    pub fn add_unit(&mut self, name: &str) -> Result<u32, SessionError> {
        let key = self
            .catalog
            .lookup(name)
            .ok_or_else(|| SessionError::ItemNotFound(name.to_string()))?;

        self.add_key(key)
    }

    /// Add one unit of an item by key, returning its new quantity in the cart.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnknownKey`]: the key isn't in the catalog.
    /// - [`SessionError::ItemUnavailable`]: the item can't be ordered; nothing changes.
    pub fn add_key(&mut self, key: MenuKey) -> Result<u32, SessionError> {
        let item = self
            .catalog
            .get(key)
            .ok_or(SessionError::UnknownKey(key))?;

        if !item.is_available() {
            warn!(item = item.name(), "item unavailable");

            return Err(SessionError::ItemUnavailable {
                name: item.name().to_string(),
                alternatives: self.catalog.available_combos(),
            });
        }

        let price = item.price();
        let quantity = self.cart.add(key);

        self.current.add(key, price);
        self.catalog.mark_popularity(key);

        debug!(?key, quantity, total = %self.current.total(), "item added");

        Ok(quantity)
    }

    /// The cart with item names and line totals.
    pub fn cart_snapshot(&self) -> CartSnapshot {
        let lines = self
            .cart
            .lines()
            .iter()
            .filter_map(|line| {
                self.catalog.get(line.key()).map(|item| {
                    OrderLine::new(line.key(), item.name(), line.quantity(), item.price())
                })
            })
            .collect();

        CartSnapshot {
            lines,
            total: self.current.total(),
        }
    }

    /// Running total of the current order
    pub fn total(&self) -> Price {
        self.current.total()
    }

    /// Status of the order being accumulated
    pub fn status(&self) -> OrderStatus {
        self.current.status()
    }

    /// Bill the cart, log the order and start a new one, stamped with the local time.
    ///
    /// # Errors
    ///
    /// See [`Session::checkout_at`].
    pub fn checkout(&mut self) -> Result<Checkout, SessionError> {
        self.checkout_at(Zoned::now().datetime())
    }

    /// Bill the cart, log the order and start a new one.
    ///
    /// If logging fails and the session proceeds on log failures, the checkout still
    /// completes and the error is available from [`Checkout::log_error`].
    ///
    /// # Errors
    ///
    /// - [`SessionError::EmptyCart`]: nothing to check out; nothing is logged.
    /// - [`SessionError::LogWrite`]: logging failed and the session aborts on log failures;
    ///   the cart is left as it was.
    pub fn checkout_at(&mut self, placed_at: DateTime) -> Result<Checkout, SessionError> {
        if self.cart.is_empty() {
            return Err(SessionError::EmptyCart);
        }

        let snapshot = self.cart_snapshot();

        debug_assert_eq!(
            snapshot.lines.iter().map(OrderLine::line_total).sum::<Price>(),
            snapshot.total,
            "cart lines must add up to the running total"
        );

        let bill = self.policy.compute(snapshot.total);
        let order = Order::new(self.next_order_id, placed_at, snapshot.lines, bill);

        let (log_path, log_error) = match self.log.append(&order) {
            Ok(path) => (Some(path), None),
            Err(error) => match self.on_log_failure {
                LogFailurePolicy::Abort => {
                    warn!(order_id = order.id(), %error, "order not logged, checkout aborted");

                    return Err(error.into());
                }
                LogFailurePolicy::Proceed => {
                    warn!(order_id = order.id(), %error, "order not logged");

                    (None, Some(error))
                }
            },
        };

        info!(
            order_id = order.id(),
            subtotal = %bill.subtotal(),
            final_amount = %bill.final_amount(),
            "order completed"
        );

        self.next_order_id += 1;
        self.reset();

        Ok(Checkout {
            order,
            log_path,
            log_error,
        })
    }

    /// Empty the cart and start a new order.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.current.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;
    use crate::menu::MenuError;

    fn test_catalog() -> Result<Catalog, MenuError> {
        let mut catalog = Catalog::new();

        for (name, price, available, category) in [
            ("Paneer Tikka", 180, true, Category::Starters),
            ("Pasta", 200, false, Category::MainCourse),
            ("Veg Biryani", 220, true, Category::MainCourse),
            ("Coke", 50, true, Category::Beverages),
            ("Chinese Combo", 330, true, Category::Combos),
            ("Lunch Box Combo", 340, false, Category::Combos),
        ] {
            catalog.insert(MenuItem::new(
                name,
                Price::rupees(price),
                available,
                category,
            ))?;
        }

        Ok(catalog)
    }

    fn noon() -> DateTime {
        date(2026, 10, 19).at(12, 0, 0, 0)
    }

    #[test]
    fn add_unit_updates_cart_total_and_popularity() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut session = Session::new(test_catalog()?, OrderLog::new(dir.path()));

        assert_eq!(session.add_unit("Coke")?, 1);
        assert_eq!(session.add_unit("Coke")?, 2);
        assert_eq!(session.add_unit("Paneer Tikka")?, 1);

        let snapshot = session.cart_snapshot();
        let names: Vec<&str> = snapshot.lines.iter().map(OrderLine::name).collect();

        assert_eq!(names, ["Coke", "Paneer Tikka"]);
        assert_eq!(snapshot.total, Price::rupees(280));
        assert_eq!(session.total(), Price::rupees(280));
        assert_eq!(session.status(), OrderStatus::Placed);

        let popular = session.popular(1);

        assert_eq!(popular.first().map(|entry| entry.popularity), Some(2));

        Ok(())
    }

    #[test]
    fn add_unit_unknown_name() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut session = Session::new(test_catalog()?, OrderLog::new(dir.path()));

        let result = session.add_unit("Lemonade");

        assert!(matches!(result, Err(SessionError::ItemNotFound(name)) if name == "Lemonade"));
        assert!(session.cart_snapshot().is_empty());

        Ok(())
    }

    #[test]
    fn add_unit_unavailable_offers_combos_and_changes_nothing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut session = Session::new(test_catalog()?, OrderLog::new(dir.path()));

        session.add_unit("Coke")?;

        let popular_before = session.popular(10);
        let result = session.add_unit("Pasta");

        let Err(SessionError::ItemUnavailable { name, alternatives }) = result else {
            return Err("expected the item to be unavailable".into());
        };

        let alternatives: Vec<String> = session
            .entries(alternatives)
            .into_iter()
            .map(|entry| entry.name)
            .collect();

        assert_eq!(name, "Pasta");
        assert_eq!(alternatives, ["Chinese Combo"]);
        assert_eq!(session.total(), Price::rupees(50));
        assert_eq!(session.cart_snapshot().lines.len(), 1);
        assert_eq!(session.popular(10), popular_before);
        assert!(
            session
                .list_items_in_category(Category::MainCourse)
                .iter()
                .all(|entry| entry.popularity == 0)
        );

        Ok(())
    }

    #[test]
    fn combos_add_like_any_other_item() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut session = Session::new(test_catalog()?, OrderLog::new(dir.path()));

        let combo = session
            .combo_alternatives()
            .first()
            .map(|entry| entry.key)
            .ok_or("no combos")?;

        assert_eq!(session.add_key(combo)?, 1);
        assert_eq!(session.total(), Price::rupees(330));

        Ok(())
    }

    #[test]
    fn list_items_in_category_includes_unavailable() -> TestResult {
        let dir = tempfile::tempdir()?;
        let session = Session::new(test_catalog()?, OrderLog::new(dir.path()));

        let mains = session.list_items_in_category(Category::MainCourse);

        assert_eq!(mains.len(), 2);
        assert!(mains.iter().any(|entry| entry.name == "Pasta" && !entry.available));
        assert_eq!(session.list_categories().len(), 4);

        Ok(())
    }

    #[test]
    fn checkout_bills_logs_and_resets() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut session = Session::new(test_catalog()?, OrderLog::new(dir.path()));

        session.add_unit("Coke")?;
        session.add_unit("Coke")?;
        session.add_unit("Paneer Tikka")?;

        let checkout = session.checkout_at(noon())?;

        assert_eq!(checkout.order().id(), 1);
        assert_eq!(checkout.order().status(), OrderStatus::Completed);
        assert_eq!(checkout.bill().tax(), Price::rupees(14));
        assert_eq!(checkout.bill().final_amount(), Price::rupees(294));
        assert!(checkout.log_error().is_none());

        let path = checkout.log_path().ok_or("order not logged")?;

        assert!(fs::read_to_string(path)?.contains("- Coke x 2 : Rs. 100.00"));

        assert!(session.cart_snapshot().is_empty());
        assert_eq!(session.total(), Price::ZERO);
        assert_eq!(session.status(), OrderStatus::Placed);

        session.add_unit("Veg Biryani")?;

        assert_eq!(session.checkout_at(noon())?.order().id(), 2);

        Ok(())
    }

    #[test]
    fn checkout_empty_cart_is_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut session = Session::new(test_catalog()?, OrderLog::new(dir.path()));

        let result = session.checkout_at(noon());

        assert!(matches!(result, Err(SessionError::EmptyCart)));
        assert_eq!(fs::read_dir(dir.path())?.count(), 0);

        Ok(())
    }

    #[test]
    fn checkout_proceeds_when_log_fails() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut session = Session::new(test_catalog()?, OrderLog::new(dir.path().join("gone")));

        session.add_unit("Coke")?;

        let checkout = session.checkout_at(noon())?;

        assert!(checkout.log_path().is_none());
        assert!(matches!(
            checkout.log_error(),
            Some(OrderLogError::Write { .. })
        ));
        assert!(session.cart_snapshot().is_empty());

        Ok(())
    }

    #[test]
    fn checkout_aborts_when_log_fails_under_abort_policy() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut session = Session::new(test_catalog()?, OrderLog::new(dir.path().join("gone")))
            .with_log_failure_policy(LogFailurePolicy::Abort);

        session.add_unit("Coke")?;

        let result = session.checkout_at(noon());

        assert!(matches!(result, Err(SessionError::LogWrite(_))));
        assert_eq!(session.total(), Price::rupees(50));
        assert_eq!(session.cart_snapshot().lines.len(), 1);

        Ok(())
    }

    #[test]
    fn reset_clears_cart_and_total() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut session = Session::new(test_catalog()?, OrderLog::new(dir.path()));

        session.add_unit("Veg Biryani")?;
        session.reset();

        assert!(session.cart_snapshot().is_empty());
        assert_eq!(session.total(), Price::ZERO);
        assert!(matches!(
            session.checkout_at(noon()),
            Err(SessionError::EmptyCart)
        ));

        Ok(())
    }
}
