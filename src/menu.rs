//! Menu
//!
//! The catalog of orderable items. Items are created once when the menu is loaded and are
//! never removed, so iteration over the catalog always follows the order items were added.

use std::{cmp::Reverse, fmt, str::FromStr};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;

use crate::prices::Price;

new_key_type! {
    /// Menu Item Key
    pub struct MenuKey;
}

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    /// Two items share the same name.
    #[error("Duplicate menu item: {0}")]
    DuplicateItem(String),
}

/// A category name that doesn't match any menu category.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Menu category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Category {
    /// Starters
    Starters,

    /// Main course dishes
    #[serde(rename = "Main Course")]
    MainCourse,

    /// Drinks
    Beverages,

    /// Bundled dishes sold at a fixed price
    Combos,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Starters,
        Category::MainCourse,
        Category::Beverages,
        Category::Combos,
    ];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Category::Starters => "Starters",
            Category::MainCourse => "Main Course",
            Category::Beverages => "Beverages",
            Category::Combos => "Combos",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Parses a category label, ignoring case, spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalised.as_str() {
            "starters" | "starter" => Ok(Category::Starters),
            "maincourse" | "main" => Ok(Category::MainCourse),
            "beverages" | "beverage" | "drinks" => Ok(Category::Beverages),
            "combos" | "combo" => Ok(Category::Combos),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// A single orderable menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    name: String,
    price: Price,
    available: bool,
    category: Category,
    popularity: u32,
}

impl MenuItem {
    /// Creates a new menu item with no popularity.
    pub fn new(name: impl Into<String>, price: Price, available: bool, category: Category) -> Self {
        Self {
            name: name.into(),
            price,
            available,
            category,
            popularity: 0,
        }
    }

    /// Item name, unique within a catalog
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> Price {
        self.price
    }

    /// Whether the item can currently be ordered
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Menu category
    pub fn category(&self) -> Category {
        self.category
    }

    /// Number of units ordered since the menu was loaded
    pub fn popularity(&self) -> u32 {
        self.popularity
    }

    fn increase_popularity(&mut self) {
        self.popularity = self.popularity.saturating_add(1);
    }
}

/// The menu catalog, keyed by [`MenuKey`] with a name index.
#[derive(Debug, Default)]
pub struct Catalog {
    items: SlotMap<MenuKey, MenuItem>,
    keys: FxHashMap<String, MenuKey>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            items: SlotMap::with_key(),
            keys: FxHashMap::default(),
        }
    }

    /// Add an item to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::DuplicateItem`] if an item with the same name already exists.
    pub fn insert(&mut self, item: MenuItem) -> Result<MenuKey, MenuError> {
        if self.keys.contains_key(item.name()) {
            return Err(MenuError::DuplicateItem(item.name.clone()));
        }

        let name = item.name.clone();
        let key = self.items.insert(item);

        self.keys.insert(name, key);

        Ok(key)
    }

    /// Find an item key by exact name.
    pub fn lookup(&self, name: &str) -> Option<MenuKey> {
        self.keys.get(name).copied()
    }

    /// Get an item by key.
    pub fn get(&self, key: MenuKey) -> Option<&MenuItem> {
        self.items.get(key)
    }

    /// The categories a front-end should offer, in display order.
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// Items in a category, in the order they were added to the catalog.
    pub fn by_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = (MenuKey, &MenuItem)> + '_ {
        self.items
            .iter()
            .filter(move |(_, item)| item.category == category)
    }

    /// Combos that can currently be ordered.
    pub fn available_combos(&self) -> SmallVec<[MenuKey; 8]> {
        self.by_category(Category::Combos)
            .filter(|(_, item)| item.available)
            .map(|(key, _)| key)
            .collect()
    }

    /// The most ordered items, highest first. Items never ordered are left out.
    pub fn most_popular(&self, limit: usize) -> Vec<(MenuKey, &MenuItem)> {
        let mut ranked: Vec<_> = self
            .items
            .iter()
            .filter(|(_, item)| item.popularity > 0)
            .collect();

        // Stable sort keeps catalog order for ties.
        ranked.sort_by_key(|(_, item)| Reverse(item.popularity));
        ranked.truncate(limit);

        ranked
    }

    /// Record one more unit ordered. Returns `false` if the key is unknown.
    pub fn mark_popularity(&mut self, key: MenuKey) -> bool {
        match self.items.get_mut(key) {
            Some(item) => {
                item.increase_popularity();
                true
            }
            None => false,
        }
    }

    /// Iterate over every item in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (MenuKey, &MenuItem)> + '_ {
        self.items.iter()
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
