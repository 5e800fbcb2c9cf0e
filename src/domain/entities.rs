//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/terminal types here — these are mapped from adapters.

use serde::{Deserialize, Serialize};

/// The "All" pseudo-category. Selecting it clears the category filter.
pub const ALL_CATEGORY: &str = "All";

/// The menu document published by the restaurant. Read-only after load.
///
/// Every metadata field is optional in the source JSON; absent fields render
/// as empty values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuDocument {
    pub restaurant_name: String,
    pub address: String,
    pub hero: String,
    pub last_updated: String,
    pub theme_color: String,
    pub logo: String,
    /// Opening time as "HH:MM" local.
    pub open_time: String,
    /// Closing time as "HH:MM" local.
    pub close_time: String,
    pub contact: Option<Contact>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Messaging channel address: a phone number or a wa.me link.
    pub whatsapp: Option<String>,
}

/// A named group of menu items. The name doubles as the filter key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display label and cart identity key: two items with the same name are
    /// the same cart line.
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub desc: String,
    pub image: Option<String>,
    pub badge: Option<String>,
}

impl MenuItem {
    /// Case-insensitive substring match over name + description. An empty
    /// query matches everything.
    pub fn matches_text(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        format!("{} {}", self.name, self.desc)
            .to_lowercase()
            .contains(&q)
    }
}

/// A menu price. The document may carry a plain number or a pre-formatted
/// string ("₹150", "1,234.50").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl Price {
    /// Numeric value for arithmetic. Strips every character outside
    /// `[0-9.-]`; a remainder that still fails to parse contributes zero.
    pub fn amount(&self) -> f64 {
        match self {
            Price::Amount(n) => *n,
            Price::Text(s) => {
                let cleaned: String = s
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                cleaned.parse().unwrap_or(0.0)
            }
        }
    }

    /// Display form: numbers get the currency prefix, strings pass through
    /// verbatim.
    pub fn display(&self) -> String {
        match self {
            Price::Amount(n) => format!("₹{}", n),
            Price::Text(s) => s.clone(),
        }
    }
}

/// Active view filter: an optional category (by name) and a free-text query.
/// Both apply when both are set.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    pub category: Option<String>,
    pub text: String,
}

impl MenuDocument {
    /// Items visible under `filter`. Category order and within-category order
    /// follow the document; no sorting.
    pub fn visible_items(&self, filter: &MenuFilter) -> Vec<&MenuItem> {
        self.categories
            .iter()
            .filter(|cat| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|name| cat.name == name)
            })
            .flat_map(|cat| cat.items.iter())
            .filter(|item| item.matches_text(&filter.text))
            .collect()
    }

    /// Category names in document order, with the "All" pseudo-category
    /// prepended.
    pub fn category_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.categories.len() + 1);
        names.push(ALL_CATEGORY.to_string());
        names.extend(self.categories.iter().map(|cat| cat.name.clone()));
        names
    }

    /// Open/closed status at `minutes_now` minutes since local midnight.
    /// Open iff `open <= now < close`; Unknown when either bound is missing
    /// or malformed.
    pub fn open_status_at(&self, minutes_now: u32) -> OpenStatus {
        match (
            parse_minutes(&self.open_time),
            parse_minutes(&self.close_time),
        ) {
            (Some(open), Some(close)) => {
                if minutes_now >= open && minutes_now < close {
                    OpenStatus::Open
                } else {
                    OpenStatus::Closed
                }
            }
            _ => OpenStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    Open,
    Closed,
    Unknown,
}

/// Parses "HH:MM" into minutes since midnight.
fn parse_minutes(raw: &str) -> Option<u32> {
    let (h, m) = raw.trim().split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// One cart entry. `name` is the identity key; `price` is the snapshot taken
/// when the line was created and is never re-read from the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    pub price: Price,
    pub qty: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.price.amount() * f64::from(self.qty)
    }
}

/// The shopping cart: ordered lines, insertion order preserved, one line per
/// item name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Adds one unit of `item`. An existing line (matched by name) is
    /// incremented and keeps its price snapshot; otherwise a new line is
    /// appended with qty 1.
    pub fn add(&mut self, item: &MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.name == item.name) {
            line.qty += 1;
        } else {
            self.lines.push(CartLine {
                name: item.name.clone(),
                price: item.price.clone(),
                qty: 1,
            });
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}

/// A formatted order plus the channel address it should go to.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderMessage {
    pub text: String,
    pub channel: String,
}
