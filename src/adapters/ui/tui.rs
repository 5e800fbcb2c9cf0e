//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Main loop: browse/search/filter -> add to cart -> view cart -> checkout.
//! Every error is handled here, at the boundary of the operation that raised
//! it; nothing propagates past the triggering prompt.

use crate::domain::{
    ALL_CATEGORY, DomainError, MenuDocument, MenuFilter, MenuItem, OpenStatus,
};
use crate::ports::{InputPort, MessengerPort};
use crate::usecases::{CartService, MenuService};
use async_trait::async_trait;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use inquire::ui::{Color as UiColor, RenderConfig, StyleSheet, Styled};
use inquire::{Confirm, Select, Text};
use std::sync::Arc;

const ACTION_BROWSE: &str = "Browse the menu";
const ACTION_SEARCH: &str = "Search dishes";
const ACTION_CATEGORY: &str = "Browse by category";
const ACTION_CART: &str = "View cart";
const ACTION_ORDER: &str = "Order on WhatsApp";
const ACTION_SHARE: &str = "Share this menu";
const ACTION_CLEAR: &str = "Clear cart";
const ACTION_QUIT: &str = "Quit";

const MAIN_ACTIONS: &[&str] = &[
    ACTION_BROWSE,
    ACTION_SEARCH,
    ACTION_CATEGORY,
    ACTION_CART,
    ACTION_ORDER,
    ACTION_SHARE,
    ACTION_CLEAR,
    ACTION_QUIT,
];

const BACK: &str = "← Back";

/// Applies the warm theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let accent = UiColor::DarkYellow;
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("»").with_fg(accent))
        .with_highlighted_option_prefix(Styled::new("→").with_fg(accent))
        .with_selected_option(Some(StyleSheet::new().with_fg(accent)));
    inquire::set_global_render_config(config);
}

/// TUI adapter. Inquire prompts.
pub struct Tui {
    menu: Arc<MenuService>,
    cart: Arc<CartService>,
    messenger: Arc<dyn MessengerPort>,
    menu_url: String,
}

impl Tui {
    pub fn new(
        menu: Arc<MenuService>,
        cart: Arc<CartService>,
        messenger: Arc<dyn MessengerPort>,
        menu_url: String,
    ) -> Self {
        Self {
            menu,
            cart,
            messenger,
            menu_url,
        }
    }

    /// List items under `filter` and add picks to the cart until Back.
    async fn browse(&self, filter: &MenuFilter) {
        let items = match self.menu.visible_items(filter).await {
            Ok(items) => items,
            Err(e) => {
                eprintln!("{}", e);
                return;
            }
        };
        if items.is_empty() {
            println!("Nothing on the menu matches.");
            return;
        }
        loop {
            let mut options: Vec<String> = items.iter().map(item_row).collect();
            options.push(BACK.to_string());
            let Ok(picked) = Select::new("Add an item to your cart", options).raw_prompt()
            else {
                return;
            };
            let Some(item) = items.get(picked.index) else {
                return; // Back
            };
            let summary = self.cart.add_item(item).await;
            println!(
                "Added {} — cart: {} items • ₹{}",
                item.name, summary.total_items, summary.total_price
            );
        }
    }

    async fn search(&self) {
        let Ok(text) = Text::new("Search dishes:").prompt() else {
            return;
        };
        self.browse(&MenuFilter {
            category: None,
            text,
        })
        .await;
    }

    async fn by_category(&self) {
        let names = match self.menu.category_names().await {
            Ok(names) => names,
            Err(e) => {
                eprintln!("{}", e);
                return;
            }
        };
        let Ok(choice) = Select::new("Pick a category", names).prompt() else {
            return;
        };
        let category = (choice != ALL_CATEGORY).then_some(choice);
        self.browse(&MenuFilter {
            category,
            text: String::new(),
        })
        .await;
    }

    async fn view_cart(&self) {
        let detail = self.cart.detail().await;
        if detail.rows.is_empty() {
            println!("Cart is empty");
            return;
        }
        println!();
        for row in &detail.rows {
            println!(
                "  {:<36} ₹{}",
                format!("{} x {}", row.name, row.qty),
                row.subtotal
            );
        }
        println!("  {:<36} ₹{}", "Total", detail.total);
        println!();
        let Ok(choice) = Select::new("Cart", vec![ACTION_ORDER, ACTION_CLEAR, BACK]).prompt()
        else {
            return;
        };
        match choice {
            ACTION_ORDER => self.checkout().await,
            ACTION_CLEAR => self.clear_cart().await,
            _ => {}
        }
    }

    async fn checkout(&self) {
        let doc = match self.menu.document().await {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("{}", e);
                return;
            }
        };
        let channel = doc.contact.as_ref().and_then(|c| c.whatsapp.clone());
        match self
            .cart
            .build_order_message(&doc.restaurant_name, channel.as_deref())
            .await
        {
            Ok(order) => {
                if let Err(e) = self.messenger.send_order(&order).await {
                    eprintln!("{}", e);
                }
            }
            Err(DomainError::Configuration(_)) => {
                println!("WhatsApp contact not configured.");
            }
            Err(DomainError::EmptyCart) => println!("Cart empty"),
            Err(e) => eprintln!("{}", e),
        }
    }

    fn share(&self, doc: &MenuDocument) {
        println!();
        println!("Copy link to share: {}", self.menu_url.as_str().underlined());
        if !doc.hero.is_empty() {
            println!("{}", doc.hero);
        }
        println!();
    }

    async fn clear_cart(&self) {
        let confirmed = Confirm::new("Clear the cart?")
            .with_default(false)
            .prompt()
            .unwrap_or(false);
        if confirmed {
            self.cart.clear().await;
            println!("Cart cleared.");
        }
    }

    /// One-line cart summary, shown only while the cart is non-empty.
    async fn print_cart_bar(&self) {
        let summary = self.cart.summary().await;
        if summary.total_items == 0 {
            return;
        }
        println!(
            "{}",
            format!(
                "Cart: {} items • ₹{}",
                summary.total_items, summary.total_price
            )
            .dark_yellow()
        );
    }
}

#[async_trait]
impl InputPort for Tui {
    async fn run(&self) -> Result<(), DomainError> {
        let doc = self.menu.document().await?;
        print_header(&doc);
        loop {
            self.print_cart_bar().await;
            let Ok(choice) =
                Select::new("What would you like to do?", MAIN_ACTIONS.to_vec()).prompt()
            else {
                break;
            };
            match choice {
                ACTION_BROWSE => self.browse(&MenuFilter::default()).await,
                ACTION_SEARCH => self.search().await,
                ACTION_CATEGORY => self.by_category().await,
                ACTION_CART => self.view_cart().await,
                ACTION_ORDER => self.checkout().await,
                ACTION_SHARE => self.share(&doc),
                ACTION_CLEAR => self.clear_cart().await,
                _ => break,
            }
        }
        Ok(())
    }
}

fn print_header(doc: &MenuDocument) {
    println!();
    if !doc.restaurant_name.is_empty() {
        println!("{}", doc.restaurant_name.as_str().bold());
    }
    let mut info = Vec::new();
    if !doc.address.is_empty() {
        info.push(doc.address.clone());
    }
    if !doc.last_updated.is_empty() {
        info.push(format!("Last updated: {}", doc.last_updated));
    }
    if !info.is_empty() {
        println!("{}", info.join(" • "));
    }
    if !doc.hero.is_empty() {
        println!("{}", doc.hero.as_str().italic());
    } else if !doc.restaurant_name.is_empty() {
        println!("Welcome to {}", doc.restaurant_name);
    }
    match doc.open_status_at(minutes_now()) {
        OpenStatus::Open => println!("{}", "Open now".green()),
        OpenStatus::Closed => println!("{}", "Closed".red()),
        OpenStatus::Unknown => {}
    }
    println!();
}

fn minutes_now() -> u32 {
    let now = Local::now();
    now.hour() * 60 + now.minute()
}

fn item_row(item: &MenuItem) -> String {
    let mut row = format!("{} — {}", item.name, item.price.display());
    if let Some(badge) = &item.badge {
        row.push_str(&format!(" [{}]", badge));
    }
    if !item.desc.is_empty() {
        row.push_str(&format!("  ({})", truncate(&item.desc, 48)));
    }
    row
}

/// Truncate to `max` characters for single-line option rows.
fn truncate(text: &str, max: usize) -> String {
    let t = text.trim();
    if t.chars().count() <= max {
        t.to_string()
    } else {
        let cut: String = t.chars().take(max).collect();
        format!("{}…", cut)
    }
}
