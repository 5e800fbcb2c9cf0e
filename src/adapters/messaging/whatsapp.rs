//! WhatsApp handoff. Builds a wa.me link carrying the URL-escaped order text
//! and presents it; opening the chat stays with the user.

use crate::domain::{DomainError, OrderMessage};
use crate::ports::MessengerPort;
use crossterm::style::Stylize;
use reqwest::Url;
use tracing::info;

const WA_BASE: &str = "https://wa.me/";

/// Builds the channel URL for an order.
///
/// `wa.me` and full http(s) channels get the text appended as a `text` query
/// pair; a bare phone number becomes `https://wa.me/<digits>?text=...`.
pub fn order_url(order: &OrderMessage) -> Result<Url, DomainError> {
    let channel = order.channel.trim();
    let base = if channel.starts_with("http://") || channel.starts_with("https://") {
        channel.to_string()
    } else if channel.contains("wa.me") {
        format!("https://{}", channel.trim_start_matches("//"))
    } else {
        let digits: String = channel.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(DomainError::Messenger(format!(
                "unusable channel address: {}",
                channel
            )));
        }
        format!("{}{}", WA_BASE, digits)
    };

    let mut url = Url::parse(&base)
        .map_err(|e| DomainError::Messenger(format!("invalid channel address: {}", e)))?;
    url.query_pairs_mut().append_pair("text", &order.text);
    Ok(url)
}

/// Terminal handoff adapter: prints the ready-to-open order link.
pub struct WhatsAppMessenger;

#[async_trait::async_trait]
impl MessengerPort for WhatsAppMessenger {
    async fn send_order(&self, order: &OrderMessage) -> Result<(), DomainError> {
        let url = order_url(order)?;
        info!(channel = %order.channel, "order handed off to WhatsApp");
        println!();
        println!(
            "{}",
            "Open this link to send your order on WhatsApp:".bold()
        );
        println!("{}", url.as_str().underlined());
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(channel: &str) -> OrderMessage {
        OrderMessage {
            text: "Order from Spice Villa\n\nSoup x 2\n\nPlease confirm. Thanks!".into(),
            channel: channel.into(),
        }
    }

    #[test]
    fn test_phone_number_channel() {
        let url = order_url(&order("+91 98765-43210")).expect("url built");
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/919876543210");
        assert!(url.query().expect("has query").starts_with("text="));
    }

    #[test]
    fn test_bare_wa_me_channel() {
        let url = order_url(&order("wa.me/919876543210")).expect("url built");
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/919876543210");
    }

    #[test]
    fn test_full_url_channel() {
        let url = order_url(&order("https://wa.me/919876543210")).expect("url built");
        assert_eq!(url.host_str(), Some("wa.me"));
        assert!(url.query().expect("has query").contains("Spice"));
    }

    #[test]
    fn test_unusable_channel_rejected() {
        let err = order_url(&order("call us")).unwrap_err();
        assert!(matches!(err, DomainError::Messenger(_)));
    }

    #[test]
    fn test_newlines_are_escaped() {
        let url = order_url(&order("+911234567890")).expect("url built");
        assert!(url.as_str().contains("%0A"));
        assert!(!url.as_str().contains('\n'));
    }
}
