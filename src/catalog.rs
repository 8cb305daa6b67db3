//! Static product catalog
//!
//! Pure data consumed by the gallery and the checkout hand-off. No state
//! transitions live here.

use serde::{Deserialize, Serialize};

/// Product record backing the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub tagline: String,
    /// Feature bullets shown under the title
    pub features: Vec<String>,
    /// Gallery image URLs, first image is the default view
    pub images: Vec<String>,
    /// Verified review count shown next to the stars
    pub reviews: u32,
    /// External checkout URL; navigation hand-off only, no response consumed
    pub checkout_url: String,
}

impl Product {
    /// The Pure Focus+ catalog entry
    pub fn pure_focus() -> Self {
        Product {
            name: "Pure Focus+".to_string(),
            tagline: "Clinical-grade nootropic for deep work, minus the caffeine crash"
                .to_string(),
            features: vec![
                "Sharpens focus within 30-60 minutes".to_string(),
                "Zero caffeine, zero sugar, zero jitters".to_string(),
                "Clinical dosages of adaptogens and precursors".to_string(),
                "42 servings per pouch".to_string(),
            ],
            images: vec![
                "https://cdn.shopify.com/s/files/1/0584/4349/7535/files/Bundle_1.png"
                    .to_string(),
                "https://cdn.shopify.com/s/files/1/0584/4349/7535/files/Bundle_2.png"
                    .to_string(),
                "https://cdn.shopify.com/s/files/1/0584/4349/7535/files/Bundle_3.png"
                    .to_string(),
            ],
            reviews: 130,
            checkout_url: "https://shop.aikyam.example/checkout/pure-focus".to_string(),
        }
    }
}

/// Welcome line the advisor transcript opens with
pub const ADVISOR_WELCOME: &str = "Protocol online. I am your Aikyam Bio-Advisor. \
Do you have questions about Pure Focus+ ingredients or dosing?";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_focus_has_images_and_checkout_url() {
        let product = Product::pure_focus();
        assert!(!product.images.is_empty());
        assert!(product.checkout_url.starts_with("https://"));
    }
}
