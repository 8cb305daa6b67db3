//! Aikyam Storefront: client-side core for the Pure Focus+ product page
//!
//! This library holds the two stateful parts of the page:
//! - the buy box (purchase plan selection and derived pricing)
//! - the AI advisor chat session (single-flight question/answer exchanges
//!   against a remote language-model service)
//!
//! Everything else on the page — markup, styling, review listings — is
//! presentation and lives outside this crate.

pub mod advisor;
pub mod catalog;
pub mod config;
pub mod gallery;
pub mod pricing;

// Re-export the advisor session types for convenience
pub use advisor::client::{AdvisorError, AdvisoryCapability, GeminiAdvisor, StubAdvisor};
pub use advisor::session::{AdvisorRequest, AdvisorSession, ChatMessage, ChatSender, Settled};

// Re-export buy-box types
pub use pricing::{Money, PurchasePlan, PurchaseSelector};

// Re-export catalog and page-state helpers
pub use catalog::Product;
pub use config::AdvisorConfig;
pub use gallery::{Accordion, ImageGallery};
