//! Per-deployment catalog adapters.
//!
//! Each hosting application supplies its product catalog, custom prompt
//! instructions, and link-formatting rules through this trait. New
//! deployments add an adapter implementation; the orchestrator never
//! changes.

use hale_core::types::CatalogProduct;

use crate::postprocess;

/// Deployment-specific catalog and link-formatting strategy.
pub trait CatalogAdapter: Send + Sync {
    /// The deployment's product catalog.
    fn products(&self) -> Vec<CatalogProduct>;

    /// Extra system-prompt instructions for this deployment.
    fn custom_instructions(&self) -> String;

    /// Display form for a catalog product name.
    ///
    /// Matching against the catalog is case-insensitive; unknown names pass
    /// through unchanged.
    fn format_product_link(&self, name: &str) -> String;

    /// Optional whole-response hook applied to generated text.
    ///
    /// The default implementation opts out.
    fn process_response(&self, text: &str) -> Option<String> {
        let _ = text;
        None
    }
}

/// Plain adapter: serves a fixed catalog and leaves mentions untouched.
pub struct StaticCatalogAdapter {
    products: Vec<CatalogProduct>,
    instructions: String,
}

impl StaticCatalogAdapter {
    pub fn new(products: Vec<CatalogProduct>, instructions: impl Into<String>) -> Self {
        Self {
            products,
            instructions: instructions.into(),
        }
    }
}

impl CatalogAdapter for StaticCatalogAdapter {
    fn products(&self) -> Vec<CatalogProduct> {
        self.products.clone()
    }

    fn custom_instructions(&self) -> String {
        self.instructions.clone()
    }

    fn format_product_link(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Tracking-aware adapter: rewrites product mentions into markdown links
/// carrying a tracking query parameter.
pub struct TrackedCatalogAdapter {
    products: Vec<CatalogProduct>,
    instructions: String,
    tracking_param: String,
    tracking_id: String,
}

impl TrackedCatalogAdapter {
    pub fn new(
        products: Vec<CatalogProduct>,
        instructions: impl Into<String>,
        tracking_param: impl Into<String>,
        tracking_id: impl Into<String>,
    ) -> Self {
        Self {
            products,
            instructions: instructions.into(),
            tracking_param: tracking_param.into(),
            tracking_id: tracking_id.into(),
        }
    }

    fn tracked_url(&self, url: &str) -> String {
        let sep = if url.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}", url, sep, self.tracking_param, self.tracking_id)
    }

    fn find_product(&self, name: &str) -> Option<&CatalogProduct> {
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl CatalogAdapter for TrackedCatalogAdapter {
    fn products(&self) -> Vec<CatalogProduct> {
        self.products.clone()
    }

    fn custom_instructions(&self) -> String {
        self.instructions.clone()
    }

    fn format_product_link(&self, name: &str) -> String {
        match self.find_product(name) {
            Some(product) => format!("[{}]({})", product.name, self.tracked_url(&product.url)),
            None => name.to_string(),
        }
    }

    fn process_response(&self, text: &str) -> Option<String> {
        Some(postprocess::link_product_mentions(
            text,
            &self.products,
            &|name| self.format_product_link(name),
        ))
    }
}

// =============================================================================
// Tests
// =============================================================================
