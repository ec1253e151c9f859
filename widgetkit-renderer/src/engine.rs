//! Tera rendering engine for the generated manifest listing.
//!
//! The listing is Rust source: a fixed header, one `files.push(...)` line per
//! record in input order, and a fixed footer. Field order inside each
//! constructor is stable so diffs between builds stay line-oriented.

use tera::Tera;

use widgetkit_core::AssetRecord;

use crate::context::ListingContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded template, baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

/// Name under which the listing template is registered.
pub const LISTING_TEMPLATE: &str = "manifest.rs";

const LISTING_SOURCE: &str = include_str!("templates/manifest.rs.tera");

fn build_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_template(LISTING_TEMPLATE, LISTING_SOURCE)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// ManifestRenderer
// ---------------------------------------------------------------------------

/// Renders record sequences into the manifest listing.
pub struct ManifestRenderer {
    tera: Tera,
}

impl ManifestRenderer {
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self { tera: build_tera()? })
    }

    /// Render `records` in order. Output always uses LF line endings.
    pub fn render(&self, records: &[AssetRecord]) -> Result<String, RenderError> {
        self.render_with_context(&ListingContext::from_records(records))
    }

    /// Render using a caller-provided [`ListingContext`].
    pub fn render_with_context(&self, ctx: &ListingContext) -> Result<String, RenderError> {
        let rendered = self.tera.render(LISTING_TEMPLATE, &ctx.to_tera()?)?;
        Ok(rendered.replace("\r\n", "\n"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
