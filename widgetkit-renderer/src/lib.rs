//! # widgetkit-renderer
//!
//! Tera-based emitter that turns classified asset records into the generated
//! manifest listing compiled into the runtime component.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use widgetkit_core::AssetRecord;
//! use widgetkit_renderer::ManifestRenderer;
//!
//! fn emit(records: &[AssetRecord]) {
//!     if let Ok(renderer) = ManifestRenderer::new() {
//!         if let Ok(source) = renderer.render(records) {
//!             println!("{} bytes of generated source", source.len());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{ListingContext, RecordCtx};
pub use engine::{ManifestRenderer, LISTING_TEMPLATE};
pub use error::RenderError;
