//! Output generation for the rendered dashboard.
//!
//! # Submodules
//!
//! - [`html`]: renders a [`PageView`](crate::page::PageView) into `index.html`
//! - [`json`]: serialises the same view into `dashboard.json`
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── index.html       # The dashboard page
//! └── dashboard.json   # Per-panel status and content
//! ```

pub mod html;
pub mod json;
