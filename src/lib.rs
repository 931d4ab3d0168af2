//! Sideways dot-matrix banners for continuous-feed printers.
//!
//! Text goes through two stages:
//! - `engine`: glyph lookup, zoom selection and glyph assembly into a
//!   `BannerMatrix`
//! - `renderer`: quarter-turn rotation and centring onto a fixed-size `Page`
//!
//! Around that core sit the birthday roster (`birthdays`), output sinks
//! (`output`), configuration (`config`) and the interactive `studio`.

pub mod birthdays;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod renderer;
pub mod studio;
pub mod types;

pub use error::RenderError;
pub use types::{Page, RenderOptions, Rotation};

/// Render `text` as a sideways banner. See [`renderer::Renderer::render`].
pub fn render(text: &str, opts: &RenderOptions) -> Result<Page, RenderError> {
    renderer::Renderer::render(text, opts)
}
