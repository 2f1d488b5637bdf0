//! GUI pages and application state.

pub mod app;
pub mod components;
pub mod form_page;
pub mod list_page;

pub use app::App;
