//! HTML templates for the Second Brain front end.
//!
//! Markup only carries class names; no stylesheet is shipped.
//!
//! ## Module Structure
//!
//! - `components` - Base page template, sidebar, search bar
//! - `cards` - Content cards and the column grid
//! - `pages` - Dashboard, single item, shared view and share link pages

mod cards;
mod components;
mod pages;

pub use cards::{render_card, render_grid, CardMode};
pub use components::{base_html, dashboard_url, search_bar, sidebar};
pub use pages::{
    render_content_page, render_create_form, render_dashboard, render_share_link, render_shared,
    DashboardView,
};
