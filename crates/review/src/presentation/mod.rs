//! Presentation - view models and plain-text rendering of review state.

pub mod render;
pub mod view_models;

pub use render::{render_detail, render_list, render_notice};
pub use view_models::{
    detail_view, list_rows, parse_status_filter, status_label, DetailView, ListRow,
    STATUS_FILTERS,
};
