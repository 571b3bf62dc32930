pub mod export;
pub mod filter;
pub mod sort;
pub mod types;
pub mod view;

pub use export::export_csv;
pub use types::{SortDirection, TableView, ViewState};
pub use view::{compute_view, filtered_rows, page_label, results_summary, total_pages};
