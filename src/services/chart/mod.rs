pub mod mapper;
pub mod palette;
pub mod types;

pub use mapper::build_chart;
pub use palette::{palette_named, Palette, PALETTES};
pub use types::{
    ChartOutcome, ChartOutput, ChartSpec, ChartStyling, ChartType, LayoutSpec, SeriesData,
    SeriesSpec,
};
