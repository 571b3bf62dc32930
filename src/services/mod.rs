pub mod chart;
pub mod overview;
pub mod session;
pub mod table;
