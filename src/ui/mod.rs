pub mod donut;
pub mod panels;
