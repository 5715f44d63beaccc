pub mod app;
pub mod footer;
pub mod header;
pub mod page;
pub mod panel;
