pub mod document;
pub mod panels;
