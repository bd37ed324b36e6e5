pub mod batch;
pub mod format;
pub mod headings;
pub mod structure;
