pub mod ops;
pub mod radiometry;
pub mod save;
pub mod thermal;
