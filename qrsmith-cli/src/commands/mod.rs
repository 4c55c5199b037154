pub mod app;
pub mod decode;
pub mod generate;
