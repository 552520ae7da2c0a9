pub mod authentication;
pub mod batch;
pub mod cades;
pub mod document;
pub mod misc;
pub mod pades;
pub mod xml;
