//! Converts the API's OpenAPI document into a Postman v2.1 collection.

pub mod convert;
pub mod openapi;
pub mod postman;

pub use convert::{convert, convert_file, ConversionSummary, ConvertError, ConvertOptions};
