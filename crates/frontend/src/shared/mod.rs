pub mod api_utils;
pub mod logger;
pub mod number_format;
