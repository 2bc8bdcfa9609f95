pub mod anonymizer;
pub mod logger;
