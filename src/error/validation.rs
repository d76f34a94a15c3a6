use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid header format: '{value}'. Expected 'Key: Value'")]
    InvalidHeaderFormat { value: String },
    #[error("Invalid status range '{value}'. Expected '<min>-<max>'.")]
    InvalidStatusRange { value: String },
    #[error("Invalid status range '{value}': {source}")]
    InvalidStatusRangeNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid status range '{value}'. Min must be <= max.")]
    InvertedStatusRange { value: String },
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
