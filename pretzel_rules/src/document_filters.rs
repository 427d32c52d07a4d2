//! Filters for [`pretzel::Document`].

mod min_token_length;

pub use min_token_length::MinTokenLengthFilter;
