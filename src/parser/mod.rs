pub mod columns;
pub mod deserializers;
pub mod pipeline;
pub mod types;

pub use pipeline::{parse_csv, parse_csv_reader, ParseOptions, ParseOutput};
pub use types::{OrderLineItem, ParseWarning};
