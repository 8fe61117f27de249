pub mod mutate;
pub mod navigate;
pub mod parser;
pub mod validate;

pub use mutate::Mutator;
pub use navigate::Navigator;
pub use parser::{contains_array_access, max_array_depth, parse_access_string, parse_steps};
pub use validate::{is_valid_access_string, sanitize_access_string};
