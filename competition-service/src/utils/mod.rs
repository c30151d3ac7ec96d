pub mod text;
pub mod validation;

pub use text::truncate_chars;
pub use validation::{deserialize_lax_bool, validate_email_shape, validate_lax_bool, LaxBool};
