//! Language metadata and key utilities.
//!
//! Everything language-related that does not touch the filesystem lives
//! here:
//!
//! - `registry`: built-in language table plus custom-override resolution
//! - `keys`: pure transforms over translation keys (readable text,
//!   comma-separated key lists, key validation)

mod keys;
mod registry;

pub use keys::{is_multi_key_input, is_valid_key, key_to_readable_text, parse_key_list};
pub use registry::{resolve, CustomLanguage, LanguageInfo, GENERIC_FLAG};
