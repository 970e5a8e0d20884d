//! Harvester core: pure link classification and naming rules.
mod filename;
mod links;
mod tokens;

pub use filename::filename_from_url;
pub use links::{is_file_link, resolve_href, FILE_EXTENSIONS};
pub use tokens::{attr_has_token, attr_has_token_containing, attr_tokens};
