//! Stateless URL query and formatting helpers.

mod format;
mod location;
mod url_params;

pub use format::bytes_to_human_readable_size;
pub use location::{History, PageLocation};
pub use url_params::{ParamValue, UrlParams, build_url_string_from_url_params, get_url_params};
