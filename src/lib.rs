pub mod args;
pub mod markup;
pub mod normalize;
pub mod result;
pub mod utils;

pub mod graphics {
    pub mod expand;
    pub mod list;
    pub mod resolve;
    pub mod scan;
    // Reexport struct
    pub use expand::{expand_multiinclude, Expansion};
    pub use list::{resolve_matches, ListOptions};
    pub use resolve::{find_with_extension, resolve_abspath, ALLOWED_EXT};
    pub use scan::{scan, Command, IncludeMatch, ScanOutcome};
}
