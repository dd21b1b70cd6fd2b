mod clean_path_ext;

pub use clean_path_ext::{CleanPathExt, clean_path};
