//! In-memory directory trees: build them by path, look nodes up, walk them and
//! compare them, or read one from disk with [`get_directory_structure`].

#![allow(clippy::enum_variant_names)]

pub mod ext;
pub mod filesystem;

pub use filesystem::{
    Descendants, Directory, File, ScanError, TreeError, get_directory_structure,
};
