use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Chainable, ErrorDetail, Result};

/// A serde data format that front matter and settings can be written in.
pub trait Format: Sized {
    /// The data format's error type.
    type Error: serde::de::Error + ErrorDetail + 'static;

    /// Human-readable name of the format, used in diagnostics.
    const NAME: &'static str;

    /// Parses `string` as the data format `Self` as a `T` or returns an error
    /// if the `string` is an invalid `T`.
    fn from_str<T: DeserializeOwned>(string: &str) -> Result<T, Self::Error>;

    /// Reads the file at `path` and parses it as a `T`.
    fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let string = std::fs::read_to_string(path).chain_with(|| error! {
            "failed to read file",
            "path" => path.display(),
        })?;

        Self::from_str(&string).chain_with(|| error! {
            format!("invalid {}", Self::NAME),
            "path" => path.display(),
        })
    }
}

macro_rules! impl_format {
    ($name:ident ($display:literal) : $func:expr, $E:ty) => (
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Format for $name {
            type Error = $E;

            const NAME: &'static str = $display;

            fn from_str<T: DeserializeOwned>(s: &str) -> Result<T, $E> {
                $func(s)
            }
        }
    );
}

impl_format!(Toml("TOML"): toml::from_str, toml::de::Error);
impl_format!(Yaml("YAML"): serde_yaml_ng::from_str, serde_yaml_ng::Error);
