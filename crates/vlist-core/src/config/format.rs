// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Config file formats

#[cfg(feature = "serde")]
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use thiserror::Error;

/// Failure to load or save a [`ListConfig`](super::ListConfig)
#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to access list config file")]
    Io(#[from] std::io::Error),

    #[error("list config format not supported: {0}")]
    UnsupportedFormat(Format),

    #[cfg(feature = "json")]
    #[error("bad list config (JSON)")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("bad list config (TOML)")]
    TomlDe(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("list config not representable as TOML")]
    TomlSer(#[from] toml::ser::Error),

    #[cfg(feature = "yaml")]
    #[error("bad list config (YAML)")]
    YamlDe(#[from] serde::de::value::Error),

    #[cfg(feature = "yaml")]
    #[error("list config not representable as YAML")]
    YamlSer(#[from] serde_yaml2::ser::Errors),

    #[cfg(feature = "ron")]
    #[error("bad list config (RON)")]
    RonDe(#[from] ron::error::SpannedError),

    #[cfg(feature = "ron")]
    #[error("list config not representable as RON")]
    RonSer(#[from] ron::Error),
}

/// Config file formats
///
/// Each format other than [`Format::Unknown`] requires the feature of the
/// same name.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Format {
    #[error("JSON")]
    Json,
    #[error("TOML")]
    Toml,
    #[error("YAML")]
    Yaml,
    #[error("RON")]
    Ron,
    /// File extension not recognised
    #[error("(unknown format)")]
    Unknown,
}

impl Format {
    /// Select a format from the file extension of `path`
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Format::Json,
            Some("toml") => Format::Toml,
            Some("yaml" | "yml") => Format::Yaml,
            Some("ron") => Format::Ron,
            _ => Format::Unknown,
        }
    }

    /// Deserialize `text`
    #[cfg(feature = "serde")]
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T, Error> {
        Ok(match self {
            #[cfg(feature = "json")]
            Format::Json => serde_json::from_str(text)?,
            #[cfg(feature = "toml")]
            Format::Toml => toml::from_str(text)?,
            #[cfg(feature = "yaml")]
            Format::Yaml => serde_yaml2::from_str(text)?,
            #[cfg(feature = "ron")]
            Format::Ron => ron::from_str(text)?,
            _ => {
                let _ = text;
                return Err(Error::UnsupportedFormat(self));
            }
        })
    }

    /// Serialize `value` to a (pretty) string
    #[cfg(feature = "serde")]
    pub fn render<T: Serialize>(self, value: &T) -> Result<String, Error> {
        Ok(match self {
            #[cfg(feature = "json")]
            Format::Json => serde_json::to_string_pretty(value)?,
            #[cfg(feature = "toml")]
            Format::Toml => toml::to_string(value)?,
            #[cfg(feature = "yaml")]
            Format::Yaml => serde_yaml2::to_string(value)?,
            #[cfg(feature = "ron")]
            Format::Ron => ron::ser::to_string_pretty(value, Default::default())?,
            _ => {
                let _ = value;
                return Err(Error::UnsupportedFormat(self));
            }
        })
    }
}
