//! Lookup of compression codecs by their user facing names.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

#[derive(
    Copy, Clone, Debug, Hash, Eq, PartialEq, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompressionType {
    #[strum(serialize = "NO_COMPRESSION")]
    NoCompression,
    #[strum(serialize = "LZ4")]
    Lz4,
    #[strum(serialize = "LZ4_FRAME")]
    #[serde(rename = "LZ4_FRAME")]
    Lz4Frame,
    #[strum(serialize = "SNAPPY")]
    Snappy,
    #[strum(serialize = "ZLIB")]
    Zlib,
    #[strum(serialize = "ZSTD")]
    Zstd,
    #[strum(serialize = "GZIP")]
    Gzip,
    #[strum(serialize = "DEFLATE")]
    Deflate,
    #[strum(serialize = "BZIP2")]
    #[serde(rename = "BZIP2")]
    Bzip2,
}

lazy_static! {
    /// Keyed by upper case name.
    static ref COMPRESSION_BY_NAME: HashMap<&'static str, CompressionType> =
        CompressionType::iter().map(|c| (c.name(), c)).collect();
}

impl CompressionType {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Finds the compression type named `name`, ignoring case. `None` for unknown names.
pub fn find_compression_by_name(name: &str) -> Option<CompressionType> {
    COMPRESSION_BY_NAME
        .get(name.to_ascii_uppercase().as_str())
        .copied()
}
