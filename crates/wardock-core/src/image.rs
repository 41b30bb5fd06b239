use std::fmt;

/// Tag used when no version is given.
pub const DEFAULT_VERSION: &str = "latest";

/// Longest tag the engine accepts.
const MAX_TAG_LEN: usize = 128;

/// A `creator/name:version` reference to a container image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageIdentifier {
    creator: String,
    name: String,
    version: String,
}

impl ImageIdentifier {
    /// Builds an identifier. An absent or empty `version` becomes `latest`.
    ///
    /// Only emptiness is checked here. Whether the engine accepts the
    /// reference is reported separately by [`is_engine_compatible`].
    ///
    /// [`is_engine_compatible`]: Self::is_engine_compatible
    pub fn new(creator: &str, name: &str, version: Option<&str>) -> crate::Result<Self> {
        if creator.is_empty() {
            return Err(crate::Error::EmptyIdentifierPart { part: "creator" });
        }
        if name.is_empty() {
            return Err(crate::Error::EmptyIdentifierPart { part: "name" });
        }

        let version = version
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VERSION);

        Ok(Self {
            creator: creator.to_owned(),
            name: name.to_owned(),
            version: version.to_owned(),
        })
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `creator/name`, without the tag.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.creator, self.name)
    }

    /// Whether the engine's reference grammar accepts this identifier:
    /// lowercase repository components and a well-formed tag.
    pub fn is_engine_compatible(&self) -> bool {
        is_path_component(&self.creator)
            && is_path_component(&self.name)
            && is_tag(&self.version)
    }
}

impl fmt::Display for ImageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.creator, self.name, self.version)
    }
}

fn is_path_component(s: &str) -> bool {
    let bytes = s.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    let alnum = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();

    alnum(first)
        && alnum(last)
        && bytes
            .iter()
            .all(|b| alnum(b) || matches!(b, b'.' | b'_' | b'-'))
}

fn is_tag(s: &str) -> bool {
    let bytes = s.as_bytes();
    let Some(first) = bytes.first() else {
        return false;
    };

    bytes.len() <= MAX_TAG_LEN
        && (first.is_ascii_alphanumeric() || *first == b'_')
        && bytes
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}
