//! Error types for model loading.

/// Errors that can occur while loading a model file.
///
/// These never cross the [`load`](super::load) boundary; they are logged
/// and absorbed into `None` there.
#[derive(Debug)]
#[cfg_attr(not(feature = "gltf"), allow(dead_code))]
pub(crate) enum LoadError {
    /// Failed to parse the scene container.
    #[cfg(feature = "gltf")]
    Parse(gltf_dep::Error),
    /// The container holds no mesh or no primitive.
    NoGeometry,
    /// The first primitive has no position attribute.
    MissingPositions,
    /// Error reading accessor data.
    Accessor(String),
    /// Error resolving buffer data.
    Buffer(String),
    /// The index accessor uses a component width other than 16 or 32 bits.
    UnsupportedIndexType(String),
    /// Declared index data does not fit in the backing buffer.
    IndexDataOutOfBounds {
        /// Bytes the index accessor declares.
        required: usize,
        /// Bytes available past the buffer view's offset.
        available: usize,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "gltf")]
            Self::Parse(e) => write!(f, "scene parse error: {e}"),
            Self::NoGeometry => write!(f, "container holds no mesh primitive"),
            Self::MissingPositions => write!(f, "primitive has no POSITION attribute"),
            Self::Accessor(msg) => write!(f, "accessor error: {msg}"),
            Self::Buffer(msg) => write!(f, "buffer error: {msg}"),
            Self::UnsupportedIndexType(msg) => {
                write!(f, "unsupported index component type: {msg}")
            }
            Self::IndexDataOutOfBounds {
                required,
                available,
            } => {
                write!(
                    f,
                    "index data needs {required} bytes but only {available} are available"
                )
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "gltf")]
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "gltf")]
impl From<gltf_dep::Error> for LoadError {
    fn from(e: gltf_dep::Error) -> Self {
        Self::Parse(e)
    }
}
