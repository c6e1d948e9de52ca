use thiserror::Error;

/// Error types for particle system construction and configuration
#[derive(Error, Debug)]
pub enum ParticleError {
    /// The texture table handed to a particle system was empty
    #[error("Texture table is empty: a particle system needs at least one texture")]
    EmptyTextureTable,

    /// A texture index outside the system's texture table
    #[error("Invalid texture index {index}: table holds {len} textures")]
    InvalidTexture { index: usize, len: usize },

    /// A configuration document could not be read or written
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(feature = "serde-support")]
impl From<serde_json::Error> for ParticleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result type using ParticleError
pub type Result<T> = std::result::Result<T, ParticleError>;
