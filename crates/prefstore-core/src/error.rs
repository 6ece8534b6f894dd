use thiserror::Error;

/// Error produced by a codec function.
///
/// Serializers and deserializers are user-pluggable, so their failures are
/// carried as opaque boxed errors and wrapped with the key they occurred on.
pub type CodecError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by any layer of the storage chain.
///
/// Raw-store failures and codec failures pass through the chain unchanged;
/// no layer retries, swallows, or replaces them with a default.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying store rejected the operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A quota-limited store refused a write.
    #[error("quota exceeded writing {key:?} (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: usize },

    /// The serializer could not encode a value. Nothing was written.
    #[error("failed to encode value for {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: CodecError,
    },

    /// A stored value could not be decoded.
    #[error("failed to decode value for {key:?}: {source}")]
    Decode {
        key: String,
        #[source]
        source: CodecError,
    },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Whether this error came from decoding stored data.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
