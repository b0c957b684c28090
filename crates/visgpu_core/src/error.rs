//! Resource usage errors

/// Error raised when a buffer or texture is used against its declaration
///
/// These are fatal at the point of use: the driver handed the core a resource
/// that cannot back the requested binding or write.
#[derive(Debug)]
pub enum ResourceError {
    /// A write would extend past the end of a buffer (buffers never resize implicitly)
    OutOfBounds {
        /// Byte offset of the attempted write
        offset: usize,
        /// Byte length of the attempted write
        len: usize,
        /// Total buffer size in bytes
        capacity: usize,
    },
    /// A binding requires a usage flag the resource was not created with
    UsageMismatch {
        /// What the binding needed, e.g. "storage"
        expected: &'static str,
    },
    /// A texture size does not match its declared dimensionality
    SizeMismatch {
        /// Description of the offending size
        detail: String,
    },
}

impl std::fmt::Display for ResourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceError::OutOfBounds { offset, len, capacity } => write!(
                f,
                "write of {} bytes at offset {} exceeds buffer capacity {}",
                len, offset, capacity
            ),
            ResourceError::UsageMismatch { expected } => {
                write!(f, "resource is missing required usage: {}", expected)
            }
            ResourceError::SizeMismatch { detail } => {
                write!(f, "texture size mismatch: {}", detail)
            }
        }
    }
}

impl std::error::Error for ResourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_error_display() {
        let err = ResourceError::OutOfBounds { offset: 16, len: 32, capacity: 40 };
        assert_eq!(
            format!("{}", err),
            "write of 32 bytes at offset 16 exceeds buffer capacity 40"
        );

        let err = ResourceError::UsageMismatch { expected: "storage" };
        assert_eq!(format!("{}", err), "resource is missing required usage: storage");
    }
}
