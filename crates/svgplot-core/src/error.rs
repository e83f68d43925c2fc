//! Error handling for svgplot
//!
//! Provides the error types for the shape-to-point pipeline:
//! - Shape errors (missing or malformed native attributes)
//! - Path errors (curve-path mini-language, transform declarations, geometry)
//!
//! A shape or path error only ever aborts the shape it belongs to; the driver
//! substitutes an empty point sequence and moves on to the next element.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Shape attribute error type
///
/// Raised by shape adapters while reading an element's native attributes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A required attribute is absent
    #[error("<{shape}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// The shape tag name.
        shape: String,
        /// The missing attribute name.
        attribute: String,
    },

    /// An attribute is present but cannot be used
    #[error("<{shape}> attribute '{attribute}' has invalid value '{value}': {reason}")]
    InvalidAttribute {
        /// The shape tag name.
        shape: String,
        /// The attribute name.
        attribute: String,
        /// The raw attribute value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A list-valued attribute (`points`, `transform`) could not be parsed
    #[error("<{shape}> attribute '{attribute}' is malformed: {source}")]
    Malformed {
        /// The shape tag name.
        shape: String,
        /// The attribute name.
        attribute: String,
        /// The underlying parse failure.
        #[source]
        source: PathError,
    },
}

/// Curve-path error type
///
/// Represents errors found while tokenizing or parsing path data and
/// transform declarations, plus geometry that collapsed to a degenerate case.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// A command letter that the mini-language does not define
    #[error("Unknown path command '{command}' at offset {offset}")]
    UnknownCommand {
        /// The unrecognized letter.
        command: char,
        /// Byte offset in the source string.
        offset: usize,
    },

    /// A character that is neither a command, a number nor a separator
    #[error("Unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset in the source string.
        offset: usize,
    },

    /// A numeric token that does not parse
    #[error("Invalid number '{token}' at offset {offset}")]
    InvalidNumber {
        /// The raw token text.
        token: String,
        /// Byte offset in the source string.
        offset: usize,
    },

    /// Argument list length is not a whole number of groups
    #[error("Command '{command}' expects arguments in groups of {group_size}, found {found}")]
    ArgumentCount {
        /// The command letter or transform function name.
        command: String,
        /// Expected group size.
        group_size: usize,
        /// Number of arguments actually supplied.
        found: usize,
    },

    /// Geometry collapsed to a no-op or a simpler primitive
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// What was substituted.
        reason: String,
    },

    /// Unknown transform function name
    #[error("Unknown transform function '{name}'")]
    UnknownTransform {
        /// The function name.
        name: String,
    },

    /// Smoothness must be a positive finite number
    #[error("Smoothness must be > 0, got {value}")]
    InvalidSmoothness {
        /// The rejected value.
        value: f64,
    },
}

impl PathError {
    /// Fatal errors abort the current shape; the rest are recorded and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PathError::ArgumentCount { .. }
                | PathError::InvalidNumber { .. }
                | PathError::InvalidSmoothness { .. }
                | PathError::UnknownTransform { .. }
        )
    }
}

/// Error raised while turning one shape into points
///
/// Either the element's attributes were unusable or its outline could not
/// be parsed. Both abort only that shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Shape attribute error
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Path data error
    #[error(transparent)]
    Path(#[from] PathError),
}

impl Error {
    /// Check if this is a shape attribute error
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Error::Shape(_))
    }

    /// Check if this is a path data error
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Path(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
