//! Core diagnostic stream types and traits

pub mod color;
pub mod control;
pub mod error;
pub mod facility;
pub mod globals;
pub mod importance;
pub mod message;
pub mod prefix;
pub mod properties;
pub mod registry;
pub mod stream;
pub(crate) mod stream_buf;

pub use color::{Color, ColorSet, ColorSpec};
pub use error::{MlogError, Result};
pub use facility::{Facility, FacilityBuilder};
pub use importance::{Importance, IMPORTANCE_COUNT};
pub use message::Message;
pub use prefix::{DefaultPrefix, Prefix};
pub use properties::{MessageProperties, StreamId};
pub use registry::FacilityRegistry;
pub use stream::{EnableGuard, MessageHandle, Stream};
