//! # TeleBot Core
//!
//! The casting engine and call pipeline underneath the TeleBot client.
//!
//! Everything the API surface needs that is not specific to a particular
//! Telegram type or method lives here.
//!
//! ## Layers
//!
//! ### Values and Objects
//!
//! - **Type descriptors**: static field schemas and abstract families ([`Type`], [`Schema`], [`Family`])
//! - **Values**: the decoded tree the caster works on ([`Value`], [`Map`])
//! - **Caster**: first-match conversion of values to descriptors ([`cast`])
//! - **Objects**: write-once instances with dotted-path access ([`Object`], [`TelegramObject`])
//!
//! ### Calls
//!
//! - **Methods**: declarative method descriptions and request building ([`Method`], [`Request`])
//! - **Transport**: the I/O seam ([`Transport`], [`RawResponse`])
//! - **Dispatcher**: envelope decoding, result casting and concurrent batches ([`Dispatcher`])
//!
//! ## Flow
//!
//! ```text
//! ┌──────────┐  cast args  ┌─────────┐  execute  ┌───────────┐
//! │   args   │────────────▶│ Request │──────────▶│ Transport │
//! └──────────┘             └─────────┘           └─────┬─────┘
//!                                                      │ status + body
//! ┌──────────┐  cast result ┌──────────┐  decode       │
//! │  Object  │◀─────────────│ envelope │◀──────────────┘
//! └──────────┘              └──────────┘
//! ```

pub mod caster;
pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod method;
pub mod object;
pub mod path;
pub mod testing;
pub mod transport;
pub mod value;

pub use caster::cast;
pub use descriptor::{Discriminator, Family, Field, Schema, Type};
pub use dispatcher::Dispatcher;
pub use error::{
    ApiError, ApiResult, ErrorKind, ObjectError, ObjectResult, TransportError, TransportResult,
};
pub use method::{DEFAULT_API_URL, Endpoint, Method, MethodDescriptor, Request, Verb};
pub use object::{Object, TelegramObject};
pub use path::{FieldPath, PathStep};
pub use transport::{BoxedTransport, RawResponse, Transport};
pub use value::{FromValue, Map, Value};
