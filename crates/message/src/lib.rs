//! facade-message: read-only views over analytics message payloads.
//!
//! [`Payload`] wraps one raw tree and exposes the accessors every message
//! shares (context, traits, library, device, location, timestamp). The
//! variant types ([`Track`], [`Identify`], [`Group`], [`Page`], [`Screen`],
//! [`Alias`]) dereference to their payload and add variant fields.
//!
//! ```
//! use facade_message::Track;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "event": "Signed Up",
//!     "context": { "all": false, "Customer.io": { "setting": true } }
//! });
//! let track = Track::new(&raw).unwrap();
//! assert_eq!(track.event().as_deref(), Some("Signed Up"));
//! assert!(track.enabled("customer_io"));
//! assert!(!track.enabled("Mixpanel"));
//! assert_eq!(track.json()["type"], "track");
//! ```

mod alias;
mod group;
mod identify;
mod kind;
mod library;
mod page;
mod payload;
mod track;
mod traits;

pub use alias::Alias;
pub use group::Group;
pub use identify::Identify;
pub use kind::{MessageKind, UnknownKind};
pub use library::{infer_device_type, Library, LIBRARY_DEVICE_TYPES};
pub use page::{Page, Screen};
pub use payload::Payload;
pub use track::Track;

pub use facade_core::{Clock, Datum, FacadeError, Field, FixedClock, Multi, One, SystemClock};
pub use facade_integrations::{EnablementDecision, IntegrationName, Resolver};
