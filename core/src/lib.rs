//! Domain types and rules shared between the evently API server and its clients.

pub mod envelope;
pub mod event;
pub mod validation;

pub use envelope::{ApiFailure, ApiSuccess, Envelope};
pub use event::{
    CreateEventInput, DeletedEvent, Event, EventId, EventPatch, NewEvent, UpdateEventInput,
};
pub use validation::{FieldError, ValidationErrors};
