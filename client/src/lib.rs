//! Client side of the events service: a typed API wrapper, a query cache and
//! the view logic behind the dashboard, detail page and event form.

pub mod api;
pub mod cache;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod form;
pub mod format;
pub mod status;

pub use api::{EventsApi, DEFAULT_BASE_URL};
pub use cache::EventsCache;
pub use dashboard::{DashboardStats, ListView, PAGE_SIZE};
pub use detail::EventDetail;
pub use error::{ClientError, ClientResult};
pub use form::{EventForm, FormErrors, FormField, FormMode};
pub use status::{derive_status, status_of, EventStatus};
