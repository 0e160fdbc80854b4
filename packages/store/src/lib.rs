pub mod backend;
pub mod calendar;
pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod models;
pub mod query;
pub mod state;
pub mod tags;
pub mod validate;

mod memory;
pub use memory::MemoryBackend;

pub use backend::{Backend, UploadOptions};
pub use calendar::{Calendar, CalendarEvent, EventDraft};
pub use config::ClubHubConfig;
pub use directory::{AuthError, ClubSaveError, Directory};
pub use error::{Error, Result};
pub use filter::{filter_clubs, ClubFilter, SortKey};
pub use models::{AuthUser, Club, ClubForm, ImageFile, Profile, ProfileUpdate, Session};
pub use query::{Filter, Query, Row};
pub use state::{claim, ClubRelations, Loadable, PendingSet};
pub use tags::{parse_tags, unique_tags};
pub use validate::{Registration, ValidationError};
