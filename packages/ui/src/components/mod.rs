//! Shared presentational components.
//!
//! Components render from props and report user intent through event
//! handlers; none of them talks to the backend.

mod button;
pub use button::{Button, ButtonVariant};

mod form;
pub use form::{ErrorBanner, Input, Label, Textarea};

mod image_input;
pub use image_input::ImageInput;

mod club_card;
pub use club_card::{friends_label, ClubCard, ClubGrid, TagChips};

mod filter_bar;
pub use filter_bar::{FilterBar, SortToggle};

mod friend_row;
pub use friend_row::FriendRow;

mod calendar;
pub use calendar::{EventAgenda, EventForm};

mod profile_card;
pub use profile_card::ProfileCard;
