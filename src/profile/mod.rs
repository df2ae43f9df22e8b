//! User preferences and rating history.

pub mod manager;
pub mod model;
pub mod store;


pub use manager::UserProfileManager;
pub use model::{Interaction, ProfileSnapshot, RatingRecord, UserPreference, UserStats};
pub use store::{JsonFileStore, MemoryProfileStore, ProfileStore};
