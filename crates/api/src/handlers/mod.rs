pub mod breeds;
pub mod dogs;
pub mod token;
pub mod users;
