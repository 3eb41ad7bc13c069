//! Repositories for database operations

pub mod character;
pub mod comment;
pub mod episode;

pub use character::CharacterRepository;
pub use comment::CommentRepository;
pub use episode::EpisodeRepository;
