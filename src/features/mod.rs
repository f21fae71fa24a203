pub mod mention;

pub use mention::{MentionHandler, MentionOptions, spawn_mention};
