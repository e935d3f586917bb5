pub mod quest;

pub use quest::{Quest, QuestSeed};
