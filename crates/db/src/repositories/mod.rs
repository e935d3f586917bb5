pub mod participant_repo;
pub mod progress_repo;
pub mod quest_repo;
pub mod seed_repo;

pub use participant_repo::ParticipantRepo;
pub use progress_repo::ProgressRepo;
pub use quest_repo::QuestRepo;
pub use seed_repo::SeedRepo;
