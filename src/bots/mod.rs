pub mod heuristic;
pub mod human;
pub mod policy;
pub mod random;
pub mod registry;

pub use heuristic::HeuristicBot;
pub use human::HumanBot;
pub use policy::PolicyBot;
pub use random::RandomBot;
