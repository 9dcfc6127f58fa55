pub mod history;
pub mod manager;
pub mod script;

pub use history::Transcript;
pub use manager::Session;
pub use script::SeedExchange;
