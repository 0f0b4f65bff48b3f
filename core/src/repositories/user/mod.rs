pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;

pub use memory::InMemoryUserRepository;
pub use r#trait::UserRepository;
