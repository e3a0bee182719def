//! Model repository implementations

mod file_system;
mod in_memory;

pub use file_system::FileSystemModelRepository;
pub use in_memory::InMemoryModelRepository;
