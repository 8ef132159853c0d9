pub mod memory;
pub mod seaorm;

pub use memory::MemoryPersonRepository;
pub use seaorm::SeaOrmPersonRepository;
