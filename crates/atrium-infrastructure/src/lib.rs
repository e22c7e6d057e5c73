//! Infrastructure layer: storage adapters and preset catalogs.

pub mod atomic_toml;
pub mod memory_research_session_repository;
pub mod scenario_presets;
pub mod toml_research_session_repository;

pub use atomic_toml::AtomicTomlFile;
pub use memory_research_session_repository::MemoryResearchSessionRepository;
pub use scenario_presets::StaticScenarioCatalog;
pub use toml_research_session_repository::TomlResearchSessionRepository;
