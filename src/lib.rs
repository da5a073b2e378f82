pub mod config;
pub mod dataset;
pub mod element;
pub mod filter;
pub mod quiz;
pub mod repository;
pub mod scheduler;
pub mod store;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use config::{AppConfig, ConfigError};
pub use dataset::{GRID_COLUMNS, GRID_ROWS, builtin_elements, category_label, grid_position};
pub use element::{EditError, ElementCategory, ElementField, ElementRecord};
pub use filter::{SelectionFilter, Tile, matches};
pub use quiz::{
    AnswerOutcome, Question, QuizError, QuizPhase, QuizSession, QuizSettings, QuizSummary,
    TimerBand, build_question, shuffle_questions,
};
pub use repository::{
    EditOverlay, ElementRepository, OVERLAY_KEY, RepositoryError, effective_list, read_overlay,
};
pub use scheduler::{ManualScheduler, Scheduler, ThreadScheduler, TimerEvent};
pub use store::{FileStore, MemoryStore, OverlayStore, StoreError};
