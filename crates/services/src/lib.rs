#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod detail_lookup;
pub mod error;
pub mod exercise_guide;
pub mod logging;
pub mod persistence;
pub mod progress_store;
pub mod session_manager;

pub use fitness_core::Clock;

pub use app_services::FitnessServices;
pub use config::ServicesConfig;
pub use detail_lookup::{DetailState, ExerciseDetailLookup};
pub use error::{AppServicesError, ExerciseGuideError, SessionError};
pub use exercise_guide::{
    ExerciseGuide, ExerciseGuideConfig, ExerciseGuideProvider, HttpExerciseGuideService,
};
pub use persistence::WriteBehind;
pub use progress_store::ProgressStore;
pub use session_manager::{Landing, ProfileOverview, SessionManager, SessionState};
