//! Static call script: step/phase catalogs, screen content, objections.

pub mod catalog;
pub mod content;
pub mod objections;

pub use catalog::{Phase, PhaseId, Step, StepId, phase_at, step_at, step_count};
pub use content::{Block, Layout, Line, Screen, ScriptCard, Tone};
pub use objections::{OBJECTIONS, Objection, ObjectionId};
