pub mod final_value;

pub use final_value::{
    project_final_value, GainTreatment, ProjectionInput, ProjectionMethod, ProjectionResult,
    ProjectionScenario,
};
