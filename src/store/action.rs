use super::state::{ProgressVariant, TabKind};
use crate::types::{ChatMessage, Recipe};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Recipe,
    Analysis,
    Image,
}

/// The closed set of state transitions.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SetActiveTab(TabKind),
    AddMessage { tab: TabKind, message: ChatMessage },
    UpdateTextInput(String),

    RecipeGenerationStarted { tab: TabKind },
    RecipeGenerationSucceeded { tab: TabKind, recipe: Arc<Recipe> },
    RecipeGenerationFailed { tab: TabKind, error: String },

    OptimizationStarted { tab: TabKind },
    OptimizationSucceeded { tab: TabKind, recipe: Arc<Recipe> },
    OptimizationFailed { tab: TabKind, error: String },
    /// Off-topic reply: stop the spinner, keep recipe and error untouched.
    OptimizationRedirected { tab: TabKind },

    AnalysisStarted,
    AnalysisSucceeded { ingredients: Vec<String> },
    AnalysisFailed { error: String },
    AddIngredient(String),
    RemoveIngredient(String),

    ImageGenerationStarted,
    /// `target: None` patches whichever tab is active when this is reduced.
    ImageGenerationSucceeded {
        image_url: String,
        target: Option<TabKind>,
    },
    ImageGenerationFailed { error: String },

    ClearError { tab: TabKind, kind: ErrorKind },

    ShowProgress {
        message: String,
        variant: ProgressVariant,
    },
    UpdateProgress(f64),
    HideProgress,

    ResetTab(TabKind),
    ResetAll,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetActiveTab(_) => "SET_ACTIVE_TAB",
            Action::AddMessage { .. } => "ADD_MESSAGE",
            Action::UpdateTextInput(_) => "UPDATE_TEXT_INPUT",
            Action::RecipeGenerationStarted { .. } => "START_RECIPE_GENERATION",
            Action::RecipeGenerationSucceeded { .. } => "RECIPE_GENERATION_SUCCESS",
            Action::RecipeGenerationFailed { .. } => "RECIPE_GENERATION_ERROR",
            Action::OptimizationStarted { .. } => "START_RECIPE_OPTIMIZATION",
            Action::OptimizationSucceeded { .. } => "RECIPE_OPTIMIZATION_SUCCESS",
            Action::OptimizationFailed { .. } => "RECIPE_OPTIMIZATION_ERROR",
            Action::OptimizationRedirected { .. } => "RECIPE_OPTIMIZATION_REDIRECTED",
            Action::AnalysisStarted => "START_IMAGE_ANALYSIS",
            Action::AnalysisSucceeded { .. } => "IMAGE_ANALYSIS_SUCCESS",
            Action::AnalysisFailed { .. } => "IMAGE_ANALYSIS_ERROR",
            Action::AddIngredient(_) => "ADD_INGREDIENT",
            Action::RemoveIngredient(_) => "REMOVE_INGREDIENT",
            Action::ImageGenerationStarted => "START_IMAGE_GENERATION",
            Action::ImageGenerationSucceeded { .. } => "IMAGE_GENERATION_SUCCESS",
            Action::ImageGenerationFailed { .. } => "IMAGE_GENERATION_ERROR",
            Action::ClearError { .. } => "CLEAR_ERROR",
            Action::ShowProgress { .. } => "SHOW_PROGRESS",
            Action::UpdateProgress(_) => "UPDATE_PROGRESS",
            Action::HideProgress => "HIDE_PROGRESS",
            Action::ResetTab(_) => "RESET_TAB",
            Action::ResetAll => "RESET_ALL",
        }
    }
}
