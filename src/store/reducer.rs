use super::action::{Action, ErrorKind};
use super::state::{AppState, ImageTab, ProgressState, TabKind, TextTab};

/// Pure transition function: the next state for `action` applied to `state`.
///
/// Actions that do not apply to the current state (patching an image onto a
/// tab without a recipe, clearing an analysis error on the text tab) return
/// the state unchanged.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    apply(&mut next, action);
    next
}

fn apply(state: &mut AppState, action: Action) {
    match action {
        Action::SetActiveTab(tab) => state.active_tab = tab,
        Action::AddMessage { tab, message } => {
            state.session_mut(tab).conversation.push(message);
        }
        Action::UpdateTextInput(input) => state.text.input = input,

        Action::RecipeGenerationStarted { tab } | Action::OptimizationStarted { tab } => {
            let session = state.session_mut(tab);
            session.is_generating = true;
            session.error = None;
        }
        Action::RecipeGenerationSucceeded { tab, recipe }
        | Action::OptimizationSucceeded { tab, recipe } => {
            let session = state.session_mut(tab);
            session.recipe = Some(recipe);
            session.is_generating = false;
            session.error = None;
        }
        Action::RecipeGenerationFailed { tab, error }
        | Action::OptimizationFailed { tab, error } => {
            let session = state.session_mut(tab);
            session.is_generating = false;
            session.error = Some(error);
        }
        Action::OptimizationRedirected { tab } => {
            state.session_mut(tab).is_generating = false;
        }

        Action::AnalysisStarted => {
            let image = &mut state.image;
            image.is_analyzing = true;
            image.analysis_error = None;
            image.ingredients.clear();
        }
        Action::AnalysisSucceeded { ingredients } => {
            let image = &mut state.image;
            image.is_analyzing = false;
            image.analysis_error = None;
            image.ingredients.clear();
            for ingredient in ingredients {
                push_unique(&mut image.ingredients, &ingredient);
            }
        }
        Action::AnalysisFailed { error } => {
            state.image.is_analyzing = false;
            state.image.analysis_error = Some(error);
        }
        Action::AddIngredient(ingredient) => {
            push_unique(&mut state.image.ingredients, &ingredient);
        }
        Action::RemoveIngredient(ingredient) => {
            state.image.ingredients.retain(|existing| *existing != ingredient);
        }

        Action::ImageGenerationStarted => {
            state.ui.is_generating_image = true;
            state.ui.image_error = None;
        }
        Action::ImageGenerationSucceeded { image_url, target } => {
            let tab = target.unwrap_or(state.active_tab);
            state.ui.is_generating_image = false;
            state.ui.image_error = None;
            let session = state.session_mut(tab);
            if let Some(recipe) = session.recipe.as_ref() {
                session.recipe = Some(recipe.with_image(image_url).into());
            }
        }
        Action::ImageGenerationFailed { error } => {
            state.ui.is_generating_image = false;
            state.ui.image_error = Some(error);
        }

        Action::ClearError { tab, kind } => match kind {
            ErrorKind::Recipe => state.session_mut(tab).error = None,
            ErrorKind::Analysis if tab == TabKind::Image => state.image.analysis_error = None,
            ErrorKind::Analysis => {}
            ErrorKind::Image => state.ui.image_error = None,
        },

        Action::ShowProgress { message, variant } => {
            state.ui.progress = ProgressState {
                visible: true,
                percent: 0,
                message,
                variant,
            };
        }
        Action::UpdateProgress(percent) => state.ui.progress.percent = clamp_percent(percent),
        Action::HideProgress => state.ui.progress.visible = false,

        Action::ResetTab(TabKind::Text) => state.text = TextTab::default(),
        Action::ResetTab(TabKind::Image) => state.image = ImageTab::default(),
        Action::ResetAll => *state = AppState::default(),
    }
}

/// Appends the trimmed ingredient unless it is blank or already listed.
fn push_unique(list: &mut Vec<String>, raw: &str) {
    let ingredient = raw.trim();
    if ingredient.is_empty() || list.iter().any(|existing| existing == ingredient) {
        return;
    }
    list.push(ingredient.to_string());
}

/// Round, then clamp into 0..=100.
pub fn clamp_percent(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
