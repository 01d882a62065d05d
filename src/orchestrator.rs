//! User-initiated flows.
//!
//! Each flow dispatches store actions around one backend call and runs the
//! cosmetic progress bar alongside it. Nothing here is queued or cancelled:
//! two overlapping flows on the same tab both land, last write wins.
use crate::api::{HttpBackend, OptimizeOutcome, RecipeBackend};
use crate::config::{AppConfig, ImageTarget};
use crate::error::{ApiError, FlowError, messages};
use crate::intent::classify_intent;
use crate::progress::{self, ProgressReporter};
use crate::store::{Action, AppState, ErrorKind, ProgressVariant, Store, TabKind};
use crate::tasks::{TaskHandle, schedule};
use crate::types::{ChatMessage, HistoryEntry, ImageUpload, Recipe};
use std::sync::Arc;

/// What an optimize request produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Optimization {
    Revised(Arc<Recipe>),
    OffTopic(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank message, nothing happened.
    Ignored,
    Optimized,
    OffTopic,
    OptimizationFailed,
    Generated,
    GenerationFailed,
    /// Recipe-like message on the image tab before any ingredient is known.
    NeedsIngredients,
    Acknowledged,
}

/// Result of one chat message: what happened plus the delayed replies it
/// scheduled.
#[derive(Debug)]
pub struct ChatTurn {
    pub outcome: TurnOutcome,
    pub replies: Vec<TaskHandle>,
}

impl ChatTurn {
    fn new(outcome: TurnOutcome, replies: Vec<TaskHandle>) -> Self {
        Self { outcome, replies }
    }

    /// Wait until every scheduled reply has been appended.
    pub async fn settle(self) -> TurnOutcome {
        for reply in self.replies {
            reply.wait().await;
        }
        self.outcome
    }
}

#[derive(Clone)]
pub struct Orchestrator {
    store: Store,
    backend: Arc<dyn RecipeBackend>,
    progress: ProgressReporter,
    config: AppConfig,
}

impl Orchestrator {
    pub fn new(store: Store, backend: Arc<dyn RecipeBackend>, config: AppConfig) -> Self {
        let progress = ProgressReporter::new(store.clone());
        Self {
            store,
            backend,
            progress,
            config,
        }
    }

    /// Orchestrator talking to the HTTP backend described by `config`.
    pub fn from_config(config: AppConfig) -> Result<Self, ApiError> {
        let backend = HttpBackend::from_config(&config)?;
        tracing::info!(base_url = backend.base_url(), "using recipe backend");
        Ok(Self::new(Store::new(), Arc::new(backend), config))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn snapshot(&self) -> AppState {
        self.store.snapshot()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ---- plain state edits ----

    pub fn switch_tab(&self, tab: TabKind) {
        self.store.dispatch(Action::SetActiveTab(tab));
    }

    pub fn update_text_input(&self, input: impl Into<String>) {
        self.store.dispatch(Action::UpdateTextInput(input.into()));
    }

    pub fn add_ingredient(&self, ingredient: impl Into<String>) {
        self.store.dispatch(Action::AddIngredient(ingredient.into()));
    }

    pub fn remove_ingredient(&self, ingredient: impl Into<String>) {
        self.store.dispatch(Action::RemoveIngredient(ingredient.into()));
    }

    pub fn clear_error(&self, tab: TabKind, kind: ErrorKind) {
        self.store.dispatch(Action::ClearError { tab, kind });
    }

    pub fn reset_tab(&self, tab: TabKind) {
        self.store.dispatch(Action::ResetTab(tab));
    }

    pub fn reset_all(&self) {
        self.store.dispatch(Action::ResetAll);
    }

    // ---- conversation ----

    fn post(&self, tab: TabKind, message: ChatMessage) {
        self.store.dispatch(Action::AddMessage { tab, message });
    }

    /// Append an assistant message after the configured reply delay.
    /// Fire-and-forget unless the returned handle is aborted.
    pub fn reply_later(&self, tab: TabKind, content: impl Into<String>) -> TaskHandle {
        let store = self.store.clone();
        let content = content.into();
        schedule(self.config.reply_delay, move || {
            store.dispatch(Action::AddMessage {
                tab,
                message: ChatMessage::ai(content),
            });
        })
    }

    /// Handle a chat message typed on `tab`.
    ///
    /// With a recipe on the tab the message is always an optimisation request.
    /// Without one, the intent classifier decides between generating a recipe
    /// and a plain acknowledgement.
    pub async fn send_message(&self, tab: TabKind, message: &str) -> ChatTurn {
        let message = message.trim();
        if message.is_empty() {
            return ChatTurn::new(TurnOutcome::Ignored, Vec::new());
        }

        let (recipe, history) = self.store.read(|state| {
            let session = state.session(tab);
            let history: Vec<HistoryEntry> =
                session.conversation.iter().map(HistoryEntry::from).collect();
            (session.recipe.clone(), history)
        });
        self.post(tab, ChatMessage::user(message));

        if let Some(recipe) = recipe {
            return match self.optimize_recipe(tab, &recipe, message, &history).await {
                Ok(Optimization::Revised(_)) => ChatTurn::new(
                    TurnOutcome::Optimized,
                    vec![self.reply_later(tab, messages::reply_optimized(message))],
                ),
                Ok(Optimization::OffTopic(reminder)) => ChatTurn::new(
                    TurnOutcome::OffTopic,
                    vec![self.reply_later(tab, reminder)],
                ),
                Err(_) => ChatTurn::new(
                    TurnOutcome::OptimizationFailed,
                    vec![self.reply_later(tab, messages::REPLY_OPTIMIZATION_FAILED)],
                ),
            };
        }

        if !classify_intent(self.backend.as_ref(), message).await {
            let ack = match tab {
                TabKind::Text => messages::REPLY_ACK_TEXT,
                TabKind::Image => messages::REPLY_ACK_IMAGE,
            };
            return ChatTurn::new(TurnOutcome::Acknowledged, vec![self.reply_later(tab, ack)]);
        }

        if tab == TabKind::Image && self.store.read(|state| state.image.ingredients.is_empty()) {
            return ChatTurn::new(
                TurnOutcome::NeedsIngredients,
                vec![self.reply_later(tab, messages::REPLY_UPLOAD_FIRST)],
            );
        }

        let mut replies = vec![self.reply_later(tab, messages::REPLY_GENERATING)];
        let generated = match tab {
            TabKind::Text => self.generate_recipe(message, TabKind::Text).await,
            TabKind::Image => self.generate_from_ingredients().await,
        };
        let outcome = match generated {
            Ok(_) => TurnOutcome::Generated,
            Err(_) => {
                replies.push(self.reply_later(tab, messages::REPLY_GENERATION_FAILED));
                TurnOutcome::GenerationFailed
            }
        };
        ChatTurn::new(outcome, replies)
    }

    // ---- recipes ----

    pub async fn generate_recipe(
        &self,
        description: &str,
        tab: TabKind,
    ) -> Result<Arc<Recipe>, FlowError> {
        self.store.dispatch(Action::RecipeGenerationStarted { tab });
        self.progress.simulate(
            "正在生成菜谱...",
            ProgressVariant::Recipe,
            progress::RECIPE_DURATION,
        );

        match self.backend.generate_recipe(description).await {
            Ok(recipe) => {
                let recipe = Arc::new(recipe);
                self.progress.complete();
                tracing::info!(%tab, dish = %recipe.dish_name, "recipe generated");
                self.store.dispatch(Action::RecipeGenerationSucceeded {
                    tab,
                    recipe: recipe.clone(),
                });
                Ok(recipe)
            }
            Err(err) => {
                tracing::error!(%tab, %err, "recipe generation failed");
                self.progress.hide();
                self.store.dispatch(Action::RecipeGenerationFailed {
                    tab,
                    error: messages::GENERATION_FAILED.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Generate from the text tab's textarea.
    pub async fn submit_text(&self) -> Result<Arc<Recipe>, FlowError> {
        let input = self.store.read(|state| state.text.input.trim().to_string());
        if input.is_empty() {
            self.fail_before_request(TabKind::Text, FlowError::EmptyInput);
            return Err(FlowError::EmptyInput);
        }
        self.generate_recipe(&input, TabKind::Text).await
    }

    /// Generate on the image tab from the current ingredient list.
    pub async fn generate_from_ingredients(&self) -> Result<Arc<Recipe>, FlowError> {
        let ingredients = self.store.read(|state| state.image.ingredients.clone());
        if ingredients.is_empty() {
            self.fail_before_request(TabKind::Image, FlowError::NoIngredients);
            return Err(FlowError::NoIngredients);
        }
        let description = ingredients_prompt(&ingredients);
        self.generate_recipe(&description, TabKind::Image).await
    }

    fn fail_before_request(&self, tab: TabKind, err: FlowError) {
        tracing::debug!(%tab, %err, "flow rejected before any request");
        self.store.dispatch(Action::RecipeGenerationFailed {
            tab,
            error: err.user_message().to_string(),
        });
    }

    pub async fn optimize_recipe(
        &self,
        tab: TabKind,
        current: &Recipe,
        request: &str,
        history: &[HistoryEntry],
    ) -> Result<Optimization, FlowError> {
        self.store.dispatch(Action::OptimizationStarted { tab });
        self.progress.simulate(
            "正在优化菜谱...",
            ProgressVariant::Optimize,
            progress::OPTIMIZE_DURATION,
        );

        match self.backend.optimize_recipe(current, request, history).await {
            Ok(OptimizeOutcome::Revised(recipe)) => {
                let recipe = Arc::new(recipe);
                self.progress.complete();
                tracing::info!(%tab, dish = %recipe.dish_name, "recipe optimized");
                self.store.dispatch(Action::OptimizationSucceeded {
                    tab,
                    recipe: recipe.clone(),
                });
                Ok(Optimization::Revised(recipe))
            }
            Ok(OptimizeOutcome::OffTopic { message }) => {
                tracing::info!(%tab, "optimize request was off topic");
                self.progress.hide();
                self.store.dispatch(Action::OptimizationRedirected { tab });
                Ok(Optimization::OffTopic(message))
            }
            Err(err) => {
                tracing::error!(%tab, %err, "recipe optimization failed");
                self.progress.hide();
                self.store.dispatch(Action::OptimizationFailed {
                    tab,
                    error: messages::OPTIMIZATION_FAILED.to_string(),
                });
                Err(err.into())
            }
        }
    }

    // ---- ingredients ----

    /// Recognise ingredients in `image`, replacing the image tab's list.
    pub async fn analyze_image(&self, image: ImageUpload) -> Result<Vec<String>, FlowError> {
        self.store.dispatch(Action::AnalysisStarted);
        self.progress.simulate(
            "正在识别图片中的食材...",
            ProgressVariant::Analysis,
            progress::ANALYSIS_DURATION,
        );
        tracing::debug!(file = %image.file_name, bytes = image.bytes.len(), "analyzing photo");

        let analysis = match self.backend.analyze_ingredients(&image).await {
            Ok(analysis) if analysis.success => analysis,
            Ok(analysis) => {
                let reason = analysis
                    .error
                    .unwrap_or_else(|| "analysis unsuccessful".to_string());
                return Err(self.analysis_failed(ApiError::Rejected(reason)));
            }
            Err(err) => return Err(self.analysis_failed(err)),
        };

        self.progress.complete();
        self.store.dispatch(Action::AnalysisSucceeded {
            ingredients: analysis.ingredients,
        });
        let ingredients = self.store.read(|state| state.image.ingredients.clone());
        tracing::info!(count = ingredients.len(), confidence = ?analysis.confidence, "photo analyzed");

        if ingredients.is_empty() {
            self.store.dispatch(Action::AnalysisFailed {
                error: FlowError::NothingRecognized.user_message().to_string(),
            });
            return Err(FlowError::NothingRecognized);
        }
        Ok(ingredients)
    }

    fn analysis_failed(&self, err: ApiError) -> FlowError {
        tracing::error!(%err, "ingredient analysis failed");
        self.progress.hide();
        self.store.dispatch(Action::AnalysisFailed {
            error: messages::ANALYSIS_FAILED.to_string(),
        });
        err.into()
    }

    // ---- dish images ----

    /// Request a picture of the recipe currently shown on `tab`.
    pub async fn generate_image(&self, tab: TabKind) -> Result<String, FlowError> {
        let Some(recipe) = self.store.read(|state| state.recipe(tab).cloned()) else {
            self.store.dispatch(Action::ImageGenerationFailed {
                error: FlowError::NoRecipe.user_message().to_string(),
            });
            return Err(FlowError::NoRecipe);
        };

        self.store.dispatch(Action::ImageGenerationStarted);
        self.progress.simulate(
            "正在生成菜品图片...",
            ProgressVariant::Image,
            progress::IMAGE_DURATION,
        );

        match self.backend.generate_dish_image(&recipe).await {
            Ok(image_url) => {
                self.progress.complete();
                let target = match self.config.image_target {
                    ImageTarget::CapturedAtRequest => Some(tab),
                    ImageTarget::ActiveAtCompletion => None,
                };
                tracing::info!(%tab, ?target, "dish image generated");
                self.store.dispatch(Action::ImageGenerationSucceeded {
                    image_url: image_url.clone(),
                    target,
                });
                Ok(image_url)
            }
            Err(err) => {
                tracing::error!(%tab, %err, "dish image generation failed");
                self.progress.hide();
                self.store.dispatch(Action::ImageGenerationFailed {
                    error: messages::IMAGE_FAILED.to_string(),
                });
                Err(err.into())
            }
        }
    }
}

/// Description sent to the generator when cooking from recognised ingredients.
pub fn ingredients_prompt(ingredients: &[String]) -> String {
    format!("我有这些食材：{}，请帮我生成一道菜谱。", ingredients.join("、"))
}
