//! Scripted backend shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use dishcraft::api::{IngredientAnalysis, OptimizeOutcome, RecipeBackend};
use dishcraft::config::{AppConfig, ImageTarget};
use dishcraft::error::{ApiError, ApiResult};
use dishcraft::orchestrator::Orchestrator;
use dishcraft::store::Store;
use dishcraft::types::{
    Difficulty, HistoryEntry, ImageUpload, Ingredient, Instruction, NutritionalInfo, Recipe,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Replays queued responses in order. An empty queue answers with
/// `ApiError::Rejected`, which the flows treat like any transport failure.
#[derive(Default)]
pub struct ScriptedBackend {
    generate: Mutex<VecDeque<ApiResult<Recipe>>>,
    optimize: Mutex<VecDeque<ApiResult<OptimizeOutcome>>>,
    analyze: Mutex<VecDeque<ApiResult<IngredientAnalysis>>>,
    image: Mutex<VecDeque<ApiResult<String>>>,
    intent: Mutex<VecDeque<ApiResult<bool>>>,
    image_latency: Mutex<Duration>,

    pub generate_calls: Mutex<Vec<String>>,
    pub optimize_calls: Mutex<Vec<OptimizeCall>>,
    pub analyze_calls: Mutex<Vec<String>>,
    pub image_calls: Mutex<Vec<String>>,
    pub intent_calls: Mutex<Vec<String>>,
}

#[derive(Clone, Debug)]
pub struct OptimizeCall {
    pub current: Recipe,
    pub request: String,
    pub history: Vec<HistoryEntry>,
}

fn next<T>(queue: &Mutex<VecDeque<ApiResult<T>>>, endpoint: &str) -> ApiResult<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::Rejected(format!("no scripted {endpoint} response"))))
}

pub fn offline(endpoint: &str) -> ApiError {
    ApiError::Rejected(format!("{endpoint} unreachable"))
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_generate(&self, result: ApiResult<Recipe>) -> &Self {
        self.generate.lock().unwrap().push_back(result);
        self
    }

    pub fn push_optimize(&self, result: ApiResult<OptimizeOutcome>) -> &Self {
        self.optimize.lock().unwrap().push_back(result);
        self
    }

    pub fn push_analysis(&self, result: ApiResult<IngredientAnalysis>) -> &Self {
        self.analyze.lock().unwrap().push_back(result);
        self
    }

    pub fn push_image(&self, result: ApiResult<String>) -> &Self {
        self.image.lock().unwrap().push_back(result);
        self
    }

    pub fn push_intent(&self, result: ApiResult<bool>) -> &Self {
        self.intent.lock().unwrap().push_back(result);
        self
    }

    /// Make dish image requests take `latency` of (virtual) time.
    pub fn set_image_latency(&self, latency: Duration) {
        *self.image_latency.lock().unwrap() = latency;
    }
}

#[async_trait]
impl RecipeBackend for ScriptedBackend {
    async fn generate_recipe(&self, description: &str) -> ApiResult<Recipe> {
        self.generate_calls
            .lock()
            .unwrap()
            .push(description.to_string());
        next(&self.generate, "generate")
    }

    async fn optimize_recipe(
        &self,
        current: &Recipe,
        request: &str,
        history: &[HistoryEntry],
    ) -> ApiResult<OptimizeOutcome> {
        self.optimize_calls.lock().unwrap().push(OptimizeCall {
            current: current.clone(),
            request: request.to_string(),
            history: history.to_vec(),
        });
        next(&self.optimize, "optimize")
    }

    async fn analyze_ingredients(&self, image: &ImageUpload) -> ApiResult<IngredientAnalysis> {
        self.analyze_calls
            .lock()
            .unwrap()
            .push(image.file_name.clone());
        next(&self.analyze, "analyze")
    }

    async fn generate_dish_image(&self, recipe: &Recipe) -> ApiResult<String> {
        self.image_calls
            .lock()
            .unwrap()
            .push(recipe.dish_name.clone());
        let latency = *self.image_latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        next(&self.image, "image")
    }

    async fn classify_intent(&self, message: &str) -> ApiResult<bool> {
        self.intent_calls.lock().unwrap().push(message.to_string());
        next(&self.intent, "intent")
    }
}

pub fn config(image_target: ImageTarget) -> AppConfig {
    AppConfig {
        reply_delay: Duration::from_millis(500),
        image_target,
        ..AppConfig::default()
    }
}

pub fn orchestrator(backend: &Arc<ScriptedBackend>) -> Orchestrator {
    orchestrator_with(backend, config(ImageTarget::CapturedAtRequest))
}

pub fn orchestrator_with(backend: &Arc<ScriptedBackend>, config: AppConfig) -> Orchestrator {
    Orchestrator::new(Store::new(), backend.clone(), config)
}

pub fn recipe(dish_name: &str) -> Recipe {
    Recipe {
        dish_name: dish_name.to_string(),
        description: format!("{dish_name}，家常做法"),
        cuisine_type: "中式".to_string(),
        difficulty: Difficulty::Easy,
        prep_time_mins: 15,
        cook_time_mins: 30,
        servings: 2,
        ingredients: vec![
            Ingredient {
                name: "土豆".to_string(),
                amount: 2.0,
                unit: "个".to_string(),
            },
            Ingredient {
                name: "牛肉".to_string(),
                amount: 300.0,
                unit: "克".to_string(),
            },
        ],
        instructions: vec![
            Instruction {
                step: 1,
                description: "牛肉切块焯水".to_string(),
            },
            Instruction {
                step: 2,
                description: "加入土豆炖煮".to_string(),
            },
        ],
        tips: vec!["炖煮时保持小火".to_string()],
        nutritional_info: NutritionalInfo {
            calories_kcal: 520.0,
            protein_g: 32.0,
            carbs_g: 40.0,
            fat_g: 22.0,
        },
        image_url: None,
    }
}

pub fn recognized(ingredients: &[&str]) -> IngredientAnalysis {
    IngredientAnalysis {
        success: true,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        confidence: Some("high".to_string()),
        error: None,
    }
}

pub fn photo() -> ImageUpload {
    ImageUpload::new("fridge.jpg", vec![0xff, 0xd8, 0xff, 0xe0])
}
