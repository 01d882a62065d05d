//! Deciding whether a chat message asks for a recipe.
//!
//! The backend classifier is authoritative; [`is_likely_recipe_request`] only
//! runs when that call fails. It is tuned for recall: a false positive costs
//! one unwanted generation, a false negative only a generic reply.
use crate::api::RecipeBackend;
use once_cell::sync::Lazy;
use regex::Regex;

const COOKING_VERBS: &str = "做|煮|炒|蒸|烤|炸";

static RECIPE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let verbs = COOKING_VERBS;
    let sources = [
        // direct intent
        format!("我想({verbs})"),
        format!("想要({verbs})"),
        format!("帮我({verbs})"),
        // ingredient + action
        format!("(用|有).*({verbs}|料理)"),
        format!("({verbs}|料理).*(菜|dish)"),
        // time boxed
        r"\d+分钟.*(菜|dish|完成)".to_string(),
        "半小时.*(菜|dish|完成)".to_string(),
        "一小时.*(菜|dish|完成)".to_string(),
        // pantry description
        "冰箱里有".to_string(),
        "家里有.*(想做|做)".to_string(),
        "这些食材".to_string(),
        // cuisine or diet qualifier
        "(中式|西式|日式|韩式|川菜|粤菜).*(菜|dish)".to_string(),
        "(简单|快手|营养|健康|低脂).*(菜|dish)".to_string(),
    ];
    sources
        .iter()
        .filter_map(|src| match Regex::new(src) {
            Ok(re) => Some(re),
            Err(err) => {
                tracing::error!(pattern = %src, %err, "invalid recipe intent pattern");
                None
            }
        })
        .collect()
});

/// Local keyword classifier used when the intent service is unreachable.
pub fn is_likely_recipe_request(text: &str) -> bool {
    RECIPE_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Ask the backend, falling back to the local patterns on any failure.
pub async fn classify_intent(backend: &dyn RecipeBackend, message: &str) -> bool {
    match backend.classify_intent(message).await {
        Ok(is_recipe) => is_recipe,
        Err(err) => {
            tracing::warn!(%err, "intent service unavailable, using keyword fallback");
            is_likely_recipe_request(message)
        }
    }
}
