use crate::orchestrator::Orchestrator;
use crate::store::{ErrorKind, TabKind};
use crate::types::Recipe;
use dioxus::prelude::*;
use std::sync::Arc;

#[component]
pub fn RecipeCard(
    tab: TabKind,
    recipe: Arc<Recipe>,
    generating_image: bool,
    image_error: Option<String>,
) -> Element {
    let orchestrator = use_context::<Orchestrator>();
    let nutrition = recipe.nutritional_info.clone();

    let on_dismiss_image_error = {
        let orchestrator = orchestrator.clone();
        move |_: MouseEvent| orchestrator.clear_error(tab, ErrorKind::Image)
    };
    let on_generate_image = move |_: MouseEvent| {
        let orchestrator = orchestrator.clone();
        spawn(async move {
            let _ = orchestrator.generate_image(tab).await;
        });
    };

    rsx! {
        article { class: "recipe-card",
            header { class: "recipe-header",
                h2 { class: "recipe-title", "{recipe.dish_name}" }
                p { class: "text-muted", "{recipe.description}" }
                div { class: "recipe-meta",
                    span { class: "tag-pill", "🍽 {recipe.cuisine_type}" }
                    span { class: "tag-pill", "⚡ {recipe.difficulty}" }
                    span { class: "tag-pill", "⏱ 准备 {recipe.prep_time_mins} 分钟" }
                    span { class: "tag-pill", "🔥 烹饪 {recipe.cook_time_mins} 分钟" }
                    span { class: "tag-pill", "👥 {recipe.servings} 人份" }
                }
            }

            if let Some(url) = recipe.image_url.clone() {
                img { class: "recipe-image", src: "{url}", alt: "{recipe.dish_name}" }
            } else {
                div { class: "recipe-image-placeholder",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: generating_image,
                        onclick: on_generate_image,
                        if generating_image { "正在生成图片…" } else { "🎨 生成菜品图片" }
                    }
                    if let Some(err) = image_error {
                        div { class: "error-banner",
                            span { "{err}" }
                            button {
                                class: "btn-link",
                                r#type: "button",
                                onclick: on_dismiss_image_error,
                                "关闭"
                            }
                        }
                    }
                }
            }

            section { class: "recipe-section",
                h3 { class: "section-title", "食材" }
                ul { class: "ingredient-list",
                    for (i, ingredient) in recipe.ingredients.iter().enumerate() {
                        li { key: "{i}",
                            span { class: "ingredient-name", "{ingredient.name}" }
                            span { class: "ingredient-amount", "{ingredient.amount} {ingredient.unit}" }
                        }
                    }
                }
            }

            section { class: "recipe-section",
                h3 { class: "section-title", "步骤" }
                ol { class: "instruction-list",
                    for (i, instruction) in recipe.instructions.iter().enumerate() {
                        li { key: "{i}", "{instruction.description}" }
                    }
                }
            }

            if !recipe.tips.is_empty() {
                section { class: "recipe-section",
                    h3 { class: "section-title", "小贴士" }
                    ul { class: "tip-list",
                        for tip in recipe.tips.iter() {
                            li { "{tip}" }
                        }
                    }
                }
            }

            section { class: "recipe-section nutrition",
                h3 { class: "section-title", "营养信息（每份）" }
                div { class: "nutrition-grid",
                    div { span { class: "nutrition-value", "{nutrition.calories_kcal}" } span { "千卡" } }
                    div { span { class: "nutrition-value", "{nutrition.protein_g}g" } span { "蛋白质" } }
                    div { span { class: "nutrition-value", "{nutrition.carbs_g}g" } span { "碳水" } }
                    div { span { class: "nutrition-value", "{nutrition.fat_g}g" } span { "脂肪" } }
                }
            }
        }
    }
}
