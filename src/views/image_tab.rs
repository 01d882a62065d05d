use crate::orchestrator::Orchestrator;
use crate::store::{ErrorKind, ImageTab, TabKind};
use crate::types::ImageUpload;
use crate::views::{ChatPanel, IngredientManager, RecipeCard};
use dioxus::html::HasFileData;
use dioxus::prelude::*;

#[component]
pub fn ImageTabView(tab: ImageTab, generating_image: bool, image_error: Option<String>) -> Element {
    let orchestrator = use_context::<Orchestrator>();
    let busy = tab.session.is_generating;
    let analyzing = tab.is_analyzing;

    let on_upload = {
        let orchestrator = orchestrator.clone();
        move |evt: FormEvent| {
            let orchestrator = orchestrator.clone();
            spawn(async move {
                let Some(engine) = evt.files() else {
                    return;
                };
                // Single-file input; anything past the first selection is ignored.
                let Some(name) = engine.files().into_iter().next() else {
                    return;
                };
                let Some(bytes) = engine.read_file(&name).await else {
                    tracing::warn!(file = %name, "could not read selected image");
                    return;
                };
                if let Err(err) = orchestrator.analyze_image(ImageUpload::new(name, bytes)).await {
                    tracing::debug!(%err, "ingredient analysis did not succeed");
                }
            });
        }
    };
    let on_generate = {
        let orchestrator = orchestrator.clone();
        move |_: MouseEvent| {
            let orchestrator = orchestrator.clone();
            spawn(async move {
                let _ = orchestrator.generate_from_ingredients().await;
            });
        }
    };
    let dismiss_analysis = {
        let orchestrator = orchestrator.clone();
        move |_: MouseEvent| orchestrator.clear_error(TabKind::Image, ErrorKind::Analysis)
    };
    let dismiss_recipe =
        move |_: MouseEvent| orchestrator.clear_error(TabKind::Image, ErrorKind::Recipe);

    rsx! {
        div { class: "tab-layout",
            section { class: "card input-card",
                h3 { class: "section-title", "📷 上传食材照片" }
                label { class: "upload-drop",
                    input {
                        r#type: "file",
                        accept: "image/*",
                        disabled: analyzing,
                        onchange: on_upload,
                    }
                    if analyzing { "正在识别食材…" } else { "点击选择一张图片" }
                }
                if let Some(err) = tab.analysis_error.clone() {
                    div { class: "error-banner",
                        span { "{err}" }
                        button { class: "btn-link", r#type: "button", onclick: dismiss_analysis, "关闭" }
                    }
                }
                IngredientManager { ingredients: tab.ingredients.clone(), editable: !analyzing }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy || analyzing || tab.ingredients.is_empty(),
                    onclick: on_generate,
                    if busy { "生成中…" } else { "用这些食材生成菜谱" }
                }
                if let Some(err) = tab.session.error.clone() {
                    div { class: "error-banner",
                        span { "{err}" }
                        button { class: "btn-link", r#type: "button", onclick: dismiss_recipe, "关闭" }
                    }
                }
            }
            if let Some(recipe) = tab.session.recipe.clone() {
                RecipeCard {
                    tab: TabKind::Image,
                    recipe,
                    generating_image,
                    image_error,
                }
            }
            ChatPanel {
                tab: TabKind::Image,
                messages: tab.session.conversation.clone(),
                busy,
                placeholder: "告诉我您想怎么做这些食材",
            }
        }
    }
}
