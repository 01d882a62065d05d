use crate::orchestrator::Orchestrator;
use dioxus::events::Key;
use dioxus::prelude::*;

#[component]
pub fn IngredientManager(ingredients: Vec<String>, editable: bool) -> Element {
    let orchestrator = use_context::<Orchestrator>();
    let mut draft = use_signal(String::new);

    let add = {
        let orchestrator = orchestrator.clone();
        use_callback(move |_: ()| {
            let value = draft();
            if value.trim().is_empty() {
                return;
            }
            orchestrator.add_ingredient(value);
            draft.set(String::new());
        })
    };
    let remove = use_callback(move |name: String| orchestrator.remove_ingredient(name));

    rsx! {
        div { class: "ingredient-manager",
            h3 { class: "section-title", "识别到的食材" }
            if ingredients.is_empty() {
                p { class: "text-muted", "暂无食材，上传图片或手动添加。" }
            }
            div { class: "chip-row",
                for name in ingredients.iter().cloned() {
                    span { key: "{name}", class: "chip",
                        "{name}"
                        if editable {
                            button {
                                class: "chip-remove",
                                r#type: "button",
                                title: "移除",
                                onclick: move |_| remove.call(name.clone()),
                                "×"
                            }
                        }
                    }
                }
            }
            if editable {
                div { class: "hstack",
                    input {
                        r#type: "text",
                        placeholder: "添加食材，例如：西红柿",
                        value: "{draft}",
                        oninput: move |ev| draft.set(ev.value()),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter {
                                ev.prevent_default();
                                add.call(());
                            }
                        },
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: draft().trim().is_empty(),
                        onclick: move |_| add.call(()),
                        "添加"
                    }
                }
            }
        }
    }
}
