use crate::orchestrator::Orchestrator;
use crate::store::{ErrorKind, TabKind, TextTab};
use crate::views::{ChatPanel, RecipeCard};
use dioxus::events::Key;
use dioxus::prelude::*;

#[component]
pub fn TextTabView(tab: TextTab, generating_image: bool, image_error: Option<String>) -> Element {
    let orchestrator = use_context::<Orchestrator>();
    let busy = tab.session.is_generating;
    let can_submit = !busy && !tab.input.trim().is_empty();

    let submit = {
        let orchestrator = orchestrator.clone();
        use_callback(move |_: ()| {
            let orchestrator = orchestrator.clone();
            spawn(async move {
                if let Err(err) = orchestrator.submit_text().await {
                    tracing::debug!(%err, "text submission did not produce a recipe");
                }
            });
        })
    };
    let on_input = {
        let orchestrator = orchestrator.clone();
        move |ev: FormEvent| orchestrator.update_text_input(ev.value())
    };
    let on_dismiss =
        move |_: MouseEvent| orchestrator.clear_error(TabKind::Text, ErrorKind::Recipe);

    rsx! {
        div { class: "tab-layout",
            section { class: "card input-card",
                h3 { class: "section-title", "✍️ 描述您想要的菜" }
                textarea {
                    rows: "4",
                    placeholder: "例如：我想做一道30分钟能完成的清淡川菜",
                    value: "{tab.input}",
                    disabled: busy,
                    oninput: on_input,
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter && ev.modifiers().ctrl() {
                            ev.prevent_default();
                            submit.call(());
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !can_submit,
                    onclick: move |_| submit.call(()),
                    if busy { "生成中…" } else { "生成菜谱" }
                }
                if let Some(err) = tab.session.error.clone() {
                    div { class: "error-banner",
                        span { "{err}" }
                        button { class: "btn-link", r#type: "button", onclick: on_dismiss, "关闭" }
                    }
                }
            }
            if let Some(recipe) = tab.session.recipe.clone() {
                RecipeCard {
                    tab: TabKind::Text,
                    recipe,
                    generating_image,
                    image_error,
                }
            }
            ChatPanel {
                tab: TabKind::Text,
                messages: tab.session.conversation.clone(),
                busy,
                placeholder: "想调整口味？例如：少放点辣",
            }
        }
    }
}
