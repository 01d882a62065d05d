pub mod chat;
pub mod image_tab;
pub mod ingredients;
pub mod progress;
pub mod recipe_card;
pub mod text_tab;

pub use chat::ChatPanel;
pub use image_tab::ImageTabView;
pub use ingredients::IngredientManager;
pub use progress::ProgressOverlay;
pub use recipe_card::RecipeCard;
pub use text_tab::TextTabView;
