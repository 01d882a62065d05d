fn main() {
    dishcraft::config::load_env();
    dishcraft::telemetry::init();
    dioxus::launch(dishcraft::ui::App);
}
