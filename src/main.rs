mod app;
mod form;
mod render;
mod scene;
mod ui;

fn main() {
    app::run();
}
