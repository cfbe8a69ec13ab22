mod app;

fn main() {
    app::start_ribbon();
}
