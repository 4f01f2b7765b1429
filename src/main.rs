use opening_night::components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
