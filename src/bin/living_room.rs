use parlor_ngin::{context::RenderSettings, flow, scenes};

fn main() -> anyhow::Result<()> {
    let settings = RenderSettings::default().with_window_title("Living Room");
    flow::run(settings, scenes::living_room())
}
