//! Window and event loop driving one scene through its lifecycle.
//!
//! [`run`] opens a window and hands a [`SceneDescription`] to a
//! [`SceneComposer`]. The scene is set up as soon as the window exists, drawn on
//! every redraw request and torn down when the window closes.

use std::{iter, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    composer::{Phase, SceneComposer, SceneDescription},
    context::{Context, RenderSettings, Viewpoint},
    render::GpuRenderer,
    resources::texture::WgpuTextures,
};

/// A scene that is set up on the GPU, together with everything it draws with.
pub struct SceneState {
    ctx: Context,
    renderer: GpuRenderer,
    composer: SceneComposer<WgpuTextures>,
    viewpoint: Viewpoint,
}

impl SceneState {
    async fn new(
        window: Arc<Window>,
        settings: &RenderSettings,
        description: SceneDescription,
    ) -> anyhow::Result<Self> {
        let ctx = Context::new(window, settings).await?;
        let textures = WgpuTextures::new(&ctx.device, &ctx.queue, settings.texture_units);
        let mut renderer = GpuRenderer::new(
            &ctx.device,
            &ctx.queue,
            ctx.config.format,
            &textures,
            settings.mesh_dir(),
        );
        let mut composer =
            SceneComposer::new(textures).with_assets_dir(settings.assets_dir.clone());

        let summary = composer.setup(&mut renderer, description)?;
        log::info!(
            "Loaded {} textures, {} failed, {} unresolved tags, {} missing meshes",
            summary.loaded,
            summary.failed.len(),
            summary.unresolved.len(),
            summary.missing_meshes.len()
        );
        renderer.set_viewpoint(&settings.viewpoint, ctx.aspect());

        Ok(Self {
            ctx,
            renderer,
            composer,
            viewpoint: settings.viewpoint,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
        self.renderer.set_viewpoint(&self.viewpoint, self.ctx.aspect());
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer.begin_frame();
        if let Err(e) = self.composer.render(&mut self.renderer) {
            log::error!("Unable to render the scene: {e}");
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        self.renderer.encode(
            &mut encoder,
            &view,
            &self.ctx.depth_texture.view,
            self.ctx.clear_colour,
            self.composer.textures().backend(),
        );
        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn teardown(&mut self) {
        if self.composer.phase() != Phase::Ready {
            return;
        }
        if let Err(e) = self.composer.teardown() {
            log::error!("{e}");
        }
    }
}

pub struct App {
    settings: RenderSettings,
    description: Option<SceneDescription>,
    state: Option<SceneState>,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(settings: RenderSettings, description: SceneDescription) -> Self {
        Self {
            settings,
            description: Some(description),
            state: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(description) = self.description.take() else {
            return;
        };

        let window_attributes =
            Window::default_attributes().with_title(self.settings.window_title.as_str());
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match futures::executor::block_on(SceneState::new(window, &self.settings, description)) {
            Ok(state) => {
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                state.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
            }
            WindowEvent::RedrawRequested => match state.render() {
                Ok(()) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                    state.ctx.window.request_redraw();
                }
                Err(e) => log::error!("Unable to render {}", e),
            },
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            state.teardown();
        }
    }
}

/// Open a window and show `description` until the window is closed.
pub fn run(settings: RenderSettings, description: SceneDescription) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings, description);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
