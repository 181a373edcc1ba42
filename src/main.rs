use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::frame_clock::FrameClock;
use engine::input::{Action, InputState};
use engine::renderer::Renderer;
use game::Game;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Cluck...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Cluck")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    // GPU setup and asset loading; any failure here is fatal
    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

    let size = window.inner_size();
    let mut game = Game::new(size.width as f32 / size.height.max(1) as f32);
    let mut input = InputState::new();
    let mut clock = FrameClock::new();

    // Main event loop: poll input, update simulation, render, repeat
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                    game.camera_mut()
                        .set_aspect(physical_size.width, physical_size.height);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::Focused(false) => {
                    // Keys released while unfocused never send events
                    input.reset();
                }
                WindowEvent::RedrawRequested => {
                    let dt = clock.begin_frame();
                    if clock.frame_count() % 300 == 0 {
                        log::debug!("{:.0} FPS", clock.fps());
                    }
                    game.update(&input, dt);

                    if input.just_pressed(Action::Quit) {
                        info!("Quit requested, shutting down...");
                        elwt.exit();
                    }
                    input.end_frame();

                    if let Err(e) = renderer.render(game.camera(), &game.player_billboard()) {
                        error!("Render error: {e:#}");
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
