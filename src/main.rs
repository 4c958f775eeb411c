//! Windowed smoke test showing live snapshot state
//!
//! Opens a window, polls the controls once per frame and logs key and
//! button transitions as they happen. Close the window to exit.

use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use controls::prelude::*;

/// Log a timing line every this many polls.
const STATS_INTERVAL: u64 = 120;

/// Window side length in physical pixels.
const WINDOW_SIZE: u32 = 500;

struct DemoApp {
    controls: Controls<WinitBackend>,
    stats: PollStats,
    watched: Vec<char>,
    window: Option<Window>,
}

impl DemoApp {
    fn new(watched: &str) -> Self {
        Self {
            controls: Controls::new(WinitBackend::new(), watched),
            stats: PollStats::new(),
            watched: watched.chars().collect(),
            window: None,
        }
    }

    fn poll(&mut self, event_loop: &ActiveEventLoop) {
        let started = Instant::now();
        if let Err(e) = self.controls.update() {
            log::error!("input poll failed: {e}");
            event_loop.exit();
            return;
        }
        self.stats.record(started.elapsed());

        for &key in &self.watched {
            if self.controls.key_just_pressed(key) {
                log::info!("{key:?} pressed");
            }
            if self.controls.key_just_released(key) {
                log::info!("{key:?} released");
            }
        }

        for button in [MouseButton::Left, MouseButton::Middle, MouseButton::Right] {
            if self.controls.button_just_pressed(button) {
                // Read back through the shorthand, the way display code would.
                if let Ok(ShortValue::MousePosition(position)) = self.controls.get_short("cmpos") {
                    log::info!("{button:?} pressed at {position:?}");
                }
            }
        }

        if self.stats.total_polls() % STATS_INTERVAL == 0 {
            log::info!(
                "{} polls, {:.3} ms avg, {:.3} ms max",
                self.stats.total_polls(),
                self.stats.average_ms(),
                self.stats.max_ms(),
            );
        }

        // Stop once a close request shows up in the drained events.
        let closed = self
            .controls
            .current()
            .events
            .iter()
            .any(|event| matches!(event, InputEvent::CloseRequested));
        if closed {
            log::info!("close requested, exiting");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("controls demo")
            .with_inner_size(PhysicalSize::new(WINDOW_SIZE, WINDOW_SIZE));

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.controls.backend_mut().handle_window_event(&event);

        if let WindowEvent::RedrawRequested = event {
            self.poll(event_loop);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("starting controls demo, watching \"adsw\"");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut DemoApp::new("adsw"))?;

    Ok(())
}
