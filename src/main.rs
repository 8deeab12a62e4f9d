//! Windowed launcher for the sphaira carousel.

use std::sync::Arc;

use sphaira::engine::{MenuCallbacks, MenuEngine};
use sphaira::input::PointerEvent;
use sphaira::items::{load_items, MenuItem};
use sphaira::options::MenuOptions;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

struct MenuApp {
    window: Option<Arc<Window>>,
    engine: Option<MenuEngine>,
    items: Vec<MenuItem>,
    options: MenuOptions,
    preview: Option<usize>,
}

impl MenuApp {
    fn new(items: Vec<MenuItem>, options: MenuOptions) -> Self {
        Self {
            window: None,
            engine: None,
            items,
            options,
            preview: None,
        }
    }

    /// Log the item the sphere is turning toward while it moves.
    fn log_preview(&mut self) {
        let Some(engine) = &self.engine else { return };
        if !engine.is_moving() {
            self.preview = None;
            return;
        }
        let item = engine.nearest_anchor() % engine.items().len().max(1);
        if self.preview != Some(item) {
            self.preview = Some(item);
            let title = engine
                .items()
                .get(item)
                .map_or("(placeholder)", |record| record.title.as_str());
            log::debug!("previewing item {item}: {title}");
        }
    }
}

impl ApplicationHandler for MenuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let monitor = event_loop
                .primary_monitor()
                .or_else(|| event_loop.available_monitors().next());
            let attrs = if let Some(mon) = &monitor {
                let mon_size = mon.size();
                let scale = mon.scale_factor();
                let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
                let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
                Window::default_attributes()
                    .with_title("Sphaira")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        logical_w, logical_h,
                    ))
            } else {
                Window::default_attributes().with_title("Sphaira")
            };
            let window = Arc::new(event_loop.create_window(attrs).unwrap());

            let size = window.inner_size();
            let scale = window.scale_factor();

            let titles: Vec<String> =
                self.items.iter().map(|item| item.title.clone()).collect();
            let callbacks = MenuCallbacks {
                on_active_item_change: Some(Box::new(move |index| {
                    let title = titles
                        .get(index)
                        .map_or("(placeholder)", String::as_str);
                    log::info!("active item {index}: {title}");
                })),
                on_movement_change: Some(Box::new(|moving| {
                    log::debug!("movement: {moving}");
                })),
            };

            let engine = pollster::block_on(MenuEngine::new(
                window.clone(),
                (size.width, size.height),
                scale,
                self.items.clone(),
                self.options.clone(),
                callbacks,
            ))
            .unwrap_or_else(|e| {
                log::error!("engine init failed: {e}");
                std::process::exit(1);
            });

            window.request_redraw();
            self.window = Some(window);
            self.engine = Some(engine);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(event_size) => {
                if let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                {
                    engine.resize(
                        event_size.width,
                        event_size.height,
                        window.scale_factor(),
                    );
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                {
                    let inner = window.inner_size();
                    engine.resize(inner.width, inner.height, scale_factor);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                {
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            let inner = window.inner_size();
                            engine.resize(
                                inner.width,
                                inner.height,
                                window.scale_factor(),
                            );
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                    window.request_redraw();
                }
                self.log_preview();
            }

            WindowEvent::MouseInput { state, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_pointer(PointerEvent::Button {
                        pressed: state == ElementState::Pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    #[allow(clippy::cast_possible_truncation)]
                    engine.handle_pointer(PointerEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_pointer(PointerEvent::CursorLeft);
                }
            }

            _ => (),
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let items = match args.next() {
        Some(path) => match load_items(std::path::Path::new(&path)) {
            Ok(items) => items,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => {
            log::info!(
                "no item list given, showing placeholder items \
                 (usage: sphaira [items.json] [options.toml])"
            );
            Vec::new()
        }
    };
    let options = match args.next() {
        Some(path) => match MenuOptions::load(std::path::Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => MenuOptions::default(),
    };

    let mut app = MenuApp::new(items, options);
    let event_loop = EventLoop::new().unwrap();

    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app).expect("Event loop error");
}
