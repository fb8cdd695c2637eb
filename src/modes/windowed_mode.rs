use softbuffer::{Context, Surface};

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Icon, Window, WindowId},
};

use std::{
    num::NonZeroU32,
    sync::mpsc::{self, SyncSender, TryRecvError},
    thread,
};

use anyhow::{anyhow, Context as _};
use fps_clock::FpsClock;
use tracing::{error, info, warn};

use crate::data::*;
use crate::game::{bubble::Bubble, bubble::BubbleKind, PALETTE};
use crate::graphics::Canvas;
use crate::math::Vec2;

type WindowSurface = Surface<&'static Window, &'static Window>;

const ICON_SIZE: usize = 32;

struct WindowState {
    pub prog: Program,
    pub window: Option<&'static Window>,
    pub surface: Option<WindowSurface>,
    pub exit_sender: Option<SyncSender<()>>,
    pub final_buffer_size: PhysicalSize<u32>,
    pub cursor: PhysicalPosition<f64>,
    pub commands: Vec<Command>,
    pub error: Option<anyhow::Error>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // The window is leaked into a static reference, so a second
        // resume would leak another one.
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.open_window(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = position;
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let scale = self.prog.scale() as f64;
                self.commands.push(Command::Click(
                    (self.cursor.x / scale) as f32,
                    (self.cursor.y / scale) as f32,
                ));
            }

            WindowEvent::Occluded(b) => {
                self.commands.push(Command::Hidden(b));
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let Some(surface) = self.surface.as_mut() else {
                    warn!("Unable to resize the window buffer.");
                    return;
                };

                self.final_buffer_size = PhysicalSize::new(width, height);

                if let Err(e) = Self::resize_surface(surface, width, height) {
                    warn!("{e}");
                    return;
                }

                if let Ok(mut buffer) = surface.buffer_mut() {
                    buffer.fill(0x0);
                }

                let scale = self.prog.scale() as u32;
                self.commands
                    .push(Command::Resize(width / scale, height / scale));
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                let cmd = match event.logical_key.as_ref() {
                    Key::Named(NamedKey::Escape) => Command::Close,
                    _ => return,
                };

                if cmd.is_close_requested() {
                    event_loop.exit();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(window) = self.window else {
                    return;
                };

                self.prog.eval_commands(&mut self.commands);

                if self.prog.is_hidden() {
                    return;
                }

                self.prog.render();

                let width = self.final_buffer_size.width as usize;

                if let Some(Ok(mut buffer)) = self.surface.as_mut().map(|s| s.buffer_mut()) {
                    self.prog
                        .pix
                        .scale_to(self.prog.scale() as usize, &mut buffer, Some(width));

                    window.pre_present_notify();
                    if let Err(e) = buffer.present() {
                        warn!("Failed to present the frame: {e}.");
                    }
                }
            }

            _ => {}
        }
    }
}

impl WindowState {
    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        self.prog.print_startup_info();

        let scale = self.prog.scale() as u32;
        let win_size = PhysicalSize::<u32>::new(
            self.prog.pix.width() as u32 * scale,
            self.prog.pix.height() as u32 * scale,
        );

        let icon = Icon::from_rgba(bubble_icon(), ICON_SIZE as u32, ICON_SIZE as u32)
            .inspect_err(|e| warn!("Failed to create window icon: {e}"))
            .ok();

        let window_attributes = Window::default_attributes()
            .with_title("Bubble Pop")
            .with_inner_size(win_size)
            .with_resizable(self.prog.is_resizable())
            .with_window_icon(icon);

        #[cfg(target_os = "linux")]
        let window_attributes = {
            use winit::platform::wayland::WindowAttributesExtWayland;
            window_attributes.with_name("bubblepop", "bubblepop")
        };

        let window: &'static Window = Box::leak(Box::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create the window")?,
        ));

        self.window = Some(window);

        let size = window.inner_size();
        self.final_buffer_size = size;

        let context = Context::new(window).map_err(|e| anyhow!("softbuffer context: {e}"))?;
        let mut surface =
            Surface::new(&context, window).map_err(|e| anyhow!("softbuffer surface: {e}"))?;

        Self::resize_surface(&mut surface, size.width, size.height)?;

        self.surface = Some(surface);

        // On XFCE this is needed to lock the size of the window.
        if !self.prog.is_resizable() {
            window.set_min_inner_size(Some(win_size));
            window.set_max_inner_size(Some(win_size));
        }

        let (exit_send, exit_recv) = mpsc::sync_channel(1);

        self.exit_sender = Some(exit_send);

        let fps = self.prog.fps();

        // Thread to control requesting redraws.
        thread::Builder::new()
            .name("redraw".into())
            .spawn(move || {
                let mut clock = FpsClock::new(fps);

                loop {
                    match exit_recv.try_recv() {
                        Err(TryRecvError::Empty) => {}
                        _ => break,
                    }

                    if !window.is_minimized().unwrap_or(false) {
                        window.request_redraw();
                    }

                    clock.tick();
                }
            })
            .context("failed to spawn the redraw thread")?;

        Ok(())
    }

    fn resize_surface(surface: &mut WindowSurface, w: u32, h: u32) -> anyhow::Result<()> {
        let (Some(w), Some(h)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
            // minimized
            return Ok(());
        };

        surface
            .resize(w, h)
            .map_err(|e| anyhow!("failed to resize the window buffer: {e}"))
    }
}

/// RGBA pixels of a pink bubble, drawn with the game's own renderer.
fn bubble_icon() -> Vec<u8> {
    let mut canvas = Canvas::new(ICON_SIZE, ICON_SIZE);

    let half = ICON_SIZE as f32 / 2.0;
    let (color, kind) = PALETTE
        .iter()
        .copied()
        .find(|&(_, kind)| kind == BubbleKind::Primary)
        .unwrap_or(PALETTE[0]);

    Bubble::new(Vec2::new(half, half), half, color, kind, 230, 0.0).show(&mut canvas);

    canvas
        .as_slice()
        .iter()
        .flat_map(|px| {
            let [a, r, g, b] = px.to_be_bytes();
            [r, g, b, a]
        })
        .collect()
}

pub fn winit_main(prog: Program) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("failed to create the event loop")?;

    let mut state = WindowState {
        prog,
        window: None,
        surface: None,
        exit_sender: None,
        final_buffer_size: PhysicalSize::<u32>::new(0, 0),
        cursor: PhysicalPosition::new(0.0, 0.0),
        commands: Vec::new(),
        error: None,
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    let result = event_loop.run_app(&mut state);

    if let Some(sender) = state.exit_sender.as_ref() {
        let _ = sender.send(());
    }

    info!("Final score: {}.", state.prog.game().score());

    if let Some(e) = state.error {
        error!("{e:#}");
        return Err(e);
    }

    result.context("event loop failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_is_rgba_with_transparent_corners() {
        let icon = bubble_icon();
        assert_eq!(icon.len(), ICON_SIZE * ICON_SIZE * 4);

        // top-left pixel lies outside the circle
        assert_eq!(&icon[..4], &[0, 0, 0, 0]);

        // center is the pink bubble
        let center = (ICON_SIZE / 2 * ICON_SIZE + ICON_SIZE / 2) * 4;
        assert_eq!(icon[center + 3], 230);
        assert_eq!(&icon[center..center + 3], &[0xFF, 0x99, 0xC8]);
    }
}
