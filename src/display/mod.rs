use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use smoking_snake::input::{Key, KeyEvent};
use smoking_snake::raster::PixelBuffer;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    Quit,
    Key(KeyEvent),
}

impl Display {
    /// vsync=true locks presentation to the monitor refresh
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((
            Self {
                canvas,
                event_pump,
            },
            texture_creator,
        ))
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
    }

    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &PixelBuffer,
    ) -> Result<(), String> {
        target
            .texture
            .update(None, buffer.as_bytes(), buffer.stride())
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k),
                    repeat,
                    ..
                } => {
                    if let Some(key) = map_key(k) {
                        events.push(InputEvent::Key(KeyEvent {
                            key,
                            is_down: true,
                            is_repeat: repeat,
                        }));
                    }
                },
                Event::KeyUp {
                    keycode: Some(k),
                    repeat,
                    ..
                } => {
                    if let Some(key) = map_key(k) {
                        events.push(InputEvent::Key(KeyEvent {
                            key,
                            is_down: false,
                            is_repeat: repeat,
                        }));
                    }
                },
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        // RGBA8888 is a packed format: bytes land as A, B, G, R on little-endian
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self { texture })
    }
}

/// Arrows and WASD steer, P pauses
fn map_key(key: Keycode) -> Option<Key> {
    match key {
        Keycode::Up | Keycode::W => Some(Key::Up),
        Keycode::Down | Keycode::S => Some(Key::Down),
        Keycode::Left | Keycode::A => Some(Key::Left),
        Keycode::Right | Keycode::D => Some(Key::Right),
        Keycode::P => Some(Key::Pause),
        _ => None,
    }
}
