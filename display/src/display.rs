use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use chip8_core::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Bytes per pixel in an RGB24 texture
const BYTES_PER_PIXEL: usize = 3;

/// # Display
/// The Chip-8 display is composed of 64x32 pixels black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array of 64x32 bytes.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Chip-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        let mut display = Display { canvas };
        display.render(&[[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT])?;
        Ok(display)
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|pixel| std::iter::repeat(*pixel).take(BYTES_PER_PIXEL))
            .map(|pixel| pixel * 255)
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // rows may be padded out beyond their pixels
            let row_bytes = DISPLAY_WIDTH * BYTES_PER_PIXEL;
            for (y, row) in pixels.chunks(row_bytes).enumerate() {
                buffer[y * pitch..y * pitch + row_bytes].copy_from_slice(row);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
