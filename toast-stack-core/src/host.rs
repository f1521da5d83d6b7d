//! Collaborator interfaces implemented by the rendering layer.
//!
//! The engine never draws anything itself. It measures content, pushes
//! geometry/opacity updates and reads screen layout through these traits.

use crate::geometry::{Point, Rect, Size};
use crate::ToastId;
use serde::{Deserialize, Serialize};

/// Font description handed to the measuring collaborator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub point_size: u16,
    pub bold: bool,
}

impl Font {
    pub fn new(family: impl Into<String>, point_size: u16) -> Self {
        Self {
            family: family.into(),
            point_size,
            bold: false,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Fonts used for the title and body of a toast
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextFonts {
    pub title: Font,
    pub text: Font,
}

impl Default for TextFonts {
    fn default() -> Self {
        Self {
            title: Font::new("Arial", 9).bold(),
            text: Font::new("Arial", 9),
        }
    }
}

/// Visual side of a toast.
///
/// Every mutator is fire-and-forget; the engine assumes the change is visible
/// before the next frame.
pub trait Renderer {
    /// Size of the toast body for the given content. Empty content measures
    /// as zero.
    fn measure(&self, title: &str, text: &str, fonts: &TextFonts) -> Size;

    fn resize(&mut self, id: ToastId, size: Size);

    fn set_position(&mut self, id: ToastId, position: Point);

    /// `opacity` is in `0.0..=1.0`
    fn set_opacity(&mut self, id: ToastId, opacity: f32);

    fn set_duration_bar_width(&mut self, id: ToastId, width: i32);

    /// Make the toast window visible
    fn show(&mut self, id: ToastId);

    /// Tear down the toast window
    fn close(&mut self, id: ToastId);
}

/// Read-only view of the host window and the attached screens
pub trait Host {
    fn host_window_geometry(&self) -> Rect;

    fn screens(&self) -> Vec<Rect>;

    fn primary_screen(&self) -> Rect;
}
