use crate::dom::PageElement;
use crate::Result;

/// Client-space bounding box of the hero image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Rotation in degrees about the X and Y axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub const LEVEL: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Horizontal offset drives Y rotation, vertical offset drives inverted X
    /// rotation; the edges of `rect` land on `±max_degrees`.
    pub fn from_pointer(x: f64, y: f64, rect: &Rect, max_degrees: f64) -> Tilt {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Tilt::LEVEL;
        }

        let scale = max_degrees * 2.0;
        let fx = (x - rect.left) / rect.width - 0.5;
        let fy = (y - rect.top) / rect.height - 0.5;

        // `+ 0.0` folds -0.0 into 0.0 so the centre renders as "0deg".
        Tilt {
            rotate_x: -fy * scale + 0.0,
            rotate_y: fx * scale + 0.0,
        }
    }

    pub fn css(&self) -> String {
        format!("rotateY({}deg) rotateX({}deg)", self.rotate_y, self.rotate_x)
    }
}

pub struct HeroTilt<E> {
    image: E,
    max_degrees: f64,
}

impl<E: PageElement> HeroTilt<E> {
    pub fn new(image: E, max_degrees: f64) -> Self {
        Self { image, max_degrees }
    }

    pub fn on_pointer_move(&self, x: f64, y: f64, rect: &Rect) -> Result<Tilt> {
        let tilt = Tilt::from_pointer(x, y, rect, self.max_degrees);
        self.image.set_style("transform", &tilt.css())?;
        Ok(tilt)
    }

    pub fn on_pointer_leave(&self) -> Result<()> {
        self.image.set_style("transform", &Tilt::LEVEL.css())
    }
}
