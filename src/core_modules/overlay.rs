// THEORY:
// The `overlay` module decides what gets drawn on a frame, without drawing it.
// The decision depends on one thing only: whether the detection set is empty.
// 1.  **Alert**: A non-empty set gets the red "GUN DETECTED!" banner plus one red
//     outline per detection, with corners (x, y) and (x + w, y + h).
// 2.  **Clear**: An empty set gets the green "NO GUN" banner and nothing else.
// Keeping this a plain data structure means the rendering backend stays a dumb
// painter and the labelling rule can be checked without a window.

use crate::core_modules::detection::Detection;

pub const ALERT_TEXT: &str = "GUN DETECTED!";
pub const CLEAR_TEXT: &str = "NO GUN";
pub const BANNER_ORIGIN: Point = Point { x: 10, y: 50 };
pub const BANNER_FONT_SCALE: f64 = 1.0;
pub const STROKE_THICKNESS: i32 = 2;

/// A color in blue, green, red order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Color {
    pub const RED: Color = Color::bgr(0, 0, 255);
    pub const GREEN: Color = Color::bgr(0, 255, 0);

    pub const fn bgr(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The status text drawn in the top-left corner of every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: &'static str,
    pub color: Color,
    /// Bottom-left corner of the text baseline.
    pub origin: Point,
    pub font_scale: f64,
    pub thickness: i32,
}

/// An unfilled rectangle around one detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    pub top_left: Point,
    pub bottom_right: Point,
    pub color: Color,
    pub thickness: i32,
}

/// Everything to paint onto one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub banner: Banner,
    pub outlines: Vec<Outline>,
}

impl Overlay {
    pub fn is_alert(&self) -> bool {
        self.banner.text == ALERT_TEXT
    }
}

/// Builds the overlay for one frame's detection set.
pub fn annotate(detections: &[Detection]) -> Overlay {
    if detections.is_empty() {
        return Overlay {
            banner: banner(CLEAR_TEXT, Color::GREEN),
            outlines: Vec::new(),
        };
    }

    let outlines = detections
        .iter()
        .map(|d| {
            let (x0, y0) = d.top_left();
            let (x1, y1) = d.bottom_right();
            Outline {
                top_left: Point::new(x0, y0),
                bottom_right: Point::new(x1, y1),
                color: Color::RED,
                thickness: STROKE_THICKNESS,
            }
        })
        .collect();

    Overlay {
        banner: banner(ALERT_TEXT, Color::RED),
        outlines,
    }
}

fn banner(text: &'static str, color: Color) -> Banner {
    Banner {
        text,
        color,
        origin: BANNER_ORIGIN,
        font_scale: BANNER_FONT_SCALE,
        thickness: STROKE_THICKNESS,
    }
}
