use image::{Rgb, RgbImage};

use crate::color::Rgb8;

pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
pub const AXIS: Rgb8 = Rgb8::new(60, 60, 60);

fn pixel(c: Rgb8) -> Rgb<u8> {
    Rgb([c.red, c.green, c.blue])
}

// ---------------------------------------------------------------------------
// Canvas – clipped drawing primitives over an RGB image
// ---------------------------------------------------------------------------

pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            img: RgbImage::from_pixel(width, height, pixel(WHITE)),
        }
    }

    fn put(&mut self, x: i64, y: i64, c: Rgb8) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, pixel(c));
        }
    }

    /// Fill the rectangle spanned by two corners, inclusive.
    pub fn fill_rect(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64), c: Rgb8) {
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                self.put(x, y, c);
            }
        }
    }

    pub fn stroke_rect(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64), c: Rgb8) {
        self.line((x0, y0), (x1, y0), c);
        self.line((x1, y0), (x1, y1), c);
        self.line((x1, y1), (x0, y1), c);
        self.line((x0, y1), (x0, y0), c);
    }

    /// Bresenham line.
    pub fn line(&mut self, (mut x0, mut y0): (i64, i64), (x1, y1): (i64, i64), c: Rgb8) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, c);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn dot(&mut self, (cx, cy): (i64, i64), radius: i64, c: Rgb8) {
        for y in -radius..=radius {
            for x in -radius..=radius {
                if x * x + y * y <= radius * radius {
                    self.put(cx + x, cy + y, c);
                }
            }
        }
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }
}

// ---------------------------------------------------------------------------
// Frame – maps data coordinates into a pixel rectangle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Frame {
    /// A frame over `area` (left, top, width, height) with data ranges padded
    /// by 5 % so extreme points stay inside the axes.
    pub fn new(area: (i64, i64, i64, i64), x: (f64, f64), y: (f64, f64)) -> Self {
        let (left, top, width, height) = area;
        Frame {
            left,
            top,
            width: width.max(1),
            height: height.max(1),
            x: pad(x),
            y: pad(y),
        }
    }

    pub fn px(&self, x: f64, y: f64) -> (i64, i64) {
        let fx = (x - self.x.0) / (self.x.1 - self.x.0);
        let fy = (y - self.y.0) / (self.y.1 - self.y.0);
        (
            self.left + (fx * self.width as f64).round() as i64,
            self.top + self.height - (fy * self.height as f64).round() as i64,
        )
    }

    pub fn draw_axes(&self, canvas: &mut Canvas) {
        let bottom = self.top + self.height;
        canvas.line((self.left, bottom), (self.left + self.width, bottom), AXIS);
        canvas.line((self.left, self.top), (self.left, bottom), AXIS);
    }
}

fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    let margin = (hi - lo) * 0.05;
    (lo - margin, hi + margin)
}

/// Smallest and largest of `values`, ignoring NaN.
pub fn extent(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_maps_corners() {
        let f = Frame::new((10, 10, 100, 50), (0.0, 10.0), (0.0, 10.0));
        let (x0, y0) = f.px(f.x.0, f.y.0);
        let (x1, y1) = f.px(f.x.1, f.y.1);
        assert_eq!((x0, y0), (10, 60));
        assert_eq!((x1, y1), (110, 10));
    }

    #[test]
    fn drawing_outside_is_clipped() {
        let mut c = Canvas::new(4, 4);
        c.line((-10, -10), (10, 10), AXIS);
        c.dot((100, 100), 3, AXIS);
        let img = c.into_image();
        assert_eq!(img.get_pixel(2, 2), &Rgb([60, 60, 60]));
        assert_eq!(img.get_pixel(3, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn extent_ignores_nan() {
        assert_eq!(extent([3.0, f64::NAN, -1.0]), (-1.0, 3.0));
    }
}
