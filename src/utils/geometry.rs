// src/utils/geometry.rs
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point at fraction `f` of the way from `self` to `other`.
    pub fn lerp(&self, other: &Point2D, f: f64) -> Point2D {
        Point2D::new(self.x + f * (other.x - self.x), self.y + f * (other.y - self.y))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for Point2D {
    type Output = Vector2D;

    fn sub(self, rhs: Point2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector2D> for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Vector2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector for a compass heading: 0 points up the screen, angles grow clockwise.
    pub fn from_heading(heading: f64) -> Self {
        Self::new(heading.sin(), -heading.cos())
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        Vector2D::new(self.x * rhs, self.y * rhs)
    }
}

/// The square region `[0, size] x [0, size]` in which airplanes are tracked.
///
/// `units_per_mile` converts arena lengths into the reporting unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub size: f64,
    pub units_per_mile: f64,
}

impl Arena {
    pub const DEFAULT_SIZE: f64 = 800.0;
    pub const DEFAULT_UNITS_PER_MILE: f64 = 8.0;

    pub fn new(size: f64, units_per_mile: f64) -> Self {
        Self { size, units_per_mile }
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.size / 2.0, self.size / 2.0)
    }

    /// Closed containment: points on the boundary are inside.
    pub fn contains(&self, p: &Point2D) -> bool {
        (0.0..=self.size).contains(&p.x) && (0.0..=self.size).contains(&p.y)
    }

    pub fn on_boundary(&self, p: &Point2D) -> bool {
        self.contains(p) && (p.x == 0.0 || p.x == self.size || p.y == 0.0 || p.y == self.size)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE, Self::DEFAULT_UNITS_PER_MILE)
    }
}
