//! Offset (grid) coordinates

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Integer 2D coordinate in offset space.
///
/// Used both as a grid index and as a pixel position by renderers; the
/// map and pathfinder only ever treat it as a grid index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Sentinel for "no location"
    pub const NONE: Point = Point { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_none(&self) -> bool {
        *self == Point::NONE
    }
}

impl Default for Point {
    fn default() -> Self {
        Point::NONE
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parses `"x,y"` (whitespace around either number is ignored)
impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
        let x = x.trim().parse::<i32>().map_err(|e| format!("bad x in '{}': {}", s, e))?;
        let y = y.trim().parse::<i32>().map_err(|e| format!("bad y in '{}': {}", s, e))?;
        Ok(Point::new(x, y))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, p: Point) -> Point {
        Point::new(self.x + p.x, self.y + p.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, p: Point) -> Point {
        Point::new(self.x - p.x, self.y - p.y)
    }
}

impl Mul for Point {
    type Output = Point;

    fn mul(self, p: Point) -> Point {
        Point::new(self.x * p.x, self.y * p.y)
    }
}

impl Div for Point {
    type Output = Point;

    fn div(self, p: Point) -> Point {
        Point::new(self.x / p.x, self.y / p.y)
    }
}

impl Add<i32> for Point {
    type Output = Point;

    fn add(self, v: i32) -> Point {
        Point::new(self.x + v, self.y + v)
    }
}

impl Sub<i32> for Point {
    type Output = Point;

    fn sub(self, v: i32) -> Point {
        self + (-v)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, v: i32) -> Point {
        Point::new(self.x * v, self.y * v)
    }
}

impl Div<i32> for Point {
    type Output = Point;

    fn div(self, v: i32) -> Point {
        Point::new(self.x / v, self.y / v)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, p: Point) {
        self.x += p.x;
        self.y += p.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, p: Point) {
        self.x -= p.x;
        self.y -= p.y;
    }
}

impl MulAssign for Point {
    fn mul_assign(&mut self, p: Point) {
        self.x *= p.x;
        self.y *= p.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        assert!(Point::NONE.is_none());
        assert!(Point::default().is_none());
        assert!(!Point::new(0, 0).is_none());
    }

    #[test]
    fn test_arithmetic() {
        let a = Point::new(4, 6);
        let b = Point::new(1, 2);
        assert_eq!(a + b, Point::new(5, 8));
        assert_eq!(a - b, Point::new(3, 4));
        assert_eq!(a * b, Point::new(4, 12));
        assert_eq!(a / b, Point::new(4, 3));
        assert_eq!(a * 2, Point::new(8, 12));
        assert_eq!(a / 2, Point::new(2, 3));
        assert_eq!(a - 1, Point::new(3, 5));

        let mut c = a;
        c += b;
        c -= Point::new(0, 1);
        c *= Point::new(2, 1);
        assert_eq!(c, Point::new(10, 7));
    }

    #[test]
    fn test_parse() {
        assert_eq!("3,4".parse::<Point>(), Ok(Point::new(3, 4)));
        assert_eq!(" 0 , 12 ".parse::<Point>(), Ok(Point::new(0, 12)));
        assert!("3".parse::<Point>().is_err());
        assert!("a,b".parse::<Point>().is_err());
    }
}
