use shared::Coordinate;

/// Map framing shown before any route has been loaded.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(30.3165, 78.0322);
pub const DEFAULT_ZOOM: u8 = 13;
/// Zoom used after fitting a result. Not distance-adaptive.
pub const FIT_ZOOM: u8 = 12;

/// Axis-aligned box over raw lat/lng. No antimeridian handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl Bounds {
    fn around(point: Coordinate) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    fn extend(&mut self, point: Coordinate) {
        self.min.lat = self.min.lat.min(point.lat);
        self.min.lng = self.min.lng.min(point.lng);
        self.max.lat = self.max.lat.max(point.lat);
        self.max.lng = self.max.lng.max(point.lng);
    }

    pub fn center(&self) -> Coordinate {
        self.min.midpoint(self.max)
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min.lat..=self.max.lat).contains(&point.lat)
            && (self.min.lng..=self.max.lng).contains(&point.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Bounds over every point of every path, or `None` if there are no points.
pub fn compute_bounds<I, P>(paths: I) -> Option<Bounds>
where
    I: IntoIterator<Item = P>,
    P: AsRef<[Coordinate]>,
{
    let mut bounds: Option<Bounds> = None;
    for path in paths {
        for &point in path.as_ref() {
            bounds = Some(match bounds {
                Some(mut b) => {
                    b.extend(point);
                    b
                }
                None => Bounds::around(point),
            });
        }
    }
    bounds
}

pub fn compute_center_zoom(bounds: Option<Bounds>, previous: Viewport) -> Viewport {
    match bounds {
        Some(bounds) => Viewport {
            center: bounds.center(),
            zoom: FIT_ZOOM,
        },
        None => previous,
    }
}
