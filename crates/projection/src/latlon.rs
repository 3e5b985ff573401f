//! Lat/lon grid: x is longitude, y is latitude, both in degrees.

use radar_common::{fmod360, GridSpec, RadarError, RadarResult};

use crate::calc::ProjectionMath;

/// Longitudes are conditioned into the 360 degree window centred on the
/// grid's middle column, so grids spanning the antimeridian index correctly.
#[derive(Debug, Clone, PartialEq)]
pub struct LatLonProjection {
    central_lon: f64,
}

impl LatLonProjection {
    pub fn new(central_lon: f64) -> RadarResult<Self> {
        if !central_lon.is_finite() {
            return Err(RadarError::invalid_param("central_lon", "must be finite"));
        }
        Ok(Self { central_lon })
    }

    /// Centre the longitude window on the grid.
    pub fn for_grid(grid: &GridSpec) -> RadarResult<Self> {
        let span = (grid.nx.saturating_sub(1)) as f64 * grid.dx;
        Self::new(grid.minx + span / 2.0)
    }

    pub fn central_lon(&self) -> f64 {
        self.central_lon
    }

    fn condition_lon(&self, lon: f64) -> f64 {
        let low = self.central_lon - 180.0;
        low + fmod360(lon - low)
    }
}

impl ProjectionMath for LatLonProjection {
    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        (self.condition_lon(lon), lat)
    }

    /// Longitude is returned in the grid's window, not normalized.
    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        (y, x)
    }
}
