//! Projection calculator: a projection plus the grid laid over it.

use radar_common::{GridSpec, RadarResult};
use tracing::debug;

use crate::flat::FlatProjection;
use crate::lambert::LambertConformal;
use crate::latlon::LatLonProjection;
use crate::mercator::Mercator;
use crate::oblique_stereo::ObliqueStereographic;
use crate::params::{PoleType, ProjType, ProjectionParams};
use crate::polar_radar::PolarRadar;
use crate::polar_stereo::PolarStereographic;

/// Forward and inverse mapping between lat/lon (degrees) and projected
/// x/y.
pub trait ProjectionMath: Send + Sync {
    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64);

    /// Longitudes come back in `[-180, 180]` except for the lat/lon grid,
    /// which returns x unchanged.
    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64);
}

/// The projection variants, one per [`ProjType`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionKind {
    Flat(FlatProjection),
    LatLon(LatLonProjection),
    LambertConformal1(LambertConformal),
    LambertConformal2(LambertConformal),
    Mercator(Mercator),
    PolarRadar(PolarRadar),
    PolarStereographic(PolarStereographic),
    ObliqueStereographic(ObliqueStereographic),
}

impl ProjectionKind {
    pub fn proj_type(&self) -> ProjType {
        match self {
            ProjectionKind::Flat(_) => ProjType::Flat,
            ProjectionKind::LatLon(_) => ProjType::LatLon,
            ProjectionKind::LambertConformal1(_) => ProjType::LambertConformal1,
            ProjectionKind::LambertConformal2(_) => ProjType::LambertConformal2,
            ProjectionKind::Mercator(_) => ProjType::Mercator,
            ProjectionKind::PolarRadar(_) => ProjType::PolarRadar,
            ProjectionKind::PolarStereographic(_) => ProjType::PolarStereographic,
            ProjectionKind::ObliqueStereographic(_) => ProjType::ObliqueStereographic,
        }
    }

    fn math(&self) -> &dyn ProjectionMath {
        match self {
            ProjectionKind::Flat(p) => p,
            ProjectionKind::LatLon(p) => p,
            ProjectionKind::LambertConformal1(p) | ProjectionKind::LambertConformal2(p) => p,
            ProjectionKind::Mercator(p) => p,
            ProjectionKind::PolarRadar(p) => p,
            ProjectionKind::PolarStereographic(p) => p,
            ProjectionKind::ObliqueStereographic(p) => p,
        }
    }
}

impl ProjectionMath for ProjectionKind {
    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        self.math().latlon_to_xy(lat, lon)
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        self.math().xy_to_latlon(x, y)
    }
}

/// A projection with its grid. Immutable after construction and safe to
/// share across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionCalc {
    grid: GridSpec,
    kind: ProjectionKind,
}

impl ProjectionCalc {
    /// Pair a projection with a grid, rejecting grids that cannot be indexed.
    pub fn new(grid: GridSpec, kind: ProjectionKind) -> RadarResult<Self> {
        grid.validate()?;
        debug!(
            proj_type = %kind.proj_type(),
            nx = grid.nx,
            ny = grid.ny,
            nz = grid.nz,
            "Created projection"
        );
        Ok(Self { grid, kind })
    }

    pub fn flat(
        grid: GridSpec,
        origin_lat: f64,
        origin_lon: f64,
        rotation: f64,
    ) -> RadarResult<Self> {
        let proj = FlatProjection::new(origin_lat, origin_lon, rotation)?;
        Self::new(grid, ProjectionKind::Flat(proj))
    }

    pub fn latlon(grid: GridSpec) -> RadarResult<Self> {
        let proj = LatLonProjection::for_grid(&grid)?;
        Self::new(grid, ProjectionKind::LatLon(proj))
    }

    pub fn lambert_conformal1(
        grid: GridSpec,
        origin_lat: f64,
        origin_lon: f64,
        lat1: f64,
    ) -> RadarResult<Self> {
        let proj = LambertConformal::tangent(origin_lat, origin_lon, lat1)?;
        Self::new(grid, ProjectionKind::LambertConformal1(proj))
    }

    pub fn lambert_conformal2(
        grid: GridSpec,
        origin_lat: f64,
        origin_lon: f64,
        lat1: f64,
        lat2: f64,
    ) -> RadarResult<Self> {
        let proj = LambertConformal::secant(origin_lat, origin_lon, lat1, lat2)?;
        Self::new(grid, ProjectionKind::LambertConformal2(proj))
    }

    pub fn mercator(grid: GridSpec, origin_lat: f64, origin_lon: f64) -> RadarResult<Self> {
        let proj = Mercator::new(origin_lat, origin_lon)?;
        Self::new(grid, ProjectionKind::Mercator(proj))
    }

    pub fn polar_radar(grid: GridSpec, origin_lat: f64, origin_lon: f64) -> RadarResult<Self> {
        let proj = PolarRadar::new(origin_lat, origin_lon)?;
        Self::new(grid, ProjectionKind::PolarRadar(proj))
    }

    pub fn polar_stereographic(
        grid: GridSpec,
        tangent_lon: f64,
        pole: PoleType,
        central_scale: f64,
        origin_lat: f64,
        origin_lon: f64,
    ) -> RadarResult<Self> {
        let proj =
            PolarStereographic::new(tangent_lon, pole, central_scale, origin_lat, origin_lon)?;
        Self::new(grid, ProjectionKind::PolarStereographic(proj))
    }

    pub fn oblique_stereographic(
        grid: GridSpec,
        origin_lat: f64,
        origin_lon: f64,
        central_scale: f64,
    ) -> RadarResult<Self> {
        let proj = ObliqueStereographic::new(origin_lat, origin_lon, central_scale)?;
        Self::new(grid, ProjectionKind::ObliqueStereographic(proj))
    }

    /// Build from a configuration record.
    pub fn from_params(params: &ProjectionParams) -> RadarResult<Self> {
        let grid = params.grid;
        let (lat0, lon0) = (params.origin_lat, params.origin_lon);
        match params.proj_type {
            ProjType::Flat => Self::flat(grid, lat0, lon0, params.rotation),
            ProjType::LatLon => Self::latlon(grid),
            ProjType::LambertConformal1 => Self::lambert_conformal1(grid, lat0, lon0, params.lat1),
            ProjType::LambertConformal2 => {
                Self::lambert_conformal2(grid, lat0, lon0, params.lat1, params.lat2)
            }
            ProjType::Mercator => Self::mercator(grid, lat0, lon0),
            ProjType::PolarRadar => Self::polar_radar(grid, lat0, lon0),
            ProjType::PolarStereographic => Self::polar_stereographic(
                grid,
                params.tangent_lon,
                params.pole,
                params.central_scale,
                lat0,
                lon0,
            ),
            ProjType::ObliqueStereographic => {
                Self::oblique_stereographic(grid, lat0, lon0, params.central_scale)
            }
        }
    }

    pub fn proj_type(&self) -> ProjType {
        self.kind.proj_type()
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn kind(&self) -> &ProjectionKind {
        &self.kind
    }

    /// Independent copy of this calculator.
    pub fn copy_calc(&self) -> ProjectionCalc {
        self.clone()
    }

    pub fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        self.kind.latlon_to_xy(lat, lon)
    }

    pub fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        self.kind.xy_to_latlon(x, y)
    }

    /// Nearest grid cell of a point, or `None` outside the grid.
    pub fn latlon_to_xy_index(&self, lat: f64, lon: f64) -> Option<(usize, usize)> {
        let (x, y) = self.latlon_to_xy(lat, lon);
        self.grid.xy_to_index(x, y)
    }

    /// Index into a single plane (`iy * nx + ix`), or `None` outside the
    /// grid.
    pub fn latlon_to_array_index(&self, lat: f64, lon: f64) -> Option<usize> {
        let (ix, iy) = self.latlon_to_xy_index(lat, lon)?;
        self.grid.xy_index_to_array_index(ix, iy, 0)
    }

    /// Location of a grid cell. Indices are not bounds checked.
    pub fn xy_index_to_latlon(&self, ix: usize, iy: usize) -> (f64, f64) {
        let (x, y) = self.grid.index_to_xy(ix, iy);
        self.xy_to_latlon(x, y)
    }

    pub fn xy_index_to_array_index(&self, ix: usize, iy: usize, iz: usize) -> Option<usize> {
        self.grid.xy_index_to_array_index(ix, iy, iz)
    }

    /// Get the geographic bounding box of the grid.
    ///
    /// Returns (min_lon, min_lat, max_lon, max_lat) in degrees.
    /// The edges of a projected grid are curved in lat/lon, so this samples
    /// the corners and edges and returns the box that encloses them. Grids
    /// that straddle the antimeridian report the full longitude span.
    pub fn geographic_bounds(&self) -> (f64, f64, f64, f64) {
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lon = f64::MAX;
        let mut max_lon = f64::MIN;

        let x_last = (self.grid.nx - 1) as f64;
        let y_last = (self.grid.ny - 1) as f64;

        let mut include = |fi: f64, fj: f64| {
            let x = self.grid.minx + fi * self.grid.dx;
            let y = self.grid.miny + fj * self.grid.dy;
            let (lat, lon) = self.xy_to_latlon(x, y);
            min_lat = min_lat.min(lat);
            max_lat = max_lat.max(lat);
            min_lon = min_lon.min(lon);
            max_lon = max_lon.max(lon);
        };

        // Sample along edges, corners included
        for t in 0..=EDGE_SAMPLES {
            let frac = t as f64 / EDGE_SAMPLES as f64;
            include(frac * x_last, 0.0);
            include(frac * x_last, y_last);
            include(0.0, frac * y_last);
            include(x_last, frac * y_last);
        }

        (min_lon, min_lat, max_lon, max_lat)
    }

    /// Check if a geographic point falls on the grid.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.latlon_to_xy_index(lat, lon).is_some()
    }
}

const EDGE_SAMPLES: usize = 20;
