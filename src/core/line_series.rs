use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{ChartScales, DataPoint};

/// Projected series vertex in plot-relative pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineVertex {
    pub x: f64,
    pub y: f64,
}

/// Projects every sample of the series onto the plot.
///
/// Output order matches input order so consumers can draw one polyline.
#[must_use]
pub fn project_line_vertices(points: &[DataPoint], scales: &ChartScales) -> Vec<LineVertex> {
    #[cfg(feature = "parallel-projection")]
    {
        points
            .par_iter()
            .map(|point| project_vertex(point, scales))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        points
            .iter()
            .map(|point| project_vertex(point, scales))
            .collect()
    }
}

fn project_vertex(point: &DataPoint, scales: &ChartScales) -> LineVertex {
    let (x, y) = scales.project(point);
    LineVertex { x, y }
}
