//! Charts module - chart specs and rendering

mod plotter;
mod spec;

pub use plotter::ChartPlotter;
pub use spec::{
    AxisValues, ChartBuilder, ChartKind, ChartRequest, ChartSeries, ChartSpec, PieSlice,
};
