pub mod candle;
pub mod indicator;
pub mod options;
pub mod primitives;
pub mod types;

pub use candle::KLineData;
pub use indicator::{IndicatorCreate, IndicatorFigure, IndicatorSeries, IndicatorSpec, IndicatorValue};
pub use options::{
    ApplyDataMore, ChartOptions, DecimalFold, LayoutChild, LayoutChildType, LoadDataMore,
    LoadDataType, ThousandsSeparator,
};
pub use types::{Coordinate, IndicatorFilter, PaneOptions, PaneState, Precision};
