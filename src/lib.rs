// 公开导出的模块，供外部使用
pub mod chart;
pub mod errors;
pub mod models;
pub mod resolver;

// 为了支持主程序，暂时保持这些模块公开
// 但在库使用场景中，这些应该是内部模块
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod fetchers;
#[doc(hidden)]
pub mod render;
#[doc(hidden)]
pub mod services;
#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use errors::{ChartFrameError, Result};
pub use models::frame::{FrameButton, FrameResponse, InteractionContext, ViewModel};
pub use models::token::{ChartSeries, PriceSnapshot, ResolvedSymbol, UserProfile};
pub use resolver::{FidLookup, Resolver};
