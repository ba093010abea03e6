use serde::Serialize;
use std::fmt;

/// 单条价格快照，时间戳为epoch秒
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSnapshot {
    pub timestamp: i64,
    pub price: f64,
}

/// 身份解析结果：FID命中或原始查询文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResolvedSymbol {
    ById(u64),
    Raw(String),
}

impl ResolvedSymbol {
    /// 上游subject token的symbol格式为 `fid:<id>`
    pub fn query_key(&self) -> String {
        match self {
            ResolvedSymbol::ById(fid) => format!("fid:{}", fid),
            ResolvedSymbol::Raw(text) => text.clone(),
        }
    }

    pub fn fid(&self) -> Option<u64> {
        match self {
            ResolvedSymbol::ById(fid) => Some(*fid),
            ResolvedSymbol::Raw(_) => None,
        }
    }
}

impl fmt::Display for ResolvedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_key())
    }
}

/// User profile for the chart header
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub handle: String,
    pub display_name: String,
    pub avatar_url: String,
}

/// 图表绘制数据，按请求重新计算，从不持久化
///
/// `percent_change` 为 `None` 表示涨跌幅无定义（起始价为零）。
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub points: Vec<(f64, f64)>,
    pub min_price: f64,
    pub max_price: f64,
    pub latest_price: f64,
    pub earliest_price: f64,
    pub percent_change: Option<f64>,
}
