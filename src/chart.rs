use crate::models::token::{ChartSeries, PriceSnapshot};

/// 取最近的N条快照用于绘图
pub fn window(snapshots: &[PriceSnapshot], size: usize) -> &[PriceSnapshot] {
    let start = snapshots.len().saturating_sub(size);
    &snapshots[start..]
}

/// 把快照窗口变换为固定画布上的绘图数据
///
/// x按序号均匀分布，y按价格区间归一化。退化输入（单点或零区间）
/// 画成中线高度的水平线，绝不让NaN/Infinity进入路径。
/// 起始价为零时涨跌幅无定义，返回`None`。
pub fn shape(window: &[PriceSnapshot], width: f64, height: f64) -> ChartSeries {
    debug_assert!(!window.is_empty(), "shape() requires a non-empty window");

    let mut min_price = f64::MAX;
    let mut max_price = f64::MIN;
    for snapshot in window {
        min_price = min_price.min(snapshot.price);
        max_price = max_price.max(snapshot.price);
    }
    let range = max_price - min_price;

    let earliest_price = window[0].price;
    let latest_price = window[window.len() - 1].price;

    let n = window.len();
    let points = if n == 1 || range == 0.0 {
        // 退化窗口：中线高度的水平线
        vec![(0.0, height / 2.0), (width, height / 2.0)]
    } else {
        window
            .iter()
            .enumerate()
            .map(|(i, snapshot)| {
                let x = (i as f64 / (n - 1) as f64) * width;
                let y = height - ((snapshot.price - min_price) / range) * height;
                (x, y)
            })
            .collect()
    };

    let percent_change = if earliest_price == 0.0 {
        // 除零无定义，交给渲染层显式呈现
        None
    } else {
        Some((latest_price - earliest_price) / earliest_price * 100.0)
    };

    ChartSeries {
        points,
        min_price,
        max_price,
        latest_price,
        earliest_price,
        percent_change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(timestamp: i64, price: f64) -> PriceSnapshot {
        PriceSnapshot { timestamp, price }
    }

    #[test]
    fn window_keeps_most_recent_entries() {
        let snapshots: Vec<PriceSnapshot> =
            (0..30).map(|i| snap(i as i64, i as f64)).collect();
        let win = window(&snapshots, 24);
        assert_eq!(win.len(), 24);
        assert_eq!(win[0].timestamp, 6);
        assert_eq!(win[23].timestamp, 29);
    }

    #[test]
    fn window_shorter_than_limit_is_unchanged() {
        let snapshots = vec![snap(1, 1.0), snap(2, 2.0)];
        assert_eq!(window(&snapshots, 24).len(), 2);
    }

    #[test]
    fn single_point_yields_flat_line_not_nan() {
        let series = shape(&[snap(1, 1.5)], 100.0, 100.0);
        assert_eq!(series.percent_change, Some(0.0));
        assert_eq!(series.points, vec![(0.0, 50.0), (100.0, 50.0)]);
        for (x, y) in &series.points {
            assert!(x.is_finite() && y.is_finite());
        }
    }

    #[test]
    fn zero_range_yields_flat_line() {
        let series = shape(&[snap(1, 2.0), snap(2, 2.0), snap(3, 2.0)], 100.0, 100.0);
        assert_eq!(series.percent_change, Some(0.0));
        assert_eq!(series.points, vec![(0.0, 50.0), (100.0, 50.0)]);
    }

    #[test]
    fn two_point_window_maps_to_corners() {
        let series = shape(&[snap(1, 1.0), snap(2, 2.0)], 100.0, 100.0);
        assert_eq!(series.percent_change, Some(100.0));
        assert_eq!(series.points, vec![(0.0, 100.0), (100.0, 0.0)]);
        assert_eq!(series.min_price, 1.0);
        assert_eq!(series.max_price, 2.0);
        assert_eq!(series.earliest_price, 1.0);
        assert_eq!(series.latest_price, 2.0);
    }

    #[test]
    fn zero_earliest_price_reports_undefined_change() {
        let series = shape(&[snap(1, 0.0), snap(2, 2.0)], 100.0, 100.0);
        assert_eq!(series.percent_change, None);
        // 坐标仍然有限
        for (x, y) in &series.points {
            assert!(x.is_finite() && y.is_finite());
        }
    }
}
