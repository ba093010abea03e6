use crate::chart;
use crate::config::Config;
use crate::fetchers::base::{ProfileSource, SnapshotSource};
use crate::models::frame::{FrameResponse, InteractionContext, ViewModel};
use crate::models::token::ResolvedSymbol;
use crate::render;
use crate::resolver::Resolver;
use log::{error, info};
use std::sync::Arc;

/// Frame服务，处理单次交互的完整流程：解析、抓取、变换、渲染
///
/// 每次请求独立构建全新的值图，唯一的长生命周期状态是解析器
/// 持有的只读查找表。单次失败直接路由到错误卡片，不做重试。
pub struct FrameService {
    config: Config,
    resolver: Resolver,
    snapshots: Arc<dyn SnapshotSource + Send + Sync>,
    profiles: Arc<dyn ProfileSource + Send + Sync>,
}

impl FrameService {
    /// 创建新的frame服务实例
    pub fn new(
        config: Config,
        resolver: Resolver,
        snapshots: Arc<dyn SnapshotSource + Send + Sync>,
        profiles: Arc<dyn ProfileSource + Send + Sync>,
    ) -> Self {
        Self {
            config,
            resolver,
            snapshots,
            profiles,
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// 处理一次入站交互，返回渲染好的frame响应
    pub async fn handle(&self, ctx: &InteractionContext) -> FrameResponse {
        let symbol = self.resolver.resolve(ctx);
        info!("Handling interaction for symbol {}", symbol);

        let view = self.build_view(&symbol).await;
        render::render(&view, &symbol)
    }

    /// 抓取并变换数据，产出终态视图
    ///
    /// 空数据路由到NoTokenFound，传输/解析故障路由到Error。
    pub async fn build_view(&self, symbol: &ResolvedSymbol) -> ViewModel {
        let snapshots = match self.snapshots.fetch_snapshots(symbol).await {
            Ok(snapshots) => snapshots,
            Err(e) => {
                error!("Failed to fetch snapshots for {}: {}", symbol, e);
                return ViewModel::Error;
            }
        };

        let window = chart::window(&snapshots, self.config.snapshot_window);
        if window.is_empty() {
            info!("No price data for {}", symbol);
            return ViewModel::NoTokenFound;
        }

        let profile = match self.profiles.fetch_profile(symbol).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                info!("No profile found for {}", symbol);
                return ViewModel::NoTokenFound;
            }
            Err(e) => {
                error!("Failed to fetch profile for {}: {}", symbol, e);
                return ViewModel::Error;
            }
        };

        let series = chart::shape(window, self.config.chart_width, self.config.chart_height);
        ViewModel::Chart {
            profile,
            series,
            snapshot_count: window.len(),
        }
    }
}
