use serde::{Deserialize, Serialize};

use crate::models::token::{ChartSeries, UserProfile};

/// 按钮动作信号，来自frame中间件的query参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameAction {
    Random,
    Search,
    MyToken,
}

impl FrameAction {
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "random" => Some(FrameAction::Random),
            "search" => Some(FrameAction::Search),
            "my_token" => Some(FrameAction::MyToken),
            _ => None,
        }
    }
}

/// Inbound interaction context, handed over by the frame middleware.
/// All fields are optional; resolution applies a fixed precedence order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionContext {
    pub input_text: Option<String>,
    pub requester_fid: Option<u64>,
    pub action: Option<FrameAction>,
    pub url: Option<String>,
}

/// Frame按钮：post回传到自身路径，link跳转外部URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum FrameButton {
    Post { label: String, target: String },
    Link { label: String, url: String },
}

impl FrameButton {
    pub fn post(label: &str, target: &str) -> Self {
        FrameButton::Post {
            label: label.to_string(),
            target: target.to_string(),
        }
    }

    pub fn link(label: &str, url: &str) -> Self {
        FrameButton::Link {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// 渲染输出：SVG图像、输入框占位符和有序按钮列表
#[derive(Debug, Clone, Serialize)]
pub struct FrameResponse {
    pub image: String,
    pub text_input: Option<String>,
    pub buttons: Vec<FrameButton>,
    pub state_symbol: String,
}

/// 每次请求的终态，渲染器在此之上穷举分支
#[derive(Debug, Clone)]
pub enum ViewModel {
    NoTokenFound,
    Error,
    Chart {
        profile: UserProfile,
        series: ChartSeries,
        snapshot_count: usize,
    },
}

/// Cast action描述符，安装入口用
#[derive(Debug, Clone, Serialize)]
pub struct CastAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub icon: String,
    pub name: String,
    #[serde(rename = "aboutUrl")]
    pub about_url: String,
    pub description: String,
}
