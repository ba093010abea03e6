use chrono::Utc;

use crate::models::frame::{CastAction, FrameButton, FrameResponse, ViewModel};
use crate::models::token::{ChartSeries, ResolvedSymbol, UserProfile};
use crate::util;

pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;

const TEXT_INPUT_PLACEHOLDER: &str = "Search by FID or @username";
const LINE_COLOR: &str = "#8A2BE2";
const GAIN_COLOR: &str = "#22C55E";
const LOSS_COLOR: &str = "#EF4444";
const MUTED_COLOR: &str = "#9CA3AF";

/// 把终态视图组装成frame响应：SVG卡片 + 输入框 + 按钮列表
pub fn render(view: &ViewModel, symbol: &ResolvedSymbol) -> FrameResponse {
    match view {
        ViewModel::NoTokenFound => FrameResponse {
            image: message_card(
                "No Fan Token Yet",
                "This user doesn't have a Fan Token, or their auction is still ongoing.",
            ),
            text_input: Some(TEXT_INPUT_PLACEHOLDER.to_string()),
            buttons: vec![
                FrameButton::post("🎲 Random", "/?action=random"),
                FrameButton::post("🔎 Search", "/?action=search"),
            ],
            state_symbol: symbol.query_key(),
        },
        ViewModel::Error => FrameResponse {
            image: message_card(
                "Error",
                "An error occurred while fetching data. Please try again later.",
            ),
            text_input: Some(TEXT_INPUT_PLACEHOLDER.to_string()),
            buttons: vec![
                FrameButton::post("🔎 Try Again", "/?action=search"),
                FrameButton::post("My Token", "/?action=my_token"),
            ],
            state_symbol: symbol.query_key(),
        },
        ViewModel::Chart {
            profile,
            series,
            snapshot_count,
        } => FrameResponse {
            image: chart_card(profile, series, *snapshot_count),
            text_input: Some(TEXT_INPUT_PLACEHOLDER.to_string()),
            buttons: chart_buttons(profile, series, symbol),
            state_symbol: symbol.query_key(),
        },
    }
}

/// Cast action安装描述符
pub fn cast_action(base_url: &str) -> CastAction {
    CastAction {
        action_type: "post".to_string(),
        icon: "pulse".to_string(),
        name: "Fan Token Chart".to_string(),
        about_url: base_url.to_string(),
        description: "Check the price changes of Moxie Fan Tokens and buy/sell them.".to_string(),
    }
}

// 图表状态的固定按钮集；link按钮需要规范FID，Raw symbol时省略
fn chart_buttons(
    profile: &UserProfile,
    series: &ChartSeries,
    symbol: &ResolvedSymbol,
) -> Vec<FrameButton> {
    let mut buttons = vec![
        FrameButton::post("🎲 Random", "/?action=random"),
        FrameButton::post("🔎 Search", "/?action=search"),
    ];

    if let Some(fid) = symbol.fid() {
        let trade_text = util::url_encode(&format!(
            "I saw the Fan Token chart 📈 from @leeknowlton.eth! Time to swap some @{} tokens with this frame. Join me?",
            profile.handle
        ));
        let trade_url = format!(
            "https://warpcast.com/~/compose?text={}&embeds[]=https://moxie-frames.airstack.xyz/stim?t=fid_{}",
            trade_text, fid
        );

        let share_text = util::url_encode(&format!(
            "{}'s Fan Token is now at ${:.4} per token. Here's the all-time chart, made by @leeknowlton.eth . Is it time to send it higher?",
            profile.display_name, series.latest_price
        ));
        let share_url = format!(
            "https://warpcast.com/~/compose?text={}&embeds[]=https://moxie-chart-frame.vercel.app/frames?fid={}",
            share_text, fid
        );

        buttons.push(FrameButton::link("⚡️ Trade", &trade_url));
        buttons.push(FrameButton::link("Share", &share_url));
    }

    buttons
}

// 居中文案卡片（无token / 错误两种状态共用）
fn message_card(title: &str, body: &str) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r##"<rect width="{w}" height="{h}" fill="#111827"/>"##,
            r##"<text x="{cx}" y="280" text-anchor="middle" fill="#FFFFFF" font-family="sans-serif" font-size="64" font-weight="bold">{title}</text>"##,
            r##"<text x="{cx}" y="360" text-anchor="middle" fill="#D1D5DB" font-family="sans-serif" font-size="34">{body}</text>"##,
            "</svg>"
        ),
        w = CARD_WIDTH,
        h = CARD_HEIGHT,
        cx = CARD_WIDTH / 2,
        title = xml_escape(title),
        body = xml_escape(body),
    )
}

fn chart_card(profile: &UserProfile, series: &ChartSeries, snapshot_count: usize) -> String {
    let chart_width = series
        .points
        .iter()
        .map(|(x, _)| *x)
        .fold(0.0_f64, f64::max);
    let chart_height = series
        .points
        .iter()
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max)
        .max(350.0);
    let chart_x = (CARD_WIDTH as f64 - chart_width) / 2.0;
    let chart_y = 170.0;

    let points = points_attr(&series.points);
    let (delta_text, delta_color) = match series.percent_change {
        Some(change) if change >= 0.0 => (format!("+{:.2}%", change), GAIN_COLOR),
        Some(change) => (format!("{:.2}%", change), LOSS_COLOR),
        None => ("n/a".to_string(), MUTED_COLOR),
    };

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = CARD_WIDTH,
        h = CARD_HEIGHT,
    ));
    svg.push_str(&format!(
        concat!(
            "<defs>",
            r##"<linearGradient id="gradient" x1="0%" y1="0%" x2="0%" y2="100%">"##,
            r##"<stop offset="0%" stop-color="{line}" stop-opacity="0.4"/>"##,
            r##"<stop offset="100%" stop-color="{line}" stop-opacity="0"/>"##,
            "</linearGradient>",
            r##"<clipPath id="avatar-clip"><circle cx="64" cy="64" r="32"/></clipPath>"##,
            "</defs>",
        ),
        line = LINE_COLOR,
    ));
    svg.push_str(&format!(
        r##"<rect width="{w}" height="{h}" fill="#111827"/>"##,
        w = CARD_WIDTH,
        h = CARD_HEIGHT,
    ));

    // 档案头部：头像、名称、handle
    if !profile.avatar_url.is_empty() {
        svg.push_str(&format!(
            r#"<image href="{}" x="32" y="32" width="64" height="64" clip-path="url(#avatar-clip)"/>"#,
            xml_escape(&profile.avatar_url),
        ));
    }
    svg.push_str(&format!(
        r##"<text x="112" y="62" fill="#FFFFFF" font-family="sans-serif" font-size="30" font-weight="bold">{} Fan Token</text>"##,
        xml_escape(&profile.display_name),
    ));
    svg.push_str(&format!(
        r#"<text x="112" y="94" fill="{}" font-family="sans-serif" font-size="22">@{}</text>"#,
        MUTED_COLOR,
        xml_escape(&profile.handle),
    ));

    // 最新价与涨跌幅
    svg.push_str(&format!(
        r##"<text x="1168" y="64" text-anchor="end" fill="#FFFFFF" font-family="sans-serif" font-size="38" font-weight="bold">${:.4}</text>"##,
        series.latest_price,
    ));
    svg.push_str(&format!(
        r#"<text x="1168" y="100" text-anchor="end" fill="{}" font-family="sans-serif" font-size="26" font-weight="bold">{}</text>"#,
        delta_color, delta_text,
    ));

    svg.push_str(
        r##"<text x="40" y="156" fill="#FFFFFF" font-family="sans-serif" font-size="30" font-weight="bold">LAST 24 HOURS</text>"##,
    );

    // 曲线：渐变填充 + 折线
    svg.push_str(&format!(
        r#"<g transform="translate({:.1},{:.1})">"#,
        chart_x, chart_y,
    ));
    svg.push_str(&format!(
        r##"<path d="M0,{h:.1} {points} {w:.1},{h:.1}" fill="url(#gradient)"/>"##,
        h = chart_height,
        w = chart_width,
        points = points,
    ));
    svg.push_str(&format!(
        r#"<polyline fill="none" stroke="{}" stroke-width="3" points="{}"/>"#,
        LINE_COLOR, points,
    ));
    svg.push_str("</g>");

    // 统计摘要
    svg.push_str(&format!(
        r##"<text x="40" y="566" fill="#D1D5DB" font-family="sans-serif" font-size="24">Earliest Price: ${:.4}</text>"##,
        series.earliest_price,
    ));
    svg.push_str(&format!(
        r##"<text x="40" y="598" fill="#D1D5DB" font-family="sans-serif" font-size="24">24h: ${:.4} (Low) / ${:.4} (High)</text>"##,
        series.min_price, series.max_price,
    ));
    svg.push_str(&format!(
        r#"<text x="40" y="624" fill="{}" font-family="sans-serif" font-size="20">Total Snapshots: {}</text>"#,
        MUTED_COLOR, snapshot_count,
    ));
    svg.push_str(
        r##"<text x="1168" y="598" text-anchor="end" fill="#D1D5DB" font-family="sans-serif" font-size="20">Frame by Zenigame (@leeknowlton.eth)</text>"##,
    );
    svg.push_str(&format!(
        r#"<text x="1168" y="624" text-anchor="end" fill="{}" font-family="sans-serif" font-size="16">{}</text>"#,
        MUTED_COLOR,
        Utc::now().to_rfc3339(),
    ));
    svg.push_str("</svg>");
    svg
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            handle: "alice".to_string(),
            display_name: "Alice".to_string(),
            avatar_url: "https://img.example/xs.png".to_string(),
        }
    }

    fn sample_series() -> ChartSeries {
        ChartSeries {
            points: vec![(0.0, 350.0), (1050.0, 0.0)],
            min_price: 1.0,
            max_price: 2.0,
            latest_price: 2.0,
            earliest_price: 1.0,
            percent_change: Some(100.0),
        }
    }

    fn chart_view() -> ViewModel {
        ViewModel::Chart {
            profile: sample_profile(),
            series: sample_series(),
            snapshot_count: 24,
        }
    }

    #[test]
    fn no_token_card_offers_random_and_search() {
        let response = render(&ViewModel::NoTokenFound, &ResolvedSymbol::ById(42));
        assert!(response.image.contains("No Fan Token Yet"));
        assert_eq!(
            response.buttons,
            vec![
                FrameButton::post("🎲 Random", "/?action=random"),
                FrameButton::post("🔎 Search", "/?action=search"),
            ]
        );
        assert_eq!(response.state_symbol, "fid:42");
    }

    #[test]
    fn error_card_offers_retry_and_my_token() {
        let response = render(&ViewModel::Error, &ResolvedSymbol::ById(42));
        assert!(response.image.contains("Error"));
        assert_eq!(
            response.buttons,
            vec![
                FrameButton::post("🔎 Try Again", "/?action=search"),
                FrameButton::post("My Token", "/?action=my_token"),
            ]
        );
    }

    #[test]
    fn chart_card_renders_polyline_and_gradient() {
        let response = render(&chart_view(), &ResolvedSymbol::ById(42));
        assert!(response.image.contains("<polyline"));
        assert!(response.image.contains("url(#gradient)"));
        assert!(response.image.contains("0.0,350.0 1050.0,0.0"));
        assert!(response.image.contains("+100.00%"));
        assert!(response.image.contains("$2.0000"));
        assert_eq!(
            response.text_input.as_deref(),
            Some("Search by FID or @username")
        );
    }

    #[test]
    fn chart_card_links_interpolate_canonical_fid() {
        let response = render(&chart_view(), &ResolvedSymbol::ById(42));
        assert_eq!(response.buttons.len(), 4);
        let urls: Vec<&str> = response
            .buttons
            .iter()
            .filter_map(|b| match b {
                FrameButton::Link { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(urls.len(), 2);
        assert!(urls[0].contains("t=fid_42"));
        assert!(urls[1].contains("frames?fid=42"));
    }

    #[test]
    fn raw_symbol_omits_link_buttons() {
        let response = render(&chart_view(), &ResolvedSymbol::Raw("mystery".to_string()));
        assert_eq!(response.buttons.len(), 2);
        assert_eq!(response.state_symbol, "mystery");
    }

    #[test]
    fn undefined_percent_change_renders_muted_placeholder() {
        let view = ViewModel::Chart {
            profile: sample_profile(),
            series: ChartSeries {
                percent_change: None,
                ..sample_series()
            },
            snapshot_count: 2,
        };
        let response = render(&view, &ResolvedSymbol::ById(1));
        assert!(response.image.contains(">n/a</text>"));
    }

    #[test]
    fn user_text_is_xml_escaped() {
        let view = ViewModel::Chart {
            profile: UserProfile {
                handle: "a&b".to_string(),
                display_name: "<Alice>".to_string(),
                avatar_url: String::new(),
            },
            series: sample_series(),
            snapshot_count: 2,
        };
        let response = render(&view, &ResolvedSymbol::ById(1));
        assert!(response.image.contains("&lt;Alice&gt; Fan Token"));
        assert!(response.image.contains("@a&amp;b"));
        assert!(!response.image.contains("<Alice>"));
    }

    #[test]
    fn cast_action_descriptor_is_installable() {
        let action = cast_action("https://moxie-chart-frame.vercel.app");
        assert_eq!(action.action_type, "post");
        assert_eq!(action.name, "Fan Token Chart");
        assert_eq!(action.icon, "pulse");
    }
}
