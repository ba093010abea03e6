use crate::errors::{ChartFrameError, Result};

// 时间戳与价格解析工具，上游字段均为字符串编码
pub fn parse_epoch_seconds(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| ChartFrameError::DataError(format!("Invalid timestamp '{}': {}", raw, e)))
}

pub fn parse_price(raw: &str) -> Result<f64> {
    let price = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ChartFrameError::DataError(format!("Invalid price '{}': {}", raw, e)))?;
    if !price.is_finite() {
        return Err(ChartFrameError::DataError(format!(
            "Non-finite price: {}",
            raw
        )));
    }
    Ok(price)
}

/// 从URL中提取query参数，任何畸形输入都返回None，从不panic
pub fn query_param(url: &str, key: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    // fragment不属于query
    let query = query.split('#').next().unwrap_or(query);
    for pair in query.split('&') {
        if let Some((k, v)) = pair.split_once('=') {
            if k == key && !v.is_empty() {
                return Some(v.to_string());
            }
        }
    }
    None
}

/// RFC 3986百分号编码，保留unreserved字符
pub fn url_encode(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len() * 3);
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}
