use serde::Deserialize;

use crate::models::{DEFAULT_LIMIT, ProviderSelection};

/// `GET /memes` 的查询参数
///
/// 全部按字符串接收，limit 没有数字时使用默认值而不是返回 400。
#[derive(Debug, Default, Deserialize)]
pub struct MemeSearchQuery {
    pub q: Option<String>,
    pub provider: Option<String>,
    pub limit: Option<String>,
}

impl MemeSearchQuery {
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    pub fn provider(&self) -> ProviderSelection {
        ProviderSelection::parse(self.provider.as_deref())
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(parse_leading_int)
            .unwrap_or(DEFAULT_LIMIT)
    }
}

/// 读取开头的整数部分，忽略后面的其他字符；超出范围时饱和到 i64 边界
fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let mut seen_digit = false;
    let mut number: i64 = 0;
    for digit in digits.bytes().map_while(|b| (b as char).to_digit(10)) {
        seen_digit = true;
        let digit = i64::from(digit);
        number = if negative {
            number.saturating_mul(10).saturating_sub(digit)
        } else {
            number.saturating_mul(10).saturating_add(digit)
        };
    }

    seen_digit.then_some(number)
}
