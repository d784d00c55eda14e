use serde::Serialize;

use crate::extract::PackageRow;

/// GET / 和 GET /now 的响应，未登录时只返回空的 items
#[derive(Debug, Serialize)]
pub struct PackageList {
    pub items: Vec<PackageRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_in: Option<bool>,
}

impl PackageList {
    /// 未登录时的初始状态，不带 logged_in 字段
    pub fn initial_state() -> Self {
        PackageList {
            items: Vec::new(),
            logged_in: None,
        }
    }
}
