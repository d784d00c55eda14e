// 缓存模块
// 整个进程只有一个槽位，存最近一次抓到的首页原文

use std::time::Duration;

use chrono::Utc;

/// 首页缓存槽，由 AppState 里的互斥锁保护
#[derive(Debug, Default)]
pub struct PageCache {
    pub home: String,
    pub last_update: i64,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 距上次更新是否已超过缓存窗口
    pub fn is_expired(&self, window: Duration) -> bool {
        let elapsed = (Utc::now().timestamp() - self.last_update).unsigned_abs();
        elapsed > window.as_secs()
    }

    pub fn touch(&mut self) {
        self.last_update = Utc::now().timestamp();
    }

    /// 存入新页面并刷新时间戳
    pub fn store(&mut self, page: String) {
        self.home = page;
        self.touch();
    }

    /// 只清掉页面文本，时间戳保持不变
    pub fn clear_page(&mut self) {
        self.home.clear();
    }

    pub fn page(&self) -> Option<&str> {
        if self.home.is_empty() {
            None
        } else {
            Some(&self.home)
        }
    }
}
