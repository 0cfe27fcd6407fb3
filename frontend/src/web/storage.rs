//! 浏览器存储封装模块
//!
//! 把 `localStorage` / `sessionStorage` 适配为引擎的 [`Storage`] trait。
//! 值按原始字符串存取（token 不是 JSON）。

use gloo_storage::{LocalStorage, SessionStorage, Storage as _};
use stagetrack::Storage;

/// 存储作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStorage {
    /// 浏览器重启后仍保留
    Local,
    /// 标签页关闭即清除
    Session,
}

impl BrowserStorage {
    fn raw(&self) -> web_sys::Storage {
        match self {
            BrowserStorage::Local => LocalStorage::raw(),
            BrowserStorage::Session => SessionStorage::raw(),
        }
    }
}

impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.raw().get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.raw().set_item(key, value).is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        self.raw().remove_item(key).is_ok()
    }

    fn clear(&self) {
        let _ = self.raw().clear();
    }
}
