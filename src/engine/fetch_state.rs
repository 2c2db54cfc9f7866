// ==========================================
// 米厂报表客户端 - 获取状态机
// ==========================================
// 状态: Idle -> Loading -> Ready | Failed
// 重试: 仅允许 Failed -> Loading
// ==========================================

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("无效的状态转换: from={from} to={to}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn name(&self) -> &'static str {
        match self {
            FetchState::Idle => "Idle",
            FetchState::Loading => "Loading",
            FetchState::Ready(_) => "Ready",
            FetchState::Failed(_) => "Failed",
        }
    }

    /// 发起首次获取: Idle -> Loading
    ///
    /// Ready 状态下重新获取（例如过滤条件变化）同样允许
    pub fn begin(&mut self) -> Result<(), InvalidTransition> {
        match self {
            FetchState::Idle | FetchState::Ready(_) => {
                *self = FetchState::Loading;
                Ok(())
            }
            _ => Err(InvalidTransition {
                from: self.name(),
                to: "Loading",
            }),
        }
    }

    /// 获取结束: Loading -> Ready | Failed
    pub fn resolve<E: fmt::Display>(&mut self, result: Result<T, E>) -> Result<(), InvalidTransition> {
        if !self.is_loading() {
            return Err(InvalidTransition {
                from: self.name(),
                to: if result.is_ok() { "Ready" } else { "Failed" },
            });
        }
        *self = match result {
            Ok(v) => FetchState::Ready(v),
            Err(e) => FetchState::Failed(e.to_string()),
        };
        Ok(())
    }

    /// 手动重试: Failed -> Loading
    pub fn retry(&mut self) -> Result<(), InvalidTransition> {
        match self {
            FetchState::Failed(_) => {
                *self = FetchState::Loading;
                Ok(())
            }
            _ => Err(InvalidTransition {
                from: self.name(),
                to: "Loading",
            }),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut s: FetchState<u32> = FetchState::default();
        s.begin().unwrap();
        assert!(s.is_loading());
        s.resolve::<String>(Ok(7)).unwrap();
        assert_eq!(s.data(), Some(&7));
    }

    #[test]
    fn test_retry_only_from_failed() {
        let mut s: FetchState<u32> = FetchState::Idle;
        assert!(s.retry().is_err());

        s.begin().unwrap();
        s.resolve::<&str>(Err("timeout")).unwrap();
        assert_eq!(s.error(), Some("timeout"));

        s.retry().unwrap();
        assert!(s.is_loading());
        assert!(s.retry().is_err());
    }

    #[test]
    fn test_resolve_requires_loading() {
        let mut s: FetchState<u32> = FetchState::Idle;
        let err = s.resolve::<String>(Ok(1)).unwrap_err();
        assert_eq!(err.from, "Idle");
    }

    #[test]
    fn test_begin_from_failed_rejected() {
        let mut s: FetchState<u32> = FetchState::Failed("x".to_string());
        assert!(s.begin().is_err());
    }
}
