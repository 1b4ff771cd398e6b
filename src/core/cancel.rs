// 协作式取消令牌
// 开发心理：取消不是错误，调用方随时可以收走令牌，求解器交出目前最好的部分结果
// 克隆即共享，跨线程安全，检查点放在代际边界和耗时的剪枝阶段内部

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_clear() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_is_shared_across_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_visible_across_threads() {
        let token = CancellationToken::new();
        let clone = token.clone();
        let handle = std::thread::spawn(move || clone.cancel());
        handle.join().unwrap();
        assert!(token.is_cancelled());
    }
}
