//! 匿名 bean 标识生成

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// 生成标识的前缀
pub const ANONYMOUS_BEAN_PREFIX: &str = "anonymous-bean#";

/// 匿名 bean 标识生成器
///
/// 单调递增计数器，同一生成器产生的标识互不相同，并发调用同样成立。
/// 同一条定义源链上的多个驱动需要共享一个生成器（`Arc`），否则各自
/// 从 1 开始计数，生成的标识会互相遮蔽。
#[derive(Debug, Default)]
pub struct AnonymousBeanNames {
    counter: AtomicU64,
}

impl AnonymousBeanNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成下一个标识
    pub fn next_name(&self) -> String {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}{}", ANONYMOUS_BEAN_PREFIX, sequence)
    }

    /// 生成下一个不在 `taken` 中的标识
    ///
    /// 文档可能显式声明了与生成格式相同的 id，这些序号直接跳过。
    pub fn next_name_excluding(&self, taken: &HashSet<String>) -> String {
        loop {
            let name = self.next_name();
            if !taken.contains(&name) {
                return name;
            }
        }
    }

    /// 已生成的标识数量
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// 是否为生成的匿名标识
    pub fn is_anonymous(name: &str) -> bool {
        name.starts_with(ANONYMOUS_BEAN_PREFIX)
    }
}
