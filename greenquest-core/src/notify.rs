#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub text: String,
    pub ttl_ms: u32,
}

/// Transient notifications, oldest first. Hosts remove them with [`Self::expire`]
/// once `ttl_ms` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 1,
        }
    }
}

impl NotificationQueue {
    pub fn push(&mut self, text: impl Into<String>, ttl_ms: u32) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            text: text.into(),
            ttl_ms,
        });
        id
    }

    /// Drop a toast. Unknown ids are ignored.
    pub fn expire(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    #[must_use]
    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_expire() {
        let mut queue = NotificationQueue::default();
        let a = queue.push("first", 3000);
        let b = queue.push("second", 3000);
        assert_eq!(queue.visible().len(), 2);
        assert!(queue.expire(a));
        assert!(!queue.expire(a));
        assert_eq!(queue.latest().map(|t| t.id), Some(b));
        assert_eq!(queue.visible()[0].text, "second");
    }
}
