//! 会话上下文
//!
//! 封装"本次会话签发到第几张证书、当前是否有智能体调用在进行"这两项状态，
//! 由控制台持有，显式传给各个工作流

use std::fmt::Display;

use chrono::Datelike;

/// 会话上下文
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// 已分配的证书序号，只增不减
    counter: u32,
    /// 正在调用的智能体 ID
    active_agent: Option<String>,
}

impl SessionContext {
    /// 创建新的会话上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 分配下一个证书 ID：`CERT-<年份>-<三位序号>`
    pub fn next_certificate_id(&mut self) -> String {
        self.next_certificate_id_for_year(chrono::Local::now().year())
    }

    pub fn next_certificate_id_for_year(&mut self, year: i32) -> String {
        self.counter += 1;
        format!("CERT-{}-{:03}", year, self.counter)
    }

    pub fn issued_count(&self) -> u32 {
        self.counter
    }

    /// 把计数器推进到至少 `value`，不会回退
    pub fn advance_counter_to(&mut self, value: u32) {
        self.counter = self.counter.max(value);
    }

    pub fn mark_agent_active(&mut self, agent_id: &str) {
        self.active_agent = Some(agent_id.to_string());
    }

    pub fn clear_agent_active(&mut self) {
        self.active_agent = None;
    }

    pub fn active_agent(&self) -> Option<&str> {
        self.active_agent.as_deref()
    }
}

impl Display for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[已分配证书 #{} 智能体 {}]",
            self.counter,
            self.active_agent.as_deref().unwrap_or("空闲")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_and_padded() {
        let mut session = SessionContext::new();
        assert_eq!(session.next_certificate_id_for_year(2026), "CERT-2026-001");
        assert_eq!(session.next_certificate_id_for_year(2026), "CERT-2026-002");
        assert_eq!(session.next_certificate_id_for_year(2027), "CERT-2027-003");
        assert_eq!(session.issued_count(), 3);
    }

    #[test]
    fn test_counter_past_three_digits() {
        let mut session = SessionContext::new();
        session.advance_counter_to(999);
        assert_eq!(session.next_certificate_id_for_year(2026), "CERT-2026-1000");
    }

    #[test]
    fn test_advance_never_rewinds() {
        let mut session = SessionContext::new();
        session.advance_counter_to(5);
        session.advance_counter_to(2);
        assert_eq!(session.issued_count(), 5);
    }

    #[test]
    fn test_active_agent_marker() {
        let mut session = SessionContext::new();
        assert_eq!(session.active_agent(), None);
        session.mark_agent_active("agent-1");
        assert_eq!(session.active_agent(), Some("agent-1"));
        session.clear_agent_active();
        assert_eq!(session.active_agent(), None);
    }
}
