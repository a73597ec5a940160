use std::{mem, time::Duration};

pub const NET_CONNECT_TIMEOUT: Duration = Duration::from_millis(8 * 1000);

pub fn default_ureq_agent_builder(
    proxy_url: Option<&str>,
    timeout: Duration,
) -> ureq::config::ConfigBuilder<ureq::typestate::AgentScope> {
    let mut agent = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .timeout_connect(Some(NET_CONNECT_TIMEOUT.min(timeout)));

    if let Some(proxy_url) = proxy_url {
        let proxy = ureq::Proxy::new(proxy_url).ok();
        agent = agent.proxy(proxy);
    }

    agent
}

/// Monotonic request counter.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Sequence(u64);

impl Sequence {
    pub fn advance(&mut self) -> u64 {
        let next = self.0.wrapping_add(1);
        mem::replace(&mut self.0, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_hands_out_increasing_values() {
        let mut seq = Sequence::default();
        assert_eq!(seq.advance(), 0);
        assert_eq!(seq.advance(), 1);
        assert_eq!(seq.advance(), 2);
    }
}
