//! Security audit signals.
//!
//! Events are written at `warn` level under the `security` log target so a
//! collector can route them separately from access logs.

use std::fmt;

pub const AUDIT_TARGET: &str = "security";

#[derive(Debug, Clone, PartialEq)]
pub enum SecurityEvent {
    Registration { email: String, remote_addr: String },
    Login { account_id: i64, email: String, remote_addr: String },
    FailedLogin { email: String, remote_addr: String },
    Logout { account_id: i64, email: String, remote_addr: String },
    UnauthorizedAccess { account_id: i64, resource: String, remote_addr: String },
}

impl fmt::Display for SecurityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityEvent::Registration { email, remote_addr } => {
                write!(f, "SECURITY - User registration [{}, {}]", email, remote_addr)
            }
            SecurityEvent::Login { account_id, email, remote_addr } => {
                write!(f, "SECURITY - Log in [{}, {}, {}]", account_id, email, remote_addr)
            }
            SecurityEvent::FailedLogin { email, remote_addr } => {
                write!(f, "SECURITY - Failed log in [{}, {}]", email, remote_addr)
            }
            SecurityEvent::Logout { account_id, email, remote_addr } => {
                write!(f, "SECURITY - Log out [{}, {}, {}]", account_id, email, remote_addr)
            }
            SecurityEvent::UnauthorizedAccess { account_id, resource, remote_addr } => write!(
                f,
                "SECURITY - Unauthorised access attempt [{}, {}, {}]",
                account_id, resource, remote_addr
            ),
        }
    }
}

pub fn record(event: &SecurityEvent) {
    log::warn!(target: AUDIT_TARGET, "{}", event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_carry_security_prefix() {
        let events = [
            SecurityEvent::Registration { email: "a@b.com".into(), remote_addr: "10.0.0.1".into() },
            SecurityEvent::Login { account_id: 4, email: "a@b.com".into(), remote_addr: "10.0.0.1".into() },
            SecurityEvent::FailedLogin { email: "a@b.com".into(), remote_addr: "10.0.0.1".into() },
            SecurityEvent::Logout { account_id: 4, email: "a@b.com".into(), remote_addr: "10.0.0.1".into() },
            SecurityEvent::UnauthorizedAccess {
                account_id: 4,
                resource: "/v1/admin/examples".into(),
                remote_addr: "10.0.0.1".into(),
            },
        ];
        for event in &events {
            assert!(event.to_string().starts_with("SECURITY - "));
            record(event);
        }
    }

    #[test]
    fn login_lists_identity_then_address() {
        let event = SecurityEvent::Login {
            account_id: 12,
            email: "jo@example.com".into(),
            remote_addr: "127.0.0.1".into(),
        };
        assert_eq!(event.to_string(), "SECURITY - Log in [12, jo@example.com, 127.0.0.1]");
    }

    #[test]
    fn logout_lists_identity_then_address() {
        let event = SecurityEvent::Logout {
            account_id: 12,
            email: "jo@example.com".into(),
            remote_addr: "127.0.0.1".into(),
        };
        assert_eq!(event.to_string(), "SECURITY - Log out [12, jo@example.com, 127.0.0.1]");
    }
}
