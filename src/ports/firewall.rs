use crate::domain::AppError;

/// Current firewall posture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirewallState {
    pub active: bool,
    /// TCP ports with an ALLOW rule.
    pub allowed_tcp: Vec<u16>,
}

/// Host firewall operations.
pub trait Firewall {
    fn state(&self) -> Result<FirewallState, AppError>;

    fn allow_tcp(&self, port: u16) -> Result<(), AppError>;

    /// Enable the firewall without an interactive prompt.
    fn enable(&self) -> Result<(), AppError>;
}
