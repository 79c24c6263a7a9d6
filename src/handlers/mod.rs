// Handlers by security tier:
// public (no auth, unlimited) -> agents (client-throttled) -> admin (bearer
// token + auth-profile throttle)
pub mod admin;
pub mod agents;
pub mod public;
