/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated modules,
/// enforcing a Defense-in-Depth strategy. This structure ensures that
/// access control is applied explicitly at the module level (via Axum layers),
/// preventing accidental exposure of protected endpoints.

/// Routes accessible to all clients (anonymous, read-only), plus the login
/// gateway and liveness probes.
pub mod public;

/// Routes restricted to the authenticated admin. Protected by the bearer-token
/// middleware; the role check runs inside every handler.
pub mod admin;
