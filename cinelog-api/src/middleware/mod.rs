/// Middleware modules for the API server
///
/// - `intercept`: session identity derivation and the interceptor chain (access log)
/// - `security`: security response headers

pub mod intercept;
pub mod security;
