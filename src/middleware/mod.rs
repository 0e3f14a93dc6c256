/// Middleware module
///
/// Request gating and request logging.

mod request_logger;
mod route_gate;

pub use request_logger::RequestLogger;
pub use route_gate::RouteGate;
