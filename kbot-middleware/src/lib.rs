//! # kbot-middleware
//!
//! Pipeline middleware: session load/flush, language resolution, resolver
//! attachment, and the non-production timing probe. Each is a plain struct
//! holding the service it wraps; all are registered explicitly by the
//! pipeline builder.

mod locale_middleware;
mod resolver_middleware;
mod session_middleware;
mod timing_middleware;

pub use locale_middleware::LocaleMiddleware;
pub use resolver_middleware::ResolverMiddleware;
pub use session_middleware::SessionMiddleware;
pub use timing_middleware::TimingMiddleware;

#[cfg(test)]
mod test;
