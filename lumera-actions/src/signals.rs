//! Caller signals
//!
//! The actions never render anything themselves; they tell the embedding
//! web layer what to do next through these two seams. The web layer wires
//! in its own implementations (framework cache invalidation, HTTP
//! redirects); tests wire in recorders.

/// Mark cached renders of a path stale so the next request recomputes it.
pub trait ViewCache: Send + Sync {
    fn invalidate(&self, path: &str);
}

/// Instruct the caller to navigate to a route after an operation.
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &str);
}
