//! Fallback strategy implementations
//!
//! Each function reorders an already-filtered list of available providers in
//! place.

use super::provider_state::ProviderState;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering::Relaxed};

/// Ascending priority; ties keep configuration order
pub fn priority_order(providers: &mut [Arc<ProviderState>]) {
    // sort_by_key is stable
    providers.sort_by_key(|p| p.priority());
}

/// Priority order rotated by the registry-wide counter
///
/// The counter advances on every call, so successive calls start from a
/// different head while relative order is preserved.
pub fn round_robin_order(providers: &mut [Arc<ProviderState>], counter: &AtomicUsize) {
    let offset = counter.fetch_add(1, Relaxed);
    priority_order(providers);
    if !providers.is_empty() {
        let len = providers.len();
        providers.rotate_left(offset % len);
    }
}

/// Uniform shuffle from the registry's random source
pub fn random_order(providers: &mut [Arc<ProviderState>], rng: &Mutex<StdRng>) {
    providers.shuffle(&mut *rng.lock());
}
