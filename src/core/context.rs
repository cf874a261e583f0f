//! Correlation context propagation
//!
//! A per-logical-task key/value store resolved dynamically at call sites,
//! carried through `.await` suspension by a task-local slot. Each scope entry
//! gets a fresh, isolated store; nested scopes shadow the parent store and
//! restore it on exit, so mutations never leak between scopes or between
//! concurrent tasks sharing a thread pool.
//!
//! All accessors are safe to call outside any scope: reads report "absent"
//! and writes are no-ops. Logging must never panic because no scope is
//! active.

use std::cell::RefCell;
use std::future::Future;

use serde::Deserialize;

use super::log_value::{FieldMap, LogValue};

tokio::task_local! {
    static SCOPE: RefCell<FieldMap>;
}

/// Correlation-id lookup settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Context key holding the correlation id
    pub id_key: String,
    /// Generate and store an id when the key is absent
    pub auto_generate: bool,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            id_key: "correlationId".to_string(),
            auto_generate: true,
        }
    }
}

/// Run a closure inside a fresh, empty context scope
pub fn run_scoped<R>(f: impl FnOnce() -> R) -> R {
    run_scoped_with(FieldMap::new(), f)
}

/// Run a closure inside a fresh scope pre-populated from `initial`
pub fn run_scoped_with<R>(initial: FieldMap, f: impl FnOnce() -> R) -> R {
    SCOPE.sync_scope(RefCell::new(initial), f)
}

/// Run a future inside a fresh, empty context scope.
///
/// The store stays attached to the future across suspension points.
pub async fn run_scoped_async<F>(fut: F) -> F::Output
where
    F: Future,
{
    run_scoped_async_with(FieldMap::new(), fut).await
}

/// Run a future inside a fresh scope pre-populated from `initial`
pub async fn run_scoped_async_with<F>(initial: FieldMap, fut: F) -> F::Output
where
    F: Future,
{
    SCOPE.scope(RefCell::new(initial), fut).await
}

/// True when called inside an active scope
#[must_use]
pub fn is_active() -> bool {
    SCOPE.try_with(|_| ()).is_ok()
}

/// Read a value from the current scope; `None` outside any scope
#[must_use]
pub fn get(key: &str) -> Option<LogValue> {
    SCOPE
        .try_with(|store| store.borrow().get(key).cloned())
        .ok()
        .flatten()
}

/// Write a value into the current scope; no-op outside any scope
pub fn set(key: impl Into<String>, value: impl Into<LogValue>) {
    let _ = SCOPE.try_with(|store| {
        store.borrow_mut().insert(key.into(), value.into());
    });
}

/// Snapshot of the current scope's entries; empty outside any scope
#[must_use]
pub fn get_all() -> FieldMap {
    SCOPE
        .try_with(|store| store.borrow().clone())
        .unwrap_or_default()
}

/// Remove every entry from the current scope; no-op outside any scope
pub fn clear() {
    let _ = SCOPE.try_with(|store| {
        store.borrow_mut().clear();
    });
}

/// Resolve the correlation id for the current scope.
///
/// Reads the configured key; when absent and auto-generation is enabled,
/// generates a uuid, stores it, and returns it, so every later call in the
/// same scope sees the same id. Outside any scope the store cannot hold the
/// generated id, so this returns `None`.
#[must_use]
pub fn correlation_id(config: &CorrelationConfig) -> Option<String> {
    SCOPE
        .try_with(|store| {
            if let Some(LogValue::String(existing)) = store.borrow().get(&config.id_key) {
                return Some(existing.clone());
            }
            if !config.auto_generate {
                return None;
            }
            let id = uuid::Uuid::new_v4().to_string();
            store
                .borrow_mut()
                .insert(config.id_key.clone(), LogValue::String(id.clone()));
            Some(id)
        })
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_scope_is_noop() {
        assert!(!is_active());
        assert!(get("anything").is_none());
        set("anything", "value");
        assert!(get("anything").is_none());
        assert!(get_all().is_empty());
        clear();
    }

    #[test]
    fn test_scoped_get_set() {
        run_scoped(|| {
            assert!(is_active());
            set("userId", 7);
            assert_eq!(get("userId"), Some(LogValue::Int(7)));
            assert_eq!(get_all().len(), 1);
        });
        assert!(get("userId").is_none());
    }

    #[test]
    fn test_initial_data() {
        let mut seed = FieldMap::new();
        seed.insert("tenant".to_string(), LogValue::from("acme"));
        run_scoped_with(seed, || {
            assert_eq!(get("tenant"), Some(LogValue::from("acme")));
        });
    }

    #[test]
    fn test_clear() {
        run_scoped(|| {
            set("a", 1);
            set("b", 2);
            clear();
            assert!(get_all().is_empty());
        });
    }

    #[test]
    fn test_nested_scope_isolation() {
        run_scoped(|| {
            set("k", "outer");
            run_scoped(|| {
                // Child scope starts empty, never inherits
                assert!(get("k").is_none());
                set("k", "inner");
                assert_eq!(get("k"), Some(LogValue::from("inner")));
            });
            // Inner mutations never leak back
            assert_eq!(get("k"), Some(LogValue::from("outer")));
        });
    }

    #[test]
    fn test_correlation_id_idempotent() {
        let config = CorrelationConfig::default();
        run_scoped(|| {
            let first = correlation_id(&config).unwrap();
            let second = correlation_id(&config).unwrap();
            assert_eq!(first, second);
            assert_eq!(get("correlationId"), Some(LogValue::String(first)));
        });
    }

    #[test]
    fn test_correlation_id_respects_existing() {
        let config = CorrelationConfig::default();
        run_scoped(|| {
            set("correlationId", "req-1");
            assert_eq!(correlation_id(&config).as_deref(), Some("req-1"));
        });
    }

    #[test]
    fn test_correlation_id_disabled_generation() {
        let config = CorrelationConfig {
            auto_generate: false,
            ..CorrelationConfig::default()
        };
        run_scoped(|| {
            assert!(correlation_id(&config).is_none());
        });
    }

    #[test]
    fn test_correlation_id_outside_scope() {
        assert!(correlation_id(&CorrelationConfig::default()).is_none());
    }

    #[tokio::test]
    async fn test_async_scope_survives_await() {
        run_scoped_async(async {
            set("requestId", "r-42");
            tokio::task::yield_now().await;
            assert_eq!(get("requestId"), Some(LogValue::from("r-42")));
        })
        .await;
    }

    #[tokio::test]
    async fn test_concurrent_tasks_are_isolated() {
        let a = tokio::spawn(run_scoped_async(async {
            set("task", "a");
            tokio::task::yield_now().await;
            get("task")
        }));
        let b = tokio::spawn(run_scoped_async(async {
            set("task", "b");
            tokio::task::yield_now().await;
            get("task")
        }));
        assert_eq!(a.await.unwrap(), Some(LogValue::from("a")));
        assert_eq!(b.await.unwrap(), Some(LogValue::from("b")));
    }
}
