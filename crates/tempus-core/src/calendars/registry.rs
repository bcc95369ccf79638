//! Calendar lookup and caching by market code.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

use super::Calendar;
use crate::error::{CoreError, CoreResult};

/// Caching registry resolving market codes to calendars.
///
/// Built-in codes (`NYB`, `LNB`, `TGT`, `TKB`, `SYB`, `DBB`, `None`) are
/// constructed on first use and cached; composite codes like `"NYB+LNB"`
/// resolve each constituent and cache the union. Custom calendars can be
/// registered and then resolved by code like any built-in.
#[derive(Default)]
pub struct CalendarRegistry {
    cache: RwLock<HashMap<String, Calendar>>,
}

impl CalendarRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a calendar under its own code, replacing any cached entry.
    pub fn register(&self, calendar: Calendar) {
        let mut cache = self.cache.write().expect("registry lock poisoned");
        cache.insert(calendar.code().to_string(), calendar);
    }

    /// Resolves a market code.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnknownCalendar`] when the code (or any constituent of
    /// a composite code) is neither registered nor built-in.
    pub fn get(&self, code: &str) -> CoreResult<Calendar> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CoreError::unknown_calendar(code));
        }
        if let Some(found) = self.lookup(code) {
            return Ok(found);
        }
        let built = if code.contains('+') {
            self.build_composite(code)?
        } else {
            Calendar::builtin(code).ok_or_else(|| CoreError::unknown_calendar(code))?
        };
        log::debug!("calendar cache populated for {code}");
        let mut cache = self.cache.write().expect("registry lock poisoned");
        Ok(cache.entry(code.to_string()).or_insert(built).clone())
    }

    fn lookup(&self, code: &str) -> Option<Calendar> {
        let cache = self.cache.read().expect("registry lock poisoned");
        cache.get(code).cloned()
    }

    fn build_composite(&self, code: &str) -> CoreResult<Calendar> {
        let mut parts = code.split('+');
        let first = parts.next().ok_or_else(|| CoreError::unknown_calendar(code))?;
        let mut combined = self.get(first)?;
        for part in parts {
            combined = combined.union(&self.get(part)?);
        }
        Ok(combined)
    }
}

static DEFAULT_REGISTRY: Lazy<CalendarRegistry> = Lazy::new(CalendarRegistry::new);

/// The process-wide shared registry.
#[must_use]
pub fn default_registry() -> &'static CalendarRegistry {
    &DEFAULT_REGISTRY
}
