// src/readers/entrymonitor.rs

//! Observers of an [`EntryAssembler`].
//!
//! An [`EntryMonitor`] is notified just before each log message is parsed
//! and for each log message that passes the datetime filters.
//! Monitors have no return values; they cannot alter processing.
//!
//! [`CompositeEntryMonitor`] forwards every notification to its child
//! monitors, in insertion order.
//!
//! [`EntryAssembler`]: crate::readers::entryassembler::EntryAssembler
//! [`EntryMonitor`]: self::EntryMonitor
//! [`CompositeEntryMonitor`]: self::CompositeEntryMonitor

/// Notified of [`EntryAssembler`] events. Every method defaults to doing
/// nothing.
///
/// [`EntryAssembler`]: crate::readers::entryassembler::EntryAssembler
pub trait EntryMonitor<E> {
    /// Called with the raw text of a log message just before it is parsed.
    fn on_before_entry_parsed(&mut self, _raw: &str) {}

    /// Called for a log message that parsed and passed the datetime filters,
    /// just before it is passed to the [`EntrySink`].
    ///
    /// [`EntrySink`]: crate::readers::entrysink::EntrySink
    fn on_entry_parsed(&mut self, _entry: &E) {}
}

/// A monitor that forwards every event to all of its child monitors.
pub struct CompositeEntryMonitor<'a, E> {
    monitors: Vec<Box<dyn EntryMonitor<E> + 'a>>,
}

impl<'a, E> Default for CompositeEntryMonitor<'a, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E> CompositeEntryMonitor<'a, E> {
    /// Creates a new empty `CompositeEntryMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Adds a new monitor; it is notified after all previously added monitors.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: EntryMonitor<E> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn EntryMonitor<E> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Removes all monitors.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.monitors.clear();
    }
}

impl<'a, E> EntryMonitor<E> for CompositeEntryMonitor<'a, E> {
    fn on_before_entry_parsed(&mut self, raw: &str) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_before_entry_parsed(raw);
        }
    }

    fn on_entry_parsed(&mut self, entry: &E) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_entry_parsed(entry);
        }
    }
}

/// Forward to the referenced monitor; lets a caller keep ownership of a
/// monitor and inspect it after processing.
impl<E, M> EntryMonitor<E> for &mut M
where
    M: EntryMonitor<E> + ?Sized,
{
    #[inline(always)]
    fn on_before_entry_parsed(&mut self, raw: &str) {
        (**self).on_before_entry_parsed(raw)
    }

    #[inline(always)]
    fn on_entry_parsed(&mut self, entry: &E) {
        (**self).on_entry_parsed(entry)
    }
}
