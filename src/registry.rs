use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::RegistryError;
use crate::pin::{PinAlias, PinHandle};

struct AliasEntry {
    dest: String,
    resolved: Option<PinHandle>,
}

impl AliasEntry {
    fn describe(&self, name: &str) -> String {
        match &self.resolved {
            Some(real) => format!("{name}({})", real.name()),
            None => format!("{name}({})", self.dest),
        }
    }
}

#[derive(Default)]
struct Tables {
    // Index 0 holds preferred pins, index 1 pins going through an
    // OS-provided abstraction layer.
    by_number: [FxHashMap<i32, PinHandle>; 2],
    by_name: [FxHashMap<String, PinHandle>; 2],
    by_alias: FxHashMap<String, AliasEntry>,
}

/// Registry of the known GPIO pins on the host.
///
/// Drivers register pins during init, application code resolves them by
/// name, alias or number. A single instance is constructed at process
/// start and shared with every driver and query site.
#[derive(Default)]
pub struct Registry {
    tables: Mutex<Tables>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a GPIO pin.
    ///
    /// `preferred` should be true when the handle exposes as much
    /// functionality as possible via the underlying hardware, normally by
    /// accessing CPU memory-mapped registers directly, and false when the
    /// functionality is provided by the OS and is limited or slower.
    ///
    /// Registering the same pin number or name twice within a tier is an
    /// error, as is a handle that already wraps a real pin; use
    /// [`Registry::register_alias`] for those.
    pub fn register(&self, pin: PinHandle, preferred: bool) -> Result<(), RegistryError> {
        let name = pin.name().to_string();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if name.parse::<i32>().is_ok() {
            return Err(RegistryError::NumericName { name });
        }
        let number = pin.number();
        if number < 0 {
            return Err(RegistryError::InvalidNumber { name, number });
        }
        let (tier, other) = if preferred { (0, 1) } else { (1, 0) };

        let mut tables = self.tables.lock();
        if let Some(orig) = tables.by_number[tier].get(&number) {
            return Err(RegistryError::DuplicateNumber {
                name,
                number,
                existing: orig.to_string(),
            });
        }
        if let Some(orig) = tables.by_name[tier].get(&name) {
            return Err(RegistryError::DuplicateName {
                name,
                existing: orig.to_string(),
            });
        }
        if let Some(real) = pin.real_pin() {
            return Err(RegistryError::PinIsAlias {
                name,
                real: real.to_string(),
            });
        }
        if let Some(alias) = tables.by_alias.get(&name) {
            let existing = alias.describe(&name);
            return Err(RegistryError::NameTakenByAlias { name, existing });
        }
        if let Some(orig) = tables.by_name[other].get(&name) {
            if orig.number() != number {
                return Err(RegistryError::TierNumberMismatch {
                    name,
                    existing: orig.to_string(),
                });
            }
        }
        tables.by_number[tier].insert(number, pin.clone());
        tables.by_name[tier].insert(name.clone(), pin);
        debug!("registered pin {name} as number {number} (tier {tier})");
        Ok(())
    }

    /// Registers an alias for a pin.
    ///
    /// The destination may be a pin name, another alias or a stringified
    /// number, and does not need to be registered yet; resolution is
    /// deferred to lookup. Registering the same alias to the same
    /// destination twice is accepted.
    pub fn register_alias(&self, alias: &str, dest: &str) -> Result<(), RegistryError> {
        if alias.is_empty() {
            return Err(RegistryError::EmptyAlias);
        }
        if dest.is_empty() {
            return Err(RegistryError::EmptyDest {
                alias: alias.to_string(),
            });
        }
        if alias.parse::<i32>().is_ok() {
            return Err(RegistryError::NumericAlias {
                alias: alias.to_string(),
            });
        }

        let mut tables = self.tables.lock();
        if let Some(orig) = tables.by_alias.get(alias) {
            if orig.dest == dest {
                return Ok(());
            }
            return Err(RegistryError::AliasRedefined {
                alias: alias.to_string(),
                existing: orig.describe(alias),
            });
        }
        tables.by_alias.insert(
            alias.to_string(),
            AliasEntry {
                dest: dest.to_string(),
                resolved: None,
            },
        );
        debug!("registered alias {alias} for {dest}");
        Ok(())
    }

    /// Returns a pin from its name, number or one of its aliases, or
    /// `None` if no registered pin matches.
    ///
    /// A registered name wins over an alias of the same spelling, which
    /// wins over numeric interpretation.
    pub fn by_name(&self, name: &str) -> Option<PinHandle> {
        let mut tables = self.tables.lock();
        let mut seen = FxHashSet::default();
        lookup(&mut tables, name, &mut seen)
    }

    /// Returns all registered pins, in order of number, each physical pin
    /// once even when both tiers know it. Aliases are excluded.
    pub fn all(&self) -> Vec<PinHandle> {
        let tables = self.tables.lock();
        let mut out = Vec::with_capacity(tables.by_number[0].len() + tables.by_number[1].len());
        let mut seen = FxHashSet::default();
        // Preferred pins have priority, include all of them.
        for pin in tables.by_number[0].values() {
            seen.insert(pin.number());
            insert_by_number(&mut out, pin.clone());
        }
        for pin in tables.by_number[1].values() {
            if !seen.contains(&pin.number()) {
                insert_by_number(&mut out, pin.clone());
            }
        }
        out
    }

    /// Returns all aliases that currently resolve to a registered pin, in
    /// order of alias name. The result grows as more drivers register.
    pub fn aliases(&self) -> Vec<PinHandle> {
        let mut tables = self.tables.lock();
        let mut out: Vec<PinHandle> = Vec::with_capacity(tables.by_alias.len());
        let names: Vec<String> = tables.by_alias.keys().cloned().collect();
        for name in names {
            // Skip aliases that do not resolve yet.
            let mut seen = FxHashSet::default();
            if let Some(resolved) = lookup(&mut tables, &name, &mut seen) {
                insert_by_name(&mut out, resolved);
            }
        }
        out
    }
}

// Resolves aliases recursively, memoizing successful resolutions in
// place. `seen` holds the alias names already walked so a cyclic chain
// terminates instead of recursing forever.
fn lookup(tables: &mut Tables, name: &str, seen: &mut FxHashSet<String>) -> Option<PinHandle> {
    if let Some(pin) = tables.by_name[0].get(name) {
        return Some(pin.clone());
    }
    if let Some(pin) = tables.by_name[1].get(name) {
        return Some(pin.clone());
    }
    if tables.by_alias.contains_key(name) {
        if !seen.insert(name.to_string()) {
            return None;
        }
        let (dest, memoized) = {
            let entry = &tables.by_alias[name];
            (entry.dest.clone(), entry.resolved.clone())
        };
        let real = match memoized {
            Some(real) => real,
            None => {
                let real = lookup(tables, &dest, seen)?;
                if let Some(entry) = tables.by_alias.get_mut(name) {
                    entry.resolved = Some(real.clone());
                }
                real
            }
        };
        return Some(Arc::new(PinAlias::new(name, real)));
    }
    if let Ok(number) = name.parse::<i32>() {
        return lookup_number(tables, number);
    }
    None
}

fn lookup_number(tables: &Tables, number: i32) -> Option<PinHandle> {
    if let Some(pin) = tables.by_number[0].get(&number) {
        return Some(pin.clone());
    }
    tables.by_number[1].get(&number).cloned()
}

// The two sources merged by all() are iterated in map order, so output
// ordering comes from binary-search insertion rather than a final sort.
fn insert_by_number(out: &mut Vec<PinHandle>, pin: PinHandle) {
    let number = pin.number();
    let at = out.partition_point(|p| p.number() <= number);
    out.insert(at, pin);
}

fn insert_by_name(out: &mut Vec<PinHandle>, pin: PinHandle) {
    let at = out.partition_point(|p| p.name() <= pin.name());
    out.insert(at, pin);
}
