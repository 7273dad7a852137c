//! The uninitialized-instance map.
//!
//! An ordered list of `{ site address, resolved class }` entries. Site `0`
//! (`UNINIT_THIS_SLOT`) is reserved for a constructor's implicit `this` and
//! is always present; every `new-instance` instruction gets one additional
//! entry, assigned the first time that address is verified.

use alloc::vec;
use alloc::vec::Vec;

use crate::reg_type::{SiteIdx, UNINIT_THIS_SLOT};

/// The code-unit address that owns the implicit-`this` entry. Not a real
/// instruction address (`kUninitThisArgAddr` in the original verifier).
pub const UNINIT_THIS_ADDR: i32 = -1;

#[derive(Debug, Clone)]
struct Entry<C> {
    addr: i32,
    class: Option<C>,
}

/// Maps `new-instance` sites to the class being constructed.
///
/// `C` is the caller's class-handle type, matching [`crate::reg_type::RegType`].
#[derive(Debug, Clone)]
pub struct UninitMap<C> {
    entries: Vec<Entry<C>>,
}

impl<C: Copy> Default for UninitMap<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Copy> UninitMap<C> {
    /// A fresh map containing only the implicit-`this` slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![Entry {
                addr: UNINIT_THIS_ADDR,
                class: None,
            }],
        }
    }

    /// Register (or look up) the `new-instance` site at `addr`, returning
    /// its stable site index. Calling this twice for the same `addr`
    /// returns the same index.
    pub fn site_for_addr(&mut self, addr: i32) -> SiteIdx {
        if let Some(pos) = self.entries.iter().position(|e| e.addr == addr) {
            return pos as SiteIdx;
        }
        self.entries.push(Entry { addr, class: None });
        (self.entries.len() - 1) as SiteIdx
    }

    /// Bind `site` to its resolved class on first verification pass. A
    /// site's class, once set, never changes.
    pub fn set_class(&mut self, site: SiteIdx, class: C) {
        if let Some(entry) = self.entries.get_mut(site as usize) {
            if entry.class.is_none() {
                entry.class = Some(class);
            }
        }
    }

    /// The class bound to `site`, if resolved yet.
    #[must_use]
    pub fn class_of(&self, site: SiteIdx) -> Option<C> {
        self.entries.get(site as usize).and_then(|e| e.class)
    }

    /// The constructor's implicit `this`, always site `0`.
    #[must_use]
    pub const fn this_site() -> SiteIdx {
        UNINIT_THIS_SLOT
    }

    /// Number of tracked sites, including the implicit-`this` slot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `false` always — the implicit-`this` slot is present from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn this_slot_is_preregistered() {
        let map: UninitMap<u32> = UninitMap::new();
        assert_eq!(map.len(), 1);
        assert_eq!(UninitMap::<u32>::this_site(), 0);
    }

    #[test]
    fn repeated_site_returns_same_index() {
        let mut map: UninitMap<u32> = UninitMap::new();
        let a = map.site_for_addr(10);
        let b = map.site_for_addr(10);
        assert_eq!(a, b);
        let c = map.site_for_addr(20);
        assert_ne!(a, c);
    }

    #[test]
    fn class_is_set_once() {
        let mut map: UninitMap<u32> = UninitMap::new();
        let site = map.site_for_addr(10);
        map.set_class(site, 42);
        map.set_class(site, 99);
        assert_eq!(map.class_of(site), Some(42));
    }
}
