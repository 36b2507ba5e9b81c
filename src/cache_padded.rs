//! Provides cache-padded atomic types.
//!
//! The stop flag is read on every poll iteration by the worker and the
//! statistics counters are bumped once per item, so each gets its own line.
use crate::loom_bindings::sync::atomic::{AtomicBool, AtomicU64};
use core::mem::{size_of, MaybeUninit};
use core::ops::Deref;

#[cfg(any(
    target_arch = "x86_64",
    target_arch = "aarch64",
    target_arch = "arm64ec",
    target_arch = "powerpc64",
))]
const ALIGN: usize = 128;

#[cfg(any(
    target_arch = "arm",
    target_arch = "mips",
    target_arch = "mips32r6",
    target_arch = "mips64",
    target_arch = "mips64r6",
    target_arch = "sparc",
    target_arch = "hexagon",
))]
const ALIGN: usize = 32;

#[cfg(target_arch = "s390x")]
const ALIGN: usize = 256;

#[cfg(not(any(
    target_arch = "x86_64",
    target_arch = "aarch64",
    target_arch = "arm64ec",
    target_arch = "powerpc64",
    target_arch = "arm",
    target_arch = "mips",
    target_arch = "mips32r6",
    target_arch = "mips64",
    target_arch = "mips64r6",
    target_arch = "sparc",
    target_arch = "hexagon",
    target_arch = "s390x",
)))]
const ALIGN: usize = 64;

macro_rules! generate_cache_padded_atomic {
    ($name:ident, $atomic:ident, $value:ty) => {
        /// Cache padded atomic. Can be dereferenced to the inner atomic.
        pub(crate) struct $name {
            atomic: $atomic,
            _align: MaybeUninit<
                [u8; if size_of::<$atomic>() > ALIGN {
                    0
                } else {
                    ALIGN - size_of::<$atomic>()
                }],
            >,
        }

        impl $name {
            /// Creates a new cache padded atomic holding `value`.
            pub(crate) fn new(value: $value) -> Self {
                Self {
                    atomic: $atomic::new(value),
                    _align: MaybeUninit::uninit(),
                }
            }
        }

        impl Deref for $name {
            type Target = $atomic;

            fn deref(&self) -> &Self::Target {
                &self.atomic
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(<$value>::default())
            }
        }
    };
}

generate_cache_padded_atomic!(CachePaddedAtomicBool, AtomicBool, bool);
generate_cache_padded_atomic!(CachePaddedAtomicU64, AtomicU64, u64);

#[cfg(all(test, not(queue_poller_loom)))]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_padded_atomics_do_not_share_a_line() {
        assert!(size_of::<CachePaddedAtomicU64>() >= ALIGN);
        assert!(size_of::<CachePaddedAtomicBool>() >= ALIGN);

        let counters = [CachePaddedAtomicU64::default(), CachePaddedAtomicU64::new(7)];

        counters[0].fetch_add(1, Ordering::Relaxed);

        assert_eq!(counters[0].load(Ordering::Relaxed), 1);
        assert_eq!(counters[1].load(Ordering::Relaxed), 7);
    }
}
