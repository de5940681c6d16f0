//! Rotating previous/current/next storage.
//!
//! The core never rotates the ring; after a step the driver calls
//! [`TimeIndices::advance`] so that "next" becomes "current".

/// Named time level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeLevel {
    /// `taum1`
    Previous,
    /// `tau`
    Current,
    /// `taup1`
    Next,
}

/// Slot numbers of the three time levels.
///
/// Always a permutation of `0..3`: the only ways to obtain one are
/// [`TimeIndices::new`] and [`TimeIndices::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeIndices {
    taum1: usize,
    tau: usize,
    taup1: usize,
}

impl Default for TimeIndices {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeIndices {
    /// `taum1 = 0`, `tau = 1`, `taup1 = 2`.
    pub const fn new() -> Self {
        Self {
            taum1: 0,
            tau: 1,
            taup1: 2,
        }
    }

    pub fn taum1(&self) -> usize {
        self.taum1
    }

    pub fn tau(&self) -> usize {
        self.tau
    }

    pub fn taup1(&self) -> usize {
        self.taup1
    }

    /// Slot holding `level`.
    #[inline]
    pub fn slot(&self, level: TimeLevel) -> usize {
        match level {
            TimeLevel::Previous => self.taum1,
            TimeLevel::Current => self.tau,
            TimeLevel::Next => self.taup1,
        }
    }

    /// Rotate: current becomes previous, next becomes current.
    pub fn advance(&mut self) {
        let old = self.taum1;
        self.taum1 = self.tau;
        self.tau = self.taup1;
        self.taup1 = old;
    }
}

/// Three buffers addressed by time level.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeRing<T> {
    slots: [T; 3],
}

impl<T: Clone> TimeRing<T> {
    /// Ring with all three slots set to `value`.
    pub fn filled(value: T) -> Self {
        Self {
            slots: [value.clone(), value.clone(), value],
        }
    }
}

impl<T> TimeRing<T> {
    pub fn from_slots(slots: [T; 3]) -> Self {
        Self { slots }
    }

    #[inline]
    pub fn get(&self, time: &TimeIndices, level: TimeLevel) -> &T {
        &self.slots[time.slot(level)]
    }

    #[inline]
    pub fn get_mut(&mut self, time: &TimeIndices, level: TimeLevel) -> &mut T {
        &mut self.slots[time.slot(level)]
    }

    /// Raw slot access.
    #[inline]
    pub fn slot(&self, index: usize) -> &T {
        &self.slots[index]
    }

    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> &mut T {
        &mut self.slots[index]
    }

    /// Borrow one level for reading and a different one for writing.
    ///
    /// # Panics
    ///
    /// If both levels map to the same slot.
    pub fn split_levels(
        &mut self,
        time: &TimeIndices,
        read: TimeLevel,
        write: TimeLevel,
    ) -> (&T, &mut T) {
        let r = time.slot(read);
        let w = time.slot(write);
        assert_ne!(r, w, "read and write time levels share a slot");
        if r < w {
            let (lo, hi) = self.slots.split_at_mut(w);
            (&lo[r], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(r);
            (&hi[0], &mut lo[w])
        }
    }

    /// Borrow two levels for reading and a third for writing.
    pub fn split_all(&mut self, time: &TimeIndices) -> (&T, &T, &mut T) {
        let [a, b, c] = &mut self.slots;
        let mut refs: [Option<&mut T>; 3] = [Some(a), Some(b), Some(c)];
        let prev = refs[time.taum1].take();
        let cur = refs[time.tau].take();
        let next = refs[time.taup1].take();
        match (prev, cur, next) {
            (Some(p), Some(c), Some(n)) => (&*p, &*c, n),
            _ => unreachable!("time indices are a permutation of 0..3"),
        }
    }
}
